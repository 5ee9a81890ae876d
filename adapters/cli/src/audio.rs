use platformer_core::{AudioSink, Event, SoundCue};
use tracing::debug;

/// Audio sink that records cues in the log instead of playing them.
///
/// The macroquad dependency is built without its audio stack.
#[derive(Debug, Default)]
pub(crate) struct TracingAudio {
    played: u64,
}

impl AudioSink for TracingAudio {
    fn play(&mut self, cue: SoundCue) {
        self.played += 1;
        debug!(cue = cue.name(), played = self.played, "sound cue");
    }
}

/// Plays the cue of every event that has one, in event order.
pub(crate) fn dispatch(events: &[Event], sink: &mut impl AudioSink) {
    for cue in events.iter().filter_map(Event::sound_cue) {
        sink.play(cue);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use platformer_core::GameMode;

    #[derive(Default)]
    struct Recorder(Vec<SoundCue>);

    impl AudioSink for Recorder {
        fn play(&mut self, cue: SoundCue) {
            self.0.push(cue);
        }
    }

    #[test]
    fn silent_events_are_skipped() {
        let events = [
            Event::CoinCollected { level_index: 0 },
            Event::ModeChanged {
                mode: GameMode::Death,
            },
            Event::PlayerDied { lives_remaining: 0 },
            Event::GameOver,
        ];
        let mut recorder = Recorder::default();

        dispatch(&events, &mut recorder);

        assert_eq!(
            recorder.0,
            vec![SoundCue::Coin, SoundCue::PlayerDeath, SoundCue::GameOver]
        );
    }

    #[test]
    fn tracing_sink_counts_cues() {
        let mut audio = TracingAudio::default();
        dispatch(&[Event::EnemyDefeated { count: 2 }], &mut audio);
        assert_eq!(audio.played, 1);
    }
}
