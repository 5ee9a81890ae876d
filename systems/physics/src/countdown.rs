use platformer_core::Tunables;

/// Per-level countdown that gates the exit and feeds the waiting bonus.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Countdown {
    max: i32,
    remaining: i32,
    bonus_progress: i32,
    exit_drain: i32,
    bonus_step: i32,
    frame_rate: i32,
}

impl Countdown {
    /// Creates a full countdown using the provided balance constants.
    #[must_use]
    pub fn new(tunables: &Tunables) -> Self {
        Self {
            max: tunables.max_level_time,
            remaining: tunables.max_level_time,
            bonus_progress: 0,
            exit_drain: tunables.exit_drain,
            bonus_step: tunables.bonus_progress,
            frame_rate: tunables.frame_rate.max(1),
        }
    }

    /// Refills the countdown and clears the bonus progress.
    pub fn reset(&mut self) {
        self.remaining = self.max;
        self.bonus_progress = 0;
    }

    /// Frames left before the exit opens.
    #[must_use]
    pub const fn remaining(&self) -> i32 {
        self.remaining
    }

    /// Whole seconds left, never negative.
    #[must_use]
    pub const fn seconds_remaining(&self) -> i32 {
        if self.remaining > 0 {
            self.remaining / self.frame_rate
        } else {
            0
        }
    }

    /// Reports whether the countdown ran out, which opens the exit.
    #[must_use]
    pub const fn is_expired(&self) -> bool {
        self.remaining <= 0
    }

    /// Ambient one-frame decrement, applied while the player is away from the exit.
    ///
    /// Stops once the countdown drops below zero.
    pub fn tick(&mut self) {
        if self.remaining >= 0 {
            self.remaining -= 1;
        }
    }

    /// Fast decrement applied while the player waits on the exit.
    ///
    /// Returns `true` when the accumulated waiting earns a bonus coin.
    pub fn drain_at_exit(&mut self) -> bool {
        self.remaining -= self.exit_drain;
        self.bonus_progress += self.bonus_step;

        if self.bonus_progress / self.frame_rate > 1 {
            self.bonus_progress = 0;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn short_countdown(max_level_time: i32) -> Countdown {
        Countdown::new(&Tunables {
            max_level_time,
            ..Tunables::default()
        })
    }

    #[test]
    fn ambient_tick_stops_below_zero() {
        let mut countdown = short_countdown(1);
        countdown.tick();
        assert_eq!(countdown.remaining(), 0);
        assert!(countdown.is_expired());
        countdown.tick();
        assert_eq!(countdown.remaining(), -1);
        countdown.tick();
        assert_eq!(countdown.remaining(), -1);
    }

    #[test]
    fn waiting_at_exit_awards_bonus_every_twenty_four_frames() {
        let mut countdown = Countdown::new(&Tunables::default());
        let bonuses: Vec<usize> = (1..=48)
            .filter(|_| countdown.drain_at_exit())
            .collect();
        assert_eq!(bonuses, vec![24, 48]);
        assert_eq!(countdown.remaining(), 3000 - 48 * 25);
    }

    #[test]
    fn reset_refills_and_clears_bonus_progress() {
        let mut countdown = Countdown::new(&Tunables::default());
        for _ in 0..23 {
            assert!(!countdown.drain_at_exit());
        }
        countdown.reset();
        assert_eq!(countdown.remaining(), 3000);
        assert!(!countdown.drain_at_exit());
    }

    #[test]
    fn seconds_never_go_negative() {
        let mut countdown = short_countdown(0);
        countdown.tick();
        assert_eq!(countdown.seconds_remaining(), 0);
        assert_eq!(Countdown::new(&Tunables::default()).seconds_remaining(), 50);
    }
}
