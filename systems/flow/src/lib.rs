#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Game flow state machine sequencing menus, play, deaths and level changes.
//!
//! A [`Session`] owns the level store and every entity for the lifetime of the
//! process. Adapters feed it one [`FlowInput`] per frame and read its state
//! back afterwards; everything that happened during the frame is reported as
//! [`Event`] values.

use platformer_core::{Event, GameMode, Tunables};
use platformer_system_physics::{Countdown, EnemyRoster, Player};
use platformer_world::{LevelLoadError, LevelStore, LoadOutcome};
use tracing::{debug, info};

/// Logical actions sampled by the input layer for a single frame.
///
/// Movement and jump report whether the action is held; `confirm` and
/// `cancel` report whether the action was pressed this frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FlowInput {
    /// Move towards decreasing columns.
    pub move_left: bool,
    /// Move towards increasing columns.
    pub move_right: bool,
    /// Jump when standing on the ground.
    pub jump: bool,
    /// Accept the current prompt.
    pub confirm: bool,
    /// Pause, resume, or back out of the victory screen.
    pub cancel: bool,
}

/// Outcome of the player's physics step that the session has to react to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Outcome {
    Died,
    Exited,
}

/// Complete game session: level store, entities, countdown and active mode.
#[derive(Debug)]
pub struct Session {
    level: LevelStore,
    player: Player,
    enemies: EnemyRoster,
    countdown: Countdown,
    mode: GameMode,
    frame: u64,
    tunables: Tunables,
}

impl Session {
    /// Creates a session waiting in the menu.
    ///
    /// No level is decoded until the player confirms the menu.
    #[must_use]
    pub fn new(level: LevelStore, tunables: Tunables) -> Self {
        let player = Player::new(tunables, level.level_count());
        Self {
            level,
            player,
            enemies: EnemyRoster::new(&tunables),
            countdown: Countdown::new(&tunables),
            mode: GameMode::Menu,
            frame: 0,
            tunables,
        }
    }

    /// Chooses the level the menu starts from.
    ///
    /// Out-of-range indices fall back to the first level.
    pub fn select_level(&mut self, index: usize) {
        self.level.select_level(index);
    }

    /// Runs one frame.
    ///
    /// Only level decoding can fail; such failures are fatal for the session.
    pub fn advance(&mut self, input: FlowInput, out: &mut Vec<Event>) -> Result<(), LevelLoadError> {
        self.frame = self.frame.wrapping_add(1);

        match self.mode {
            GameMode::Menu => {
                if input.confirm && self.load(0, out)? {
                    self.enter(GameMode::Playing, out);
                }
            }
            GameMode::Playing => self.play(input, out)?,
            GameMode::Paused => {
                if input.cancel {
                    self.enter(GameMode::Playing, out);
                }
            }
            GameMode::Death => {
                self.player.update_gravity(&self.level);
                if input.confirm {
                    if self.player.lives() > 0 {
                        if self.load(0, out)? {
                            self.enter(GameMode::Playing, out);
                        }
                    } else {
                        info!(score = self.player.total_score(), "game over");
                        out.push(Event::GameOver);
                        self.enter(GameMode::GameOver, out);
                    }
                }
            }
            GameMode::GameOver => {
                if input.confirm {
                    self.restart();
                    if self.load(0, out)? {
                        self.enter(GameMode::Playing, out);
                    }
                }
            }
            GameMode::Victory => {
                if input.confirm || input.cancel {
                    self.restart();
                    self.enter(GameMode::Menu, out);
                }
            }
        }

        Ok(())
    }

    fn play(&mut self, input: FlowInput, out: &mut Vec<Event>) -> Result<(), LevelLoadError> {
        self.player.set_moving(false);
        // Right before left: holding both keys leaves the player facing left.
        if input.move_right {
            self.player.move_horizontally(self.tunables.player_speed, &self.level);
        }
        if input.move_left {
            self.player.move_horizontally(-self.tunables.player_speed, &self.level);
        }

        let grounded = self.player.probe_ground(&self.level);
        self.player.set_on_ground(grounded);
        if input.jump {
            let _ = self.player.try_jump();
        }

        let first = out.len();
        self.player.update(
            &mut self.level,
            &mut self.enemies,
            &mut self.countdown,
            out,
        );
        self.enemies.update_all(&self.level);

        let outcome = out[first..].iter().find_map(|event| match event {
            Event::PlayerDied { .. } => Some(Outcome::Died),
            Event::ExitReached { .. } => Some(Outcome::Exited),
            _ => None,
        });
        match outcome {
            Some(Outcome::Died) => self.enter(GameMode::Death, out),
            Some(Outcome::Exited) => {
                let _ = self.load(1, out)?;
            }
            None => {}
        }

        if input.cancel && self.mode == GameMode::Playing {
            self.enter(GameMode::Paused, out);
        }
        Ok(())
    }

    /// Loads the level `advance_by` entries after the active one and respawns its entities.
    ///
    /// Returns `false` when the catalog ran out, in which case the session
    /// has already switched to [`GameMode::Victory`].
    fn load(&mut self, advance_by: usize, out: &mut Vec<Event>) -> Result<bool, LevelLoadError> {
        match self.level.load_level(advance_by)? {
            LoadOutcome::Loaded { index } => {
                let _ = self.player.spawn(&mut self.level);
                let _ = self.enemies.spawn_all(&mut self.level);
                self.countdown.reset();
                out.push(Event::LevelLoaded {
                    index,
                    columns: self.level.columns(),
                    rows: self.level.rows(),
                });
                Ok(true)
            }
            LoadOutcome::CatalogExhausted => {
                info!(score = self.player.total_score(), "every level completed");
                out.push(Event::Victory);
                self.enter(GameMode::Victory, out);
                Ok(false)
            }
        }
    }

    fn restart(&mut self) {
        self.level.reset_level_index();
        self.player.reset_stats();
    }

    fn enter(&mut self, mode: GameMode, out: &mut Vec<Event>) {
        if self.mode == mode {
            return;
        }
        debug!(from = ?self.mode, to = ?mode, frame = self.frame, "mode changed");
        self.mode = mode;
        out.push(Event::ModeChanged { mode });
    }

    /// Level store holding the active grid.
    #[must_use]
    pub const fn level(&self) -> &LevelStore {
        &self.level
    }

    /// The player character.
    #[must_use]
    pub const fn player(&self) -> &Player {
        &self.player
    }

    /// Live enemies of the active level.
    #[must_use]
    pub const fn enemies(&self) -> &EnemyRoster {
        &self.enemies
    }

    /// Countdown of the active level.
    #[must_use]
    pub const fn countdown(&self) -> &Countdown {
        &self.countdown
    }

    /// Active mode.
    #[must_use]
    pub const fn mode(&self) -> GameMode {
        self.mode
    }

    /// Number of frames advanced so far.
    #[must_use]
    pub const fn frame(&self) -> u64 {
        self.frame
    }
}
