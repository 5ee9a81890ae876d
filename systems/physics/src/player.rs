use glam::Vec2;
use platformer_core::{Cell, Event, Facing, Tunables, PROBE_OFFSET};
use platformer_world::{ColliderLookup, LevelStore};
use tracing::warn;

use crate::{Countdown, EnemyRoster};

/// Player character; persists across levels for the whole process.
#[derive(Clone, Debug)]
pub struct Player {
    position: Vec2,
    y_velocity: f32,
    on_ground: bool,
    facing: Facing,
    moving: bool,
    lives: u32,
    level_scores: Vec<u32>,
    tunables: Tunables,
}

impl Player {
    /// Creates a player with full lives and one zeroed score slot per level.
    #[must_use]
    pub fn new(tunables: Tunables, level_count: usize) -> Self {
        Self {
            position: Vec2::ZERO,
            y_velocity: 0.0,
            on_ground: false,
            facing: Facing::Right,
            moving: false,
            lives: tunables.max_lives,
            level_scores: vec![0; level_count],
            tunables,
        }
    }

    /// Restores full lives and clears every level score.
    pub fn reset_stats(&mut self) {
        self.lives = self.tunables.max_lives;
        self.level_scores.fill(0);
    }

    /// Moves the player onto the level's player marker, consuming the marker.
    ///
    /// Returns `false` and keeps the current position when the level has no marker.
    pub fn spawn(&mut self, level: &mut LevelStore) -> bool {
        self.y_velocity = 0.0;
        match level.take_first_marker(Cell::Player) {
            Some(coord) => {
                self.position = coord.to_position();
                true
            }
            None => {
                warn!(level = level.level_index(), "level has no player spawn marker");
                false
            }
        }
    }

    /// Attempts to move horizontally by `delta`.
    ///
    /// A move into a wall is rejected and the player snaps to the nearest
    /// whole column instead.
    pub fn move_horizontally(&mut self, delta: f32, level: &LevelStore) {
        let next = Vec2::new(self.position.x + delta, self.position.y);
        if level.is_colliding(next, Cell::Wall) {
            self.position.x = self.position.x.round();
            return;
        }

        self.position.x = next.x;
        if delta > 0.0 {
            self.facing = Facing::Right;
        } else if delta < 0.0 {
            self.facing = Facing::Left;
        }
        if delta != 0.0 {
            self.moving = true;
        }
    }

    /// Reports whether solid ground sits right below the player.
    #[must_use]
    pub fn probe_ground(&self, level: &LevelStore) -> bool {
        level.is_colliding(self.position + Vec2::new(0.0, PROBE_OFFSET), Cell::Wall)
    }

    /// Starts a jump when standing on the ground.
    pub fn try_jump(&mut self) -> bool {
        if self.on_ground {
            self.y_velocity = -self.tunables.jump_strength;
        }
        self.on_ground
    }

    /// Integrates gravity for one frame.
    ///
    /// Position is advanced by the current velocity before gravity is added.
    /// Landing zeroes the velocity and snaps the player to the nearest whole row.
    pub fn update_gravity(&mut self, level: &LevelStore) {
        let ceiling_probe = self.position - Vec2::new(0.0, PROBE_OFFSET);
        if self.y_velocity < 0.0 && level.is_colliding(ceiling_probe, Cell::Wall) {
            self.y_velocity = self.tunables.ceiling_bounce;
        }

        self.position.y += self.y_velocity;
        self.y_velocity += self.tunables.gravity;

        self.on_ground = self.probe_ground(level);
        if self.on_ground {
            self.y_velocity = 0.0;
            self.position.y = self.position.y.round();
        }
    }

    /// Runs gravity and every interaction with the level for one frame.
    ///
    /// Processing stops as soon as the player reaches an open exit or dies,
    /// so at most one of [`Event::ExitReached`] and [`Event::PlayerDied`] is
    /// emitted per frame.
    pub fn update(
        &mut self,
        level: &mut LevelStore,
        enemies: &mut EnemyRoster,
        countdown: &mut Countdown,
        out: &mut Vec<Event>,
    ) {
        self.update_gravity(level);
        let level_index = level.level_index();

        if let ColliderLookup::Found { cell, .. } =
            level.colliding_cell_mut(self.position, Cell::Coin)
        {
            *cell = Cell::Air;
            self.increment_score(level_index);
            out.push(Event::CoinCollected { level_index });
        }

        if level.is_colliding(self.position, Cell::Exit) {
            if countdown.is_expired() {
                out.push(Event::ExitReached { level_index });
                return;
            }
            if countdown.drain_at_exit() {
                self.increment_score(level_index);
                out.push(Event::BonusCoinAwarded { level_index });
            }
        } else {
            countdown.tick();
        }

        let fell_out = self.position.y > level.rows() as f32;
        if fell_out || level.is_colliding(self.position, Cell::Spike) {
            self.kill(level_index, out);
            return;
        }

        if enemies.is_colliding_with(self.position) {
            if self.y_velocity > 0.0 {
                let count = enemies.remove_colliding(self.position);
                self.increment_score(level_index);
                self.y_velocity = -self.tunables.enemy_bounce;
                out.push(Event::EnemyDefeated { count });
            } else {
                self.kill(level_index, out);
            }
        }
    }

    /// Takes a life and forfeits the coins collected in the current level.
    ///
    /// The position is left untouched; respawning happens on the next level load.
    pub fn kill(&mut self, level_index: usize, out: &mut Vec<Event>) {
        self.lives = self.lives.saturating_sub(1);
        if let Some(score) = self.level_scores.get_mut(level_index) {
            *score = 0;
        }
        out.push(Event::PlayerDied {
            lives_remaining: self.lives,
        });
    }

    fn increment_score(&mut self, level_index: usize) {
        if let Some(score) = self.level_scores.get_mut(level_index) {
            *score += 1;
        }
    }

    /// Position of the player's top-left corner.
    #[must_use]
    pub const fn position(&self) -> Vec2 {
        self.position
    }

    /// Teleports the player.
    pub fn set_position(&mut self, position: Vec2) {
        self.position = position;
    }

    /// Vertical velocity in cells per frame; positive values point down.
    #[must_use]
    pub const fn y_velocity(&self) -> f32 {
        self.y_velocity
    }

    /// Overrides the vertical velocity.
    pub fn set_y_velocity(&mut self, y_velocity: f32) {
        self.y_velocity = y_velocity;
    }

    /// Reports whether the player stood on ground at the last probe.
    #[must_use]
    pub const fn is_on_ground(&self) -> bool {
        self.on_ground
    }

    /// Records the result of a ground probe.
    pub fn set_on_ground(&mut self, on_ground: bool) {
        self.on_ground = on_ground;
    }

    /// Direction the player is looking towards.
    #[must_use]
    pub const fn facing(&self) -> Facing {
        self.facing
    }

    /// Reports whether the player moved horizontally this frame.
    #[must_use]
    pub const fn is_moving(&self) -> bool {
        self.moving
    }

    /// Overrides the moving flag.
    pub fn set_moving(&mut self, moving: bool) {
        self.moving = moving;
    }

    /// Lives left.
    #[must_use]
    pub const fn lives(&self) -> u32 {
        self.lives
    }

    /// Lives the player starts with.
    #[must_use]
    pub const fn max_lives(&self) -> u32 {
        self.tunables.max_lives
    }

    /// Coins collected in the level at `level_index`.
    #[must_use]
    pub fn score(&self, level_index: usize) -> u32 {
        self.level_scores.get(level_index).copied().unwrap_or(0)
    }

    /// Coins collected across every level.
    #[must_use]
    pub fn total_score(&self) -> u32 {
        self.level_scores.iter().sum()
    }
}
