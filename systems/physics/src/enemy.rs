use glam::Vec2;
use platformer_core::{Cell, Facing, Hitbox, Tunables};
use platformer_world::LevelStore;
use tracing::debug;

/// Enemy patrolling horizontally until it bumps into a wall.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Enemy {
    position: Vec2,
    facing: Facing,
}

impl Enemy {
    /// Creates an enemy at the provided position.
    #[must_use]
    pub const fn new(position: Vec2, facing: Facing) -> Self {
        Self { position, facing }
    }

    /// Advances the patrol by one frame.
    ///
    /// An enemy that would step into a wall turns around instead of moving.
    pub fn update(&mut self, level: &LevelStore, speed: f32) {
        let next = Vec2::new(self.position.x + self.facing.sign() * speed, self.position.y);
        if level.is_colliding(next, Cell::Wall) {
            self.facing = self.facing.reversed();
        } else {
            self.position = next;
        }
    }

    /// Current position of the enemy's top-left corner.
    #[must_use]
    pub const fn position(&self) -> Vec2 {
        self.position
    }

    /// Direction the enemy patrols towards.
    #[must_use]
    pub const fn facing(&self) -> Facing {
        self.facing
    }

    /// Unit hitbox anchored at the enemy's position.
    #[must_use]
    pub const fn hitbox(&self) -> Hitbox {
        Hitbox::at(self.position)
    }
}

/// Live enemies of the active level.
#[derive(Clone, Debug, Default)]
pub struct EnemyRoster {
    enemies: Vec<Enemy>,
    speed: f32,
}

impl EnemyRoster {
    /// Creates an empty roster whose enemies patrol at the configured speed.
    #[must_use]
    pub fn new(tunables: &Tunables) -> Self {
        Self {
            enemies: Vec::new(),
            speed: tunables.enemy_speed,
        }
    }

    /// Rebuilds the roster from the enemy markers of the loaded level.
    ///
    /// Markers are consumed, leaving air behind. Returns the number of spawned enemies.
    pub fn spawn_all(&mut self, level: &mut LevelStore) -> usize {
        self.enemies = level
            .take_all_markers(Cell::Enemy)
            .into_iter()
            .map(|coord| Enemy::new(coord.to_position(), Facing::Right))
            .collect();
        debug!(count = self.enemies.len(), "enemies spawned");
        self.enemies.len()
    }

    /// Advances every enemy's patrol by one frame.
    pub fn update_all(&mut self, level: &LevelStore) {
        for enemy in &mut self.enemies {
            enemy.update(level, self.speed);
        }
    }

    /// Reports whether any live enemy overlaps a unit hitbox at `position`.
    #[must_use]
    pub fn is_colliding_with(&self, position: Vec2) -> bool {
        let hitbox = Hitbox::at(position);
        self.enemies
            .iter()
            .any(|enemy| enemy.hitbox().overlaps(&hitbox))
    }

    /// Removes every enemy overlapping a unit hitbox at `position`.
    ///
    /// Returns the number of removed enemies.
    pub fn remove_colliding(&mut self, position: Vec2) -> usize {
        let hitbox = Hitbox::at(position);
        let before = self.enemies.len();
        self.enemies.retain(|enemy| !enemy.hitbox().overlaps(&hitbox));
        before - self.enemies.len()
    }

    /// Iterates the live enemies.
    pub fn iter(&self) -> impl Iterator<Item = &Enemy> {
        self.enemies.iter()
    }

    /// Number of live enemies.
    #[must_use]
    pub fn len(&self) -> usize {
        self.enemies.len()
    }

    /// Reports whether every enemy has been defeated.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.enemies.is_empty()
    }
}
