#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the platformer engine.
//!
//! This crate defines the vocabulary that connects the level store, the
//! entity physics systems, the game flow state machine and the presentation
//! adapters. The world owns a grid of [`Cell`] values, entities move with
//! continuous positions and collide through unit [`Hitbox`] rectangles, and
//! every gameplay outcome worth reacting to is broadcast as an [`Event`].
//! Adapters translate events into [`SoundCue`] values for an [`AudioSink`]
//! and never feed anything back into the simulation except input.

use glam::Vec2;
use serde::Deserialize;

/// Vertical distance used when probing for ground below or a ceiling above a hitbox.
pub const PROBE_OFFSET: f32 = 0.1;

/// Closed set of tile kinds that may occupy a level grid position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Cell {
    /// Empty space entities can move through.
    Air,
    /// Solid block that stops movement.
    Wall,
    /// Player spawn marker, consumed when the player spawns.
    Player,
    /// Enemy spawn marker, consumed when enemies spawn.
    Enemy,
    /// Collectible coin worth one point.
    Coin,
    /// Hazard that kills the player on contact.
    Spike,
    /// Level exit.
    Exit,
}

impl Cell {
    /// Every cell kind in glyph table order.
    pub const ALL: [Cell; 7] = [
        Cell::Air,
        Cell::Wall,
        Cell::Player,
        Cell::Enemy,
        Cell::Coin,
        Cell::Spike,
        Cell::Exit,
    ];

    /// Glyph used for the cell in level files.
    #[must_use]
    pub const fn glyph(self) -> char {
        match self {
            Self::Air => '-',
            Self::Wall => '#',
            Self::Player => '@',
            Self::Enemy => '&',
            Self::Coin => '*',
            Self::Spike => '^',
            Self::Exit => 'E',
        }
    }

    /// Resolves a level file glyph, returning `None` for characters outside the alphabet.
    #[must_use]
    pub const fn from_glyph(glyph: char) -> Option<Self> {
        match glyph {
            '-' => Some(Self::Air),
            '#' => Some(Self::Wall),
            '@' => Some(Self::Player),
            '&' => Some(Self::Enemy),
            '*' => Some(Self::Coin),
            '^' => Some(Self::Spike),
            'E' => Some(Self::Exit),
            _ => None,
        }
    }
}

/// Location of a single grid cell expressed as column and row coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellCoord {
    column: u32,
    row: u32,
}

impl CellCoord {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }

    /// Continuous position of the cell's top-left corner.
    #[must_use]
    pub fn to_position(self) -> Vec2 {
        Vec2::new(self.column as f32, self.row as f32)
    }
}

/// Unit-sized axis-aligned rectangle anchored at its top-left corner.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hitbox {
    origin: Vec2,
}

impl Hitbox {
    /// Edge length shared by every hitbox and grid cell.
    pub const SIZE: f32 = 1.0;

    /// Hitbox of an entity positioned at the provided continuous coordinate.
    #[must_use]
    pub const fn at(origin: Vec2) -> Self {
        Self { origin }
    }

    /// Hitbox covering the grid cell at the provided row and column.
    #[must_use]
    pub fn of_cell(row: i64, column: i64) -> Self {
        Self::at(Vec2::new(column as f32, row as f32))
    }

    /// Reports whether two hitboxes share interior area.
    ///
    /// Rectangles that merely touch along an edge do not overlap.
    #[must_use]
    pub fn overlaps(&self, other: &Hitbox) -> bool {
        self.origin.x < other.origin.x + Self::SIZE
            && self.origin.x + Self::SIZE > other.origin.x
            && self.origin.y < other.origin.y + Self::SIZE
            && self.origin.y + Self::SIZE > other.origin.y
    }
}

/// Horizontal direction an entity is looking towards.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Facing {
    /// Looking towards decreasing columns.
    Left,
    /// Looking towards increasing columns.
    Right,
}

impl Facing {
    /// Returns the opposite direction.
    #[must_use]
    pub const fn reversed(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Sign applied to horizontal speeds travelling in this direction.
    #[must_use]
    pub const fn sign(self) -> f32 {
        match self {
            Self::Left => -1.0,
            Self::Right => 1.0,
        }
    }
}

/// Describes the active mode of the game session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GameMode {
    /// Title menu awaiting confirmation.
    Menu,
    /// Active gameplay.
    Playing,
    /// Gameplay suspended by the player.
    Paused,
    /// The player just died and awaits confirmation to continue.
    Death,
    /// No lives remain.
    GameOver,
    /// Every level of the catalog was completed.
    Victory,
}

/// Events broadcast by the simulation after processing a frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Event {
    /// Confirms that a level was decoded into the grid and its entities spawned.
    LevelLoaded {
        /// Catalog index of the loaded level.
        index: usize,
        /// Number of columns in the decoded grid.
        columns: usize,
        /// Number of rows in the decoded grid.
        rows: usize,
    },
    /// Reports that the player picked up a coin cell.
    CoinCollected {
        /// Catalog index of the level the coin was collected in.
        level_index: usize,
    },
    /// Reports that waiting at the exit earned a bonus coin.
    BonusCoinAwarded {
        /// Catalog index of the level the bonus was awarded in.
        level_index: usize,
    },
    /// Reports that the player stomped one or more enemies.
    EnemyDefeated {
        /// Number of enemies removed by the stomp.
        count: usize,
    },
    /// Reports that the player lost a life.
    PlayerDied {
        /// Lives left after the death was applied.
        lives_remaining: u32,
    },
    /// Reports that the player left the level through its exit.
    ExitReached {
        /// Catalog index of the level that was exited.
        level_index: usize,
    },
    /// Announces that the player ran out of lives.
    GameOver,
    /// Announces that the final level of the catalog was completed.
    Victory,
    /// Announces that the session entered a new mode.
    ModeChanged {
        /// Mode that became active.
        mode: GameMode,
    },
}

impl Event {
    /// Audio cue that accompanies the event, if any.
    #[must_use]
    pub const fn sound_cue(&self) -> Option<SoundCue> {
        match self {
            Self::CoinCollected { .. } | Self::BonusCoinAwarded { .. } => Some(SoundCue::Coin),
            Self::EnemyDefeated { .. } => Some(SoundCue::EnemyKilled),
            Self::PlayerDied { .. } => Some(SoundCue::PlayerDeath),
            Self::ExitReached { .. } => Some(SoundCue::LevelExit),
            Self::GameOver => Some(SoundCue::GameOver),
            Self::LevelLoaded { .. } | Self::Victory | Self::ModeChanged { .. } => None,
        }
    }
}

/// Named sounds the simulation asks the audio layer to play.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SoundCue {
    /// A coin was collected.
    Coin,
    /// An enemy was defeated.
    EnemyKilled,
    /// The player died.
    PlayerDeath,
    /// The player left a level.
    LevelExit,
    /// The game ended without lives left.
    GameOver,
}

impl SoundCue {
    /// Stable name of the cue, matching the sound asset it refers to.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Coin => "coin",
            Self::EnemyKilled => "kill_enemy",
            Self::PlayerDeath => "player_death",
            Self::LevelExit => "exit",
            Self::GameOver => "game_over",
        }
    }
}

/// Fire-and-forget audio playback collaborator.
pub trait AudioSink {
    /// Starts playing the provided cue without waiting for completion.
    fn play(&mut self, cue: SoundCue);
}

/// Physics and balance constants consumed by the simulation.
///
/// Distances are measured in cells and times in frames.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct Tunables {
    /// Horizontal distance the player covers per frame while a move input is held.
    pub player_speed: f32,
    /// Upward velocity applied when the player jumps.
    pub jump_strength: f32,
    /// Downward acceleration added to the player's velocity every frame.
    pub gravity: f32,
    /// Downward velocity applied when the player bumps into a ceiling.
    pub ceiling_bounce: f32,
    /// Upward velocity applied after stomping an enemy.
    pub enemy_bounce: f32,
    /// Horizontal distance an enemy patrols per frame.
    pub enemy_speed: f32,
    /// Lives the player starts with.
    pub max_lives: u32,
    /// Countdown value every level starts with.
    pub max_level_time: i32,
    /// Countdown units drained per frame while standing on the exit.
    pub exit_drain: i32,
    /// Bonus progress accumulated per frame while standing on the exit.
    pub bonus_progress: i32,
    /// Nominal simulation rate in frames per second.
    pub frame_rate: i32,
}

impl Default for Tunables {
    fn default() -> Self {
        Self {
            player_speed: 0.1,
            jump_strength: 0.3,
            gravity: 0.01,
            ceiling_bounce: 0.05,
            enemy_bounce: 0.1,
            enemy_speed: 0.07,
            max_lives: 3,
            max_level_time: 50 * 60,
            exit_drain: 25,
            bonus_progress: 5,
            frame_rate: 60,
        }
    }
}
