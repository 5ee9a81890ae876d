#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for platformer adapters.
//!
//! Backends receive a [`Presentation`] describing the window and an initial
//! [`Scene`], then hand every frame's input to a caller-provided closure that
//! refreshes the scene from the simulation before it is drawn.

pub mod palette;

use anyhow::Result as AnyResult;
use glam::Vec2;
use platformer_core::{Cell, Facing, GameMode};
use std::time::Duration;
use thiserror::Error;

/// RGBA color used when presenting frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
    /// Alpha channel intensity in the range 0.0..=1.0.
    pub alpha: f32,
}

impl Color {
    /// Creates a new color from floating point channels.
    #[must_use]
    pub const fn new(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Creates an opaque color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
            alpha: 1.0,
        }
    }

    /// Returns a new color lightened towards white by the provided amount.
    #[must_use]
    pub fn lighten(self, amount: f32) -> Self {
        let amount = amount.clamp(0.0, 1.0);

        Self {
            red: lighten_channel(self.red, amount),
            green: lighten_channel(self.green, amount),
            blue: lighten_channel(self.blue, amount),
            alpha: self.alpha,
        }
    }
}

fn lighten_channel(channel: f32, amount: f32) -> f32 {
    channel + (1.0 - channel) * amount
}

/// Logical input snapshot gathered by adapters before updating the scene.
///
/// Movement and jump describe held keys; the remaining flags are only set on
/// the frame the key went down.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct FrameInput {
    /// Move left is held.
    pub move_left: bool,
    /// Move right is held.
    pub move_right: bool,
    /// Jump is held.
    pub jump: bool,
    /// Confirm was pressed.
    pub confirm: bool,
    /// Cancel was pressed.
    pub cancel: bool,
    /// The player asked to close the game.
    pub quit: bool,
}

/// Drawable snapshot of a moving entity.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EntityPresentation {
    /// Top-left corner of the entity's unit hitbox, in cells.
    pub position: Vec2,
    /// Direction the entity looks towards.
    pub facing: Facing,
    /// Whether the entity moved during the last frame.
    pub moving: bool,
}

impl EntityPresentation {
    /// Creates a new entity descriptor.
    #[must_use]
    pub const fn new(position: Vec2, facing: Facing, moving: bool) -> Self {
        Self {
            position,
            facing,
            moving,
        }
    }
}

impl Default for EntityPresentation {
    fn default() -> Self {
        Self::new(Vec2::ZERO, Facing::Right, false)
    }
}

/// Head-up display values shown above the level.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Hud {
    /// Lives left.
    pub lives: u32,
    /// Lives the player started with.
    pub max_lives: u32,
    /// Coins collected in the active level.
    pub level_score: u32,
    /// Coins collected across every level.
    pub total_score: u32,
    /// Whole seconds left on the countdown.
    pub seconds_remaining: i32,
    /// One-based number of the active level.
    pub level_number: usize,
    /// Number of levels in the catalog.
    pub level_count: usize,
}

/// Everything a backend needs to draw a frame.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    columns: usize,
    rows: usize,
    cells: Vec<Cell>,
    /// The player character.
    pub player: EntityPresentation,
    /// Live enemies.
    pub enemies: Vec<EntityPresentation>,
    /// Active game mode, used to pick overlays.
    pub mode: GameMode,
    /// Whether the countdown ran out and the exit lets the player through.
    pub exit_open: bool,
    /// Head-up display values.
    pub hud: Hud,
}

impl Scene {
    /// Creates an empty scene showing the title menu.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            columns: 0,
            rows: 0,
            cells: Vec::new(),
            player: EntityPresentation::default(),
            enemies: Vec::new(),
            mode: GameMode::Menu,
            exit_open: false,
            hud: Hud::default(),
        }
    }

    /// Replaces the grid shown by the scene.
    ///
    /// `cells` must hold exactly `columns * rows` cells in row-major order.
    pub fn set_grid(
        &mut self,
        columns: usize,
        rows: usize,
        cells: &[Cell],
    ) -> Result<(), RenderingError> {
        let expected = columns.checked_mul(rows).unwrap_or(usize::MAX);
        if cells.len() != expected {
            return Err(RenderingError::CellCountMismatch {
                columns,
                rows,
                actual: cells.len(),
            });
        }

        self.columns = columns;
        self.rows = rows;
        self.cells.clear();
        self.cells.extend_from_slice(cells);
        Ok(())
    }

    /// Number of columns in the grid.
    #[must_use]
    pub const fn columns(&self) -> usize {
        self.columns
    }

    /// Number of rows in the grid.
    #[must_use]
    pub const fn rows(&self) -> usize {
        self.rows
    }

    /// Returns the cell at the provided location, if it lies inside the grid.
    #[must_use]
    pub fn cell(&self, row: usize, column: usize) -> Option<Cell> {
        if row >= self.rows || column >= self.columns {
            return None;
        }
        self.cells.get(row * self.columns + column).copied()
    }

    /// Iterates every non-air cell as `(row, column, cell)`.
    pub fn tiles(&self) -> impl Iterator<Item = (usize, usize, Cell)> + '_ {
        let columns = self.columns.max(1);
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| **cell != Cell::Air)
            .map(move |(index, cell)| (index / columns, index % columns, *cell))
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::empty()
    }
}

/// Presentation descriptor consumed by rendering backends.
#[derive(Clone, Debug, PartialEq)]
pub struct Presentation {
    /// Title used by the created window.
    pub window_title: String,
    /// Solid color used to clear each frame.
    pub clear_color: Color,
    /// Scene content that should be displayed.
    pub scene: Scene,
}

impl Presentation {
    /// Constructs a new presentation descriptor.
    #[must_use]
    pub fn new<T>(window_title: T, clear_color: Color, scene: Scene) -> Self
    where
        T: Into<String>,
    {
        Self {
            window_title: window_title.into(),
            clear_color,
            scene,
        }
    }
}

/// Rendering backend capable of presenting platformer scenes.
pub trait RenderingBackend {
    /// Runs the rendering backend until it is requested to exit.
    ///
    /// The provided `update_scene` closure receives the frame delta and the
    /// input captured by the adapter, and refreshes the scene before it is
    /// rendered. An error returned by the closure stops the loop and is
    /// returned from `run`.
    fn run<F>(self, presentation: Presentation, update_scene: F) -> AnyResult<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene) -> AnyResult<()> + 'static;
}

/// Errors that can occur when constructing rendering descriptors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RenderingError {
    /// The provided cells do not fill the grid exactly.
    #[error("a {columns}x{rows} grid needs {} cells (received {actual})", columns.saturating_mul(*rows))]
    CellCountMismatch {
        /// Requested number of columns.
        columns: usize,
        /// Requested number of rows.
        rows: usize,
        /// Number of cells provided.
        actual: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lighten_moves_channels_towards_white() {
        let color = Color::new(0.0, 0.5, 1.0, 0.25).lighten(0.5);
        assert_eq!(color, Color::new(0.5, 0.75, 1.0, 0.25));
        assert_eq!(Color::new(0.5, 0.5, 0.5, 1.0).lighten(3.0).red, 1.0);
    }

    #[test]
    fn set_grid_rejects_mismatched_cell_count() {
        let mut scene = Scene::empty();
        let error = scene
            .set_grid(3, 2, &[Cell::Wall; 5])
            .expect_err("five cells cannot fill a 3x2 grid");

        assert_eq!(
            error,
            RenderingError::CellCountMismatch {
                columns: 3,
                rows: 2,
                actual: 5
            }
        );
        assert_eq!(error.to_string(), "a 3x2 grid needs 6 cells (received 5)");
        assert_eq!(scene.columns(), 0);
    }

    #[test]
    fn tiles_skip_air_and_report_row_major_locations() {
        let mut scene = Scene::empty();
        scene
            .set_grid(
                3,
                2,
                &[
                    Cell::Air,
                    Cell::Coin,
                    Cell::Air,
                    Cell::Wall,
                    Cell::Air,
                    Cell::Exit,
                ],
            )
            .expect("valid grid");

        let tiles: Vec<_> = scene.tiles().collect();

        assert_eq!(
            tiles,
            vec![(0, 1, Cell::Coin), (1, 0, Cell::Wall), (1, 2, Cell::Exit)]
        );
        assert_eq!(scene.cell(1, 2), Some(Cell::Exit));
        assert_eq!(scene.cell(2, 0), None);
    }
}
