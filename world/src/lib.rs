#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative level state for the platformer.
//!
//! The [`LevelStore`] owns the catalog of raw level definitions and the grid
//! of the level currently being played. Every moving entity asks it whether
//! its hitbox touches a given kind of cell, and the few interactions that
//! change the level (coins disappearing, spawn markers being consumed) go
//! through it as well.

pub mod catalog;
pub mod grid;
pub mod rle;

use glam::Vec2;
use platformer_core::{Cell, CellCoord, Hitbox};
use tracing::{info, warn};

pub use catalog::{LevelCatalog, LevelLoadError};
pub use grid::TileGrid;
pub use rle::DecodeError;

/// Result of asking the store to load a level.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The level at the provided catalog index was decoded into the grid.
    Loaded {
        /// Catalog index of the loaded level.
        index: usize,
    },
    /// The requested index moved past the last level; the index was reset to zero.
    CatalogExhausted,
}

/// Result of looking up the cell a hitbox collides with.
#[derive(Debug, PartialEq, Eq)]
pub enum ColliderLookup<'a> {
    /// A cell of the requested kind truly overlaps the hitbox.
    Found {
        /// Location of the overlapping cell.
        coord: CellCoord,
        /// Mutable handle to the overlapping cell.
        cell: &'a mut Cell,
    },
    /// No overlapping cell of the requested kind exists.
    Approximate {
        /// Cell containing the hitbox origin, when it lies inside the grid.
        coord: Option<CellCoord>,
    },
}

/// Owns the level catalog and the grid of the active level.
#[derive(Clone, Debug)]
pub struct LevelStore {
    catalog: LevelCatalog,
    level_index: usize,
    grid: TileGrid,
}

impl LevelStore {
    /// Creates a store positioned at the first level, with nothing decoded yet.
    #[must_use]
    pub fn new(catalog: LevelCatalog) -> Self {
        Self {
            catalog,
            level_index: 0,
            grid: TileGrid::empty(),
        }
    }

    /// Reports whether the location lies inside the active grid.
    #[must_use]
    pub fn is_inside_level(&self, row: i64, column: i64) -> bool {
        usize::try_from(row).map_or(false, |row| row < self.grid.rows())
            && usize::try_from(column).map_or(false, |column| column < self.grid.columns())
    }

    /// Returns the cell at the provided location.
    ///
    /// # Panics
    ///
    /// Panics when the location lies outside the active grid. Gate calls
    /// behind [`LevelStore::is_inside_level`].
    #[must_use]
    pub fn cell(&self, row: usize, column: usize) -> Cell {
        self.grid.cell(row, column)
    }

    /// Overwrites the cell at the provided location.
    ///
    /// # Panics
    ///
    /// Panics when the location lies outside the active grid.
    pub fn set_cell(&mut self, row: usize, column: usize, cell: Cell) {
        *self.grid.cell_mut(row, column) = cell;
    }

    /// Returns the cell at the provided coordinate, if it lies inside the grid.
    #[must_use]
    pub fn get(&self, coord: CellCoord) -> Option<Cell> {
        self.grid.get(coord.row() as usize, coord.column() as usize)
    }

    /// Reports whether a unit hitbox at `position` overlaps any cell of `kind`.
    #[must_use]
    pub fn is_colliding(&self, position: Vec2, kind: Cell) -> bool {
        self.find_colliding(position, kind).is_some()
    }

    /// Looks up the first cell of `kind` that a unit hitbox at `position` overlaps.
    pub fn colliding_cell_mut(&mut self, position: Vec2, kind: Cell) -> ColliderLookup<'_> {
        match self.find_colliding(position, kind) {
            Some(coord) => ColliderLookup::Found {
                coord,
                cell: self
                    .grid
                    .cell_mut(coord.row() as usize, coord.column() as usize),
            },
            None => {
                let row = position.y.floor() as i64;
                let column = position.x.floor() as i64;
                let coord = self
                    .is_inside_level(row, column)
                    .then(|| CellCoord::new(column as u32, row as u32));
                ColliderLookup::Approximate { coord }
            }
        }
    }

    /// Replaces the first cell of `kind` in row-major order with air and returns its location.
    pub fn take_first_marker(&mut self, kind: Cell) -> Option<CellCoord> {
        let coord = self
            .grid
            .iter()
            .find_map(|(coord, cell)| (cell == kind).then_some(coord))?;
        self.set_cell(coord.row() as usize, coord.column() as usize, Cell::Air);
        Some(coord)
    }

    /// Replaces every cell of `kind` with air and returns their locations in row-major order.
    pub fn take_all_markers(&mut self, kind: Cell) -> Vec<CellCoord> {
        let coords: Vec<CellCoord> = self
            .grid
            .iter()
            .filter_map(|(coord, cell)| (cell == kind).then_some(coord))
            .collect();
        for coord in &coords {
            self.set_cell(coord.row() as usize, coord.column() as usize, Cell::Air);
        }
        coords
    }

    /// Advances the active level index and decodes the level it selects.
    ///
    /// Moving past the last level resets the index to zero and reports
    /// [`LoadOutcome::CatalogExhausted`] without touching the grid.
    pub fn load_level(&mut self, advance_by: usize) -> Result<LoadOutcome, LevelLoadError> {
        self.level_index = self.level_index.saturating_add(advance_by);
        if self.level_index >= self.catalog.len() {
            info!(levels = self.catalog.len(), "level catalog exhausted");
            self.level_index = 0;
            return Ok(LoadOutcome::CatalogExhausted);
        }

        let index = self.level_index;
        let definition = self.catalog.definition(index).ok_or(LevelLoadError::Empty)?;
        let grid = rle::decode_level(definition)
            .map_err(|source| LevelLoadError::Decode { index, source })?;
        info!(
            index,
            rows = grid.rows(),
            columns = grid.columns(),
            "level loaded"
        );
        self.grid = grid;
        Ok(LoadOutcome::Loaded { index })
    }

    /// Selects the level the next load starts from.
    ///
    /// Indices beyond the catalog fall back to the first level.
    pub fn select_level(&mut self, index: usize) {
        if index >= self.catalog.len() {
            warn!(
                index,
                max = self.catalog.len().saturating_sub(1),
                "level index out of range, using the first level"
            );
            self.level_index = 0;
        } else {
            self.level_index = index;
        }
    }

    /// Rewinds the active level index to the first level.
    pub fn reset_level_index(&mut self) {
        self.level_index = 0;
    }

    /// Catalog index of the active level.
    #[must_use]
    pub const fn level_index(&self) -> usize {
        self.level_index
    }

    /// Number of levels in the catalog.
    #[must_use]
    pub fn level_count(&self) -> usize {
        self.catalog.len()
    }

    /// Grid of the active level.
    #[must_use]
    pub const fn grid(&self) -> &TileGrid {
        &self.grid
    }

    /// Number of rows in the active grid.
    #[must_use]
    pub const fn rows(&self) -> usize {
        self.grid.rows()
    }

    /// Number of columns in the active grid.
    #[must_use]
    pub const fn columns(&self) -> usize {
        self.grid.columns()
    }

    fn find_colliding(&self, position: Vec2, kind: Cell) -> Option<CellCoord> {
        let hitbox = Hitbox::at(position);

        for row in probe_span(position.y) {
            for column in probe_span(position.x) {
                if !self.is_inside_level(row, column) {
                    continue;
                }
                if self.cell(row as usize, column as usize) != kind {
                    continue;
                }
                if hitbox.overlaps(&Hitbox::of_cell(row, column)) {
                    return Some(CellCoord::new(column as u32, row as u32));
                }
            }
        }
        None
    }
}

/// Grid indices along one axis that a unit hitbox starting at `origin` may touch.
///
/// Starts one cell before the hitbox and keeps every index strictly below
/// `origin + 1`, so a fractional origin also reaches the cell under the far edge.
fn probe_span(origin: f32) -> std::ops::Range<i64> {
    let first = (origin - Hitbox::SIZE).floor() as i64;
    let end = (origin + Hitbox::SIZE).ceil() as i64;
    first..end
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_with(definition: &str) -> LevelStore {
        let mut store = LevelStore::new(LevelCatalog::parse(definition).expect("catalog"));
        let outcome = store.load_level(0).expect("loads");
        assert_eq!(outcome, LoadOutcome::Loaded { index: 0 });
        store
    }

    #[test]
    fn inside_level_respects_dimensions() {
        let store = store_with("4#|4#|4#.");
        assert!(store.is_inside_level(0, 0));
        assert!(store.is_inside_level(2, 3));
        assert!(!store.is_inside_level(3, 0));
        assert!(!store.is_inside_level(0, 4));
        assert!(!store.is_inside_level(-1, 0));
        assert!(!store.is_inside_level(0, -1));
    }

    #[test]
    fn aligned_hitbox_collides_with_its_own_cell() {
        let store = store_with("5-|2-*2-|5-.");
        assert!(store.is_colliding(Vec2::new(2.0, 1.0), Cell::Coin));
    }

    #[test]
    fn hitbox_one_cell_away_does_not_collide() {
        let store = store_with("5-|2-*2-|5-.");
        for position in [
            Vec2::new(1.0, 1.0),
            Vec2::new(3.0, 1.0),
            Vec2::new(2.0, 0.0),
            Vec2::new(2.0, 2.0),
        ] {
            assert!(
                !store.is_colliding(position, Cell::Coin),
                "unexpected collision at {position:?}"
            );
        }
    }

    #[test]
    fn fractional_hitbox_reaches_cell_under_far_edge() {
        let store = store_with("3-|3-|3#.");
        assert!(store.is_colliding(Vec2::new(1.0, 1.1), Cell::Wall));
        assert!(store.is_colliding(Vec2::new(0.5, 1.5), Cell::Wall));
        assert!(!store.is_colliding(Vec2::new(1.0, 1.0), Cell::Wall));
    }

    #[test]
    fn probes_outside_grid_are_skipped() {
        let store = store_with("#.");
        assert!(store.is_colliding(Vec2::new(-0.5, -0.5), Cell::Wall));
        assert!(!store.is_colliding(Vec2::new(-3.0, -3.0), Cell::Wall));
        assert!(!store.is_colliding(Vec2::new(10.0, 0.0), Cell::Wall));
    }

    #[test]
    fn colliding_cell_mut_returns_genuine_match() {
        let mut store = store_with("5-|2-*2-|5-.");
        match store.colliding_cell_mut(Vec2::new(1.5, 1.0), Cell::Coin) {
            ColliderLookup::Found { coord, cell } => {
                assert_eq!(coord, CellCoord::new(2, 1));
                *cell = Cell::Air;
            }
            other => panic!("expected a match, got {other:?}"),
        }
        assert!(!store.is_colliding(Vec2::new(1.5, 1.0), Cell::Coin));
    }

    #[test]
    fn colliding_cell_mut_reports_approximation_without_match() {
        let mut store = store_with("5-|5-|5-.");
        assert_eq!(
            store.colliding_cell_mut(Vec2::new(1.5, 1.2), Cell::Coin),
            ColliderLookup::Approximate {
                coord: Some(CellCoord::new(1, 1))
            }
        );
        assert_eq!(
            store.colliding_cell_mut(Vec2::new(-4.0, 1.0), Cell::Coin),
            ColliderLookup::Approximate { coord: None }
        );
    }

    #[test]
    fn markers_are_consumed() {
        let mut store = store_with("&-@&|@---.");
        assert_eq!(store.take_first_marker(Cell::Player), Some(CellCoord::new(2, 0)));
        assert_eq!(store.cell(0, 2), Cell::Air);
        assert_eq!(store.cell(1, 0), Cell::Player);
        assert_eq!(
            store.take_all_markers(Cell::Enemy),
            vec![CellCoord::new(0, 0), CellCoord::new(3, 0)]
        );
        assert!(store.take_all_markers(Cell::Enemy).is_empty());
    }

    #[test]
    fn advancing_past_last_level_reports_exhaustion() {
        let mut store = LevelStore::new(LevelCatalog::parse("3#.\n4#.\n").expect("catalog"));
        assert_eq!(store.load_level(0).expect("loads"), LoadOutcome::Loaded { index: 0 });
        assert_eq!(store.load_level(1).expect("loads"), LoadOutcome::Loaded { index: 1 });
        assert_eq!(store.columns(), 4);
        assert_eq!(store.load_level(1).expect("loads"), LoadOutcome::CatalogExhausted);
        assert_eq!(store.level_index(), 0);
    }

    #[test]
    fn out_of_range_selection_falls_back_to_first_level() {
        let mut store = LevelStore::new(LevelCatalog::parse("3#.\n4#.\n").expect("catalog"));
        store.select_level(7);
        assert_eq!(store.level_index(), 0);
        assert_eq!(store.load_level(0).expect("loads"), LoadOutcome::Loaded { index: 0 });
        assert_eq!(store.columns(), 3);

        store.select_level(1);
        assert_eq!(store.load_level(0).expect("loads"), LoadOutcome::Loaded { index: 1 });
    }

    #[test]
    fn undecodable_level_is_fatal() {
        let mut store = LevelStore::new(LevelCatalog::parse("3#.\n#?#.\n").expect("catalog"));
        store.select_level(1);
        let error = store.load_level(0).expect_err("bad glyph");
        assert!(matches!(error, LevelLoadError::Decode { index: 1, .. }));
    }

    #[test]
    #[should_panic(expected = "outside")]
    fn raw_cell_access_fails_fast() {
        let mut store = store_with("3#.");
        store.set_cell(1, 0, Cell::Coin);
    }
}
