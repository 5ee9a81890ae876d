//! Dense row-major storage for the cells of one decoded level.

use platformer_core::{Cell, CellCoord};

use crate::rle::DecodeError;

/// Rectangular grid of cells with dimensions fixed at construction.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TileGrid {
    columns: usize,
    rows: usize,
    cells: Vec<Cell>,
}

impl TileGrid {
    /// Creates a grid without any cells.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            columns: 0,
            rows: 0,
            cells: Vec::new(),
        }
    }

    /// Builds a grid from decoded rows of glyphs, padding short rows with air.
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> Result<Self, DecodeError> {
        let columns = rows
            .iter()
            .map(|row| row.as_ref().chars().count())
            .max()
            .unwrap_or(0);

        let mut cells = Vec::with_capacity(columns * rows.len());
        for (row_index, row) in rows.iter().enumerate() {
            let mut width = 0;
            for (column, glyph) in row.as_ref().chars().enumerate() {
                let cell = Cell::from_glyph(glyph).ok_or(DecodeError::UnknownGlyph {
                    glyph,
                    row: row_index,
                    column,
                })?;
                cells.push(cell);
                width += 1;
            }
            cells.extend(std::iter::repeat(Cell::Air).take(columns - width));
        }

        Ok(Self {
            columns,
            rows: rows.len(),
            cells,
        })
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

    /// Cells in row-major order.
    #[must_use]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Returns the cell at the provided location, if it lies inside the grid.
    #[must_use]
    pub fn get(&self, row: usize, column: usize) -> Option<Cell> {
        self.index(row, column).map(|index| self.cells[index])
    }

    /// Returns the cell at the provided location.
    ///
    /// # Panics
    ///
    /// Panics when the location lies outside the grid.
    #[must_use]
    pub fn cell(&self, row: usize, column: usize) -> Cell {
        self.cells[self.checked_index(row, column)]
    }

    /// Returns a mutable reference to the cell at the provided location.
    ///
    /// # Panics
    ///
    /// Panics when the location lies outside the grid.
    pub fn cell_mut(&mut self, row: usize, column: usize) -> &mut Cell {
        let index = self.checked_index(row, column);
        &mut self.cells[index]
    }

    /// Iterates every cell together with its coordinate in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (CellCoord, Cell)> + '_ {
        let columns = self.columns.max(1);
        self.cells.iter().enumerate().map(move |(index, cell)| {
            let coord = CellCoord::new((index % columns) as u32, (index / columns) as u32);
            (coord, *cell)
        })
    }

    fn index(&self, row: usize, column: usize) -> Option<usize> {
        if row < self.rows && column < self.columns {
            Some(row * self.columns + column)
        } else {
            None
        }
    }

    fn checked_index(&self, row: usize, column: usize) -> usize {
        match self.index(row, column) {
            Some(index) => index,
            None => panic!(
                "cell ({row}, {column}) lies outside the {}x{} level grid",
                self.rows, self.columns
            ),
        }
    }
}
