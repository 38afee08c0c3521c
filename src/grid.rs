//! Immutable board extent.

use crate::common::Cell;
use crate::config::{GRID_COLUMNS, GRID_ROWS};

/// A `columns × rows` rectangle of cells anchored at the origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Grid {
    columns: i32,
    rows: i32,
}

impl Grid {
    pub const fn new(columns: i32, rows: i32) -> Self {
        Self { columns, rows }
    }

    pub fn columns(&self) -> i32 {
        self.columns
    }

    pub fn rows(&self) -> i32 {
        self.rows
    }

    /// `true` iff `cell` lies inside the grid.
    pub fn is_valid(&self, cell: Cell) -> bool {
        (0..self.columns).contains(&cell.x) && (0..self.rows).contains(&cell.y)
    }

    /// Every cell on the grid, row by row from `y = 0`.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (0..self.rows).flat_map(move |y| (0..self.columns).map(move |x| Cell::new(x, y)))
    }
}

impl Default for Grid {
    fn default() -> Self {
        Grid::new(GRID_COLUMNS, GRID_ROWS)
    }
}
