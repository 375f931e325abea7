//! Grid dimensions and the [`Cell`] coordinate type.

use std::fmt;

/// Dimensions of a rectangular lawn: `rows × cols`, both at least 1.
///
/// Construction never fails. Non-positive inputs are clamped to 1 and
/// inputs above `u32::MAX` are clamped to `u32::MAX`, so a traversal over
/// a `GridDims` always terminates and never indexes out of bounds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GridDims {
    rows: u32,
    cols: u32,
}

impl GridDims {
    /// Build dimensions from possibly-invalid signed inputs.
    ///
    /// ```
    /// use mowsim_core::GridDims;
    ///
    /// let dims = GridDims::new(0, -4);
    /// assert_eq!((dims.rows(), dims.cols()), (1, 1));
    /// assert_eq!(GridDims::new(2, 3).cell_count(), 6);
    /// ```
    pub fn new(rows: i64, cols: i64) -> Self {
        Self {
            rows: clamp_axis(rows),
            cols: clamp_axis(cols),
        }
    }

    /// Number of rows.
    pub fn rows(&self) -> u32 {
        self.rows
    }

    /// Number of columns.
    pub fn cols(&self) -> u32 {
        self.cols
    }

    /// Total number of cells, `rows * cols`.
    pub fn cell_count(&self) -> u64 {
        u64::from(self.rows) * u64::from(self.cols)
    }

    /// Whether signed `(row, col)` lies inside `[0, rows) × [0, cols)`.
    pub fn contains(&self, row: i64, col: i64) -> bool {
        row >= 0 && col >= 0 && row < i64::from(self.rows) && col < i64::from(self.cols)
    }

    /// Row-major index of `cell`, or `None` if it lies outside the grid.
    pub fn index_of(&self, cell: Cell) -> Option<usize> {
        if cell.row < self.rows && cell.col < self.cols {
            Some(cell.row as usize * self.cols as usize + cell.col as usize)
        } else {
            None
        }
    }
}

impl fmt::Display for GridDims {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.rows, self.cols)
    }
}

fn clamp_axis(v: i64) -> u32 {
    v.clamp(1, i64::from(u32::MAX)) as u32
}

/// A 0-indexed lawn cell visited by the mower.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cell {
    /// Row index, `0 <= row < rows`.
    pub row: u32,
    /// Column index, `0 <= col < cols`.
    pub col: u32,
}

impl Cell {
    /// Create a cell at `(row, col)`.
    pub const fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

impl From<(u32, u32)> for Cell {
    fn from((row, col): (u32, u32)) -> Self {
        Self { row, col }
    }
}
