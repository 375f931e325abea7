//! Serpentine (boustrophedon) traversal of a rectangular grid.
//!
//! Even rows sweep left to right, odd rows right to left. When a sweep
//! runs off the edge the column is clamped to that edge and the row
//! advances, so the mower never travels back to the start of a row.
//! Passing the last row leaves the traversal on the terminal sentinel
//! `row == rows`, which is not a drawable cell.

use mowsim_core::{Cell, GridDims};

/// Position and progress of a serpentine sweep.
///
/// This is pure state: no timing, no locking, no listeners. Engines own
/// a `Traversal` and call [`advance()`](Traversal::advance) once per tick.
///
/// `Traversal` is also an [`Iterator`] over the cells still to be visited:
///
/// ```
/// use mowsim_core::{Cell, GridDims};
/// use mowsim_engine::Traversal;
///
/// let cells: Vec<Cell> = Traversal::new(GridDims::new(2, 3)).collect();
/// let pairs: Vec<(u32, u32)> = cells.iter().map(|c| (c.row, c.col)).collect();
/// assert_eq!(pairs, [(0, 0), (0, 1), (0, 2), (1, 2), (1, 1), (1, 0)]);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Traversal {
    dims: GridDims,
    row: u32,
    col: u32,
    visited: u64,
}

impl Traversal {
    /// Start a traversal at `(0, 0)`.
    pub fn new(dims: GridDims) -> Self {
        Self {
            dims,
            row: 0,
            col: 0,
            visited: 0,
        }
    }

    /// Grid being traversed.
    pub fn dims(&self) -> GridDims {
        self.dims
    }

    /// The cell the next tick will visit, or `None` once finished.
    pub fn current(&self) -> Option<Cell> {
        if self.is_finished() {
            None
        } else {
            Some(Cell::new(self.row, self.col))
        }
    }

    /// Whether the row has reached the terminal sentinel.
    pub fn is_finished(&self) -> bool {
        self.row >= self.dims.rows()
    }

    /// Number of cells visited so far.
    pub fn visited(&self) -> u64 {
        self.visited
    }

    /// Number of cells not yet visited.
    pub fn remaining(&self) -> u64 {
        self.dims.cell_count() - self.visited
    }

    /// Mark the current cell as visited and move to the next one.
    ///
    /// Returns the new current cell, or `None` if the traversal is now
    /// (or already was) finished.
    pub fn advance(&mut self) -> Option<Cell> {
        if self.is_finished() {
            return None;
        }
        self.visited += 1;

        if self.row % 2 == 0 {
            if self.col + 1 >= self.dims.cols() {
                self.col = self.dims.cols() - 1;
                self.row += 1;
            } else {
                self.col += 1;
            }
        } else if self.col == 0 {
            self.row += 1;
        } else {
            self.col -= 1;
        }

        self.current()
    }
}

impl Iterator for Traversal {
    type Item = Cell;

    fn next(&mut self) -> Option<Cell> {
        let cell = self.current()?;
        self.advance();
        Some(cell)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = usize::try_from(self.remaining()).unwrap_or(usize::MAX);
        (remaining, usize::try_from(self.remaining()).ok())
    }
}
