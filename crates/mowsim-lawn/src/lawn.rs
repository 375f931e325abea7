//! Lawn grid state and the renderer contract.

use std::fmt;

use mowsim_core::GridDims;

use crate::error::LawnError;

/// What a lawn cell currently shows.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum CellMark {
    /// Grass not yet mowed.
    #[default]
    Uncut,
    /// Mowed grass.
    Cut,
}

impl CellMark {
    /// Single character used by the text renderer.
    pub fn glyph(self) -> char {
        match self {
            Self::Uncut => '#',
            Self::Cut => '.',
        }
    }
}

/// Receives cell updates from a coordinator.
///
/// Implementations must silently ignore coordinates outside the grid and
/// an absent (`None`) mark. Neither case is an error.
pub trait LawnRenderer: Send {
    /// Set the mark shown at `(row, col)`.
    fn update_cell(&mut self, row: i64, col: i64, mark: Option<CellMark>);
}

/// Text renderer: one [`CellMark`] per cell, row-major.
///
/// Every cell starts [`CellMark::Uncut`]. `Display` draws one line per
/// row using [`CellMark::glyph`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Lawn {
    dims: GridDims,
    cells: Vec<CellMark>,
}

impl Lawn {
    /// Largest number of cells a lawn will allocate (a 4096 x 4096 grid).
    pub const MAX_CELLS: u64 = 1 << 24;

    /// Create an uncut lawn. Non-positive dimensions are clamped to 1.
    pub fn try_new(rows: i64, cols: i64) -> Result<Self, LawnError> {
        Self::try_with_dims(GridDims::new(rows, cols))
    }

    /// Create an uncut lawn over already-clamped dimensions.
    ///
    /// Fails instead of aborting when the grid exceeds
    /// [`MAX_CELLS`](Self::MAX_CELLS) or the allocation is refused.
    pub fn try_with_dims(dims: GridDims) -> Result<Self, LawnError> {
        let count = dims.cell_count();
        if count > Self::MAX_CELLS {
            return Err(LawnError::TooManyCells {
                dims,
                max: Self::MAX_CELLS,
            });
        }
        let len = usize::try_from(count).map_err(|_| LawnError::OutOfMemory { cells: count })?;
        let mut cells = Vec::new();
        cells
            .try_reserve_exact(len)
            .map_err(|_| LawnError::OutOfMemory { cells: count })?;
        cells.resize(len, CellMark::Uncut);
        Ok(Self { dims, cells })
    }

    /// Lawn dimensions.
    pub fn dims(&self) -> GridDims {
        self.dims
    }

    /// Mark at `(row, col)`, or `None` if out of range.
    pub fn cell(&self, row: i64, col: i64) -> Option<CellMark> {
        self.index(row, col).map(|i| self.cells[i])
    }

    /// Number of cut cells.
    pub fn cut_count(&self) -> usize {
        self.cells.iter().filter(|&&m| m == CellMark::Cut).count()
    }

    /// Whether every cell is cut.
    pub fn is_fully_cut(&self) -> bool {
        self.cells.iter().all(|&m| m == CellMark::Cut)
    }

    fn index(&self, row: i64, col: i64) -> Option<usize> {
        if !self.dims.contains(row, col) {
            return None;
        }
        Some(row as usize * self.dims.cols() as usize + col as usize)
    }
}

impl LawnRenderer for Lawn {
    fn update_cell(&mut self, row: i64, col: i64, mark: Option<CellMark>) {
        let Some(mark) = mark else {
            tracing::trace!(row, col, "ignoring update with no mark");
            return;
        };
        match self.index(row, col) {
            Some(i) => self.cells[i] = mark,
            None => tracing::trace!(row, col, dims = %self.dims, "ignoring out-of-range update"),
        }
    }
}

impl fmt::Display for Lawn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.dims.cols() as usize) {
            let line: String = row.iter().map(|m| m.glyph()).collect();
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn starts_uncut() {
        let lawn = Lawn::try_new(2, 3).unwrap();
        assert_eq!(lawn.cut_count(), 0);
        assert_eq!(lawn.cell(1, 2), Some(CellMark::Uncut));
        assert!(!lawn.is_fully_cut());
    }

    #[test]
    fn invalid_dims_clamp_to_one_cell() {
        let lawn = Lawn::try_new(-1, 0).unwrap();
        assert_eq!(lawn.dims(), GridDims::new(1, 1));
        assert_eq!(lawn.cell(0, 0), Some(CellMark::Uncut));
    }

    #[test]
    fn update_marks_cell() {
        let mut lawn = Lawn::try_new(2, 2).unwrap();
        lawn.update_cell(1, 0, Some(CellMark::Cut));
        assert_eq!(lawn.cell(1, 0), Some(CellMark::Cut));
        assert_eq!(lawn.cut_count(), 1);
    }

    #[test]
    fn out_of_range_and_absent_updates_are_ignored() {
        let mut lawn = Lawn::try_new(2, 2).unwrap();
        let before = lawn.clone();
        lawn.update_cell(-1, -1, Some(CellMark::Cut));
        lawn.update_cell(2, 0, Some(CellMark::Cut));
        lawn.update_cell(0, 2, Some(CellMark::Cut));
        lawn.update_cell(i64::MAX, i64::MIN, Some(CellMark::Cut));
        lawn.update_cell(0, 0, None);
        assert_eq!(lawn, before);
        assert_eq!(lawn.cell(5, 5), None);
    }

    #[test]
    fn display_draws_rows() {
        let mut lawn = Lawn::try_new(2, 3).unwrap();
        lawn.update_cell(0, 0, Some(CellMark::Cut));
        lawn.update_cell(1, 2, Some(CellMark::Cut));
        assert_eq!(lawn.to_string(), ".##\n##.\n");
    }

    #[test]
    fn oversized_lawn_is_an_error() {
        let err = Lawn::try_new(i64::MAX, i64::MAX).unwrap_err();
        assert_eq!(
            err,
            LawnError::TooManyCells {
                dims: GridDims::new(i64::MAX, i64::MAX),
                max: Lawn::MAX_CELLS,
            }
        );
        assert!(err.to_string().contains("maximum"));

        let wide = Lawn::try_new(100_000, 100_000).unwrap_err();
        assert!(matches!(wide, LawnError::TooManyCells { .. }));
    }

    #[test]
    fn max_cells_boundary() {
        assert!(Lawn::try_new(4096, 4096).is_ok());
        assert!(Lawn::try_new(4096, 4097).is_err());
    }

    proptest! {
        #[test]
        fn arbitrary_updates_never_panic(
            rows in -3i64..6,
            cols in -3i64..6,
            updates in proptest::collection::vec((-10i64..10, -10i64..10, any::<bool>()), 0..40),
        ) {
            let mut lawn = Lawn::try_new(rows, cols).unwrap();
            for (r, c, cut) in updates {
                let mark = if cut { Some(CellMark::Cut) } else { None };
                lawn.update_cell(r, c, mark);
            }
            prop_assert!(lawn.cut_count() <= lawn.dims().cell_count() as usize);
        }
    }
}
