//! Error types for lawn construction.

use std::error::Error;
use std::fmt;

use mowsim_core::GridDims;

/// Errors from building a [`Lawn`](crate::Lawn).
///
/// The engine accepts any clamped dimensions, but a lawn stores one mark
/// per cell and so has a size limit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LawnError {
    /// The grid has more cells than a lawn may hold.
    TooManyCells {
        /// The requested dimensions.
        dims: GridDims,
        /// The largest accepted cell count.
        max: u64,
    },
    /// The cell storage could not be allocated.
    OutOfMemory {
        /// Number of cells requested.
        cells: u64,
    },
}

impl fmt::Display for LawnError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooManyCells { dims, max } => write!(
                f,
                "lawn of {dims} has {} cells, more than the maximum of {max}",
                dims.cell_count()
            ),
            Self::OutOfMemory { cells } => {
                write!(f, "could not allocate storage for {cells} lawn cells")
            }
        }
    }
}

impl Error for LawnError {}
