//! The cell-visited listener capability.

use crate::grid::Cell;

/// Receives a notification for every cell the mower visits.
///
/// Listeners are invoked synchronously on the tick thread, outside any
/// engine lock. A listener may call back into the engine (for example to
/// stop it) without deadlocking. A panicking listener is isolated from
/// the other listeners and from the traversal state.
///
/// Any `Fn(Cell) + Send + Sync` closure is a listener:
///
/// ```
/// use mowsim_core::{Cell, CellListener};
///
/// let print = |cell: Cell| println!("mowed {cell}");
/// print.visited(Cell::new(0, 0));
/// ```
pub trait CellListener: Send + Sync {
    /// Called once per tick with the cell that was just visited.
    fn visited(&self, cell: Cell);
}

impl<F> CellListener for F
where
    F: Fn(Cell) + Send + Sync,
{
    fn visited(&self, cell: Cell) {
        self(cell)
    }
}

/// A listener that ignores every notification.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopListener;

impl CellListener for NoopListener {
    fn visited(&self, _cell: Cell) {}
}
