//! Coordinator: one mower, one renderer, and the wiring between them.
//!
//! [`MowerCoordinator::new`] registers a listener on the mower that turns
//! every visited cell into a [`CellMark::Cut`] update on the renderer.
//! The listener captures only the shared renderer, never the coordinator
//! itself, so no reference cycle keeps the mower alive.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use mowsim_core::{Cell, MowerPhase};
use mowsim_engine::Mower;

use crate::lawn::{CellMark, LawnRenderer};

/// Control surface that mediates between a mower and a lawn view.
pub trait Mediator: Send + Sync {
    /// Start (or resume) mowing.
    fn start_mowing(&self);

    /// Stop mowing. Progress is kept.
    fn stop_mowing(&self);

    /// Mark `(row, col)` as cut on the lawn view. Out-of-range
    /// coordinates are ignored by the renderer.
    fn update_lawn(&self, row: i64, col: i64);
}

/// Owns a mower and a renderer and relays visited cells between them.
///
/// # Example
///
/// ```
/// use mowsim_engine::LockstepMower;
/// use mowsim_lawn::{Lawn, Mediator, MowerCoordinator};
///
/// let lawn = Lawn::try_new(2, 2).unwrap();
/// let coordinator = MowerCoordinator::new(LockstepMower::new(2, 2), lawn);
/// coordinator.start_mowing();
/// coordinator.mower().run_to_completion();
/// assert!(coordinator.renderer().is_fully_cut());
/// ```
pub struct MowerCoordinator<M, R> {
    mower: M,
    renderer: Arc<Mutex<R>>,
}

impl<M, R> MowerCoordinator<M, R>
where
    M: Mower,
    R: LawnRenderer + 'static,
{
    /// Compose `mower` and `renderer`, subscribing the renderer to every
    /// cell the mower visits from now on.
    pub fn new(mower: M, renderer: R) -> Self {
        let renderer = Arc::new(Mutex::new(renderer));
        let sink = Arc::clone(&renderer);
        mower.add_listener(Arc::new(move |cell: Cell| {
            mark_cut(&sink, i64::from(cell.row), i64::from(cell.col));
        }));
        tracing::debug!(dims = %mower.dims(), "coordinator wired");
        Self { mower, renderer }
    }

    /// The coordinated mower.
    pub fn mower(&self) -> &M {
        &self.mower
    }

    /// Lock the renderer for reading or drawing.
    ///
    /// Hold the guard briefly: the mower's tick blocks on it while
    /// delivering a cell.
    pub fn renderer(&self) -> MutexGuard<'_, R> {
        self.renderer.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Current reporting phase of the mower.
    pub fn phase(&self) -> MowerPhase {
        self.mower.phase()
    }
}

impl<M, R> Mediator for MowerCoordinator<M, R>
where
    M: Mower,
    R: LawnRenderer + 'static,
{
    fn start_mowing(&self) {
        self.mower.start();
    }

    fn stop_mowing(&self) {
        self.mower.stop();
    }

    fn update_lawn(&self, row: i64, col: i64) {
        mark_cut(&self.renderer, row, col);
    }
}

impl<M: Mower, R> std::fmt::Debug for MowerCoordinator<M, R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MowerCoordinator")
            .field("dims", &self.mower.dims())
            .field("state", &self.mower.state())
            .finish_non_exhaustive()
    }
}

fn mark_cut<R: LawnRenderer>(renderer: &Mutex<R>, row: i64, col: i64) {
    renderer
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .update_cell(row, col, Some(CellMark::Cut));
}
