//! Lockstep (caller-driven) mower.
//!
//! [`LockstepMower`] has no background thread. Each call to
//! [`step()`](LockstepMower::step) runs exactly one tick if the mower is
//! running, which makes traversal order and notification counts
//! deterministic in tests and in callers that own their own clock.

use mowsim_core::{Cell, EngineState, GridDims};

use crate::dispatch::ListenerSlot;
use crate::mower::Mower;
use crate::tick::{TickEngine, TickOutcome};

// Compile-time assertion: LockstepMower can be shared across threads.
const _: () = {
    #[allow(dead_code)]
    fn assert_send_sync<T: Send + Sync>() {}
    #[allow(dead_code)]
    fn check() {
        assert_send_sync::<LockstepMower>();
    }
};

/// Mower whose ticks are driven by the caller.
///
/// # Example
///
/// ```
/// use std::sync::{Arc, Mutex};
/// use mowsim_core::Cell;
/// use mowsim_engine::{LockstepMower, Mower};
///
/// let mower = LockstepMower::new(2, 3);
/// let seen = Arc::new(Mutex::new(Vec::new()));
/// let sink = Arc::clone(&seen);
/// mower.add_listener(Arc::new(move |c: Cell| sink.lock().unwrap().push(c)));
///
/// mower.start();
/// assert_eq!(mower.run_to_completion(), 6);
/// assert!(mower.is_finished());
/// assert_eq!(seen.lock().unwrap().len(), 6);
/// ```
#[derive(Debug)]
pub struct LockstepMower {
    engine: TickEngine,
}

impl LockstepMower {
    /// Create an idle mower. Non-positive dimensions are clamped to 1.
    pub fn new(rows: i64, cols: i64) -> Self {
        Self::with_dims(GridDims::new(rows, cols))
    }

    /// Create an idle mower over already-clamped dimensions.
    pub fn with_dims(dims: GridDims) -> Self {
        Self {
            engine: TickEngine::new(dims),
        }
    }

    /// Run one tick. Returns `None` when not running or finished.
    ///
    /// Must not be called from inside a listener of this mower.
    pub fn step(&self) -> Option<TickOutcome> {
        self.engine.tick(None)
    }

    /// Step until the mower stops or finishes. Returns the ticks run.
    pub fn run_to_completion(&self) -> u64 {
        let mut ticks = 0;
        while self.step().is_some() {
            ticks += 1;
        }
        ticks
    }

    /// Number of registered listener slots.
    pub fn listener_count(&self) -> usize {
        self.engine.listener_count()
    }
}

impl Mower for LockstepMower {
    fn start(&self) {
        self.engine.start();
    }

    fn stop(&self) {
        self.engine.stop();
    }

    fn add_optional_listener(&self, listener: ListenerSlot) {
        self.engine.add_listener(listener);
    }

    fn dims(&self) -> GridDims {
        self.engine.dims()
    }

    fn state(&self) -> EngineState {
        self.engine.state()
    }

    fn visited(&self) -> u64 {
        self.engine.visited()
    }

    fn position(&self) -> Option<Cell> {
        self.engine.position()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mowsim_core::MowerPhase;
    use mowsim_test_utils::{PanickingListener, RecordingListener};
    use std::sync::Arc;

    fn pairs(cells: &[Cell]) -> Vec<(u32, u32)> {
        cells.iter().map(|c| (c.row, c.col)).collect()
    }

    #[test]
    fn two_by_three_run_emits_six_events_then_stops() {
        let mower = LockstepMower::new(2, 3);
        let rec = Arc::new(RecordingListener::new());
        mower.add_listener(rec.clone());

        mower.start();
        assert_eq!(mower.run_to_completion(), 6);
        assert_eq!(
            pairs(&rec.cells()),
            [(0, 0), (0, 1), (0, 2), (1, 2), (1, 1), (1, 0)]
        );
        assert!(mower.is_finished());
        assert!(!mower.is_running());

        assert_eq!(mower.step(), None);
        assert_eq!(rec.len(), 6);
    }

    #[test]
    fn one_by_one_emits_single_event() {
        let mower = LockstepMower::new(1, 1);
        let rec = Arc::new(RecordingListener::new());
        mower.add_listener(rec.clone());
        mower.start();
        mower.run_to_completion();
        assert_eq!(rec.cells(), [Cell::new(0, 0)]);
        assert!(mower.is_finished());
    }

    #[test]
    fn degenerate_dims_act_as_one_by_one() {
        let mower = LockstepMower::new(0, -5);
        assert_eq!(mower.dims(), GridDims::new(1, 1));
        let rec = Arc::new(RecordingListener::new());
        mower.add_listener(rec.clone());
        mower.start();
        mower.run_to_completion();
        assert_eq!(rec.cells(), [Cell::new(0, 0)]);
    }

    #[test]
    fn step_without_start_emits_nothing() {
        let mower = LockstepMower::new(3, 3);
        let rec = Arc::new(RecordingListener::new());
        mower.add_listener(rec.clone());
        assert_eq!(mower.step(), None);
        mower.start();
        mower.stop();
        assert_eq!(mower.step(), None);
        assert!(rec.is_empty());
    }

    #[test]
    fn double_start_does_not_skip_or_duplicate() {
        let mower = LockstepMower::new(2, 2);
        let rec = Arc::new(RecordingListener::new());
        mower.add_listener(rec.clone());
        mower.start();
        mower.step();
        mower.start();
        mower.run_to_completion();
        assert_eq!(pairs(&rec.cells()), [(0, 0), (0, 1), (1, 1), (1, 0)]);
    }

    #[test]
    fn stop_then_resume_continues_from_next_cell() {
        let mower = LockstepMower::new(2, 2);
        let rec = Arc::new(RecordingListener::new());
        mower.add_listener(rec.clone());
        mower.start();
        mower.step();
        mower.step();
        mower.stop();
        assert_eq!(mower.phase(), MowerPhase::Paused);
        assert_eq!(mower.position(), Some(Cell::new(1, 1)));

        mower.start();
        mower.run_to_completion();
        assert_eq!(pairs(&rec.cells()), [(0, 0), (0, 1), (1, 1), (1, 0)]);
    }

    #[test]
    fn n_listeners_receive_identical_cell() {
        let mower = LockstepMower::new(3, 3);
        let recs: Vec<Arc<RecordingListener>> =
            (0..5).map(|_| Arc::new(RecordingListener::new())).collect();
        for r in &recs {
            mower.add_listener(r.clone());
        }
        mower.start();
        let out = mower.step().unwrap();
        assert_eq!(out.report.delivered, 5);
        for r in &recs {
            assert_eq!(r.cells(), [Cell::new(0, 0)]);
        }
    }

    #[test]
    fn absent_and_panicking_listeners_are_tolerated() {
        let mower = LockstepMower::new(2, 2);
        let rec = Arc::new(RecordingListener::new());
        mower.add_optional_listener(None);
        mower.add_listener(Arc::new(PanickingListener::new()));
        mower.add_listener(rec.clone());

        mower.start();
        mower.run_to_completion();
        assert_eq!(mower.listener_count(), 3);
        assert_eq!(pairs(&rec.cells()), [(0, 0), (0, 1), (1, 1), (1, 0)]);
    }

    #[test]
    fn phases_follow_lifecycle() {
        let mower = LockstepMower::new(1, 2);
        assert_eq!(mower.phase(), MowerPhase::Idle);
        mower.start();
        assert_eq!(mower.phase(), MowerPhase::Mowing);
        mower.run_to_completion();
        assert_eq!(mower.phase(), MowerPhase::Finished);
        mower.start();
        assert_eq!(mower.phase(), MowerPhase::Finished);
    }
}
