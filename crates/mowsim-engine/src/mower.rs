//! The [`Mower`] trait shared by lockstep and realtime drivers.

use std::sync::Arc;

use mowsim_core::{Cell, CellListener, EngineState, GridDims, MowerPhase};

use crate::dispatch::ListenerSlot;

/// Control and query surface of a traversal engine.
///
/// Every method takes `&self` and is safe to call from any thread,
/// including from inside a listener. None of them fail: repeated
/// `start()`/`stop()` calls are no-ops and `start()` on a finished
/// engine does nothing.
pub trait Mower: Send + Sync {
    /// Begin ticking if idle. No-op if running or finished.
    fn start(&self);

    /// Stop ticking if running. No-op otherwise.
    fn stop(&self);

    /// Register a listener slot. `None` is accepted and skipped at delivery.
    fn add_optional_listener(&self, listener: ListenerSlot);

    /// Register a listener.
    fn add_listener(&self, listener: Arc<dyn CellListener>) {
        self.add_optional_listener(Some(listener));
    }

    /// Grid dimensions after clamping.
    fn dims(&self) -> GridDims;

    /// Lifecycle state.
    fn state(&self) -> EngineState;

    /// Number of cells visited so far.
    fn visited(&self) -> u64;

    /// The cell the next tick will visit, `None` once finished.
    fn position(&self) -> Option<Cell>;

    /// Whether ticks are currently scheduled.
    fn is_running(&self) -> bool {
        self.state() == EngineState::Running
    }

    /// Whether every cell has been visited.
    fn is_finished(&self) -> bool {
        self.state() == EngineState::Finished
    }

    /// Reporting phase derived from state and progress.
    fn phase(&self) -> MowerPhase {
        self.state().phase(self.visited())
    }
}

impl<M: Mower + ?Sized> Mower for Arc<M> {
    fn start(&self) {
        (**self).start()
    }

    fn stop(&self) {
        (**self).stop()
    }

    fn add_optional_listener(&self, listener: ListenerSlot) {
        (**self).add_optional_listener(listener)
    }

    fn dims(&self) -> GridDims {
        (**self).dims()
    }

    fn state(&self) -> EngineState {
        (**self).state()
    }

    fn visited(&self) -> u64 {
        (**self).visited()
    }

    fn position(&self) -> Option<Cell> {
        (**self).position()
    }
}
