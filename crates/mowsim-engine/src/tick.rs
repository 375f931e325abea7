//! Tick engine: the shared advance-and-notify step.
//!
//! [`TickEngine`] owns the traversal, the running flag and the listener
//! set. Both [`LockstepMower`](crate::LockstepMower) and
//! [`RealtimeMower`](crate::RealtimeMower) drive one; they differ only in
//! who decides when a tick happens.
//!
//! # Locking
//!
//! One mutex guards [`EngineCore`]. It is held for check-and-set and for
//! advancing the position, never across listener delivery, so listeners
//! may call `start()`/`stop()` re-entrantly. The paired condition variable
//! is signalled on every state change.
//!
//! A second mutex serialises whole ticks so concurrent callers of
//! [`TickEngine::tick`] never deliver the same cell twice. Listeners
//! must therefore not call `tick()` themselves.

use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use mowsim_core::{Cell, EngineState, GridDims};

use crate::dispatch::{DispatchReport, ListenerSet, ListenerSlot};
use crate::traversal::Traversal;

// ── TickOutcome ──────────────────────────────────────────────────

/// Result of a tick that visited a cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TickOutcome {
    /// The cell that was visited and announced.
    pub cell: Cell,
    /// Per-listener delivery counts.
    pub report: DispatchReport,
    /// Whether this tick visited the last cell.
    pub finished: bool,
}

// ── EngineCore ───────────────────────────────────────────────────

/// Mutable engine state behind the engine lock.
#[derive(Debug)]
pub(crate) struct EngineCore {
    pub(crate) traversal: Traversal,
    pub(crate) running: bool,
    /// Bumped by every successful start; lets the tick thread re-anchor
    /// its schedule and discard a tick that belongs to an older run.
    pub(crate) run_epoch: u64,
    pub(crate) shutdown: bool,
}

impl EngineCore {
    pub(crate) fn state(&self) -> EngineState {
        if self.traversal.is_finished() {
            EngineState::Finished
        } else if self.running {
            EngineState::Running
        } else {
            EngineState::Idle
        }
    }

    /// Idle → Running. Returns `false` if running, finished or shut down.
    pub(crate) fn begin(&mut self) -> bool {
        if self.running || self.shutdown || self.traversal.is_finished() {
            return false;
        }
        self.running = true;
        self.run_epoch += 1;
        true
    }

    /// Running → Idle. Returns `false` if not running.
    pub(crate) fn halt(&mut self) -> bool {
        if !self.running {
            return false;
        }
        self.running = false;
        true
    }
}

// ── TickEngine ───────────────────────────────────────────────────

/// Traversal state, running flag and listeners for one mower.
#[derive(Debug)]
pub struct TickEngine {
    core: Mutex<EngineCore>,
    changed: Condvar,
    tick_gate: Mutex<()>,
    listeners: ListenerSet,
}

impl TickEngine {
    /// Create an idle engine at `(0, 0)`.
    pub fn new(dims: GridDims) -> Self {
        Self {
            core: Mutex::new(EngineCore {
                traversal: Traversal::new(dims),
                running: false,
                run_epoch: 0,
                shutdown: false,
            }),
            changed: Condvar::new(),
            tick_gate: Mutex::new(()),
            listeners: ListenerSet::new(),
        }
    }

    pub(crate) fn lock(&self) -> MutexGuard<'_, EngineCore> {
        // Listeners never run under this lock, so a poisoned guard still
        // holds consistent state.
        self.core.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub(crate) fn wait<'a>(
        &self,
        guard: MutexGuard<'a, EngineCore>,
    ) -> MutexGuard<'a, EngineCore> {
        self.changed.wait(guard).unwrap_or_else(PoisonError::into_inner)
    }

    pub(crate) fn wait_timeout<'a>(
        &self,
        guard: MutexGuard<'a, EngineCore>,
        timeout: Duration,
    ) -> MutexGuard<'a, EngineCore> {
        self.changed
            .wait_timeout(guard, timeout)
            .unwrap_or_else(PoisonError::into_inner)
            .0
    }

    pub(crate) fn notify_changed(&self) {
        self.changed.notify_all();
    }

    /// Grid being traversed.
    pub fn dims(&self) -> GridDims {
        self.lock().traversal.dims()
    }

    /// Current lifecycle state.
    pub fn state(&self) -> EngineState {
        self.lock().state()
    }

    /// The next cell to be visited, `None` once finished.
    pub fn position(&self) -> Option<Cell> {
        self.lock().traversal.current()
    }

    /// Cells visited so far.
    pub fn visited(&self) -> u64 {
        self.lock().traversal.visited()
    }

    /// Register a listener slot.
    pub fn add_listener(&self, listener: ListenerSlot) {
        self.listeners.add(listener);
    }

    /// Number of registered listener slots.
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Idle → Running. Returns whether the state changed.
    pub fn start(&self) -> bool {
        let started = self.lock().begin();
        if started {
            tracing::debug!("mower started");
            self.notify_changed();
        }
        started
    }

    /// Running → Idle. Returns whether the state changed.
    pub fn stop(&self) -> bool {
        let stopped = self.lock().halt();
        if stopped {
            tracing::debug!("mower stopped");
            self.notify_changed();
        }
        stopped
    }

    /// Run one tick if running.
    ///
    /// With `expected_epoch` set, the tick is skipped unless the engine is
    /// still in that run; this discards a tick scheduled before a
    /// stop/start pair.
    pub fn tick(&self, expected_epoch: Option<u64>) -> Option<TickOutcome> {
        let _gate = self.tick_gate.lock().unwrap_or_else(PoisonError::into_inner);
        let cell = {
            let core = self.lock();
            if !core.running || expected_epoch.is_some_and(|e| e != core.run_epoch) {
                return None;
            }
            core.traversal.current()?
        };

        let report = self.listeners.notify(cell);

        // Always advance past a delivered cell, even if stop() landed
        // during delivery, so a later start never repeats it.
        let finished = {
            let mut core = self.lock();
            core.traversal.advance();
            let finished = core.traversal.is_finished();
            if finished {
                core.running = false;
            }
            finished
        };
        if finished {
            tracing::info!(visited = self.visited(), "lawn finished");
            self.notify_changed();
        }

        Some(TickOutcome {
            cell,
            report,
            finished,
        })
    }

    /// Block until finished or `timeout` elapses. Returns whether finished.
    ///
    /// A timeout too large to express as a deadline (such as
    /// `Duration::MAX`) waits without limit.
    pub fn wait_until_finished(&self, timeout: Duration) -> bool {
        let mut core = self.lock();
        if core.traversal.is_finished() {
            return true;
        }
        let Some(deadline) = Instant::now().checked_add(timeout) else {
            while !core.traversal.is_finished() {
                core = self.wait(core);
            }
            return true;
        };
        loop {
            if core.traversal.is_finished() {
                return true;
            }
            let now = Instant::now();
            if now >= deadline {
                return false;
            }
            core = self.wait_timeout(core, deadline - now);
        }
    }
}
