//! User-facing [`RealtimeMower`] with a background tick thread.
//!
//! ```text
//! User Thread(s)                     Tick Thread
//!     |                                   |
//!     |--start()--> begin(), epoch += 1   |
//!     |             spawn on first start  |
//!     |             notify --------------->| wake, anchor deadline
//!     |                                   | wait_timeout(period)
//!     |                                   | tick(epoch):
//!     |                                   |   listeners.notify(cell)
//!     |                                   |   advance()
//!     |--stop()---> halt(), notify ------>| park until next start
//!     |                                   |
//!     |--drop-----> shutdown, notify ---->| exit
//!     |             join                  |
//! ```

use std::sync::{Arc, Mutex, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use mowsim_core::{Cell, ConfigError, EngineState, GridDims};

use crate::config::MowerConfig;
use crate::dispatch::ListenerSlot;
use crate::mower::Mower;
use crate::tick::TickEngine;
use crate::tick_thread::TickThreadState;

// Compile-time assertion: RealtimeMower must be Send + Sync.
const _: fn() = || {
    fn assert<T: Send + Sync>() {}
    assert::<RealtimeMower>();
};

/// Mower that ticks on its own thread at a fixed period.
///
/// The tick thread is spawned on the first successful `start()` and
/// lives until the lawn is finished or the mower is dropped. `stop()`
/// parks it; a later `start()` resumes from the next unvisited cell, with
/// the first tick one full period after the restart.
///
/// Dropping the mower stops ticking and joins the tick thread.
pub struct RealtimeMower {
    engine: Arc<TickEngine>,
    config: MowerConfig,
    tick_thread: Mutex<Option<JoinHandle<()>>>,
}

impl RealtimeMower {
    /// Create an idle mower ticking once per second.
    ///
    /// Non-positive dimensions are clamped to 1.
    pub fn new(rows: i64, cols: i64) -> Self {
        Self::build(GridDims::new(rows, cols), MowerConfig::default())
    }

    /// Create an idle mower with a custom schedule.
    pub fn with_config(rows: i64, cols: i64, config: MowerConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(GridDims::new(rows, cols), config))
    }

    fn build(dims: GridDims, config: MowerConfig) -> Self {
        Self {
            engine: Arc::new(TickEngine::new(dims)),
            config,
            tick_thread: Mutex::new(None),
        }
    }

    /// Interval between ticks.
    pub fn tick_period(&self) -> Duration {
        self.config.tick_period
    }

    /// Number of registered listener slots.
    pub fn listener_count(&self) -> usize {
        self.engine.listener_count()
    }

    /// Block until the lawn is finished or `timeout` elapses.
    ///
    /// Returns whether the lawn is finished.
    pub fn wait_until_finished(&self, timeout: Duration) -> bool {
        self.engine.wait_until_finished(timeout)
    }

    /// Spawn the tick thread unless one already exists.
    fn ensure_tick_thread(&self) -> std::io::Result<()> {
        let mut slot = self
            .tick_thread
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if slot.is_some() {
            return Ok(());
        }
        let state = TickThreadState::new(Arc::clone(&self.engine), self.config.tick_period);
        let handle = thread::Builder::new()
            .name(self.config.thread_name.clone())
            .spawn(move || state.run())?;
        *slot = Some(handle);
        Ok(())
    }

    /// Stop ticking, wake the tick thread so it exits, and join it.
    fn shutdown(&mut self) {
        {
            let mut core = self.engine.lock();
            core.running = false;
            core.shutdown = true;
        }
        self.engine.notify_changed();

        let handle = self
            .tick_thread
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(handle) = handle {
            // Dropped from inside a listener: the tick thread will see the
            // shutdown flag and exit on its own.
            if handle.thread().id() == thread::current().id() {
                return;
            }
            if handle.join().is_err() {
                tracing::warn!("tick thread panicked");
            }
        }
    }
}

impl Mower for RealtimeMower {
    fn start(&self) {
        let epoch = {
            let mut core = self.engine.lock();
            if !core.begin() {
                return;
            }
            core.run_epoch
        };
        // The core lock is released before spawning; the new thread
        // picks up the running flag on its first lock.
        if let Err(err) = self.ensure_tick_thread() {
            let mut core = self.engine.lock();
            if core.run_epoch == epoch {
                core.halt();
            }
            drop(core);
            tracing::error!(%err, "failed to spawn tick thread; mower stays idle");
            self.engine.notify_changed();
            return;
        }
        tracing::debug!(period = ?self.config.tick_period, "mower started");
        self.engine.notify_changed();
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

impl Drop for RealtimeMower {
    fn drop(&mut self) {
        self.shutdown();
    }
}

impl std::fmt::Debug for RealtimeMower {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RealtimeMower")
            .field("dims", &self.dims())
            .field("state", &self.state())
            .field("visited", &self.visited())
            .field("tick_period", &self.config.tick_period)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mowsim_test_utils::RecordingListener;
    use std::time::Instant;

    fn fast(rows: i64, cols: i64) -> RealtimeMower {
        RealtimeMower::with_config(
            rows,
            cols,
            MowerConfig::with_tick_period(Duration::from_millis(2)),
        )
        .unwrap()
    }

    #[test]
    fn zero_period_rejected() {
        let err = RealtimeMower::with_config(2, 2, MowerConfig::with_tick_period(Duration::ZERO))
            .unwrap_err();
        assert_eq!(err, ConfigError::ZeroTickPeriod);
    }

    #[test]
    fn runs_to_completion_on_its_own() {
        let mower = fast(2, 3);
        let rec = Arc::new(RecordingListener::new());
        mower.add_listener(rec.clone());

        mower.start();
        assert!(mower.wait_until_finished(Duration::from_secs(5)));
        assert_eq!(rec.len(), 6);
        assert_eq!(mower.state(), EngineState::Finished);
        assert!(!mower.is_running());
    }

    #[test]
    fn no_thread_until_first_start() {
        let mower = fast(2, 2);
        assert!(mower.tick_thread.lock().unwrap().is_none());
        mower.stop();
        assert!(mower.tick_thread.lock().unwrap().is_none());
        mower.start();
        assert!(mower.tick_thread.lock().unwrap().is_some());
    }

    #[test]
    fn first_tick_waits_one_period() {
        let mower = RealtimeMower::with_config(
            3,
            3,
            MowerConfig::with_tick_period(Duration::from_millis(300)),
        )
        .unwrap();
        let rec = Arc::new(RecordingListener::new());
        mower.add_listener(rec.clone());

        let started = Instant::now();
        mower.start();
        assert!(rec.wait_for(1, Duration::from_secs(5)));
        assert!(started.elapsed() >= Duration::from_millis(300));
    }

    #[test]
    fn drop_while_running_joins_promptly() {
        let mower = RealtimeMower::with_config(
            50,
            50,
            MowerConfig::with_tick_period(Duration::from_secs(10)),
        )
        .unwrap();
        mower.start();
        let t = Instant::now();
        drop(mower);
        assert!(t.elapsed() < Duration::from_secs(2));
    }

    #[test]
    fn unbounded_wait_after_finish_returns() {
        let mower = fast(1, 1);
        mower.start();
        assert!(mower.wait_until_finished(Duration::from_secs(5)));
        assert!(mower.wait_until_finished(Duration::MAX));
    }

    #[test]
    fn concurrent_first_starts_share_one_tick_thread() {
        let mower = Arc::new(fast(6, 6));
        let rec = Arc::new(RecordingListener::new());
        mower.add_listener(rec.clone());

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let m = Arc::clone(&mower);
                std::thread::spawn(move || {
                    m.start();
                    if i % 2 == 1 {
                        m.stop();
                        m.start();
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }

        mower.start();
        assert!(mower.wait_until_finished(Duration::from_secs(5)));
        let expected: Vec<Cell> = crate::Traversal::new(mower.dims()).collect();
        assert_eq!(rec.cells(), expected);
        assert!(mower.tick_thread.lock().unwrap().is_some());
    }

    #[test]
    fn debug_reports_state() {
        let mower = fast(2, 2);
        let dbg = format!("{mower:?}");
        assert!(dbg.contains("RealtimeMower"));
        assert!(dbg.contains("Idle"));
    }
}
