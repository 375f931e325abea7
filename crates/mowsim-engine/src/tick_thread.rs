//! Fixed-period tick loop for [`RealtimeMower`](crate::RealtimeMower).
//!
//! The tick thread shares the [`TickEngine`] with user threads through an
//! `Arc`. It sleeps on the engine's condition variable, so `start()`,
//! `stop()` and shutdown wake it immediately instead of waiting out the
//! rest of a period. Ticks run on this thread only and therefore never
//! overlap.

use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::tick::TickEngine;

/// Next deadline for the run identified by `epoch`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Schedule {
    epoch: u64,
    deadline: Instant,
}

impl Schedule {
    /// Move to the next fixed-rate deadline. A tick that overran the
    /// period re-anchors on `now` rather than firing a catch-up burst.
    fn advance(&mut self, period: Duration, now: Instant) {
        self.deadline += period;
        if self.deadline <= now {
            self.deadline = now + period;
        }
    }
}

/// State held by the tick thread's main loop.
pub(crate) struct TickThreadState {
    engine: Arc<TickEngine>,
    period: Duration,
}

impl TickThreadState {
    pub fn new(engine: Arc<TickEngine>, period: Duration) -> Self {
        Self { engine, period }
    }

    /// Main tick loop. Returns on shutdown or once the lawn is finished.
    pub fn run(self) {
        tracing::debug!(period = ?self.period, "tick thread started");
        let mut schedule: Option<Schedule> = None;

        while let Some(epoch) = self.wait_for_deadline(&mut schedule) {
            if self.engine.tick(Some(epoch)).is_some() {
                if let Some(s) = schedule.as_mut() {
                    s.advance(self.period, Instant::now());
                }
            }
        }

        tracing::debug!("tick thread exiting");
    }

    /// Sleep until the current run's next deadline.
    ///
    /// Returns the run epoch to tick, or `None` when the thread should exit.
    fn wait_for_deadline(&self, schedule: &mut Option<Schedule>) -> Option<u64> {
        let mut core = self.engine.lock();
        loop {
            if core.shutdown || core.traversal.is_finished() {
                return None;
            }
            if !core.running {
                *schedule = None;
                core = self.engine.wait(core);
                continue;
            }

            let deadline = match *schedule {
                Some(s) if s.epoch == core.run_epoch => s.deadline,
                _ => {
                    let s = Schedule {
                        epoch: core.run_epoch,
                        deadline: Instant::now() + self.period,
                    };
                    *schedule = Some(s);
                    s.deadline
                }
            };

            let now = Instant::now();
            if now >= deadline {
                return Some(core.run_epoch);
            }
            core = self.engine.wait_timeout(core, deadline - now);
        }
    }
}
