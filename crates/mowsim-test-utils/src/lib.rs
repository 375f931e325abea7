//! Test utilities and mock listeners for mowsim development.
//!
//! Provides a [`RecordingListener`] that captures every visited cell
//! and can block until a given number of cells has arrived, a
//! [`ChannelListener`] that forwards cells over a crossbeam channel, and
//! the fixtures in [`fixtures`].

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

use std::sync::{Condvar, Mutex};
use std::time::{Duration, Instant};

use crossbeam_channel::{Receiver, Sender};
use mowsim_core::{Cell, CellListener};

pub use fixtures::{CountingListener, PanickingListener};

/// Records every visited cell in arrival order.
///
/// Register an `Arc<RecordingListener>` with a mower, keep a clone, and
/// inspect it with [`cells`](RecordingListener::cells) after the run.
/// [`wait_for`](RecordingListener::wait_for) lets realtime tests block
/// on progress instead of sleeping.
#[derive(Debug, Default)]
pub struct RecordingListener {
    cells: Mutex<Vec<Cell>>,
    arrived: Condvar,
}

impl RecordingListener {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of the cells received so far.
    pub fn cells(&self) -> Vec<Cell> {
        self.cells.lock().unwrap().clone()
    }

    pub fn len(&self) -> usize {
        self.cells.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Most recent cell, if any.
    pub fn last(&self) -> Option<Cell> {
        self.cells.lock().unwrap().last().copied()
    }

    /// Block until at least `count` cells arrived or `timeout` elapses.
    /// Returns whether the count was reached.
    ///
    /// A timeout too large to express as a deadline waits without limit.
    pub fn wait_for(&self, count: usize, timeout: Duration) -> bool {
        let mut cells = self.cells.lock().unwrap();
        let Some(deadline) = Instant::now().checked_add(timeout) else {
            while cells.len() < count {
                cells = self.arrived.wait(cells).unwrap();
            }
            return true;
        };
        while cells.len() < count {
            let now = Instant::now();
            if now >= deadline {
                return false;
            }
            cells = self.arrived.wait_timeout(cells, deadline - now).unwrap().0;
        }
        true
    }
}

impl CellListener for RecordingListener {
    fn visited(&self, cell: Cell) {
        self.cells.lock().unwrap().push(cell);
        self.arrived.notify_all();
    }
}

/// Forwards every visited cell into an unbounded crossbeam channel.
pub struct ChannelListener {
    tx: Sender<Cell>,
}

impl ChannelListener {
    /// Create a listener and the receiving end of its channel.
    pub fn new() -> (Self, Receiver<Cell>) {
        let (tx, rx) = crossbeam_channel::unbounded();
        (Self { tx }, rx)
    }
}

impl CellListener for ChannelListener {
    fn visited(&self, cell: Cell) {
        // Receiver may have been dropped by a finished test.
        let _ = self.tx.send(cell);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn recording_listener_keeps_order() {
        let rec = RecordingListener::new();
        rec.visited(Cell::new(0, 0));
        rec.visited(Cell::new(0, 1));
        assert_eq!(rec.cells(), [Cell::new(0, 0), Cell::new(0, 1)]);
        assert_eq!(rec.last(), Some(Cell::new(0, 1)));
    }

    #[test]
    fn wait_for_wakes_on_arrival() {
        let rec = Arc::new(RecordingListener::new());
        let writer = Arc::clone(&rec);
        let h = thread::spawn(move || {
            thread::sleep(Duration::from_millis(20));
            writer.visited(Cell::new(3, 4));
        });
        assert!(rec.wait_for(1, Duration::from_secs(5)));
        h.join().unwrap();
        assert!(!rec.wait_for(2, Duration::from_millis(10)));
    }

    #[test]
    fn unbounded_wait_for_does_not_overflow() {
        let rec = Arc::new(RecordingListener::new());
        rec.visited(Cell::new(0, 0));
        assert!(rec.wait_for(1, Duration::MAX));

        let writer = Arc::clone(&rec);
        let h = thread::spawn(move || {
            thread::sleep(Duration::from_millis(20));
            writer.visited(Cell::new(0, 1));
        });
        assert!(rec.wait_for(2, Duration::MAX));
        h.join().unwrap();
    }

    #[test]
    fn channel_listener_forwards() {
        let (listener, rx) = ChannelListener::new();
        listener.visited(Cell::new(1, 1));
        assert_eq!(rx.try_recv(), Ok(Cell::new(1, 1)));
        drop(rx);
        listener.visited(Cell::new(1, 2));
    }
}
