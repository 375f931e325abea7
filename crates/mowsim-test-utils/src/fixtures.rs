//! Reusable listener fixtures.
//!
//! - [`CountingListener`]: counts notifications without storing them.
//! - [`PanickingListener`]: panics deterministically after N calls.

use std::sync::atomic::{AtomicUsize, Ordering};

use mowsim_core::{Cell, CellListener};

/// Counts notifications.
#[derive(Debug, Default)]
pub struct CountingListener {
    count: AtomicUsize,
}

impl CountingListener {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }
}

impl CellListener for CountingListener {
    fn visited(&self, _cell: Cell) {
        self.count.fetch_add(1, Ordering::SeqCst);
    }
}

/// Panics on every call after `succeed_count` successful ones.
///
/// Useful for checking that one failing listener neither blocks the
/// others nor disturbs the traversal.
#[derive(Debug, Default)]
pub struct PanickingListener {
    pub succeed_count: usize,
    call_count: AtomicUsize,
}

impl PanickingListener {
    /// A listener that panics on every call.
    pub fn new() -> Self {
        Self::after(0)
    }

    /// A listener that succeeds `succeed_count` times, then panics.
    pub fn after(succeed_count: usize) -> Self {
        Self {
            succeed_count,
            call_count: AtomicUsize::new(0),
        }
    }

    /// How many times `visited()` has been called.
    pub fn calls(&self) -> usize {
        self.call_count.load(Ordering::Relaxed)
    }
}

impl CellListener for PanickingListener {
    fn visited(&self, cell: Cell) {
        let n = self.call_count.fetch_add(1, Ordering::Relaxed);
        if n >= self.succeed_count {
            panic!(
                "deliberate listener failure at {cell} after {} successful calls",
                self.succeed_count
            );
        }
    }
}
