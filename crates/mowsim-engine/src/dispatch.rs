//! Ordered multicast of cell-visited notifications.
//!
//! [`ListenerSet`] is the notification channel between a traversal
//! engine and its consumers. Registration order is delivery order.
//! Absent entries and duplicates are accepted; absent entries are
//! skipped at delivery time.

use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, PoisonError, RwLock};

use mowsim_core::{Cell, CellListener};
use smallvec::SmallVec;

/// A registered listener slot. `None` is an absent listener.
pub type ListenerSlot = Option<Arc<dyn CellListener>>;

/// Outcome of delivering one notification to every slot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DispatchReport {
    /// Listeners that returned normally.
    pub delivered: usize,
    /// Absent slots that were skipped.
    pub skipped: usize,
    /// Listeners that panicked.
    pub failed: usize,
}

/// Ordered listener registry with isolated delivery.
///
/// `add` may run concurrently with `notify`: each notification is sent
/// to a snapshot of the slots taken before delivery starts, so a
/// listener added mid-delivery first hears about the following cell.
#[derive(Default)]
pub struct ListenerSet {
    slots: RwLock<Vec<ListenerSlot>>,
}

impl ListenerSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a slot. Duplicates and `None` are accepted.
    pub fn add(&self, listener: ListenerSlot) {
        self.slots
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(listener);
    }

    /// Number of registered slots, absent ones included.
    pub fn len(&self) -> usize {
        self.slots.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Whether no slots are registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Deliver `cell` to every present listener in registration order.
    ///
    /// A listener that panics is logged and counted; delivery continues
    /// with the next slot.
    pub fn notify(&self, cell: Cell) -> DispatchReport {
        let snapshot: SmallVec<[ListenerSlot; 4]> = self
            .slots
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .cloned()
            .collect();

        let mut report = DispatchReport::default();
        for (index, slot) in snapshot.iter().enumerate() {
            let Some(listener) = slot else {
                report.skipped += 1;
                continue;
            };
            match panic::catch_unwind(AssertUnwindSafe(|| listener.visited(cell))) {
                Ok(()) => report.delivered += 1,
                Err(payload) => {
                    report.failed += 1;
                    tracing::warn!(
                        listener = index,
                        %cell,
                        reason = panic_message(payload.as_ref()),
                        "cell listener panicked"
                    );
                }
            }
        }
        report
    }
}

impl std::fmt::Debug for ListenerSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListenerSet")
            .field("len", &self.len())
            .finish()
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&'static str>() {
        s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.as_str()
    } else {
        "<non-string panic payload>"
    }
}
