//! Traversal engine driving a simulated mower across a lawn grid.
//!
//! Provides the serpentine [`Traversal`] rule, the [`ListenerSet`]
//! notification channel, and two drivers behind the [`Mower`] trait:
//! [`LockstepMower`] (caller-driven ticks) and [`RealtimeMower`]
//! (background tick thread at a fixed period).

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod dispatch;
pub mod lockstep;
pub mod mower;
pub mod realtime;
pub mod tick;
mod tick_thread;
pub mod traversal;

pub use config::MowerConfig;
pub use dispatch::{DispatchReport, ListenerSet, ListenerSlot};
pub use lockstep::LockstepMower;
pub use mower::Mower;
pub use realtime::RealtimeMower;
pub use tick::{TickEngine, TickOutcome};
pub use traversal::Traversal;
