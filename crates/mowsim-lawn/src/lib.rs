//! Presentation side of mowsim: the lawn renderer and the coordinator
//! that wires a mower's cell-visited events into it.
//!
//! The renderer contract is [`LawnRenderer`]; [`Lawn`] is the bundled
//! text renderer. [`MowerCoordinator`] implements the [`Mediator`]
//! contract over any [`Mower`](mowsim_engine::Mower).

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod coordinator;
pub mod error;
pub mod lawn;

pub use coordinator::{Mediator, MowerCoordinator};
pub use error::LawnError;
pub use lawn::{CellMark, Lawn, LawnRenderer};
