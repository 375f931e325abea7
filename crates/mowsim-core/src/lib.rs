//! Core types and traits for the mowsim traversal engine.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the fundamental abstractions shared by the rest of the workspace:
//! grid dimensions and cells, the cell-visited listener capability,
//! reported phases, and configuration errors.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod grid;
pub mod listener;
pub mod phase;

pub use error::ConfigError;
pub use grid::{Cell, GridDims};
pub use listener::{CellListener, NoopListener};
pub use phase::{EngineState, MowerPhase, ParsePhaseError};
