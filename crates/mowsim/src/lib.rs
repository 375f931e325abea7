//! mowsim: a serpentine (boustrophedon) lawn-mower traversal engine.
//!
//! This is the top-level facade crate that re-exports the public API from
//! the mowsim sub-crates. It also ships the `mowsim` binary, a terminal
//! animation of the lawn being cut.
//!
//! # Quick start
//!
//! ```rust
//! use mowsim::prelude::*;
//!
//! let lawn = Lawn::try_new(2, 3).unwrap();
//! let coordinator = MowerCoordinator::new(LockstepMower::new(2, 3), lawn);
//! coordinator.start_mowing();
//! assert_eq!(coordinator.mower().run_to_completion(), 6);
//! assert_eq!(coordinator.phase(), MowerPhase::Finished);
//! print!("{}", *coordinator.renderer());
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `mowsim-core` | Grid dimensions, cells, listener trait, phases, errors |
//! | [`engine`] | `mowsim-engine` | Traversal, lockstep and realtime mowers |
//! | [`lawn`] | `mowsim-lawn` | Lawn renderer and mower coordinator |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types and traits (`mowsim-core`).
///
/// [`types::GridDims`], [`types::Cell`], the [`types::CellListener`]
/// capability and the [`types::MowerPhase`] label/message mapping.
pub use mowsim_core as types;

/// Traversal engines (`mowsim-engine`).
///
/// [`engine::LockstepMower`] for caller-driven stepping,
/// [`engine::RealtimeMower`] for a background fixed-rate tick thread.
pub use mowsim_engine as engine;

/// Lawn rendering and coordination (`mowsim-lawn`).
pub use mowsim_lawn as lawn;

/// Common imports for typical mowsim usage.
///
/// ```rust
/// use mowsim::prelude::*;
/// ```
pub mod prelude {
    // Core types and traits
    pub use mowsim_core::{Cell, CellListener, EngineState, GridDims, MowerPhase};

    // Errors
    pub use mowsim_core::ConfigError;

    // Engine
    pub use mowsim_engine::{LockstepMower, Mower, MowerConfig, RealtimeMower, Traversal};

    // Lawn
    pub use mowsim_lawn::{CellMark, Lawn, LawnError, LawnRenderer, Mediator, MowerCoordinator};
}
