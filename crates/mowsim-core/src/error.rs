//! Error types for mowsim configuration.
//!
//! Traversal and notification never fail: bad dimensions are clamped,
//! out-of-range cells are ignored and repeated start/stop calls are
//! no-ops. The only rejectable input is a scheduling configuration.

use std::error::Error;
use std::fmt;
use std::time::Duration;

/// Errors detected by `MowerConfig::validate()`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// The tick period is zero.
    ZeroTickPeriod,
    /// The tick period exceeds the supported maximum.
    TickPeriodTooLong {
        /// The configured period.
        period: Duration,
        /// The largest accepted period.
        max: Duration,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroTickPeriod => write!(f, "tick period must be non-zero"),
            Self::TickPeriodTooLong { period, max } => {
                write!(f, "tick period {period:?} exceeds maximum of {max:?}")
            }
        }
    }
}

impl Error for ConfigError {}
