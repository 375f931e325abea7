//! Scheduling configuration for [`RealtimeMower`](crate::RealtimeMower).
//!
//! Grid dimensions are not part of the config: they are clamped at
//! construction and can never be rejected.

use std::time::Duration;

use mowsim_core::ConfigError;

// ── MowerConfig ────────────────────────────────────────────────────

/// Configuration for the realtime tick schedule.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MowerConfig {
    /// Interval between ticks. The first tick fires one period after
    /// `start()`, so a long period delays the first visible cell by that
    /// much. Default: 1 second.
    pub tick_period: Duration,
    /// Name given to the background tick thread. Default: `mowsim-tick`.
    pub thread_name: String,
}

impl MowerConfig {
    /// Longest accepted tick period.
    pub const MAX_TICK_PERIOD: Duration = Duration::from_secs(60 * 60);

    /// Default config with the given tick period.
    pub fn with_tick_period(tick_period: Duration) -> Self {
        Self {
            tick_period,
            ..Self::default()
        }
    }

    /// Check the tick period is in `(0, MAX_TICK_PERIOD]`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_period.is_zero() {
            return Err(ConfigError::ZeroTickPeriod);
        }
        if self.tick_period > Self::MAX_TICK_PERIOD {
            return Err(ConfigError::TickPeriodTooLong {
                period: self.tick_period,
                max: Self::MAX_TICK_PERIOD,
            });
        }
        Ok(())
    }
}

impl Default for MowerConfig {
    fn default() -> Self {
        Self {
            tick_period: Duration::from_secs(1),
            thread_name: "mowsim-tick".to_string(),
        }
    }
}
