//! Engine states and the human-readable phases reported to users.
//!
//! [`EngineState`] is the lifecycle the engine actually enforces.
//! [`MowerPhase`] is a reporting label with a fixed message; it carries
//! no transition rules of its own.

use std::fmt;
use std::str::FromStr;

/// Lifecycle state of a traversal engine.
///
/// `Idle → Running` on start, `Running → Idle` on stop,
/// `Running → Finished` when the last row is passed. `Finished` is terminal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EngineState {
    /// Not ticking. The traversal may or may not have begun.
    Idle,
    /// Ticks are being scheduled.
    Running,
    /// Every cell has been visited; the engine is spent.
    Finished,
}

impl EngineState {
    /// The phase to report for this state.
    ///
    /// An idle engine that has already visited cells reports
    /// [`MowerPhase::Paused`].
    pub fn phase(self, visited: u64) -> MowerPhase {
        match self {
            Self::Idle if visited == 0 => MowerPhase::Idle,
            Self::Idle => MowerPhase::Paused,
            Self::Running => MowerPhase::Mowing,
            Self::Finished => MowerPhase::Finished,
        }
    }
}

/// Reported mower phase. `Display` prints the phase message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MowerPhase {
    /// Waiting for the first start.
    Idle,
    /// Actively cutting.
    Mowing,
    /// Stopped part-way through the lawn.
    Paused,
    /// The whole lawn has been cut.
    Finished,
}

impl MowerPhase {
    /// All phases, in lifecycle order.
    pub const ALL: [MowerPhase; 4] = [Self::Idle, Self::Mowing, Self::Paused, Self::Finished];

    /// Short lowercase label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Mowing => "mowing",
            Self::Paused => "paused",
            Self::Finished => "finished",
        }
    }

    /// Fixed message shown for this phase.
    pub fn message(self) -> &'static str {
        match self {
            Self::Idle => "Mower is idle. Press Start to begin mowing.",
            Self::Mowing => "Mower is moving. Press stop to stop.",
            Self::Paused => "Mower is paused. Press resume to continue.",
            Self::Finished => "Mowing completed!",
        }
    }
}

impl fmt::Display for MowerPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Returned by [`MowerPhase::from_str`] for an unknown label.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParsePhaseError {
    /// The label that did not match any phase.
    pub label: String,
}

impl fmt::Display for ParsePhaseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown mower phase '{}'", self.label)
    }
}

impl std::error::Error for ParsePhaseError {}

impl FromStr for MowerPhase {
    type Err = ParsePhaseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|p| p.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ParsePhaseError {
                label: s.to_string(),
            })
    }
}
