//! Project lifecycle states and their display phase mapping.

use super::ParseProjectStateError;
use serde::{Deserialize, Serialize};

/// Project lifecycle state.
///
/// `Initial` is the only start state, assigned at project creation.
/// `Completed` and `Cancelled` are normally absorbing but both support an
/// explicit undo back into the graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectState {
    /// Project record exists but no contract evidence has accrued.
    Initial,
    /// A design contract is in force.
    Design,
    /// A construction contract is in force; work has not started.
    Planning,
    /// Construction is under way.
    InProgress,
    /// Construction is temporarily suspended.
    Paused,
    /// Construction has been accepted as complete.
    Completed,
    /// Project has been cancelled.
    Cancelled,
}

impl ProjectState {
    /// Returns the canonical storage code.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Initial => "initial",
            Self::Design => "design",
            Self::Planning => "planning",
            Self::InProgress => "in_progress",
            Self::Paused => "paused",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }

    /// Returns the display phase correlated with this state.
    #[must_use]
    pub const fn phase(self) -> ConstructionPhase {
        match self {
            Self::Initial => ConstructionPhase::Initial,
            Self::Design => ConstructionPhase::Design,
            Self::Planning => ConstructionPhase::Planning,
            Self::InProgress => ConstructionPhase::Execution,
            Self::Paused => ConstructionPhase::Suspended,
            Self::Completed => ConstructionPhase::Warranty,
            Self::Cancelled => ConstructionPhase::Cancelled,
        }
    }

    /// Returns `true` for the states that may be recomputed from contract
    /// evidence.
    ///
    /// Status inference never regresses a project that has already started
    /// construction, been paused, finished, or been cancelled.
    #[must_use]
    pub const fn is_pre_construction(self) -> bool {
        matches!(self, Self::Initial | Self::Design | Self::Planning)
    }
}

impl TryFrom<&str> for ProjectState {
    type Error = ParseProjectStateError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "initial" => Ok(Self::Initial),
            "design" => Ok(Self::Design),
            "planning" => Ok(Self::Planning),
            "in_progress" => Ok(Self::InProgress),
            "paused" => Ok(Self::Paused),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(ParseProjectStateError(value.to_owned())),
        }
    }
}

/// Secondary descriptive tag attached to the project record for UI
/// grouping and filtering.
///
/// The phase is derived from [`ProjectState`] via [`ProjectState::phase`]
/// and persisted alongside it; it is never stored or mutated
/// independently, which keeps the two consistent by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConstructionPhase {
    /// Pre-contract setup.
    Initial,
    /// Design work.
    Design,
    /// Construction planning.
    Planning,
    /// Construction execution.
    Execution,
    /// Suspended execution.
    Suspended,
    /// Post-handover warranty.
    Warranty,
    /// Cancelled project.
    Cancelled,
}

impl ConstructionPhase {
    /// Returns the canonical storage tag.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Initial => "initial",
            Self::Design => "design",
            Self::Planning => "planning",
            Self::Execution => "execution",
            Self::Suspended => "suspended",
            Self::Warranty => "warranty",
            Self::Cancelled => "cancelled",
        }
    }
}
