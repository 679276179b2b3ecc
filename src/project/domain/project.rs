//! Project aggregate root and lifecycle transition logic.

use super::{
    ConstructionPhase, Contract, ContractType, ProjectDomainError, ProjectId, ProjectState,
};
use chrono::{DateTime, NaiveDate, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Completion percentage of a project, constrained to 0-100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Progress(u8);

impl Progress {
    /// No work recorded.
    pub const ZERO: Self = Self(0);
    /// All work accepted.
    pub const COMPLETE: Self = Self(100);

    /// Creates a validated progress value.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectDomainError::ProgressOutOfRange`] when the value
    /// exceeds 100.
    pub const fn new(value: u8) -> Result<Self, ProjectDomainError> {
        if value > 100 {
            return Err(ProjectDomainError::ProgressOutOfRange(value));
        }
        Ok(Self(value))
    }

    /// Returns the underlying percentage.
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }
}

/// Validated free-text reason attached to a suspension notice.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SuspensionReason(String);

impl SuspensionReason {
    /// Creates a validated suspension reason.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectDomainError::EmptySuspensionReason`] when the value
    /// is empty after trimming.
    pub fn new(value: impl Into<String>) -> Result<Self, ProjectDomainError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ProjectDomainError::EmptySuspensionReason);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the reason as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for SuspensionReason {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

/// Project aggregate root.
///
/// There is no stored transition log: the `actual_start`/`actual_end`
/// dates are the only durable memory of past transitions, and compensating
/// operations reconstruct prior states from them plus contract evidence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    id: ProjectId,
    state: ProjectState,
    permit_required: bool,
    actual_start: Option<NaiveDate>,
    actual_end: Option<NaiveDate>,
    progress: Progress,
    cancel_reason: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted project aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedProjectData {
    /// Persisted project identifier.
    pub id: ProjectId,
    /// Persisted lifecycle state.
    pub state: ProjectState,
    /// Whether a construction permit is required for this project.
    pub permit_required: bool,
    /// Persisted actual construction start date, if any.
    pub actual_start: Option<NaiveDate>,
    /// Persisted actual completion date, if any.
    pub actual_end: Option<NaiveDate>,
    /// Persisted completion percentage.
    pub progress: Progress,
    /// Persisted cancellation reason, if any.
    pub cancel_reason: Option<String>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest lifecycle timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Project {
    /// Creates a project in the `Initial` state.
    #[must_use]
    pub fn new(permit_required: bool, clock: &impl Clock) -> Self {
        let timestamp = clock.utc();
        Self {
            id: ProjectId::new(),
            state: ProjectState::Initial,
            permit_required,
            actual_start: None,
            actual_end: None,
            progress: Progress::ZERO,
            cancel_reason: None,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs a project from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedProjectData) -> Self {
        Self {
            id: data.id,
            state: data.state,
            permit_required: data.permit_required,
            actual_start: data.actual_start,
            actual_end: data.actual_end,
            progress: data.progress,
            cancel_reason: data.cancel_reason,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the project identifier.
    #[must_use]
    pub const fn id(&self) -> ProjectId {
        self.id
    }

    /// Returns the lifecycle state.
    #[must_use]
    pub const fn state(&self) -> ProjectState {
        self.state
    }

    /// Returns the display phase derived from the lifecycle state.
    #[must_use]
    pub const fn phase(&self) -> ConstructionPhase {
        self.state.phase()
    }

    /// Returns `true` when a construction permit is required.
    #[must_use]
    pub const fn permit_required(&self) -> bool {
        self.permit_required
    }

    /// Returns the actual construction start date, if construction has
    /// begun and has not been undone past that point.
    #[must_use]
    pub const fn actual_start(&self) -> Option<NaiveDate> {
        self.actual_start
    }

    /// Returns the actual completion date, if any.
    #[must_use]
    pub const fn actual_end(&self) -> Option<NaiveDate> {
        self.actual_end
    }

    /// Returns the completion percentage.
    #[must_use]
    pub const fn progress(&self) -> Progress {
        self.progress
    }

    /// Returns the recorded cancellation reason, if any.
    #[must_use]
    pub fn cancel_reason(&self) -> Option<&str> {
        self.cancel_reason.as_deref()
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest lifecycle timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Recomputes the pre-construction state from contract evidence.
    ///
    /// Applies only while the project is in a pre-construction state;
    /// projects that have started, paused, finished, or been cancelled are
    /// never regressed. Returns the new state when it differs from the
    /// current one, or `None` when the call is a no-op. Safe to invoke on
    /// every contract-lifecycle event.
    pub fn recompute_from_contracts(
        &mut self,
        contracts: &[Contract],
        clock: &impl Clock,
    ) -> Option<ProjectState> {
        if !self.state.is_pre_construction() {
            return None;
        }
        let target = state_from_contract_evidence(contracts);
        if target == self.state {
            return None;
        }
        self.state = target;
        self.touch(clock);
        Some(target)
    }

    /// Marks construction as started.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectDomainError::AlreadyInProgress`] when construction
    /// is already under way. Re-invocation from any other state overwrites
    /// the recorded start date.
    pub fn start(
        &mut self,
        start_date: NaiveDate,
        clock: &impl Clock,
    ) -> Result<(), ProjectDomainError> {
        if self.state == ProjectState::InProgress {
            return Err(ProjectDomainError::AlreadyInProgress(self.id));
        }
        self.state = ProjectState::InProgress;
        self.actual_start = Some(start_date);
        self.touch(clock);
        Ok(())
    }

    /// Reverses a start: back to `Planning` with the start date cleared.
    pub fn undo_start(&mut self, clock: &impl Clock) {
        self.state = ProjectState::Planning;
        self.actual_start = None;
        self.touch(clock);
    }

    /// Marks construction as accepted complete, forcing progress to 100.
    pub fn finish(&mut self, end_date: NaiveDate, clock: &impl Clock) {
        self.state = ProjectState::Completed;
        self.actual_end = Some(end_date);
        self.progress = Progress::COMPLETE;
        self.touch(clock);
    }

    /// Reverses a completion: back to `InProgress` with the end date
    /// cleared. Progress is deliberately left untouched.
    pub fn undo_finish(&mut self, clock: &impl Clock) {
        self.state = ProjectState::InProgress;
        self.actual_end = None;
        self.touch(clock);
    }

    /// Suspends construction.
    pub fn pause(&mut self, clock: &impl Clock) {
        self.state = ProjectState::Paused;
        self.touch(clock);
    }

    /// Resumes suspended construction.
    pub fn resume(&mut self, clock: &impl Clock) {
        self.state = ProjectState::InProgress;
        self.touch(clock);
    }

    /// Cancels the project.
    ///
    /// Actual dates, contracts, and issued documents are left untouched so
    /// that [`Project::undo_cancel`] can reconstruct the prior state.
    pub fn cancel(&mut self, reason: Option<String>, clock: &impl Clock) {
        self.state = ProjectState::Cancelled;
        self.cancel_reason = reason;
        self.touch(clock);
    }

    /// Reverses a cancellation by reconstructing the prior state from
    /// surviving evidence.
    ///
    /// The priority order is a committed contract of this operation:
    ///
    /// 1. `actual_end` set → `Completed`
    /// 2. `actual_start` set → `InProgress`
    /// 3. an in-force construction contract exists → `Planning`
    /// 4. an in-force design contract exists → `Design`
    /// 5. otherwise → `Initial`
    ///
    /// The reconstruction is deterministic and total, but approximate: a
    /// project manually undone from `InProgress` to `Planning` whose
    /// construction contract was later cancelled reconstructs as `Design`,
    /// indistinguishable from a project that never left design.
    pub fn undo_cancel(&mut self, contracts: &[Contract], clock: &impl Clock) -> ProjectState {
        let target = if self.actual_end.is_some() {
            ProjectState::Completed
        } else if self.actual_start.is_some() {
            ProjectState::InProgress
        } else {
            state_from_contract_evidence(contracts)
        };
        self.state = target;
        self.cancel_reason = None;
        self.touch(clock);
        target
    }

    /// Updates the `updated_at` timestamp to the current clock time.
    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}

/// Derives the pre-construction state implied by in-force contracts.
///
/// An in-force construction contract implies `Planning`; failing that, an
/// in-force design contract implies `Design`; with no in-force in-scope
/// contract the project is `Initial`.
#[must_use]
pub fn state_from_contract_evidence(contracts: &[Contract]) -> ProjectState {
    if contracts
        .iter()
        .any(|c| c.is_in_force_of_type(ContractType::Construction))
    {
        ProjectState::Planning
    } else if contracts
        .iter()
        .any(|c| c.is_in_force_of_type(ContractType::Design))
    {
        ProjectState::Design
    } else {
        ProjectState::Initial
    }
}
