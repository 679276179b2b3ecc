//! Shared fixtures for workflow service tests.

use crate::project::{
    adapters::memory::{
        FixedSessionPort, InMemoryStatusLookup, InMemoryWorkflowRepository, RecordingViewCache,
    },
    domain::{
        Contract, ContractId, ContractStatus, ContractType, PersistedProjectData, Progress,
        Project, ProjectId, ProjectState, Role,
    },
    ports::{SessionPort, StatusLookup, ViewCache},
    services::ProjectWorkflowService,
};
use chrono::NaiveDate;
use mockable::{Clock, DefaultClock};
use std::sync::Arc;

/// Test double wiring for the workflow service.
pub(crate) struct Harness {
    pub repository: Arc<InMemoryWorkflowRepository>,
    pub cache: Arc<RecordingViewCache>,
    pub service: ProjectWorkflowService<InMemoryWorkflowRepository, DefaultClock>,
}

/// Builds a fully wired service with every status code configured.
pub(crate) fn harness(role: Option<Role>) -> Harness {
    harness_with_lookup(role, InMemoryStatusLookup::with_all_states())
}

/// Builds a service with a caller-provided status dictionary.
pub(crate) fn harness_with_lookup(role: Option<Role>, lookup: InMemoryStatusLookup) -> Harness {
    let repository = Arc::new(InMemoryWorkflowRepository::new());
    let cache = Arc::new(RecordingViewCache::new());
    let session: Arc<dyn SessionPort> = Arc::new(
        role.map_or_else(FixedSessionPort::anonymous, FixedSessionPort::with_role),
    );
    let status_lookup: Arc<dyn StatusLookup> = Arc::new(lookup);
    let service = ProjectWorkflowService::new(
        Arc::clone(&repository),
        session,
        status_lookup,
        Arc::clone(&cache) as Arc<dyn ViewCache>,
        Arc::new(DefaultClock),
    );
    Harness {
        repository,
        cache,
        service,
    }
}

/// Builds a project aggregate in an arbitrary persisted shape.
pub(crate) fn project_with(
    state: ProjectState,
    permit_required: bool,
    actual_start: Option<NaiveDate>,
    actual_end: Option<NaiveDate>,
) -> Project {
    let timestamp = DefaultClock.utc();
    Project::from_persisted(PersistedProjectData {
        id: ProjectId::new(),
        state,
        permit_required,
        actual_start,
        actual_end,
        progress: Progress::ZERO,
        cancel_reason: None,
        created_at: timestamp,
        updated_at: timestamp,
    })
}

/// Builds a contract evidence record for a project.
pub(crate) fn contract(
    project_id: ProjectId,
    contract_type: ContractType,
    status: ContractStatus,
) -> Contract {
    Contract::new(ContractId::new(), project_id, contract_type, status)
}

/// Builds a calendar date, panicking on invalid input.
pub(crate) fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid calendar date")
}
