//! Behavioural integration tests for the project workflow engine.
//!
//! These tests drive a fully wired [`ProjectWorkflowService`] over the
//! in-memory adapters through realistic project lifecycles, verifying the
//! state model, the legal-document side effects, and the compensating
//! transitions end to end.

#![expect(
    clippy::expect_used,
    reason = "Test code uses expect for assertion clarity"
)]
#![expect(
    clippy::cognitive_complexity,
    reason = "Test functions may have higher complexity for full scenario coverage"
)]
#![expect(
    clippy::shadow_unrelated,
    reason = "Test code reuses variable names for clarity in sequential assertions"
)]

use chrono::NaiveDate;
use groundwork::project::{
    adapters::memory::{
        FixedSessionPort, InMemoryStatusLookup, InMemoryWorkflowRepository, RecordingViewCache,
    },
    domain::{
        Contract, ContractId, ContractStatus, ContractType, LegalDocumentType,
        PersistedProjectData, Progress, Project, ProjectId, ProjectState, Role,
    },
    ports::WorkflowRepository,
    services::{
        FinishConstructionRequest, PauseProjectRequest, ProjectWorkflowService,
        StartConstructionRequest,
    },
};
use mockable::{Clock, DefaultClock};
use std::sync::Arc;
use tokio::runtime::Runtime;

/// Creates a tokio runtime for async operations in tests.
fn test_runtime() -> Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("failed to create test runtime")
}

type InMemoryService = ProjectWorkflowService<InMemoryWorkflowRepository, DefaultClock>;

/// Wires a service over the in-memory adapters with an elevated session.
fn wired_service(role: Role) -> (Arc<InMemoryWorkflowRepository>, InMemoryService) {
    let repository = Arc::new(InMemoryWorkflowRepository::new());
    let service = ProjectWorkflowService::new(
        Arc::clone(&repository),
        Arc::new(FixedSessionPort::with_role(role)),
        Arc::new(InMemoryStatusLookup::with_all_states()),
        Arc::new(RecordingViewCache::new()),
        Arc::new(DefaultClock),
    );
    (repository, service)
}

fn fresh_project() -> Project {
    let timestamp = DefaultClock.utc();
    Project::from_persisted(PersistedProjectData {
        id: ProjectId::new(),
        state: ProjectState::Initial,
        permit_required: true,
        actual_start: None,
        actual_end: None,
        progress: Progress::ZERO,
        cancel_reason: None,
        created_at: timestamp,
        updated_at: timestamp,
    })
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid calendar date")
}

/// Walks a permit-bound project from registration through cancellation and
/// back, checking the status and document trail at each step.
#[test]
fn full_lifecycle_with_cancellation_and_reinstatement() {
    let rt = test_runtime();
    let (repository, service) = wired_service(Role::Manager);

    let project = fresh_project();
    let project_id = project.id();
    repository.insert_project(project).expect("seed project");

    // A signed design contract pulls the project into the design phase.
    repository
        .insert_contract(Contract::new(
            ContractId::new(),
            project_id,
            ContractType::Design,
            ContractStatus::Signed,
        ))
        .expect("seed design contract");
    let state = rt
        .block_on(service.recompute(project_id))
        .expect("recompute after design contract");
    assert_eq!(state, ProjectState::Design);

    // An active construction contract promotes it to planning.
    repository
        .insert_contract(Contract::new(
            ContractId::new(),
            project_id,
            ContractType::Construction,
            ContractStatus::Active,
        ))
        .expect("seed construction contract");
    let state = rt
        .block_on(service.recompute(project_id))
        .expect("recompute after construction contract");
    assert_eq!(state, ProjectState::Planning);

    // Starting a permit-bound project files the notice and the order.
    let started = rt
        .block_on(
            service.start_construction(
                StartConstructionRequest::new(project_id, date(2024, 6, 1))
                    .with_notice_date(date(2024, 5, 20))
                    .with_notice_code("NTC-2024-009")
                    .with_order_code("ORD-2024-017"),
            ),
        )
        .expect("start construction");
    assert_eq!(started.state(), ProjectState::InProgress);
    assert_eq!(started.actual_start(), Some(date(2024, 6, 1)));

    let documents = repository.documents_for(project_id).expect("documents");
    let types: Vec<_> = documents.iter().map(|doc| doc.doc_type()).collect();
    assert_eq!(
        types,
        vec![
            LegalDocumentType::NoticeCommencement,
            LegalDocumentType::OrderCommencement,
        ]
    );

    // Cancellation keeps the recorded dates so it can be compensated.
    let cancelled = rt
        .block_on(service.cancel_project(project_id, Some("funding withdrawn".to_owned())))
        .expect("cancel project");
    assert_eq!(cancelled.state(), ProjectState::Cancelled);
    assert_eq!(cancelled.cancel_reason(), Some("funding withdrawn"));
    assert_eq!(cancelled.actual_start(), Some(date(2024, 6, 1)));

    // Reinstatement reconstructs in-progress from the surviving start date.
    let restored = rt
        .block_on(service.undo_cancel_project(project_id))
        .expect("undo cancel");
    assert_eq!(restored.state(), ProjectState::InProgress);
    assert_eq!(restored.cancel_reason(), None);

    let stored = rt
        .block_on(repository.find_project(project_id))
        .expect("lookup")
        .expect("project present");
    assert_eq!(stored.state(), ProjectState::InProgress);
}

/// Suspends and resumes an execution-phase project, checking that each leg
/// leaves exactly the documents the transition requires.
#[test]
fn suspension_and_resumption_replace_each_others_paperwork() {
    let rt = test_runtime();
    let (repository, service) = wired_service(Role::Staff);

    let project = fresh_project();
    let project_id = project.id();
    repository.insert_project(project).expect("seed project");

    rt.block_on(
        service.start_construction(StartConstructionRequest::new(project_id, date(2024, 6, 1))),
    )
    .expect("start construction");

    let paused = rt
        .block_on(
            service.pause_project(
                PauseProjectRequest::new(project_id, date(2024, 8, 1), "ground water ingress")
                    .with_volume_note("foundation and floor one complete"),
            ),
        )
        .expect("pause project");
    assert_eq!(paused.state(), ProjectState::Paused);

    let documents = repository.documents_for(project_id).expect("documents");
    let types: Vec<_> = documents.iter().map(|doc| doc.doc_type()).collect();
    assert!(types.contains(&LegalDocumentType::NoticeSuspension));
    assert!(types.contains(&LegalDocumentType::TempAcceptanceMinutes));

    let resumed = rt
        .block_on(service.resume_project(project_id))
        .expect("resume project");
    assert_eq!(resumed.state(), ProjectState::InProgress);

    let documents = repository.documents_for(project_id).expect("documents");
    let types: Vec<_> = documents.iter().map(|doc| doc.doc_type()).collect();
    assert!(types.contains(&LegalDocumentType::OrderResumption));
}

/// Completes a project and reverses the completion, checking the exact
/// delete-then-insert symmetry of the handover paperwork.
#[test]
fn completion_round_trip_restores_the_execution_state() {
    let rt = test_runtime();
    let (repository, service) = wired_service(Role::Admin);

    let project = fresh_project();
    let project_id = project.id();
    repository.insert_project(project).expect("seed project");

    rt.block_on(
        service.start_construction(StartConstructionRequest::new(project_id, date(2024, 6, 1))),
    )
    .expect("start construction");

    let finished = rt
        .block_on(
            service.finish_construction(
                FinishConstructionRequest::new(project_id, date(2025, 3, 31))
                    .with_doc_code("HOM-2025-003"),
            ),
        )
        .expect("finish construction");
    assert_eq!(finished.state(), ProjectState::Completed);
    assert_eq!(finished.progress(), Progress::COMPLETE);

    let documents = repository.documents_for(project_id).expect("documents");
    assert!(
        documents
            .iter()
            .any(|doc| doc.doc_type() == LegalDocumentType::HandoverMinutes)
    );

    let restored = rt
        .block_on(service.undo_finish_construction(project_id))
        .expect("undo finish");
    assert_eq!(restored.state(), ProjectState::InProgress);
    assert_eq!(restored.actual_end(), None);

    let documents = repository.documents_for(project_id).expect("documents");
    assert!(
        documents
            .iter()
            .all(|doc| doc.doc_type() != LegalDocumentType::HandoverMinutes)
    );
}
