//! Service tests for the compensating (undo) transitions and their
//! role gating.

use super::support::{contract, date, harness, project_with};
use crate::project::{
    domain::{ContractStatus, ContractType, Progress, ProjectState, Role},
    ports::WorkflowRepository,
    services::{
        FinishConstructionRequest, StartConstructionRequest, WorkflowServiceError,
    },
};
use rstest::rstest;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn undo_start_restores_planning_and_removes_commencement_documents() {
    let fixture = harness(Some(Role::Manager));
    let project = project_with(ProjectState::Planning, true, None, None);
    let project_id = project.id();
    fixture
        .repository
        .insert_project(project)
        .expect("seed project");

    fixture
        .service
        .start_construction(StartConstructionRequest::new(project_id, date(2024, 6, 1)))
        .await
        .expect("start should succeed");
    let restored = fixture
        .service
        .undo_start_construction(project_id)
        .await
        .expect("undo should succeed");

    assert_eq!(restored.state(), ProjectState::Planning);
    assert_eq!(restored.actual_start(), None);
    assert!(
        fixture
            .repository
            .documents_for(project_id)
            .expect("documents")
            .is_empty()
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn undo_finish_restores_in_progress_and_removes_handover_minutes() {
    let fixture = harness(Some(Role::Admin));
    let project = project_with(ProjectState::InProgress, false, Some(date(2024, 6, 1)), None);
    let project_id = project.id();
    fixture
        .repository
        .insert_project(project)
        .expect("seed project");

    fixture
        .service
        .finish_construction(FinishConstructionRequest::new(project_id, date(2025, 3, 31)))
        .await
        .expect("finish should succeed");
    let restored = fixture
        .service
        .undo_finish_construction(project_id)
        .await
        .expect("undo should succeed");

    assert_eq!(restored.state(), ProjectState::InProgress);
    assert_eq!(restored.actual_end(), None);
    // Progress is deliberately left at 100 by the undo.
    assert_eq!(restored.progress(), Progress::COMPLETE);
    assert!(
        fixture
            .repository
            .documents_for(project_id)
            .expect("documents")
            .is_empty()
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn cancel_then_undo_restores_completed_when_end_date_survives() {
    let fixture = harness(Some(Role::Manager));
    let project = project_with(
        ProjectState::Completed,
        false,
        Some(date(2024, 6, 1)),
        Some(date(2025, 3, 31)),
    );
    let project_id = project.id();
    fixture
        .repository
        .insert_project(project)
        .expect("seed project");

    fixture
        .service
        .cancel_project(project_id, Some("owner insolvency".to_owned()))
        .await
        .expect("cancel should succeed");
    let cancelled = fixture
        .repository
        .find_project(project_id)
        .await
        .expect("lookup")
        .expect("project present");
    assert_eq!(cancelled.state(), ProjectState::Cancelled);
    assert_eq!(cancelled.cancel_reason(), Some("owner insolvency"));

    let restored = fixture
        .service
        .undo_cancel_project(project_id)
        .await
        .expect("undo should succeed");
    assert_eq!(restored.state(), ProjectState::Completed);
    assert_eq!(restored.cancel_reason(), None);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn cancel_then_undo_restores_in_progress_from_start_date() {
    let fixture = harness(Some(Role::Manager));
    let project = project_with(ProjectState::InProgress, false, Some(date(2024, 6, 1)), None);
    let project_id = project.id();
    fixture
        .repository
        .insert_project(project)
        .expect("seed project");

    fixture
        .service
        .cancel_project(project_id, None)
        .await
        .expect("cancel should succeed");
    let restored = fixture
        .service
        .undo_cancel_project(project_id)
        .await
        .expect("undo should succeed");

    assert_eq!(restored.state(), ProjectState::InProgress);
    assert_eq!(restored.actual_start(), Some(date(2024, 6, 1)));
}

#[rstest]
#[case(ContractType::Construction, ProjectState::Planning)]
#[case(ContractType::Design, ProjectState::Design)]
#[tokio::test(flavor = "multi_thread")]
async fn cancel_then_undo_falls_back_to_contract_evidence(
    #[case] contract_type: ContractType,
    #[case] expected: ProjectState,
) {
    let fixture = harness(Some(Role::Manager));
    let project = project_with(ProjectState::Planning, false, None, None);
    let project_id = project.id();
    fixture
        .repository
        .insert_project(project)
        .expect("seed project");
    fixture
        .repository
        .insert_contract(contract(project_id, contract_type, ContractStatus::Active))
        .expect("seed contract");

    fixture
        .service
        .cancel_project(project_id, None)
        .await
        .expect("cancel should succeed");
    let restored = fixture
        .service
        .undo_cancel_project(project_id)
        .await
        .expect("undo should succeed");

    assert_eq!(restored.state(), expected);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn cancel_then_undo_without_any_evidence_returns_to_initial() {
    let fixture = harness(Some(Role::Manager));
    let project = project_with(ProjectState::Initial, false, None, None);
    let project_id = project.id();
    fixture
        .repository
        .insert_project(project)
        .expect("seed project");

    fixture
        .service
        .cancel_project(project_id, None)
        .await
        .expect("cancel should succeed");
    let restored = fixture
        .service
        .undo_cancel_project(project_id)
        .await
        .expect("undo should succeed");

    assert_eq!(restored.state(), ProjectState::Initial);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn undo_operations_forbid_non_elevated_roles_without_writing() {
    let fixture = harness(Some(Role::Staff));
    let project = project_with(ProjectState::InProgress, false, Some(date(2024, 6, 1)), None);
    let project_id = project.id();
    fixture
        .repository
        .insert_project(project)
        .expect("seed project");

    let undo_start = fixture.service.undo_start_construction(project_id).await;
    let undo_finish = fixture.service.undo_finish_construction(project_id).await;
    let cancel = fixture.service.cancel_project(project_id, None).await;
    let undo_cancel = fixture.service.undo_cancel_project(project_id).await;

    for result in [undo_start, undo_finish, cancel, undo_cancel] {
        assert!(matches!(result, Err(WorkflowServiceError::Forbidden(_))));
    }
    assert_eq!(fixture.repository.commit_count().expect("commit count"), 0);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn undo_operations_require_a_session_at_all() {
    let fixture = harness(None);
    let project = project_with(ProjectState::Cancelled, false, None, None);
    let project_id = project.id();
    fixture
        .repository
        .insert_project(project)
        .expect("seed project");

    let result = fixture.service.undo_cancel_project(project_id).await;

    assert!(matches!(result, Err(WorkflowServiceError::Unauthorized)));
    assert_eq!(fixture.repository.commit_count().expect("commit count"), 0);
}
