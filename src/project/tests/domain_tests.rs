//! Unit tests for the project aggregate, contract evidence, and
//! legal-document vocabulary.

use super::support::{contract, date, project_with};
use crate::project::domain::{
    ContractStatus, ContractType, LegalDocumentType, Progress, ProjectDomainError, ProjectState,
    SuspensionReason, state_from_contract_evidence,
};
use eyre::ensure;
use mockable::DefaultClock;
use rstest::rstest;

#[rstest]
#[case(0, true)]
#[case(42, true)]
#[case(100, true)]
#[case(101, false)]
#[case(255, false)]
fn progress_is_validated(#[case] value: u8, #[case] ok: bool) {
    let result = Progress::new(value);
    if ok {
        assert_eq!(result.map(Progress::value), Ok(value));
    } else {
        assert_eq!(result, Err(ProjectDomainError::ProgressOutOfRange(value)));
    }
}

#[rstest]
fn suspension_reason_trims_and_rejects_empty() -> eyre::Result<()> {
    let reason = SuspensionReason::new("  ground water ingress ")?;
    ensure!(reason.as_str() == "ground water ingress");
    assert_eq!(
        SuspensionReason::new("   "),
        Err(ProjectDomainError::EmptySuspensionReason)
    );
    Ok(())
}

#[rstest]
fn start_records_date_and_moves_to_in_progress() -> eyre::Result<()> {
    let clock = DefaultClock;
    let mut project = project_with(ProjectState::Planning, false, None, None);
    project.start(date(2024, 6, 1), &clock)?;
    ensure!(project.state() == ProjectState::InProgress);
    ensure!(project.actual_start() == Some(date(2024, 6, 1)));
    Ok(())
}

#[rstest]
fn start_rejects_project_already_in_progress() {
    let clock = DefaultClock;
    let mut project = project_with(ProjectState::InProgress, false, Some(date(2024, 1, 1)), None);
    let result = project.start(date(2024, 6, 1), &clock);
    assert_eq!(
        result,
        Err(ProjectDomainError::AlreadyInProgress(project.id()))
    );
    assert_eq!(project.actual_start(), Some(date(2024, 1, 1)));
}

#[rstest]
fn start_from_paused_overwrites_the_recorded_date() -> eyre::Result<()> {
    let clock = DefaultClock;
    let mut project = project_with(ProjectState::Paused, false, Some(date(2024, 1, 1)), None);
    project.start(date(2024, 6, 1), &clock)?;
    ensure!(project.actual_start() == Some(date(2024, 6, 1)));
    Ok(())
}

#[rstest]
fn undo_start_returns_to_planning_and_clears_date() -> eyre::Result<()> {
    let clock = DefaultClock;
    let mut project = project_with(ProjectState::InProgress, false, Some(date(2024, 6, 1)), None);
    project.undo_start(&clock);
    ensure!(project.state() == ProjectState::Planning);
    ensure!(project.actual_start().is_none());
    Ok(())
}

#[rstest]
fn finish_forces_progress_to_complete() -> eyre::Result<()> {
    let clock = DefaultClock;
    let mut project = project_with(ProjectState::InProgress, false, Some(date(2024, 6, 1)), None);
    project.finish(date(2025, 3, 31), &clock);
    ensure!(project.state() == ProjectState::Completed);
    ensure!(project.actual_end() == Some(date(2025, 3, 31)));
    ensure!(project.progress() == Progress::COMPLETE);
    Ok(())
}

#[rstest]
fn undo_finish_clears_end_date_but_keeps_progress() -> eyre::Result<()> {
    let clock = DefaultClock;
    let mut project = project_with(ProjectState::InProgress, false, Some(date(2024, 6, 1)), None);
    project.finish(date(2025, 3, 31), &clock);
    project.undo_finish(&clock);
    ensure!(project.state() == ProjectState::InProgress);
    ensure!(project.actual_end().is_none());
    ensure!(project.progress() == Progress::COMPLETE);
    Ok(())
}

#[rstest]
fn cancel_preserves_dates_and_records_reason() -> eyre::Result<()> {
    let clock = DefaultClock;
    let mut project = project_with(ProjectState::InProgress, false, Some(date(2024, 6, 1)), None);
    project.cancel(Some("funding withdrawn".to_owned()), &clock);
    ensure!(project.state() == ProjectState::Cancelled);
    ensure!(project.actual_start() == Some(date(2024, 6, 1)));
    ensure!(project.cancel_reason() == Some("funding withdrawn"));
    Ok(())
}

#[rstest]
fn undo_cancel_prefers_end_date_over_all_other_evidence() -> eyre::Result<()> {
    let clock = DefaultClock;
    let mut project = project_with(
        ProjectState::Cancelled,
        false,
        Some(date(2024, 1, 1)),
        Some(date(2024, 12, 1)),
    );
    let contracts = vec![contract(
        project.id(),
        ContractType::Construction,
        ContractStatus::Active,
    )];
    let restored = project.undo_cancel(&contracts, &clock);
    ensure!(restored == ProjectState::Completed);
    ensure!(project.cancel_reason().is_none());
    Ok(())
}

#[rstest]
fn undo_cancel_uses_start_date_before_contract_evidence() -> eyre::Result<()> {
    let clock = DefaultClock;
    let mut project = project_with(ProjectState::Cancelled, false, Some(date(2024, 1, 1)), None);
    let contracts = vec![contract(
        project.id(),
        ContractType::Construction,
        ContractStatus::Active,
    )];
    ensure!(project.undo_cancel(&contracts, &clock) == ProjectState::InProgress);
    Ok(())
}

#[rstest]
fn undo_cancel_falls_back_to_contract_evidence_then_initial() -> eyre::Result<()> {
    let clock = DefaultClock;

    let mut project = project_with(ProjectState::Cancelled, false, None, None);
    let construction = vec![contract(
        project.id(),
        ContractType::Construction,
        ContractStatus::Signed,
    )];
    ensure!(project.undo_cancel(&construction, &clock) == ProjectState::Planning);

    let mut design_only = project_with(ProjectState::Cancelled, false, None, None);
    let design = vec![contract(
        design_only.id(),
        ContractType::Design,
        ContractStatus::Processing,
    )];
    ensure!(design_only.undo_cancel(&design, &clock) == ProjectState::Design);

    let mut bare = project_with(ProjectState::Cancelled, false, None, None);
    ensure!(bare.undo_cancel(&[], &clock) == ProjectState::Initial);
    Ok(())
}

#[rstest]
#[case(ContractStatus::Draft, false)]
#[case(ContractStatus::Signed, true)]
#[case(ContractStatus::Processing, true)]
#[case(ContractStatus::Liquidated, true)]
#[case(ContractStatus::Active, true)]
#[case(ContractStatus::Cancelled, false)]
fn in_force_set_matches_contract(#[case] status: ContractStatus, #[case] expected: bool) {
    assert_eq!(status.is_in_force(), expected);
}

#[rstest]
fn evidence_prioritizes_construction_over_design() {
    let project = project_with(ProjectState::Initial, false, None, None);
    let contracts = vec![
        contract(project.id(), ContractType::Design, ContractStatus::Active),
        contract(
            project.id(),
            ContractType::Construction,
            ContractStatus::Signed,
        ),
    ];
    assert_eq!(
        state_from_contract_evidence(&contracts),
        ProjectState::Planning
    );
}

#[rstest]
fn evidence_ignores_contracts_not_in_force_and_out_of_scope_types() {
    let project = project_with(ProjectState::Initial, false, None, None);
    let contracts = vec![
        contract(
            project.id(),
            ContractType::Construction,
            ContractStatus::Draft,
        ),
        contract(project.id(), ContractType::Other, ContractStatus::Active),
    ];
    assert_eq!(
        state_from_contract_evidence(&contracts),
        ProjectState::Initial
    );
}

#[rstest]
fn recompute_never_regresses_a_started_project() {
    let clock = DefaultClock;
    let mut project = project_with(ProjectState::InProgress, false, Some(date(2024, 6, 1)), None);
    let changed = project.recompute_from_contracts(&[], &clock);
    assert_eq!(changed, None);
    assert_eq!(project.state(), ProjectState::InProgress);
}

#[rstest]
#[case("NOTICE_COMMENCEMENT", LegalDocumentType::NoticeCommencement)]
#[case("ORDER_COMMENCEMENT", LegalDocumentType::OrderCommencement)]
#[case("NOTICE_SUSPENSION", LegalDocumentType::NoticeSuspension)]
#[case("TEMP_ACCEPTANCE_MINUTES", LegalDocumentType::TempAcceptanceMinutes)]
#[case("ORDER_RESUMPTION", LegalDocumentType::OrderResumption)]
#[case("HANDOVER_MINUTES", LegalDocumentType::HandoverMinutes)]
fn document_type_codes_round_trip(#[case] code: &str, #[case] doc_type: LegalDocumentType) {
    assert_eq!(doc_type.as_str(), code);
    assert_eq!(LegalDocumentType::try_from(code), Ok(doc_type));
}
