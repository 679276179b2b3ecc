//! Service layer for project lifecycle transitions.
//!
//! Provides [`ProjectWorkflowService`], which coordinates guard checks,
//! state computation, legal-record emission, and the atomic persistence of
//! each transition, followed by read-side cache invalidation.

use super::commands::CommandKind;
use crate::project::{
    domain::{
        AccessLevel, DocumentDraft, LegalDocument, LegalDocumentType, Project, ProjectDomainError,
        ProjectId, ProjectState, SuspensionReason,
    },
    ports::{
        SessionError, SessionPort, StatusLookup, StatusLookupError, TransitionChange, ViewCache,
        WorkflowRepository, WorkflowRepositoryError,
    },
};
use chrono::NaiveDate;
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Request payload for starting construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartConstructionRequest {
    project_id: ProjectId,
    start_date: NaiveDate,
    notice_date: Option<NaiveDate>,
    order_code: Option<String>,
    notice_code: Option<String>,
    issuing_authority: Option<String>,
}

impl StartConstructionRequest {
    /// Creates a request with required fields.
    #[must_use]
    pub const fn new(project_id: ProjectId, start_date: NaiveDate) -> Self {
        Self {
            project_id,
            start_date,
            notice_date: None,
            order_code: None,
            notice_code: None,
            issuing_authority: None,
        }
    }

    /// Sets the commencement-notice date; defaults to the current date
    /// when omitted.
    #[must_use]
    pub const fn with_notice_date(mut self, notice_date: NaiveDate) -> Self {
        self.notice_date = Some(notice_date);
        self
    }

    /// Sets the administrative code for the commencement order.
    #[must_use]
    pub fn with_order_code(mut self, code: impl Into<String>) -> Self {
        self.order_code = Some(code.into());
        self
    }

    /// Sets the administrative code for the commencement notice.
    #[must_use]
    pub fn with_notice_code(mut self, code: impl Into<String>) -> Self {
        self.notice_code = Some(code.into());
        self
    }

    /// Sets the issuing authority recorded on the generated documents.
    #[must_use]
    pub fn with_issuing_authority(mut self, authority: impl Into<String>) -> Self {
        self.issuing_authority = Some(authority.into());
        self
    }
}

/// Request payload for accepting construction as complete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinishConstructionRequest {
    project_id: ProjectId,
    end_date: NaiveDate,
    doc_code: Option<String>,
    issuing_authority: Option<String>,
}

impl FinishConstructionRequest {
    /// Creates a request with required fields.
    #[must_use]
    pub const fn new(project_id: ProjectId, end_date: NaiveDate) -> Self {
        Self {
            project_id,
            end_date,
            doc_code: None,
            issuing_authority: None,
        }
    }

    /// Sets the administrative code for the handover minutes.
    #[must_use]
    pub fn with_doc_code(mut self, code: impl Into<String>) -> Self {
        self.doc_code = Some(code.into());
        self
    }

    /// Sets the issuing authority recorded on the handover minutes.
    #[must_use]
    pub fn with_issuing_authority(mut self, authority: impl Into<String>) -> Self {
        self.issuing_authority = Some(authority.into());
        self
    }
}

/// Request payload for suspending construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PauseProjectRequest {
    project_id: ProjectId,
    pause_date: NaiveDate,
    reason: String,
    notice_code: Option<String>,
    volume_note: Option<String>,
}

impl PauseProjectRequest {
    /// Creates a request with required fields.
    #[must_use]
    pub fn new(project_id: ProjectId, pause_date: NaiveDate, reason: impl Into<String>) -> Self {
        Self {
            project_id,
            pause_date,
            reason: reason.into(),
            notice_code: None,
            volume_note: None,
        }
    }

    /// Sets the administrative code for the suspension notice.
    #[must_use]
    pub fn with_notice_code(mut self, code: impl Into<String>) -> Self {
        self.notice_code = Some(code.into());
        self
    }

    /// Sets the work-in-place note; when present, temporary acceptance
    /// minutes are generated as the basis for interim settlement.
    #[must_use]
    pub fn with_volume_note(mut self, note: impl Into<String>) -> Self {
        self.volume_note = Some(note.into());
        self
    }
}

/// Service-level errors for workflow operations.
#[derive(Debug, Error)]
pub enum WorkflowServiceError {
    /// No authenticated session exists.
    #[error("authentication required")]
    Unauthorized,

    /// The caller's role is insufficient for the command.
    #[error("insufficient role for command '{0}'")]
    Forbidden(CommandKind),

    /// The project does not exist.
    #[error("project not found: {0}")]
    ProjectNotFound(ProjectId),

    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] ProjectDomainError),

    /// Repository operation failed; the atomic unit guarantees no partial
    /// writes remain.
    #[error(transparent)]
    Repository(#[from] WorkflowRepositoryError),

    /// A required status code is not registered in the dictionary.
    #[error(transparent)]
    Configuration(#[from] StatusLookupError),

    /// The session service failed.
    #[error(transparent)]
    Session(#[from] SessionError),
}

/// Result type for workflow service operations.
pub type WorkflowServiceResult<T> = Result<T, WorkflowServiceError>;

/// Project lifecycle orchestration service.
#[derive(Clone)]
pub struct ProjectWorkflowService<R, C>
where
    R: WorkflowRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    session: Arc<dyn SessionPort>,
    status_lookup: Arc<dyn StatusLookup>,
    view_cache: Arc<dyn ViewCache>,
    clock: Arc<C>,
}

impl<R, C> ProjectWorkflowService<R, C>
where
    R: WorkflowRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new workflow service.
    #[must_use]
    pub fn new(
        repository: Arc<R>,
        session: Arc<dyn SessionPort>,
        status_lookup: Arc<dyn StatusLookup>,
        view_cache: Arc<dyn ViewCache>,
        clock: Arc<C>,
    ) -> Self {
        Self {
            repository,
            session,
            status_lookup,
            view_cache,
            clock,
        }
    }

    /// Recomputes a pre-construction project's state from its in-force
    /// contracts.
    ///
    /// An in-force construction contract implies `Planning`, an in-force
    /// design contract implies `Design`, and no in-force in-scope contract
    /// implies `Initial`. Projects that have started construction or
    /// beyond are never changed. Idempotent: with unchanged evidence the
    /// second call persists nothing and emits nothing.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowServiceError`] when the project is missing, the
    /// target status code is unconfigured, or persistence fails.
    pub async fn recompute(&self, project_id: ProjectId) -> WorkflowServiceResult<ProjectState> {
        self.authorize(CommandKind::Recompute).await?;
        let mut project = self.load_project(project_id).await?;
        let contracts = self.repository.in_force_contracts(project_id).await?;
        let Some(new_state) = project.recompute_from_contracts(&contracts, &*self.clock) else {
            return Ok(project.state());
        };
        let status_ref = self.status_lookup.resolve(new_state).await?;
        self.commit_and_refresh(TransitionChange::new(project, status_ref))
            .await?;
        Ok(new_state)
    }

    /// Starts construction, generating the commencement paperwork.
    ///
    /// When the project requires a permit, a commencement notice is
    /// generated before the commencement order; otherwise the notice step
    /// is skipped entirely.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowServiceError`] when the caller is not
    /// authenticated, the project is missing or already in progress, or
    /// the atomic write fails.
    pub async fn start_construction(
        &self,
        request: StartConstructionRequest,
    ) -> WorkflowServiceResult<Project> {
        self.authorize(CommandKind::StartConstruction).await?;
        let StartConstructionRequest {
            project_id,
            start_date,
            notice_date,
            order_code,
            notice_code,
            issuing_authority,
        } = request;

        let mut project = self.load_project(project_id).await?;
        project.start(start_date, &*self.clock)?;

        let mut replaced = Vec::new();
        let mut documents = Vec::new();
        if project.permit_required() {
            let issue_date = notice_date.unwrap_or_else(|| self.clock.utc().date_naive());
            let mut draft = DocumentDraft::new();
            if let Some(code) = notice_code {
                draft = draft.with_doc_code(code);
            }
            if let Some(authority) = issuing_authority.clone() {
                draft = draft.with_issuing_authority(authority);
            }
            replaced.push(LegalDocumentType::NoticeCommencement);
            documents.push(LegalDocument::new(
                project_id,
                LegalDocumentType::NoticeCommencement,
                issue_date,
                draft,
                &*self.clock,
            ));
        }

        let mut order_draft = DocumentDraft::new();
        if let Some(code) = order_code {
            order_draft = order_draft.with_doc_code(code);
        }
        if let Some(authority) = issuing_authority {
            order_draft = order_draft.with_issuing_authority(authority);
        }
        replaced.push(LegalDocumentType::OrderCommencement);
        documents.push(LegalDocument::new(
            project_id,
            LegalDocumentType::OrderCommencement,
            start_date,
            order_draft,
            &*self.clock,
        ));

        let status_ref = self.status_lookup.resolve(project.state()).await?;
        let change = TransitionChange::new(project.clone(), status_ref)
            .deleting(replaced)
            .creating(documents);
        self.commit_and_refresh(change).await?;
        Ok(project)
    }

    /// Reverses a start: back to `Planning`, start date cleared, both
    /// commencement documents removed.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowServiceError::Forbidden`] for non-elevated
    /// callers, or the usual lookup/persistence failures.
    pub async fn undo_start_construction(
        &self,
        project_id: ProjectId,
    ) -> WorkflowServiceResult<Project> {
        self.authorize(CommandKind::UndoStartConstruction).await?;
        let mut project = self.load_project(project_id).await?;
        project.undo_start(&*self.clock);

        let status_ref = self.status_lookup.resolve(project.state()).await?;
        let change = TransitionChange::new(project.clone(), status_ref).deleting([
            LegalDocumentType::NoticeCommencement,
            LegalDocumentType::OrderCommencement,
        ]);
        self.commit_and_refresh(change).await?;
        Ok(project)
    }

    /// Accepts construction as complete, generating handover minutes and
    /// forcing progress to 100.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowServiceError`] when the caller is not
    /// authenticated, the project is missing, or the atomic write fails.
    pub async fn finish_construction(
        &self,
        request: FinishConstructionRequest,
    ) -> WorkflowServiceResult<Project> {
        self.authorize(CommandKind::FinishConstruction).await?;
        let FinishConstructionRequest {
            project_id,
            end_date,
            doc_code,
            issuing_authority,
        } = request;

        let mut project = self.load_project(project_id).await?;
        project.finish(end_date, &*self.clock);

        let mut draft = DocumentDraft::new();
        if let Some(code) = doc_code {
            draft = draft.with_doc_code(code);
        }
        if let Some(authority) = issuing_authority {
            draft = draft.with_issuing_authority(authority);
        }
        let minutes = LegalDocument::new(
            project_id,
            LegalDocumentType::HandoverMinutes,
            end_date,
            draft,
            &*self.clock,
        );

        let status_ref = self.status_lookup.resolve(project.state()).await?;
        let change = TransitionChange::new(project.clone(), status_ref)
            .deleting([LegalDocumentType::HandoverMinutes])
            .creating([minutes]);
        self.commit_and_refresh(change).await?;
        Ok(project)
    }

    /// Reverses a completion: back to `InProgress`, end date cleared,
    /// handover minutes removed. Progress is deliberately left untouched.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowServiceError::Forbidden`] for non-elevated
    /// callers, or the usual lookup/persistence failures.
    pub async fn undo_finish_construction(
        &self,
        project_id: ProjectId,
    ) -> WorkflowServiceResult<Project> {
        self.authorize(CommandKind::UndoFinishConstruction).await?;
        let mut project = self.load_project(project_id).await?;
        project.undo_finish(&*self.clock);

        let status_ref = self.status_lookup.resolve(project.state()).await?;
        let change = TransitionChange::new(project.clone(), status_ref)
            .deleting([LegalDocumentType::HandoverMinutes]);
        self.commit_and_refresh(change).await?;
        Ok(project)
    }

    /// Suspends construction, generating a suspension notice carrying the
    /// reason and, when a work-in-place note is supplied, temporary
    /// acceptance minutes for interim settlement.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowServiceError::Domain`] when the reason is empty,
    /// plus the usual authentication/lookup/persistence failures.
    pub async fn pause_project(
        &self,
        request: PauseProjectRequest,
    ) -> WorkflowServiceResult<Project> {
        self.authorize(CommandKind::PauseProject).await?;
        let PauseProjectRequest {
            project_id,
            pause_date,
            reason,
            notice_code,
            volume_note,
        } = request;
        let reason = SuspensionReason::new(reason)?;

        let mut project = self.load_project(project_id).await?;
        project.pause(&*self.clock);

        let mut replaced = vec![LegalDocumentType::NoticeSuspension];
        let mut draft = DocumentDraft::new().with_notes(reason.as_str());
        if let Some(code) = notice_code {
            draft = draft.with_doc_code(code);
        }
        let mut documents = vec![LegalDocument::new(
            project_id,
            LegalDocumentType::NoticeSuspension,
            pause_date,
            draft,
            &*self.clock,
        )];
        if let Some(note) = volume_note {
            replaced.push(LegalDocumentType::TempAcceptanceMinutes);
            documents.push(LegalDocument::new(
                project_id,
                LegalDocumentType::TempAcceptanceMinutes,
                pause_date,
                DocumentDraft::new().with_notes(note),
                &*self.clock,
            ));
        }

        let status_ref = self.status_lookup.resolve(project.state()).await?;
        let change = TransitionChange::new(project.clone(), status_ref)
            .deleting(replaced)
            .creating(documents);
        self.commit_and_refresh(change).await?;
        Ok(project)
    }

    /// Resumes suspended construction, generating a resumption order.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowServiceError`] when the caller is not
    /// authenticated, the project is missing, or the atomic write fails.
    pub async fn resume_project(&self, project_id: ProjectId) -> WorkflowServiceResult<Project> {
        self.authorize(CommandKind::ResumeProject).await?;
        let mut project = self.load_project(project_id).await?;
        project.resume(&*self.clock);

        let order = LegalDocument::new(
            project_id,
            LegalDocumentType::OrderResumption,
            self.clock.utc().date_naive(),
            DocumentDraft::new(),
            &*self.clock,
        );

        let status_ref = self.status_lookup.resolve(project.state()).await?;
        let change = TransitionChange::new(project.clone(), status_ref)
            .deleting([LegalDocumentType::OrderResumption])
            .creating([order]);
        self.commit_and_refresh(change).await?;
        Ok(project)
    }

    /// Cancels the project.
    ///
    /// Actual dates, contracts, and issued documents are left untouched so
    /// [`Self::undo_cancel_project`] can reconstruct the prior state.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowServiceError::Forbidden`] for non-elevated
    /// callers, or the usual lookup/persistence failures.
    pub async fn cancel_project(
        &self,
        project_id: ProjectId,
        reason: Option<String>,
    ) -> WorkflowServiceResult<Project> {
        self.authorize(CommandKind::CancelProject).await?;
        let mut project = self.load_project(project_id).await?;
        project.cancel(reason, &*self.clock);

        let status_ref = self.status_lookup.resolve(project.state()).await?;
        self.commit_and_refresh(TransitionChange::new(project.clone(), status_ref))
            .await?;
        Ok(project)
    }

    /// Reverses a cancellation by reconstructing the prior state from
    /// surviving evidence.
    ///
    /// See [`Project::undo_cancel`] for the committed priority order.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowServiceError::Forbidden`] for non-elevated
    /// callers, or the usual lookup/persistence failures.
    pub async fn undo_cancel_project(
        &self,
        project_id: ProjectId,
    ) -> WorkflowServiceResult<Project> {
        self.authorize(CommandKind::UndoCancelProject).await?;
        let mut project = self.load_project(project_id).await?;
        let contracts = self.repository.in_force_contracts(project_id).await?;
        project.undo_cancel(&contracts, &*self.clock);

        let status_ref = self.status_lookup.resolve(project.state()).await?;
        self.commit_and_refresh(TransitionChange::new(project.clone(), status_ref))
            .await?;
        Ok(project)
    }

    /// Checks the current session against the command's required access.
    ///
    /// The access policy lives in one place,
    /// [`CommandKind::required_access`], so every operation is gated
    /// uniformly rather than by per-function checks.
    async fn authorize(&self, kind: CommandKind) -> WorkflowServiceResult<()> {
        if kind.required_access() == AccessLevel::Open {
            return Ok(());
        }
        let caller = self.session.current_caller().await?;
        match caller {
            None => Err(WorkflowServiceError::Unauthorized),
            Some(caller) if kind.required_access().permits(Some(&caller)) => Ok(()),
            Some(_) => Err(WorkflowServiceError::Forbidden(kind)),
        }
    }

    async fn load_project(&self, project_id: ProjectId) -> WorkflowServiceResult<Project> {
        self.repository
            .find_project(project_id)
            .await?
            .ok_or(WorkflowServiceError::ProjectNotFound(project_id))
    }

    /// Commits the change atomically, then invalidates the project's
    /// cached views. Invalidation failures are logged, never propagated.
    async fn commit_and_refresh(&self, change: TransitionChange) -> WorkflowServiceResult<()> {
        self.repository.commit(&change).await?;
        let project = change.project();
        tracing::info!(
            project = %project.id(),
            state = project.state().as_str(),
            phase = project.phase().as_str(),
            "workflow transition committed"
        );
        self.invalidate_views(project.id()).await;
        Ok(())
    }

    async fn invalidate_views(&self, project_id: ProjectId) {
        let paths = ["projects".to_owned(), format!("projects/{project_id}")];
        for path in paths {
            if let Err(err) = self.view_cache.invalidate(&path).await {
                tracing::warn!(
                    project = %project_id,
                    path = %path,
                    error = %err,
                    "view cache invalidation failed"
                );
            }
        }
    }
}
