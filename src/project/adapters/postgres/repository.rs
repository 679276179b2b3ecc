//! `PostgreSQL` repository implementation for project workflow storage.

use super::{
    models::{ContractRow, NewLegalDocumentRow, ProjectRow, ProjectTransitionUpdate},
    schema::{contracts, legal_documents, project_statuses, projects},
};
use crate::project::{
    domain::{
        Contract, ContractId, ContractStatus, ContractType, LegalDocument, PersistedProjectData,
        Progress, Project, ProjectId, ProjectState,
    },
    ports::{
        TransitionChange, WorkflowRepository, WorkflowRepositoryError, WorkflowRepositoryResult,
    },
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};

/// `PostgreSQL` connection pool type used by workflow adapters.
pub type WorkflowPgPool = Pool<ConnectionManager<PgConnection>>;

/// Contract status codes that count as in force.
const IN_FORCE_STATUSES: [&str; 4] = ["signed", "processing", "liquidated", "active"];

/// `PostgreSQL`-backed workflow repository.
///
/// Each [`TransitionChange`] is applied inside a single database
/// transaction, so the status update and the document writes commit or
/// roll back as one unit.
#[derive(Debug, Clone)]
pub struct PostgresWorkflowRepository {
    pool: WorkflowPgPool,
}

impl PostgresWorkflowRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: WorkflowPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> WorkflowRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> WorkflowRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(WorkflowRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(WorkflowRepositoryError::persistence)?
    }
}

#[async_trait]
impl WorkflowRepository for PostgresWorkflowRepository {
    async fn find_project(&self, id: ProjectId) -> WorkflowRepositoryResult<Option<Project>> {
        self.run_blocking(move |connection| {
            let row = projects::table
                .inner_join(project_statuses::table)
                .filter(projects::id.eq(id.into_inner()))
                .select((ProjectRow::as_select(), project_statuses::code))
                .first::<(ProjectRow, String)>(connection)
                .optional()
                .map_err(WorkflowRepositoryError::persistence)?;
            row.map(|(project_row, status_code)| row_to_project(project_row, &status_code))
                .transpose()
        })
        .await
    }

    async fn in_force_contracts(&self, id: ProjectId) -> WorkflowRepositoryResult<Vec<Contract>> {
        self.run_blocking(move |connection| {
            let rows = contracts::table
                .filter(contracts::project_id.eq(id.into_inner()))
                .filter(contracts::status.eq_any(IN_FORCE_STATUSES))
                .select(ContractRow::as_select())
                .load::<ContractRow>(connection)
                .map_err(WorkflowRepositoryError::persistence)?;
            rows.into_iter().map(row_to_contract).collect()
        })
        .await
    }

    async fn commit(&self, change: &TransitionChange) -> WorkflowRepositoryResult<()> {
        let project_id = change.project().id();
        let update = to_transition_update(change);
        let doomed: Vec<String> = change
            .delete_document_types()
            .iter()
            .map(|doc_type| doc_type.as_str().to_owned())
            .collect();
        let inserts: Vec<NewLegalDocumentRow> = change
            .create_documents()
            .iter()
            .map(to_new_document_row)
            .collect();

        self.run_blocking(move |connection| {
            connection
                .transaction::<_, TransactionError, _>(|connection| {
                    let updated = diesel::update(
                        projects::table.filter(projects::id.eq(project_id.into_inner())),
                    )
                    .set(&update)
                    .execute(connection)?;
                    if updated == 0 {
                        return Err(TransactionError::MissingProject);
                    }

                    if !doomed.is_empty() {
                        diesel::delete(
                            legal_documents::table
                                .filter(legal_documents::project_id.eq(project_id.into_inner()))
                                .filter(legal_documents::doc_type.eq_any(&doomed)),
                        )
                        .execute(connection)?;
                    }

                    if !inserts.is_empty() {
                        diesel::insert_into(legal_documents::table)
                            .values(&inserts)
                            .execute(connection)?;
                    }

                    Ok(())
                })
                .map_err(|err| match err {
                    TransactionError::MissingProject => {
                        WorkflowRepositoryError::NotFound(project_id)
                    }
                    TransactionError::Diesel(diesel_err) => {
                        WorkflowRepositoryError::persistence(diesel_err)
                    }
                })
        })
        .await
    }
}

/// Internal error distinguishing a vanished project row from other
/// database failures inside the commit transaction.
#[derive(Debug)]
enum TransactionError {
    MissingProject,
    Diesel(diesel::result::Error),
}

impl From<diesel::result::Error> for TransactionError {
    fn from(err: diesel::result::Error) -> Self {
        Self::Diesel(err)
    }
}

fn row_to_project(row: ProjectRow, status_code: &str) -> WorkflowRepositoryResult<Project> {
    let ProjectRow {
        id,
        status_id: _,
        construction_phase: _,
        permit_required,
        actual_start,
        actual_end,
        progress: persisted_progress,
        cancel_reason,
        created_at,
        updated_at,
    } = row;

    let state =
        ProjectState::try_from(status_code).map_err(WorkflowRepositoryError::persistence)?;
    let progress_value =
        u8::try_from(persisted_progress).map_err(WorkflowRepositoryError::persistence)?;
    let progress = Progress::new(progress_value).map_err(WorkflowRepositoryError::persistence)?;

    let data = PersistedProjectData {
        id: ProjectId::from_uuid(id),
        state,
        permit_required,
        actual_start,
        actual_end,
        progress,
        cancel_reason,
        created_at,
        updated_at,
    };
    Ok(Project::from_persisted(data))
}

fn row_to_contract(row: ContractRow) -> WorkflowRepositoryResult<Contract> {
    let contract_type = ContractType::try_from(row.contract_type.as_str())
        .map_err(WorkflowRepositoryError::persistence)?;
    let status = ContractStatus::try_from(row.status.as_str())
        .map_err(WorkflowRepositoryError::persistence)?;
    Ok(Contract::new(
        ContractId::from_uuid(row.id),
        ProjectId::from_uuid(row.project_id),
        contract_type,
        status,
    ))
}

fn to_transition_update(change: &TransitionChange) -> ProjectTransitionUpdate {
    let project = change.project();
    ProjectTransitionUpdate {
        status_id: change.status_ref().into_inner(),
        construction_phase: project.phase().as_str().to_owned(),
        actual_start: project.actual_start(),
        actual_end: project.actual_end(),
        progress: i16::from(project.progress().value()),
        cancel_reason: project.cancel_reason().map(str::to_owned),
        updated_at: project.updated_at(),
    }
}

fn to_new_document_row(document: &LegalDocument) -> NewLegalDocumentRow {
    NewLegalDocumentRow {
        id: document.id().into_inner(),
        project_id: document.project_id().into_inner(),
        doc_type: document.doc_type().as_str().to_owned(),
        doc_code: document.doc_code().map(str::to_owned),
        issue_date: document.issue_date(),
        issuing_authority: document.issuing_authority().map(str::to_owned),
        notes: document.notes().map(str::to_owned),
        status: document.status().as_str().to_owned(),
        created_at: document.created_at(),
    }
}
