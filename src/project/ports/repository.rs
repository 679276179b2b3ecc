//! Repository port for project workflow persistence.

use crate::project::domain::{Contract, LegalDocument, LegalDocumentType, Project, ProjectId};
use crate::project::ports::status_lookup::StatusRef;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for workflow repository operations.
pub type WorkflowRepositoryResult<T> = Result<T, WorkflowRepositoryError>;

/// The atomic unit of work produced by one transition.
///
/// A transition performs one status update plus zero or more document
/// deletions and insertions. Implementations MUST apply the whole change
/// all-or-nothing: a partially applied change would corrupt the
/// state/evidence invariants that compensating transitions rely on.
/// Deletions are applied before insertions so that a forward transition
/// can replace an earlier document of the same type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionChange {
    project: Project,
    status_ref: StatusRef,
    delete_document_types: Vec<LegalDocumentType>,
    create_documents: Vec<LegalDocument>,
}

impl TransitionChange {
    /// Creates a change carrying only the status update.
    #[must_use]
    pub const fn new(project: Project, status_ref: StatusRef) -> Self {
        Self {
            project,
            status_ref,
            delete_document_types: Vec::new(),
            create_documents: Vec::new(),
        }
    }

    /// Adds document types to delete for the project before insertion.
    #[must_use]
    pub fn deleting(mut self, doc_types: impl IntoIterator<Item = LegalDocumentType>) -> Self {
        self.delete_document_types.extend(doc_types);
        self
    }

    /// Adds documents to insert.
    #[must_use]
    pub fn creating(mut self, documents: impl IntoIterator<Item = LegalDocument>) -> Self {
        self.create_documents.extend(documents);
        self
    }

    /// Returns the updated project aggregate.
    #[must_use]
    pub const fn project(&self) -> &Project {
        &self.project
    }

    /// Returns the storage reference resolved for the project's new state.
    #[must_use]
    pub const fn status_ref(&self) -> StatusRef {
        self.status_ref
    }

    /// Returns the document types to delete.
    #[must_use]
    pub fn delete_document_types(&self) -> &[LegalDocumentType] {
        &self.delete_document_types
    }

    /// Returns the documents to insert.
    #[must_use]
    pub fn create_documents(&self) -> &[LegalDocument] {
        &self.create_documents
    }
}

/// Project workflow persistence contract.
#[async_trait]
pub trait WorkflowRepository: Send + Sync {
    /// Finds a project by identifier.
    ///
    /// Returns `None` when the project does not exist.
    async fn find_project(&self, id: ProjectId) -> WorkflowRepositoryResult<Option<Project>>;

    /// Returns the project's in-force contracts.
    ///
    /// Contracts whose status is not in the in-force set are filtered out
    /// by the implementation; callers treat the result as complete
    /// evidence.
    async fn in_force_contracts(&self, id: ProjectId) -> WorkflowRepositoryResult<Vec<Contract>>;

    /// Applies a transition change as one atomic unit.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowRepositoryError::NotFound`] when the project row
    /// has disappeared, or [`WorkflowRepositoryError::Persistence`] when
    /// any write fails, in which case no part of the change is visible.
    async fn commit(&self, change: &TransitionChange) -> WorkflowRepositoryResult<()>;
}

/// Errors returned by workflow repository implementations.
#[derive(Debug, Clone, Error)]
pub enum WorkflowRepositoryError {
    /// The project was not found.
    #[error("project not found: {0}")]
    NotFound(ProjectId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl WorkflowRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
