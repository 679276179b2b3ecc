//! In-memory repository for workflow lifecycle tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::project::{
    domain::{Contract, LegalDocument, Project, ProjectId},
    ports::{
        TransitionChange, WorkflowRepository, WorkflowRepositoryError, WorkflowRepositoryResult,
    },
};

/// Thread-safe in-memory workflow repository.
///
/// A single lock guards the whole state, so [`WorkflowRepository::commit`]
/// is naturally atomic. Seeding and inspection helpers are provided for
/// tests; production data arrives through the surrounding CRUD screens,
/// which are outside this crate.
#[derive(Debug, Clone, Default)]
pub struct InMemoryWorkflowRepository {
    state: Arc<RwLock<InMemoryWorkflowState>>,
}

#[derive(Debug, Default)]
struct InMemoryWorkflowState {
    projects: HashMap<ProjectId, Project>,
    contracts: HashMap<ProjectId, Vec<Contract>>,
    documents: Vec<LegalDocument>,
    commits: u64,
}

impl InMemoryWorkflowRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a project record.
    ///
    /// # Errors
    ///
    /// Returns a persistence error when the state lock is poisoned.
    pub fn insert_project(&self, project: Project) -> WorkflowRepositoryResult<()> {
        let mut state = write_lock(&self.state)?;
        state.projects.insert(project.id(), project);
        Ok(())
    }

    /// Seeds a contract record.
    ///
    /// # Errors
    ///
    /// Returns a persistence error when the state lock is poisoned.
    pub fn insert_contract(&self, contract: Contract) -> WorkflowRepositoryResult<()> {
        let mut state = write_lock(&self.state)?;
        state
            .contracts
            .entry(contract.project_id())
            .or_default()
            .push(contract);
        Ok(())
    }

    /// Returns the documents currently stored for a project.
    ///
    /// # Errors
    ///
    /// Returns a persistence error when the state lock is poisoned.
    pub fn documents_for(&self, id: ProjectId) -> WorkflowRepositoryResult<Vec<LegalDocument>> {
        let state = read_lock(&self.state)?;
        Ok(state
            .documents
            .iter()
            .filter(|doc| doc.project_id() == id)
            .cloned()
            .collect())
    }

    /// Returns the number of committed transition changes.
    ///
    /// # Errors
    ///
    /// Returns a persistence error when the state lock is poisoned.
    pub fn commit_count(&self) -> WorkflowRepositoryResult<u64> {
        let state = read_lock(&self.state)?;
        Ok(state.commits)
    }
}

fn write_lock(
    state: &Arc<RwLock<InMemoryWorkflowState>>,
) -> WorkflowRepositoryResult<std::sync::RwLockWriteGuard<'_, InMemoryWorkflowState>> {
    state
        .write()
        .map_err(|err| WorkflowRepositoryError::persistence(std::io::Error::other(err.to_string())))
}

fn read_lock(
    state: &Arc<RwLock<InMemoryWorkflowState>>,
) -> WorkflowRepositoryResult<std::sync::RwLockReadGuard<'_, InMemoryWorkflowState>> {
    state
        .read()
        .map_err(|err| WorkflowRepositoryError::persistence(std::io::Error::other(err.to_string())))
}

#[async_trait]
impl WorkflowRepository for InMemoryWorkflowRepository {
    async fn find_project(&self, id: ProjectId) -> WorkflowRepositoryResult<Option<Project>> {
        let state = read_lock(&self.state)?;
        Ok(state.projects.get(&id).cloned())
    }

    async fn in_force_contracts(&self, id: ProjectId) -> WorkflowRepositoryResult<Vec<Contract>> {
        let state = read_lock(&self.state)?;
        Ok(state
            .contracts
            .get(&id)
            .map(|contracts| {
                contracts
                    .iter()
                    .filter(|contract| contract.is_in_force())
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn commit(&self, change: &TransitionChange) -> WorkflowRepositoryResult<()> {
        let mut state = write_lock(&self.state)?;
        let project_id = change.project().id();
        if !state.projects.contains_key(&project_id) {
            return Err(WorkflowRepositoryError::NotFound(project_id));
        }

        // Deletions first so a forward transition can replace same-type
        // documents in the same unit.
        let doomed = change.delete_document_types();
        state.documents.retain(|doc| {
            doc.project_id() != project_id || !doomed.contains(&doc.doc_type())
        });
        state
            .documents
            .extend(change.create_documents().iter().cloned());
        state.projects.insert(project_id, change.project().clone());
        state.commits += 1;
        Ok(())
    }
}
