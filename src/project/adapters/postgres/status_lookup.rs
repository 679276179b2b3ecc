//! Cache-backed status dictionary lookup over `PostgreSQL`.

use super::{repository::WorkflowPgPool, schema::project_statuses};
use crate::project::{
    domain::ProjectState,
    ports::{StatusLookup, StatusLookupError, StatusRef},
};
use async_trait::async_trait;
use diesel::prelude::*;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// Status lookup backed by the `project_statuses` dictionary table.
///
/// Resolved references are cached for the lifetime of the adapter;
/// dictionary rows are configuration data and do not change while the
/// service is running.
#[derive(Debug, Clone)]
pub struct DictionaryStatusLookup {
    pool: WorkflowPgPool,
    cache: Arc<RwLock<HashMap<ProjectState, StatusRef>>>,
}

impl DictionaryStatusLookup {
    /// Creates a lookup from a `PostgreSQL` connection pool.
    #[must_use]
    pub fn new(pool: WorkflowPgPool) -> Self {
        Self {
            pool,
            cache: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    fn cached(&self, state: ProjectState) -> Result<Option<StatusRef>, StatusLookupError> {
        let cache = self
            .cache
            .read()
            .map_err(|err| StatusLookupError::unavailable(std::io::Error::other(err.to_string())))?;
        Ok(cache.get(&state).copied())
    }

    fn remember(&self, state: ProjectState, status_ref: StatusRef) -> Result<(), StatusLookupError> {
        let mut cache = self
            .cache
            .write()
            .map_err(|err| StatusLookupError::unavailable(std::io::Error::other(err.to_string())))?;
        cache.insert(state, status_ref);
        Ok(())
    }
}

#[async_trait]
impl StatusLookup for DictionaryStatusLookup {
    async fn resolve(&self, state: ProjectState) -> Result<StatusRef, StatusLookupError> {
        if let Some(status_ref) = self.cached(state)? {
            return Ok(status_ref);
        }

        let pool = self.pool.clone();
        let row = tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(StatusLookupError::unavailable)?;
            project_statuses::table
                .filter(project_statuses::code.eq(state.as_str()))
                .select(project_statuses::id)
                .first::<uuid::Uuid>(&mut connection)
                .optional()
                .map_err(StatusLookupError::unavailable)
        })
        .await
        .map_err(StatusLookupError::unavailable)??;

        let status_ref = row
            .map(StatusRef::from_uuid)
            .ok_or(StatusLookupError::Unconfigured(state))?;
        self.remember(state, status_ref)?;
        Ok(status_ref)
    }
}
