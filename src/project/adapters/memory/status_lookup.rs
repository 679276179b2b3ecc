//! In-memory status dictionary for tests.

use async_trait::async_trait;
use std::collections::HashMap;
use uuid::Uuid;

use crate::project::{
    domain::ProjectState,
    ports::{StatusLookup, StatusLookupError, StatusRef},
};

const ALL_STATES: [ProjectState; 7] = [
    ProjectState::Initial,
    ProjectState::Design,
    ProjectState::Planning,
    ProjectState::InProgress,
    ProjectState::Paused,
    ProjectState::Completed,
    ProjectState::Cancelled,
];

/// Map-backed status dictionary.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStatusLookup {
    refs: HashMap<ProjectState, StatusRef>,
}

impl InMemoryStatusLookup {
    /// Creates a dictionary with every state registered.
    #[must_use]
    pub fn with_all_states() -> Self {
        let refs = ALL_STATES
            .into_iter()
            .map(|state| (state, StatusRef::from_uuid(Uuid::new_v4())))
            .collect();
        Self { refs }
    }

    /// Creates an empty dictionary, useful for exercising the loud
    /// unconfigured-code failure.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Registers a single state.
    #[must_use]
    pub fn with_state(mut self, state: ProjectState, status_ref: StatusRef) -> Self {
        self.refs.insert(state, status_ref);
        self
    }
}

#[async_trait]
impl StatusLookup for InMemoryStatusLookup {
    async fn resolve(&self, state: ProjectState) -> Result<StatusRef, StatusLookupError> {
        self.refs
            .get(&state)
            .copied()
            .ok_or(StatusLookupError::Unconfigured(state))
    }
}
