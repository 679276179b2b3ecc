//! Dictionary lookup translating symbolic states into storage references.

use crate::project::domain::ProjectState;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

/// Foreign-key value identifying a status dictionary row.
///
/// Project rows reference status through this value rather than a raw
/// string, so that display labels can be localized without touching
/// project records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StatusRef(Uuid);

impl StatusRef {
    /// Creates a storage reference from a dictionary row UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the wrapped UUID.
    #[must_use]
    pub const fn into_inner(self) -> Uuid {
        self.0
    }
}

impl fmt::Display for StatusRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Status dictionary lookup contract.
#[async_trait]
pub trait StatusLookup: Send + Sync {
    /// Resolves a symbolic state to its storage reference.
    ///
    /// # Errors
    ///
    /// Returns [`StatusLookupError::Unconfigured`] when the state has no
    /// dictionary row. Resolution must fail loudly; a silent default would
    /// persist projects under the wrong status.
    async fn resolve(&self, state: ProjectState) -> Result<StatusRef, StatusLookupError>;
}

/// Errors returned by status lookup implementations.
#[derive(Debug, Clone, Error)]
pub enum StatusLookupError {
    /// No dictionary row is registered for the state.
    #[error("status code '{}' is not configured", .0.as_str())]
    Unconfigured(ProjectState),

    /// The dictionary store could not be read.
    #[error("status dictionary unavailable: {0}")]
    Unavailable(Arc<dyn std::error::Error + Send + Sync>),
}

impl StatusLookupError {
    /// Wraps a dictionary-store failure.
    pub fn unavailable(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Unavailable(Arc::new(err))
    }
}
