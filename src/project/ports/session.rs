//! Session port supplying the current caller's identity.

use crate::project::domain::Caller;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Session and authorization lookup contract.
///
/// The session service is owned by the authentication subsystem; the
/// workflow engine only consults it.
#[async_trait]
pub trait SessionPort: Send + Sync {
    /// Returns the caller bound to the current request, or `None` when no
    /// authenticated session exists.
    async fn current_caller(&self) -> Result<Option<Caller>, SessionError>;
}

/// Errors returned by session implementations.
#[derive(Debug, Clone, Error)]
pub enum SessionError {
    /// The session service could not be reached.
    #[error("session service unavailable: {0}")]
    Unavailable(Arc<dyn std::error::Error + Send + Sync>),
}

impl SessionError {
    /// Wraps a session-service failure.
    pub fn unavailable(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Unavailable(Arc::new(err))
    }
}
