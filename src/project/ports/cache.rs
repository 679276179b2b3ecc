//! Read-side cache invalidation port.

use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// View cache invalidation contract.
///
/// After a successful transition the engine invalidates the affected
/// logical views so subsequent reads are not stale. The call is
/// fire-and-forget from the engine's perspective: a failure is logged but
/// never turned into a transition failure, since it does not affect the
/// correctness of persisted state.
#[async_trait]
pub trait ViewCache: Send + Sync {
    /// Invalidates cached reads of the given logical view path.
    async fn invalidate(&self, path: &str) -> Result<(), ViewCacheError>;
}

/// Errors returned by view cache implementations.
#[derive(Debug, Clone, Error)]
#[error("view cache invalidation failed: {0}")]
pub struct ViewCacheError(Arc<dyn std::error::Error + Send + Sync>);

impl ViewCacheError {
    /// Wraps a cache-layer failure.
    pub fn new(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self(Arc::new(err))
    }
}
