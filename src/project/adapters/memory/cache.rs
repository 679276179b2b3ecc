//! Recording view-cache adapter for tests.

use async_trait::async_trait;
use std::sync::{Arc, RwLock};

use crate::project::ports::{ViewCache, ViewCacheError};

/// View cache that records every invalidated path.
#[derive(Debug, Clone, Default)]
pub struct RecordingViewCache {
    paths: Arc<RwLock<Vec<String>>>,
}

impl RecordingViewCache {
    /// Creates an empty recording cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the invalidated paths in call order.
    ///
    /// # Errors
    ///
    /// Returns a cache error when the record lock is poisoned.
    pub fn invalidated_paths(&self) -> Result<Vec<String>, ViewCacheError> {
        let paths = self
            .paths
            .read()
            .map_err(|err| ViewCacheError::new(std::io::Error::other(err.to_string())))?;
        Ok(paths.clone())
    }
}

#[async_trait]
impl ViewCache for RecordingViewCache {
    async fn invalidate(&self, path: &str) -> Result<(), ViewCacheError> {
        let mut paths = self
            .paths
            .write()
            .map_err(|err| ViewCacheError::new(std::io::Error::other(err.to_string())))?;
        paths.push(path.to_owned());
        Ok(())
    }
}
