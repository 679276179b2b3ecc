//! Port contracts for the project lifecycle workflow.
//!
//! Ports define infrastructure-agnostic interfaces used by workflow
//! services: persistence, session lookup, the status dictionary, and
//! read-side cache invalidation.

pub mod cache;
pub mod repository;
pub mod session;
pub mod status_lookup;

pub use cache::{ViewCache, ViewCacheError};
pub use repository::{
    TransitionChange, WorkflowRepository, WorkflowRepositoryError, WorkflowRepositoryResult,
};
pub use session::{SessionError, SessionPort};
pub use status_lookup::{StatusLookup, StatusLookupError, StatusRef};
