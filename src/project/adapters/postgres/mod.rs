//! `PostgreSQL` adapters for project workflow persistence.

mod models;
mod repository;
mod schema;
mod status_lookup;

pub use repository::{PostgresWorkflowRepository, WorkflowPgPool};
pub use status_lookup::DictionaryStatusLookup;
