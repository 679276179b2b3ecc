//! In-memory adapters for workflow tests and local development.

mod cache;
mod repository;
mod session;
mod status_lookup;

pub use cache::RecordingViewCache;
pub use repository::InMemoryWorkflowRepository;
pub use session::FixedSessionPort;
pub use status_lookup::InMemoryStatusLookup;
