//! Domain model for the project lifecycle workflow.
//!
//! The project domain models the lifecycle state machine, the contract
//! evidence consulted by status inference, the legal-record documents
//! emitted by transitions, and the caller roles used for access control,
//! while keeping all infrastructure concerns outside of the domain
//! boundary.

mod access;
mod contract;
mod document;
mod error;
mod ids;
mod project;
mod state;

pub use access::{AccessLevel, Caller, Role};
pub use contract::{Contract, ContractStatus, ContractType};
pub use document::{DocumentDraft, DocumentStatus, LegalDocument, LegalDocumentType};
pub use error::{
    ParseContractStatusError, ParseContractTypeError, ParseDocumentTypeError,
    ParseProjectStateError, ProjectDomainError,
};
pub use ids::{ContractId, DocumentId, ProjectId};
pub use project::{
    PersistedProjectData, Progress, Project, SuspensionReason, state_from_contract_evidence,
};
pub use state::{ConstructionPhase, ProjectState};
