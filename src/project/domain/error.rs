//! Error types for project workflow domain validation and parsing.

use super::ProjectId;
use thiserror::Error;

/// Errors returned while validating domain values or applying transitions.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProjectDomainError {
    /// A suspension was requested without a reason.
    #[error("suspension reason must not be empty")]
    EmptySuspensionReason,

    /// Progress is outside the 0-100 range.
    #[error("progress {0} is out of range, expected 0-100")]
    ProgressOutOfRange(u8),

    /// Construction was started on a project already under way.
    #[error("project {0} is already in progress")]
    AlreadyInProgress(ProjectId),
}

/// Error returned while parsing project states from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown project state: {0}")]
pub struct ParseProjectStateError(pub String);

/// Error returned while parsing contract types from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown contract type: {0}")]
pub struct ParseContractTypeError(pub String);

/// Error returned while parsing contract statuses from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown contract status: {0}")]
pub struct ParseContractStatusError(pub String);

/// Error returned while parsing legal-document types from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown legal document type: {0}")]
pub struct ParseDocumentTypeError(pub String);
