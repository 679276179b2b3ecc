//! Diesel row models for project workflow persistence.

use super::schema::{contracts, legal_documents, projects};
use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;

/// Query result row for project records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = projects)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ProjectRow {
    /// Project identifier.
    pub id: uuid::Uuid,
    /// Status dictionary reference.
    pub status_id: uuid::Uuid,
    /// Display phase tag.
    pub construction_phase: String,
    /// Whether a construction permit is required.
    pub permit_required: bool,
    /// Actual construction start date.
    pub actual_start: Option<NaiveDate>,
    /// Actual completion date.
    pub actual_end: Option<NaiveDate>,
    /// Completion percentage.
    pub progress: i16,
    /// Cancellation reason.
    pub cancel_reason: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Changeset applied to a project row during a transition commit.
///
/// `treat_none_as_null` so that undo transitions clear the actual dates
/// rather than leaving them unchanged.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = projects)]
#[diesel(treat_none_as_null = true)]
pub struct ProjectTransitionUpdate {
    /// New status dictionary reference.
    pub status_id: uuid::Uuid,
    /// New display phase tag.
    pub construction_phase: String,
    /// Actual construction start date after the transition.
    pub actual_start: Option<NaiveDate>,
    /// Actual completion date after the transition.
    pub actual_end: Option<NaiveDate>,
    /// Completion percentage after the transition.
    pub progress: i16,
    /// Cancellation reason after the transition.
    pub cancel_reason: Option<String>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Query result row for contract records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = contracts)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ContractRow {
    /// Contract identifier.
    pub id: uuid::Uuid,
    /// Owning project.
    pub project_id: uuid::Uuid,
    /// Contract category code.
    pub contract_type: String,
    /// Contract status code.
    pub status: String,
}

/// Insert model for legal-record documents.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = legal_documents)]
pub struct NewLegalDocumentRow {
    /// Document identifier.
    pub id: uuid::Uuid,
    /// Owning project.
    pub project_id: uuid::Uuid,
    /// Document type code.
    pub doc_type: String,
    /// Administrative document code.
    pub doc_code: Option<String>,
    /// Issue date.
    pub issue_date: NaiveDate,
    /// Issuing authority.
    pub issuing_authority: Option<String>,
    /// Free-text notes.
    pub notes: Option<String>,
    /// Document status code.
    pub status: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}
