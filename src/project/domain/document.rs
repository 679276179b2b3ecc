//! Legal-record documents emitted as transition side effects.
//!
//! Forward transitions create these records (commencement notices and
//! orders, suspension notices, temporary acceptance minutes, resumption
//! orders, handover minutes); the corresponding undo transitions delete
//! them. At most one live document per type exists for a project: a
//! forward transition replaces any earlier document of the same type
//! within the same atomic commit, which keeps delete-by-type
//! compensation exact across repeated transition cycles.

use super::{DocumentId, ParseDocumentTypeError, ProjectId};
use chrono::{DateTime, NaiveDate, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Closed vocabulary of workflow-owned legal document types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LegalDocumentType {
    /// Commencement notice filed with the authorities before work starts
    /// on permit-required projects.
    NoticeCommencement,
    /// Commencement order instructing the contractor to begin.
    OrderCommencement,
    /// Suspension notice recording why work was paused.
    NoticeSuspension,
    /// Temporary acceptance minutes recording work in place at the pause
    /// point, the basis for interim settlement.
    TempAcceptanceMinutes,
    /// Resumption order instructing the contractor to restart.
    OrderResumption,
    /// Handover minutes recording acceptance of the completed works.
    HandoverMinutes,
}

impl LegalDocumentType {
    /// Returns the canonical storage code.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NoticeCommencement => "NOTICE_COMMENCEMENT",
            Self::OrderCommencement => "ORDER_COMMENCEMENT",
            Self::NoticeSuspension => "NOTICE_SUSPENSION",
            Self::TempAcceptanceMinutes => "TEMP_ACCEPTANCE_MINUTES",
            Self::OrderResumption => "ORDER_RESUMPTION",
            Self::HandoverMinutes => "HANDOVER_MINUTES",
        }
    }
}

impl TryFrom<&str> for LegalDocumentType {
    type Error = ParseDocumentTypeError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim() {
            "NOTICE_COMMENCEMENT" => Ok(Self::NoticeCommencement),
            "ORDER_COMMENCEMENT" => Ok(Self::OrderCommencement),
            "NOTICE_SUSPENSION" => Ok(Self::NoticeSuspension),
            "TEMP_ACCEPTANCE_MINUTES" => Ok(Self::TempAcceptanceMinutes),
            "ORDER_RESUMPTION" => Ok(Self::OrderResumption),
            "HANDOVER_MINUTES" => Ok(Self::HandoverMinutes),
            _ => Err(ParseDocumentTypeError(value.to_owned())),
        }
    }
}

/// Lifecycle status of a legal document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentStatus {
    /// Issued and in effect.
    Issued,
    /// Revoked by a later administrative decision.
    Revoked,
}

impl DocumentStatus {
    /// Returns the canonical storage code.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Issued => "issued",
            Self::Revoked => "revoked",
        }
    }
}

/// Optional descriptive fields for a legal document under construction.
///
/// Transition payloads carry these as free-form caller input; required
/// fields live on [`LegalDocument::new`] directly.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentDraft {
    doc_code: Option<String>,
    issuing_authority: Option<String>,
    notes: Option<String>,
}

impl DocumentDraft {
    /// Creates an empty draft.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            doc_code: None,
            issuing_authority: None,
            notes: None,
        }
    }

    /// Sets the document code.
    #[must_use]
    pub fn with_doc_code(mut self, doc_code: impl Into<String>) -> Self {
        self.doc_code = Some(doc_code.into());
        self
    }

    /// Sets the issuing authority.
    #[must_use]
    pub fn with_issuing_authority(mut self, authority: impl Into<String>) -> Self {
        self.issuing_authority = Some(authority.into());
        self
    }

    /// Sets free-text notes.
    #[must_use]
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}

/// Immutable-once-created legal-record document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegalDocument {
    id: DocumentId,
    project_id: ProjectId,
    doc_type: LegalDocumentType,
    doc_code: Option<String>,
    issue_date: NaiveDate,
    issuing_authority: Option<String>,
    notes: Option<String>,
    status: DocumentStatus,
    created_at: DateTime<Utc>,
}

impl LegalDocument {
    /// Creates a newly issued legal document.
    #[must_use]
    pub fn new(
        project_id: ProjectId,
        doc_type: LegalDocumentType,
        issue_date: NaiveDate,
        draft: DocumentDraft,
        clock: &impl Clock,
    ) -> Self {
        let DocumentDraft {
            doc_code,
            issuing_authority,
            notes,
        } = draft;
        Self {
            id: DocumentId::new(),
            project_id,
            doc_type,
            doc_code,
            issue_date,
            issuing_authority,
            notes,
            status: DocumentStatus::Issued,
            created_at: clock.utc(),
        }
    }

    /// Returns the document identifier.
    #[must_use]
    pub const fn id(&self) -> DocumentId {
        self.id
    }

    /// Returns the owning project identifier.
    #[must_use]
    pub const fn project_id(&self) -> ProjectId {
        self.project_id
    }

    /// Returns the document type.
    #[must_use]
    pub const fn doc_type(&self) -> LegalDocumentType {
        self.doc_type
    }

    /// Returns the administrative document code, if supplied.
    #[must_use]
    pub fn doc_code(&self) -> Option<&str> {
        self.doc_code.as_deref()
    }

    /// Returns the issue date.
    #[must_use]
    pub const fn issue_date(&self) -> NaiveDate {
        self.issue_date
    }

    /// Returns the issuing authority, if supplied.
    #[must_use]
    pub fn issuing_authority(&self) -> Option<&str> {
        self.issuing_authority.as_deref()
    }

    /// Returns free-text notes, if supplied.
    #[must_use]
    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    /// Returns the document status.
    #[must_use]
    pub const fn status(&self) -> DocumentStatus {
        self.status
    }

    /// Returns the record creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
