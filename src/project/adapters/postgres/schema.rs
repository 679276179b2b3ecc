//! Diesel schema for project workflow persistence.

diesel::table! {
    /// Project records; status is a foreign reference into the
    /// `project_statuses` dictionary, never a raw string.
    projects (id) {
        /// Project identifier.
        id -> Uuid,
        /// Foreign key into `project_statuses`.
        status_id -> Uuid,
        /// Display phase tag derived from the status.
        #[max_length = 50]
        construction_phase -> Varchar,
        /// Whether a construction permit is required.
        permit_required -> Bool,
        /// Actual construction start date.
        actual_start -> Nullable<Date>,
        /// Actual completion date.
        actual_end -> Nullable<Date>,
        /// Completion percentage, 0-100.
        progress -> Int2,
        /// Free-text cancellation reason.
        cancel_reason -> Nullable<Text>,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Status dictionary rows mapping symbolic codes to localized labels.
    project_statuses (id) {
        /// Dictionary row identifier.
        id -> Uuid,
        /// Symbolic status code.
        #[max_length = 50]
        code -> Varchar,
        /// Localized display label.
        #[max_length = 255]
        label -> Varchar,
    }
}

diesel::table! {
    /// Contract records owned by the CRM subsystem; read-only here.
    contracts (id) {
        /// Contract identifier.
        id -> Uuid,
        /// Owning project.
        project_id -> Uuid,
        /// Contract category.
        #[max_length = 50]
        contract_type -> Varchar,
        /// Contract lifecycle status.
        #[max_length = 50]
        status -> Varchar,
    }
}

diesel::table! {
    /// Legal-record documents emitted by workflow transitions.
    legal_documents (id) {
        /// Document identifier.
        id -> Uuid,
        /// Owning project.
        project_id -> Uuid,
        /// Document type code.
        #[max_length = 50]
        doc_type -> Varchar,
        /// Administrative document code.
        #[max_length = 255]
        doc_code -> Nullable<Varchar>,
        /// Issue date.
        issue_date -> Date,
        /// Issuing authority.
        #[max_length = 255]
        issuing_authority -> Nullable<Varchar>,
        /// Free-text notes.
        notes -> Nullable<Text>,
        /// Document status.
        #[max_length = 50]
        status -> Varchar,
        /// Creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::joinable!(projects -> project_statuses (status_id));
diesel::allow_tables_to_appear_in_same_query!(projects, project_statuses);
