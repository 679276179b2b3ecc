//! Contract evidence consulted by status inference.
//!
//! Contracts are authored and managed by the CRM subsystem; the workflow
//! engine only ever reads them. A contract counts as evidence when its
//! status places it in force.

use super::{ContractId, ParseContractStatusError, ParseContractTypeError, ProjectId};
use serde::{Deserialize, Serialize};

/// Business category of a contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContractType {
    /// Design and engineering work.
    Design,
    /// Construction execution work.
    Construction,
    /// Any other contract category (supply, consulting, ...).
    Other,
}

impl ContractType {
    /// Returns the canonical storage code.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Design => "design",
            Self::Construction => "construction",
            Self::Other => "other",
        }
    }
}

impl TryFrom<&str> for ContractType {
    type Error = ParseContractTypeError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "design" => Ok(Self::Design),
            "construction" => Ok(Self::Construction),
            "other" => Ok(Self::Other),
            _ => Err(ParseContractTypeError(value.to_owned())),
        }
    }
}

/// Lifecycle status of a contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContractStatus {
    /// Drafted but not yet signed.
    Draft,
    /// Signed by all parties.
    Signed,
    /// Under settlement processing.
    Processing,
    /// Settled and liquidated.
    Liquidated,
    /// Actively being performed.
    Active,
    /// Cancelled before completion.
    Cancelled,
}

impl ContractStatus {
    /// Returns the canonical storage code.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Signed => "signed",
            Self::Processing => "processing",
            Self::Liquidated => "liquidated",
            Self::Active => "active",
            Self::Cancelled => "cancelled",
        }
    }

    /// Returns `true` when the status indicates the contract is legally in
    /// force and therefore counts as workflow evidence.
    #[must_use]
    pub const fn is_in_force(self) -> bool {
        matches!(
            self,
            Self::Signed | Self::Processing | Self::Liquidated | Self::Active
        )
    }
}

impl TryFrom<&str> for ContractStatus {
    type Error = ParseContractStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "draft" => Ok(Self::Draft),
            "signed" => Ok(Self::Signed),
            "processing" => Ok(Self::Processing),
            "liquidated" => Ok(Self::Liquidated),
            "active" => Ok(Self::Active),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(ParseContractStatusError(value.to_owned())),
        }
    }
}

/// Read-only view of a contract owned by the CRM subsystem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contract {
    id: ContractId,
    project_id: ProjectId,
    contract_type: ContractType,
    status: ContractStatus,
}

impl Contract {
    /// Creates a contract evidence record.
    #[must_use]
    pub const fn new(
        id: ContractId,
        project_id: ProjectId,
        contract_type: ContractType,
        status: ContractStatus,
    ) -> Self {
        Self {
            id,
            project_id,
            contract_type,
            status,
        }
    }

    /// Returns the contract identifier.
    #[must_use]
    pub const fn id(&self) -> ContractId {
        self.id
    }

    /// Returns the owning project identifier.
    #[must_use]
    pub const fn project_id(&self) -> ProjectId {
        self.project_id
    }

    /// Returns the contract category.
    #[must_use]
    pub const fn contract_type(&self) -> ContractType {
        self.contract_type
    }

    /// Returns the contract lifecycle status.
    #[must_use]
    pub const fn status(&self) -> ContractStatus {
        self.status
    }

    /// Returns `true` when the contract is in force.
    #[must_use]
    pub const fn is_in_force(&self) -> bool {
        self.status.is_in_force()
    }

    /// Returns `true` when the contract is in force and of the given type.
    #[must_use]
    pub fn is_in_force_of_type(&self, contract_type: ContractType) -> bool {
        self.is_in_force() && self.contract_type == contract_type
    }
}
