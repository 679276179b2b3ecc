//! Caller identity and access levels for workflow commands.

use serde::{Deserialize, Serialize};

/// Role attached to an authenticated session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Full administrative access.
    Admin,
    /// Project management access.
    Manager,
    /// Regular back-office staff.
    Staff,
}

impl Role {
    /// Returns `true` for roles permitted to run destructive commands
    /// (cancellation and the compensating undo transitions).
    #[must_use]
    pub const fn is_elevated(self) -> bool {
        matches!(self, Self::Admin | Self::Manager)
    }
}

/// Authenticated caller as reported by the session service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Caller {
    role: Role,
}

impl Caller {
    /// Creates a caller with the given role.
    #[must_use]
    pub const fn new(role: Role) -> Self {
        Self { role }
    }

    /// Returns the caller's role.
    #[must_use]
    pub const fn role(&self) -> Role {
        self.role
    }
}

/// Access required to run a workflow command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccessLevel {
    /// No session required; invoked by internal business events.
    Open,
    /// Any authenticated session.
    Authenticated,
    /// Authenticated session with an elevated role.
    Elevated,
}

impl AccessLevel {
    /// Returns `true` when the (possibly absent) caller satisfies this
    /// access level.
    #[must_use]
    pub fn permits(self, caller: Option<&Caller>) -> bool {
        match self {
            Self::Open => true,
            Self::Authenticated => caller.is_some(),
            Self::Elevated => caller.is_some_and(|c| c.role().is_elevated()),
        }
    }
}
