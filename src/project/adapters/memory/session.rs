//! Fixed-caller session adapter for tests and single-user tooling.

use async_trait::async_trait;

use crate::project::{
    domain::{Caller, Role},
    ports::{SessionError, SessionPort},
};

/// Session adapter that always reports the same caller.
#[derive(Debug, Clone, Default)]
pub struct FixedSessionPort {
    caller: Option<Caller>,
}

impl FixedSessionPort {
    /// Creates a session with no authenticated caller.
    #[must_use]
    pub const fn anonymous() -> Self {
        Self { caller: None }
    }

    /// Creates a session authenticated with the given role.
    #[must_use]
    pub const fn with_role(role: Role) -> Self {
        Self {
            caller: Some(Caller::new(role)),
        }
    }
}

#[async_trait]
impl SessionPort for FixedSessionPort {
    async fn current_caller(&self) -> Result<Option<Caller>, SessionError> {
        Ok(self.caller)
    }
}
