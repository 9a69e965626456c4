//! Request-scoped caller context.

use std::str::FromStr;

use campusconnect_core::{Identity, Role, UserId};

/// Caller context for an authenticated request, inserted by the gate
/// middleware and read by handlers via `Extension<CallerContext>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallerContext {
    identity: Identity,
}

impl CallerContext {
    pub fn new(identity: Identity) -> Self {
        Self { identity }
    }

    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    /// Normalized caller id (stored user id string, or `demo-<role>`).
    pub fn id(&self) -> &str {
        &self.identity.id
    }

    pub fn role(&self) -> Role {
        self.identity.role
    }

    pub fn name(&self) -> &str {
        &self.identity.name
    }

    pub fn is_demo(&self) -> bool {
        self.identity.is_demo()
    }

    /// Typed user reference for owner fields; `None` for demo callers, whose
    /// synthetic ids are not backed by a stored record.
    pub fn user_ref(&self) -> Option<UserId> {
        if self.identity.is_demo() {
            return None;
        }
        UserId::from_str(&self.identity.id).ok()
    }
}
