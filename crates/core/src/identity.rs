//! Request-scoped caller identity.

use serde::{Deserialize, Serialize};

use crate::role::Role;

/// The decoded, verified claim set attached to a request's lifetime.
///
/// Never persisted. Two flavors exist:
/// - *persisted* identities, whose `id` is the string form of a stored
///   [`crate::UserId`];
/// - *demo* identities, whose `id` has the synthetic form `demo-<role>` and
///   is not backed by any stored record.
///
/// Ownership checks elsewhere must compare `id` against stored references in
/// normalized string form, since persisted ids and token-carried ids have
/// different native representations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: String,
    pub email: String,
    pub role: Role,
    pub name: String,
}

impl Identity {
    /// Whether this identity is a synthetic demo identity.
    pub fn is_demo(&self) -> bool {
        self.id.starts_with("demo-")
    }

    /// Normalized string comparison against a stored user reference.
    pub fn owns(&self, owner: Option<&str>) -> bool {
        owner.is_some_and(|o| o == self.id)
    }
}
