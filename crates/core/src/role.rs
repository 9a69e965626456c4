//! Coarse-grained authorization roles.

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// The role dimension used by the authorization policy.
///
/// Roles form a closed set; there is no runtime role registration.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Student,
    Faculty,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Student => "student",
            Role::Faculty => "faculty",
            Role::Admin => "admin",
        }
    }

    /// Faculty and admin share elevated privileges in several policy rules
    /// (content auto-approval, course/assignment/event/notification creation).
    pub fn is_staff(&self) -> bool {
        matches!(self, Role::Faculty | Role::Admin)
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "student" => Ok(Role::Student),
            "faculty" => Ok(Role::Faculty),
            "admin" => Ok(Role::Admin),
            other => Err(DomainError::validation(format!("invalid role: {other}"))),
        }
    }
}
