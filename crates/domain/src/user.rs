//! Persisted user records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use campusconnect_core::{DomainError, DomainResult, Identity, Role, UserId};

use crate::require;

/// A persisted user account.
///
/// # Invariants
/// - `email` is stored lowercased and is unique across users.
/// - `student_id` / `faculty_id` are unique when present.
/// - `password_hash` must never reach a client; responses use [`PublicUser`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
    pub department: Option<String>,
    pub student_id: Option<String>,
    pub faculty_id: Option<String>,
    pub is_active: bool,
    pub avatar: Option<String>,
    pub bio: Option<String>,
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Input for creating a user (registration or admin creation).
///
/// `password_hash` is already hashed; plaintext validation happens before
/// hashing via [`validate_password`].
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
    pub department: Option<String>,
    pub student_id: Option<String>,
    pub faculty_id: Option<String>,
}

/// The client-facing projection of a user: everything except the hash.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicUser {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub department: Option<String>,
    pub student_id: Option<String>,
    pub faculty_id: Option<String>,
    pub is_active: bool,
    pub avatar: Option<String>,
    pub bio: Option<String>,
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Minimum plaintext password length accepted at registration/creation.
const MIN_PASSWORD_LEN: usize = 8;

/// Validate a plaintext password before it is hashed.
pub fn validate_password(plaintext: &str) -> DomainResult<()> {
    if plaintext.len() < MIN_PASSWORD_LEN {
        return Err(DomainError::validation(format!(
            "password must be at least {MIN_PASSWORD_LEN} characters"
        )));
    }
    Ok(())
}

impl User {
    pub fn create(input: NewUser) -> DomainResult<User> {
        require("name", &input.name)?;
        require("email", &input.email)?;

        let email = input.email.trim().to_lowercase();
        if !email.contains('@') {
            return Err(DomainError::validation("invalid email format"));
        }

        Ok(User {
            id: UserId::new(),
            name: input.name.trim().to_string(),
            email,
            password_hash: input.password_hash,
            role: input.role,
            department: input.department,
            student_id: input.student_id,
            faculty_id: input.faculty_id,
            is_active: true,
            avatar: None,
            bio: None,
            phone: None,
            created_at: Utc::now(),
        })
    }

    pub fn public(&self) -> PublicUser {
        PublicUser {
            id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
            role: self.role,
            department: self.department.clone(),
            student_id: self.student_id.clone(),
            faculty_id: self.faculty_id.clone(),
            is_active: self.is_active,
            avatar: self.avatar.clone(),
            bio: self.bio.clone(),
            phone: self.phone.clone(),
            created_at: self.created_at,
        }
    }

    /// The identity this record resolves to after credential verification.
    pub fn identity(&self) -> Identity {
        Identity {
            id: self.id.to_string(),
            email: self.email.clone(),
            role: self.role,
            name: self.name.clone(),
        }
    }
}
