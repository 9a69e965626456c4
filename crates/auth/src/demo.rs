//! The fixed demo-account directory.
//!
//! Exactly three well-known accounts (student/faculty/admin) usable without a
//! real database record. The directory is constructed once at startup and
//! passed explicitly to whatever needs it; it is never mutated at runtime.

use campusconnect_core::{Identity, Role};

/// A single demo account entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemoAccount {
    pub email: String,
    pub password: String,
    pub name: String,
    pub role: Role,
    pub department: String,
    pub student_id: Option<String>,
    pub faculty_id: Option<String>,
}

impl DemoAccount {
    /// The synthetic identity this account resolves to: id `demo-<role>`.
    pub fn identity(&self) -> Identity {
        Identity {
            id: format!("demo-{}", self.role.as_str()),
            email: self.email.clone(),
            role: self.role,
            name: self.name.clone(),
        }
    }
}

/// Immutable three-entry demo directory.
#[derive(Debug, Clone)]
pub struct DemoDirectory {
    accounts: [DemoAccount; 3],
}

impl DemoDirectory {
    /// The compiled-in defaults.
    pub fn standard() -> Self {
        Self {
            accounts: [
                DemoAccount {
                    email: "student@campusconnect.demo".to_string(),
                    password: "student123".to_string(),
                    name: "Demo Student".to_string(),
                    role: Role::Student,
                    department: "Computer Science".to_string(),
                    student_id: Some("DEMO-S-001".to_string()),
                    faculty_id: None,
                },
                DemoAccount {
                    email: "faculty@campusconnect.demo".to_string(),
                    password: "faculty123".to_string(),
                    name: "Demo Faculty".to_string(),
                    role: Role::Faculty,
                    department: "Computer Science".to_string(),
                    student_id: None,
                    faculty_id: Some("DEMO-F-001".to_string()),
                },
                DemoAccount {
                    email: "admin@campusconnect.demo".to_string(),
                    password: "admin123".to_string(),
                    name: "Demo Admin".to_string(),
                    role: Role::Admin,
                    department: "Administration".to_string(),
                    student_id: None,
                    faculty_id: None,
                },
            ],
        }
    }

    /// The defaults with credentials optionally overridden per role, e.g.
    /// `CAMPUSCONNECT_DEMO_ADMIN_EMAIL` / `CAMPUSCONNECT_DEMO_ADMIN_PASSWORD`.
    pub fn from_env() -> Self {
        let mut dir = Self::standard();
        for account in &mut dir.accounts {
            let key = account.role.as_str().to_ascii_uppercase();
            if let Ok(email) = std::env::var(format!("CAMPUSCONNECT_DEMO_{key}_EMAIL")) {
                account.email = email;
            }
            if let Ok(password) = std::env::var(format!("CAMPUSCONNECT_DEMO_{key}_PASSWORD")) {
                account.password = password;
            }
        }
        dir
    }

    pub fn accounts(&self) -> &[DemoAccount] {
        &self.accounts
    }

    /// Look up a demo account by email.
    ///
    /// Lookup is case-insensitive so that the login flow's lowercasing of the
    /// comparison input can never produce a surprising mismatch.
    pub fn resolve(&self, email: &str) -> Option<&DemoAccount> {
        self.accounts
            .iter()
            .find(|a| a.email.eq_ignore_ascii_case(email))
    }

    pub fn contains(&self, email: &str) -> bool {
        self.resolve(email).is_some()
    }
}
