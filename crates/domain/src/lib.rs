//! `campusconnect-domain` — campus entities and their business rules.
//!
//! Deterministic domain logic only (no IO, no HTTP, no storage). Entities own
//! their validation, visibility filtering, and membership invariants; the
//! storage layer applies membership mutations atomically via closures over
//! these methods.

pub mod assignment;
pub mod course;
pub mod discussion;
pub mod event;
pub mod group;
pub mod notification;
pub mod resource;
pub mod user;

pub use assignment::{Assignment, NewAssignment};
pub use course::{Course, NewCourse};
pub use discussion::{Discussion, NewDiscussion};
pub use event::{Event, NewEvent};
pub use group::{Group, JoinOutcome, NewGroup};
pub use notification::{NewNotification, Notification};
pub use resource::{CampusResource, NewResource};
pub use user::{NewUser, PublicUser, User, validate_password};

use campusconnect_core::{DomainError, DomainResult};

/// Reject an empty/whitespace-only required field, naming the first offender.
pub(crate) fn require(field: &'static str, value: &str) -> DomainResult<()> {
    if value.trim().is_empty() {
        return Err(DomainError::validation(format!("{field} is required")));
    }
    Ok(())
}
