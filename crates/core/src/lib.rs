//! `campusconnect-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns).

pub mod error;
pub mod id;
pub mod identity;
pub mod page;
pub mod role;

pub use error::{DomainError, DomainResult};
pub use id::{
    AssignmentId, CourseId, DiscussionId, EventId, GroupId, NotificationId, ResourceId, UserId,
};
pub use identity::Identity;
pub use page::{Page, PageInfo, PageRequest, paginate};
pub use role::Role;
