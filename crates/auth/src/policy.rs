//! Centralized authorization policy.
//!
//! Every handler consults this single table instead of repeating inline role
//! checks per route; that keeps the per-resource rules from drifting apart.
//! The rules are resource-specific on purpose, so the table is the contract.
//!
//! Read-side *visibility filtering* (which records a caller sees within an
//! allowed read) lives with the entities; this module decides only whether
//! the action itself is permitted.

use thiserror::Error;

use campusconnect_core::{Identity, Role};

/// Resource types the policy knows about.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ResourceKind {
    User,
    Course,
    Assignment,
    Event,
    Discussion,
    Group,
    Resource,
    Notification,
}

impl ResourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::User => "user",
            ResourceKind::Course => "course",
            ResourceKind::Assignment => "assignment",
            ResourceKind::Event => "event",
            ResourceKind::Discussion => "discussion",
            ResourceKind::Group => "group",
            ResourceKind::Resource => "resource",
            ResourceKind::Notification => "notification",
        }
    }
}

/// Coarse action verbs.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Action {
    Create,
    Read,
    Update,
    Delete,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Create => "create",
            Action::Read => "read",
            Action::Update => "update",
            Action::Delete => "delete",
        }
    }
}

/// A policy decision rule.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Rule {
    /// No identity required (anonymous callers allowed).
    Public,
    /// Any authenticated caller.
    AnyAuthenticated,
    /// Caller's role must be one of these.
    Roles(&'static [Role]),
    /// Caller must own the resource instance, or hold one of these roles.
    OwnerOr(&'static [Role]),
    /// Admin role only.
    AdminOnly,
    /// The operation is not exposed by the API at all.
    NotExposed,
}

const STAFF: &[Role] = &[Role::Faculty, Role::Admin];
const ADMIN: &[Role] = &[Role::Admin];

/// The policy table. One row per (resource, action).
pub fn rule_for(resource: ResourceKind, action: Action) -> Rule {
    use Action::*;
    use ResourceKind::*;

    match (resource, action) {
        // User management is admin-only across the board; the self-protection
        // invariants on delete/deactivate are enforced separately below.
        (User, _) => Rule::AdminOnly,

        (Course, Create) => Rule::Roles(STAFF),
        (Course, Read) => Rule::AnyAuthenticated,
        (Course, Update) => Rule::OwnerOr(ADMIN),
        (Course, Delete) => Rule::NotExposed,

        (Assignment, Create) => Rule::Roles(STAFF),
        (Assignment, Read) => Rule::AnyAuthenticated,
        (Assignment, Update | Delete) => Rule::NotExposed,

        // Event reads are the one anonymous surface (approved + public only,
        // filtered at the entity).
        (Event, Create) => Rule::Roles(STAFF),
        (Event, Read) => Rule::Public,
        (Event, Update | Delete) => Rule::OwnerOr(ADMIN),

        (Discussion, Create) => Rule::AnyAuthenticated,
        (Discussion, Read) => Rule::AnyAuthenticated,
        (Discussion, Update | Delete) => Rule::NotExposed,

        (Group, Create) => Rule::AnyAuthenticated,
        (Group, Read) => Rule::AnyAuthenticated,
        // Join/leave run under Update; the membership rules themselves
        // (capacity, duplicates, creator-leave) are entity invariants.
        (Group, Update) => Rule::AnyAuthenticated,
        (Group, Delete) => Rule::NotExposed,

        (Resource, Create) => Rule::AnyAuthenticated,
        (Resource, Read) => Rule::AnyAuthenticated,
        // Like/download toggles run under Update.
        (Resource, Update) => Rule::AnyAuthenticated,
        (Resource, Delete) => Rule::NotExposed,

        (Notification, Create) => Rule::Roles(STAFF),
        (Notification, Read) => Rule::AnyAuthenticated,
        // Mark read/unread affects only the caller's own read-marker.
        (Notification, Update) => Rule::AnyAuthenticated,
        (Notification, Delete) => Rule::NotExposed,
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PolicyError {
    /// Valid identity, disallowed action. Terminal and non-retryable.
    #[error("forbidden: cannot {action} {resource}")]
    Forbidden {
        resource: &'static str,
        action: &'static str,
    },

    /// A self-protection invariant would be violated. Reported as a
    /// validation-class failure, distinct from `Forbidden`.
    #[error("{0}")]
    SelfProtection(&'static str),
}

/// Authorize `identity` for `action` on `resource`.
///
/// `owner` is the stored owner/organizer/instructor/creator reference of the
/// existing instance, already normalized to string form; it only matters for
/// `OwnerOr` rules.
///
/// - No IO
/// - No panics
/// - Pure policy check
pub fn authorize(
    identity: &Identity,
    resource: ResourceKind,
    action: Action,
    owner: Option<&str>,
) -> Result<(), PolicyError> {
    let allowed = match rule_for(resource, action) {
        Rule::Public | Rule::AnyAuthenticated => true,
        Rule::Roles(roles) => roles.contains(&identity.role),
        Rule::OwnerOr(roles) => identity.owns(owner) || roles.contains(&identity.role),
        Rule::AdminOnly => identity.role.is_admin(),
        Rule::NotExposed => false,
    };

    if allowed {
        Ok(())
    } else {
        Err(PolicyError::Forbidden {
            resource: resource.as_str(),
            action: action.as_str(),
        })
    }
}

/// An admin may never delete their own account, however many admins exist.
pub fn guard_self_delete(caller: &Identity, target_id: &str) -> Result<(), PolicyError> {
    if caller.id == target_id {
        return Err(PolicyError::SelfProtection(
            "admins cannot delete their own account",
        ));
    }
    Ok(())
}

/// An admin may never deactivate their own account via the active toggle.
pub fn guard_self_deactivate(
    caller: &Identity,
    target_id: &str,
    next_active: bool,
) -> Result<(), PolicyError> {
    if caller.id == target_id && !next_active {
        return Err(PolicyError::SelfProtection(
            "admins cannot deactivate their own account",
        ));
    }
    Ok(())
}

/// A group creator cannot leave their own group (ownership transfer does not
/// exist, so this is permanently blocked).
pub fn guard_creator_leave(caller: &Identity, creator: Option<&str>) -> Result<(), PolicyError> {
    if caller.owns(creator) {
        return Err(PolicyError::SelfProtection(
            "group creators cannot leave their own group",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity(role: Role) -> Identity {
        Identity {
            id: match role {
                Role::Student => "id-student".to_string(),
                Role::Faculty => "id-faculty".to_string(),
                Role::Admin => "id-admin".to_string(),
            },
            email: format!("{}@x.edu", role.as_str()),
            role,
            name: role.as_str().to_string(),
        }
    }

    #[test]
    fn user_management_is_admin_only() {
        for action in [Action::Create, Action::Read, Action::Update, Action::Delete] {
            assert!(authorize(&identity(Role::Admin), ResourceKind::User, action, None).is_ok());
            assert!(authorize(&identity(Role::Faculty), ResourceKind::User, action, None).is_err());
            assert!(authorize(&identity(Role::Student), ResourceKind::User, action, None).is_err());
        }
    }

    #[test]
    fn course_creation_requires_staff() {
        assert!(authorize(&identity(Role::Faculty), ResourceKind::Course, Action::Create, None).is_ok());
        assert!(authorize(&identity(Role::Admin), ResourceKind::Course, Action::Create, None).is_ok());
        assert!(authorize(&identity(Role::Student), ResourceKind::Course, Action::Create, None).is_err());
    }

    #[test]
    fn event_mutation_is_organizer_or_admin() {
        let organizer = identity(Role::Faculty);
        let other_faculty = Identity {
            id: "id-other".to_string(),
            ..identity(Role::Faculty)
        };

        for action in [Action::Update, Action::Delete] {
            assert!(authorize(&organizer, ResourceKind::Event, action, Some("id-faculty")).is_ok());
            assert!(authorize(&other_faculty, ResourceKind::Event, action, Some("id-faculty")).is_err());
            assert!(authorize(&identity(Role::Admin), ResourceKind::Event, action, Some("id-faculty")).is_ok());
        }
    }

    #[test]
    fn demo_created_resources_have_no_owner() {
        // Owner is None for demo-created resources; only admin passes OwnerOr.
        let faculty = identity(Role::Faculty);
        assert!(authorize(&faculty, ResourceKind::Event, Action::Update, None).is_err());
        assert!(authorize(&identity(Role::Admin), ResourceKind::Event, Action::Update, None).is_ok());
    }

    #[test]
    fn students_can_create_discussions_groups_resources() {
        let student = identity(Role::Student);
        for kind in [ResourceKind::Discussion, ResourceKind::Group, ResourceKind::Resource] {
            assert!(authorize(&student, kind, Action::Create, None).is_ok());
        }
    }

    #[test]
    fn notification_creation_requires_staff() {
        assert!(authorize(&identity(Role::Student), ResourceKind::Notification, Action::Create, None).is_err());
        assert!(authorize(&identity(Role::Faculty), ResourceKind::Notification, Action::Create, None).is_ok());
    }

    #[test]
    fn not_exposed_operations_deny_everyone() {
        assert!(authorize(&identity(Role::Admin), ResourceKind::Course, Action::Delete, None).is_err());
        assert!(authorize(&identity(Role::Admin), ResourceKind::Group, Action::Delete, None).is_err());
    }

    #[test]
    fn admin_cannot_delete_self() {
        let admin = identity(Role::Admin);
        assert!(guard_self_delete(&admin, "id-admin").is_err());
        assert!(guard_self_delete(&admin, "someone-else").is_ok());
    }

    #[test]
    fn admin_cannot_deactivate_self() {
        let admin = identity(Role::Admin);
        assert!(guard_self_deactivate(&admin, "id-admin", false).is_err());
        // Re-activating yourself is a no-op, not a violation.
        assert!(guard_self_deactivate(&admin, "id-admin", true).is_ok());
        assert!(guard_self_deactivate(&admin, "other", false).is_ok());
    }

    #[test]
    fn creator_cannot_leave_own_group() {
        let creator = identity(Role::Student);
        assert!(guard_creator_leave(&creator, Some("id-student")).is_err());
        assert!(guard_creator_leave(&creator, Some("other")).is_ok());
        assert!(guard_creator_leave(&creator, None).is_ok());
    }
}
