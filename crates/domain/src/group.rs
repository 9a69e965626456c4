//! Student/faculty groups and membership rules.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use campusconnect_core::{DomainError, DomainResult, GroupId, Identity, UserId};

use crate::require;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    pub id: GroupId,
    pub name: String,
    pub description: String,
    pub is_public: bool,
    pub max_members: Option<u32>,
    /// Typed creator reference; `None` for demo-created groups.
    pub creator: Option<UserId>,
    /// Creator caller id in the same normalized string form as `members`.
    /// This is what the creator-leave guard compares against, so demo
    /// creators are covered too.
    pub creator_id: String,
    /// Member caller ids in normalized string form (demo callers included).
    pub members: Vec<String>,
    /// Pending join requests for private groups.
    pub join_requests: Vec<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewGroup {
    pub name: String,
    pub description: String,
    pub is_public: bool,
    pub max_members: Option<u32>,
}

/// Result of a join attempt on a group.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum JoinOutcome {
    /// Added directly (public group).
    Joined,
    /// Join request enqueued (private group).
    Requested,
}

impl Group {
    /// The creator becomes the sole initial member.
    pub fn create(
        input: NewGroup,
        creator: Option<UserId>,
        creator_caller_id: &str,
    ) -> DomainResult<Group> {
        require("name", &input.name)?;
        require("description", &input.description)?;

        Ok(Group {
            id: GroupId::new(),
            name: input.name.trim().to_string(),
            description: input.description.trim().to_string(),
            is_public: input.is_public,
            max_members: input.max_members,
            creator,
            creator_id: creator_caller_id.to_string(),
            members: vec![creator_caller_id.to_string()],
            join_requests: Vec::new(),
            created_at: Utc::now(),
        })
    }

    pub fn creator_ref(&self) -> &str {
        &self.creator_id
    }

    pub fn is_member(&self, caller_id: &str) -> bool {
        self.members.iter().any(|m| m == caller_id)
    }

    pub fn is_full(&self) -> bool {
        self.max_members
            .is_some_and(|cap| self.members.len() as u32 >= cap)
    }

    /// Members see their groups; others see public groups only.
    pub fn visible_to(&self, viewer: &Identity) -> bool {
        self.is_public || self.is_member(&viewer.id)
    }

    /// Join (public) or request to join (private). Rejects duplicates, full
    /// groups, and existing members; run inside an atomic document mutation.
    pub fn join(&mut self, caller_id: &str) -> DomainResult<JoinOutcome> {
        if self.is_member(caller_id) {
            return Err(DomainError::validation("already a member of this group"));
        }
        if self.is_full() {
            return Err(DomainError::validation("group is full"));
        }

        if self.is_public {
            self.members.push(caller_id.to_string());
            Ok(JoinOutcome::Joined)
        } else {
            if self.join_requests.iter().any(|r| r == caller_id) {
                return Err(DomainError::validation("join request already pending"));
            }
            self.join_requests.push(caller_id.to_string());
            Ok(JoinOutcome::Requested)
        }
    }

    /// Leave the group. Membership is required; the creator-leave block is a
    /// policy-level guard checked before this mutation.
    pub fn leave(&mut self, caller_id: &str) -> DomainResult<()> {
        let before = self.members.len();
        self.members.retain(|m| m != caller_id);
        if self.members.len() == before {
            return Err(DomainError::validation("not a member of this group"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group(is_public: bool, max_members: Option<u32>) -> Group {
        Group::create(
            NewGroup {
                name: "Chess Club".to_string(),
                description: "We play chess".to_string(),
                is_public,
                max_members,
            },
            None,
            "creator-1",
        )
        .unwrap()
    }

    #[test]
    fn creator_is_sole_initial_member() {
        let g = group(true, None);
        assert_eq!(g.members, vec!["creator-1".to_string()]);
        assert!(g.join_requests.is_empty());
    }

    #[test]
    fn demo_creator_is_recorded_without_a_typed_reference() {
        // Demo callers have no user row, so `creator` stays `None`; the
        // normalized caller id must still identify them as the creator.
        let g = Group::create(
            NewGroup {
                name: "Study Group".to_string(),
                description: "Weekly review".to_string(),
                is_public: true,
                max_members: None,
            },
            None,
            "demo-student",
        )
        .unwrap();
        assert!(g.creator.is_none());
        assert_eq!(g.creator_ref(), "demo-student");
        assert!(g.is_member("demo-student"));
    }

    #[test]
    fn public_join_adds_directly() {
        let mut g = group(true, None);
        assert_eq!(g.join("u2").unwrap(), JoinOutcome::Joined);
        assert!(g.is_member("u2"));
    }

    #[test]
    fn private_join_enqueues_request() {
        let mut g = group(false, None);
        assert_eq!(g.join("u2").unwrap(), JoinOutcome::Requested);
        assert!(!g.is_member("u2"));
        assert_eq!(
            g.join("u2").unwrap_err().to_string(),
            "join request already pending"
        );
    }

    #[test]
    fn second_join_rejected() {
        let mut g = group(true, None);
        g.join("u2").unwrap();
        assert_eq!(
            g.join("u2").unwrap_err().to_string(),
            "already a member of this group"
        );
    }

    #[test]
    fn full_group_rejects_join() {
        let mut g = group(true, Some(2));
        g.join("u2").unwrap();
        assert!(g.is_full());
        assert_eq!(g.join("u3").unwrap_err().to_string(), "group is full");
    }

    #[test]
    fn leave_requires_membership() {
        let mut g = group(true, None);
        assert_eq!(
            g.leave("stranger").unwrap_err().to_string(),
            "not a member of this group"
        );

        g.join("u2").unwrap();
        g.leave("u2").unwrap();
        assert!(!g.is_member("u2"));
    }

    #[test]
    fn private_groups_hidden_from_non_members() {
        let g = group(false, None);
        let member = Identity {
            id: "creator-1".to_string(),
            email: "c@x.edu".to_string(),
            role: campusconnect_core::Role::Student,
            name: "C".to_string(),
        };
        let stranger = Identity {
            id: "other".to_string(),
            ..member.clone()
        };
        assert!(g.visible_to(&member));
        assert!(!g.visible_to(&stranger));
    }
}
