//! Course assignments.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use campusconnect_core::{AssignmentId, CourseId, DomainResult, Identity, Role, UserId};

use crate::require;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    pub id: AssignmentId,
    pub course_id: CourseId,
    pub title: String,
    pub description: String,
    pub due_date: DateTime<Utc>,
    pub published: bool,
    /// Creating faculty member; `None` for demo-created assignments.
    pub created_by: Option<UserId>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewAssignment {
    pub course_id: CourseId,
    pub title: String,
    pub description: String,
    pub due_date: DateTime<Utc>,
    pub published: bool,
}

impl Assignment {
    pub fn create(input: NewAssignment, created_by: Option<UserId>) -> DomainResult<Assignment> {
        require("title", &input.title)?;
        require("description", &input.description)?;

        Ok(Assignment {
            id: AssignmentId::new(),
            course_id: input.course_id,
            title: input.title.trim().to_string(),
            description: input.description.trim().to_string(),
            due_date: input.due_date,
            published: input.published,
            created_by,
            created_at: Utc::now(),
        })
    }

    pub fn creator_ref(&self) -> Option<String> {
        self.created_by.map(|id| id.to_string())
    }

    /// Students see only published assignments; faculty see their own;
    /// admin sees all.
    pub fn visible_to(&self, viewer: &Identity) -> bool {
        match viewer.role {
            Role::Admin => true,
            Role::Faculty => viewer.owns(self.creator_ref().as_deref()),
            Role::Student => self.published,
        }
    }
}
