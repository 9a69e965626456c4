//! Courses.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use campusconnect_core::{CourseId, DomainResult, Identity, Role, UserId};

use crate::require;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: CourseId,
    /// Short course code (e.g. "CS-101"), unique across courses.
    pub code: String,
    pub title: String,
    pub description: String,
    /// Instructor reference; `None` for demo-created courses.
    pub instructor: Option<UserId>,
    pub instructor_name: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewCourse {
    pub code: String,
    pub title: String,
    pub description: String,
}

impl Course {
    pub fn create(
        input: NewCourse,
        instructor: Option<UserId>,
        instructor_name: String,
    ) -> DomainResult<Course> {
        require("code", &input.code)?;
        require("title", &input.title)?;
        require("description", &input.description)?;

        Ok(Course {
            id: CourseId::new(),
            code: input.code.trim().to_uppercase(),
            title: input.title.trim().to_string(),
            description: input.description.trim().to_string(),
            instructor,
            instructor_name,
            is_active: true,
            created_at: Utc::now(),
        })
    }

    pub fn instructor_ref(&self) -> Option<String> {
        self.instructor.map(|id| id.to_string())
    }

    /// Students see only active courses; faculty see their own plus active;
    /// admin sees all.
    pub fn visible_to(&self, viewer: &Identity) -> bool {
        match viewer.role {
            Role::Admin => true,
            Role::Faculty => self.is_active || viewer.owns(self.instructor_ref().as_deref()),
            Role::Student => self.is_active,
        }
    }
}
