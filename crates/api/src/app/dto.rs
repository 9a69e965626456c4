//! Request DTOs and JSON mapping helpers.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::{Value, json};

use campusconnect_core::Identity;
use campusconnect_domain::Notification;

// -------------------------
// Query parameters
// -------------------------

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct NotificationQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    /// `unread=true` excludes entries the caller has marked read.
    pub unread: Option<bool>,
}

// -------------------------
// Auth
// -------------------------

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    /// Defaults to `student` when absent.
    pub role: Option<String>,
    pub department: Option<String>,
    pub student_id: Option<String>,
    pub faculty_id: Option<String>,
}

// -------------------------
// Users (admin management)
// -------------------------

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    pub name: Option<String>,
    pub department: Option<String>,
    pub student_id: Option<String>,
    pub faculty_id: Option<String>,
    pub avatar: Option<String>,
    pub bio: Option<String>,
    pub phone: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetActiveRequest {
    pub is_active: bool,
}

// -------------------------
// Courses / assignments
// -------------------------

#[derive(Debug, Deserialize)]
pub struct CreateCourseRequest {
    pub code: String,
    pub title: String,
    pub description: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCourseRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAssignmentRequest {
    pub course_id: String,
    pub title: String,
    pub description: String,
    pub due_date: DateTime<Utc>,
    #[serde(default)]
    pub published: bool,
}

// -------------------------
// Events
// -------------------------

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEventRequest {
    pub title: String,
    pub description: String,
    pub date: DateTime<Utc>,
    pub location: String,
    #[serde(default = "default_true")]
    pub is_public: bool,
    pub max_attendees: Option<u32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEventRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub date: Option<DateTime<Utc>>,
    pub location: Option<String>,
    pub is_public: Option<bool>,
    pub max_attendees: Option<u32>,
    /// Approval flips are admin-only.
    pub approved: Option<bool>,
}

// -------------------------
// Discussions / groups / resources / notifications
// -------------------------

#[derive(Debug, Deserialize)]
pub struct CreateDiscussionRequest {
    pub title: String,
    pub content: String,
    pub category: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateGroupRequest {
    pub name: String,
    pub description: String,
    #[serde(default = "default_true")]
    pub is_public: bool,
    pub max_members: Option<u32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateResourceRequest {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub url: String,
    #[serde(default = "default_resource_type")]
    pub resource_type: String,
    #[serde(default = "default_true")]
    pub is_public: bool,
}

#[derive(Debug, Deserialize)]
pub struct CreateNotificationRequest {
    pub title: String,
    pub message: String,
    /// Explicit recipient user ids (normalized string form).
    #[serde(default)]
    pub recipients: Vec<String>,
    /// Role names for broadcast delivery.
    #[serde(default)]
    pub roles: Vec<String>,
}

fn default_true() -> bool {
    true
}

fn default_resource_type() -> String {
    "link".to_string()
}

// -------------------------
// Response mapping
// -------------------------

/// A notification as the caller sees it: the record plus their own read flag.
pub fn notification_to_json(notification: &Notification, viewer: &Identity) -> Value {
    let mut value = serde_json::to_value(notification).unwrap_or_else(|_| json!({}));
    if let Some(obj) = value.as_object_mut() {
        obj.insert("read".to_string(), json!(notification.is_read_by(&viewer.id)));
    }
    value
}
