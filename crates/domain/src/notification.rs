//! Notifications with per-caller read markers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use campusconnect_core::{DomainResult, Identity, NotificationId, Role, UserId};

use crate::require;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: NotificationId,
    pub title: String,
    pub message: String,
    /// Explicit recipient caller ids (normalized string form).
    pub recipients: Vec<String>,
    /// Role broadcast: every caller with one of these roles is a recipient.
    pub roles: Vec<Role>,
    /// Creating staff member; `None` for demo-created notifications.
    pub created_by: Option<UserId>,
    /// Caller ids that have marked this notification read.
    pub read_by: Vec<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewNotification {
    pub title: String,
    pub message: String,
    pub recipients: Vec<String>,
    pub roles: Vec<Role>,
}

impl Notification {
    pub fn create(input: NewNotification, created_by: Option<UserId>) -> DomainResult<Notification> {
        require("title", &input.title)?;
        require("message", &input.message)?;

        Ok(Notification {
            id: NotificationId::new(),
            title: input.title.trim().to_string(),
            message: input.message.trim().to_string(),
            recipients: input.recipients,
            roles: input.roles,
            created_by,
            read_by: Vec::new(),
            created_at: Utc::now(),
        })
    }

    /// Recipients = explicit user list ∪ role broadcast.
    pub fn is_for(&self, viewer: &Identity) -> bool {
        self.recipients.iter().any(|r| *r == viewer.id) || self.roles.contains(&viewer.role)
    }

    pub fn is_read_by(&self, caller_id: &str) -> bool {
        self.read_by.iter().any(|r| r == caller_id)
    }

    /// Add-if-absent read marker; only the caller's own marker moves.
    pub fn mark_read(&mut self, caller_id: &str) {
        if !self.is_read_by(caller_id) {
            self.read_by.push(caller_id.to_string());
        }
    }

    /// Remove-if-present read marker.
    pub fn mark_unread(&mut self, caller_id: &str) {
        self.read_by.retain(|r| r != caller_id);
    }
}
