//! Shared resources (files by external URL, links).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use campusconnect_core::{DomainError, DomainResult, Identity, ResourceId, Role, UserId};

use crate::require;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CampusResource {
    pub id: ResourceId,
    pub title: String,
    pub description: String,
    /// External URL; there is no local file storage.
    pub url: String,
    pub resource_type: String,
    /// Uploader reference; `None` for demo-created resources.
    pub uploader: Option<UserId>,
    pub uploader_name: String,
    pub is_public: bool,
    /// Staff uploads are auto-approved; student uploads await approval.
    pub approved: bool,
    /// Caller ids that currently like this resource.
    pub likes: Vec<String>,
    pub downloads: u64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewResource {
    pub title: String,
    pub description: String,
    pub url: String,
    pub resource_type: String,
    pub is_public: bool,
}

impl CampusResource {
    pub fn create(
        input: NewResource,
        uploader: Option<UserId>,
        uploader_name: String,
        approved: bool,
    ) -> DomainResult<CampusResource> {
        require("title", &input.title)?;
        require("url", &input.url)?;

        Ok(CampusResource {
            id: ResourceId::new(),
            title: input.title.trim().to_string(),
            description: input.description.trim().to_string(),
            url: input.url.trim().to_string(),
            resource_type: input.resource_type,
            uploader,
            uploader_name,
            is_public: input.is_public,
            approved,
            likes: Vec::new(),
            downloads: 0,
            created_at: Utc::now(),
        })
    }

    pub fn uploader_ref(&self) -> Option<String> {
        self.uploader.map(|id| id.to_string())
    }

    /// Students: public+approved, or their own regardless of approval.
    /// Faculty/admin: approved resources, or their own.
    pub fn visible_to(&self, viewer: &Identity) -> bool {
        let own = viewer.owns(self.uploader_ref().as_deref());
        match viewer.role {
            Role::Student => own || (self.is_public && self.approved),
            Role::Faculty | Role::Admin => own || self.approved,
        }
    }

    /// Idempotent like toggle; returns whether the caller now likes it.
    pub fn toggle_like(&mut self, caller_id: &str) -> bool {
        let before = self.likes.len();
        self.likes.retain(|l| l != caller_id);
        if self.likes.len() == before {
            self.likes.push(caller_id.to_string());
            true
        } else {
            false
        }
    }

    /// Record a download. Gated on approval and (public or non-student).
    pub fn record_download(&mut self, viewer_role: Role) -> DomainResult<()> {
        if !self.approved {
            return Err(DomainError::validation("resource is not approved"));
        }
        if !self.is_public && viewer_role == Role::Student {
            return Err(DomainError::validation(
                "resource is not available for download",
            ));
        }
        self.downloads += 1;
        Ok(())
    }
}
