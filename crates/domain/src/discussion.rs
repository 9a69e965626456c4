//! Discussion posts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use campusconnect_core::{DiscussionId, DomainResult, UserId};

use crate::require;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Discussion {
    pub id: DiscussionId,
    pub title: String,
    pub content: String,
    pub category: Option<String>,
    /// Author reference; `None` for demo-created posts.
    pub author: Option<UserId>,
    pub author_name: String,
    /// Staff posts are auto-approved; student posts await approval.
    pub approved: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewDiscussion {
    pub title: String,
    pub content: String,
    pub category: Option<String>,
}

impl Discussion {
    pub fn create(
        input: NewDiscussion,
        author: Option<UserId>,
        author_name: String,
        approved: bool,
    ) -> DomainResult<Discussion> {
        require("title", &input.title)?;
        require("content", &input.content)?;

        Ok(Discussion {
            id: DiscussionId::new(),
            title: input.title.trim().to_string(),
            content: input.content.trim().to_string(),
            category: input.category,
            author,
            author_name,
            approved,
            created_at: Utc::now(),
        })
    }
}
