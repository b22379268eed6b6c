//! Comment entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::user::UserId;
use crate::errors::{TaskboardError, TaskboardResult};

/// Comment identifier, derived from the clock at creation time.
pub type CommentId = i64;

/// An authored note attached to a task.
///
/// The author is referenced by id; `None` means anonymous. Whether the
/// referenced user actually exists is the store's responsibility at
/// attachment time. Equality is by id only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    id: CommentId,

    author: Option<UserId>,
    content: String,

    #[serde(rename = "createdAt")]
    created_at: DateTime<Utc>,
}

/// Serializable view of a comment.
#[derive(Debug, Clone, Serialize)]
pub struct CommentSnapshot {
    pub id: CommentId,

    #[serde(rename = "authorId")]
    pub author_id: Option<UserId>,

    pub content: String,

    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

impl Comment {
    /// Create a new comment stamped with the current time.
    pub fn new(id: CommentId, author: Option<UserId>, content: impl Into<String>) -> Self {
        Self {
            id,
            author,
            content: content.into().trim().to_string(),
            created_at: Utc::now(),
        }
    }

    pub fn id(&self) -> CommentId {
        self.id
    }

    pub fn author(&self) -> Option<UserId> {
        self.author
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// Replace the content. Rejects empty or whitespace-only input,
    /// keeping the prior value.
    pub fn set_content(&mut self, value: &str) -> TaskboardResult<()> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            warn!(comment = self.id, "rejected empty comment content");
            return Err(TaskboardError::EmptyContent);
        }
        self.content = trimmed.to_string();
        Ok(())
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn snapshot(&self) -> CommentSnapshot {
        CommentSnapshot {
            id: self.id,
            author_id: self.author,
            content: self.content.clone(),
            created_at: self.created_at,
        }
    }
}

impl PartialEq for Comment {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Comment {}
