//! Comment data model

use crate::types::{CommentId, PostId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A comment on a post, optionally replying to another comment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    /// Unique comment identifier
    pub id: CommentId,
    /// Post this comment belongs to
    pub post_id: PostId,
    /// Author of the comment
    pub user_id: UserId,
    /// Parent comment, if this is a reply
    pub parent_id: Option<CommentId>,
    /// Comment content
    pub content: String,
    /// Denormalized sum of live vote values; written only by the vote engine
    pub vote_count: i64,
    /// When the comment was created
    pub created_at: DateTime<Utc>,
    /// When the comment was last edited
    pub updated_at: DateTime<Utc>,
}

impl Comment {
    /// Create a new top-level comment
    pub fn new(post_id: PostId, user_id: UserId, content: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: CommentId::new(),
            post_id,
            user_id,
            parent_id: None,
            content: content.into(),
            vote_count: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Create a reply to an existing comment
    pub fn reply(
        post_id: PostId,
        user_id: UserId,
        parent_id: CommentId,
        content: impl Into<String>,
    ) -> Self {
        let mut comment = Self::new(post_id, user_id, content);
        comment.parent_id = Some(parent_id);
        comment
    }

    /// Update the content and refresh updated_at
    pub fn update_content(&mut self, content: impl Into<String>) {
        self.content = content.into();
        self.updated_at = Utc::now();
    }

    /// Whether this comment is a reply
    pub fn is_reply(&self) -> bool {
        self.parent_id.is_some()
    }
}
