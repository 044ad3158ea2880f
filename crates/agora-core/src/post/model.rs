//! Post data model

use crate::error::{AgoraError, Result};
use crate::types::{PostId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A post in a community
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    /// Unique post identifier
    pub id: PostId,
    /// Author of the post
    pub user_id: UserId,
    /// Name of the community the post belongs to
    pub community: String,
    /// Post title
    pub title: String,
    /// Optional body text
    pub body: Option<String>,
    /// Denormalized sum of live vote values; written only by the vote engine
    pub vote_count: i64,
    /// When the post was created
    pub created_at: DateTime<Utc>,
    /// When the post was last edited
    pub updated_at: DateTime<Utc>,
}

impl Post {
    /// Create a new post
    pub fn new(user_id: UserId, community: impl Into<String>, title: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: PostId::new(),
            user_id,
            community: community.into(),
            title: title.into(),
            body: None,
            vote_count: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Set the body text
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Validate required fields
    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(AgoraError::Validation("Post title is required".to_string()));
        }
        if self.community.trim().is_empty() {
            return Err(AgoraError::Validation(
                "Post community is required".to_string(),
            ));
        }
        Ok(())
    }

    /// Update title and body, refreshing updated_at
    pub fn update(&mut self, title: impl Into<String>, body: Option<String>) {
        self.title = title.into();
        self.body = body;
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_post() {
        let post = Post::new(UserId::new(), "rust", "Hello").with_body("First post");
        assert_eq!(post.vote_count, 0);
        assert_eq!(post.body.as_deref(), Some("First post"));
        assert!(post.validate().is_ok());
    }

    #[test]
    fn test_validate_requires_title() {
        let post = Post::new(UserId::new(), "rust", "  ");
        assert!(matches!(
            post.validate().unwrap_err(),
            AgoraError::Validation(_)
        ));
    }

    #[test]
    fn test_validate_requires_community() {
        let post = Post::new(UserId::new(), "", "Title");
        assert!(post.validate().is_err());
    }

    #[test]
    fn test_update_refreshes_timestamp() {
        let mut post = Post::new(UserId::new(), "rust", "Before");
        let created = post.created_at;
        post.update("After", Some("body".to_string()));
        assert_eq!(post.title, "After");
        assert_eq!(post.created_at, created);
        assert!(post.updated_at >= created);
    }
}
