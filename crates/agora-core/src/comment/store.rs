//! Comment storage trait

use super::model::Comment;
use crate::error::Result;
use crate::types::{CommentId, PostId};

/// Trait for comment storage implementations
pub trait CommentStore: Send + Sync {
    /// Save a comment (insert or update)
    fn save_comment(&self, comment: &Comment) -> Result<()>;

    /// Load a comment by ID
    fn get_comment(&self, id: &CommentId) -> Result<Comment>;

    /// All comments for a post, ordered oldest first.
    ///
    /// This is the order the tree assembler expects for chronological
    /// sibling ordering.
    fn comments_for_post(&self, post_id: &PostId) -> Result<Vec<Comment>>;

    /// Delete a comment.
    ///
    /// Vote rows for the comment go with it. Replies are left in place with
    /// a now-dangling parent reference; the tree assembler excludes them.
    fn delete_comment(&self, id: &CommentId) -> Result<()>;

    /// Check if a comment exists
    fn comment_exists(&self, id: &CommentId) -> bool;
}
