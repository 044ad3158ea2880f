//! Post storage trait

use super::model::Post;
use crate::error::Result;
use crate::types::PostId;

/// Trait for post storage implementations
pub trait PostStore: Send + Sync {
    /// Save a post (insert or update)
    fn save_post(&self, post: &Post) -> Result<()>;

    /// Load a post by ID
    fn get_post(&self, id: &PostId) -> Result<Post>;

    /// List all posts, unordered
    fn list_posts(&self) -> Result<Vec<Post>>;

    /// Delete a post along with its comments and every vote row referencing
    /// the post or those comments
    fn delete_post(&self, id: &PostId) -> Result<()>;

    /// Check if a post exists
    fn post_exists(&self, id: &PostId) -> bool;
}
