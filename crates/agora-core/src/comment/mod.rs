//! Comment system module
//!
//! Handles comment records, validation, and reply-tree assembly.

pub mod model;
pub mod store;
pub mod tree;
pub mod validator;

pub use model::Comment;
pub use store::CommentStore;
pub use tree::{assemble, CommentNode};
pub use validator::CommentValidator;
