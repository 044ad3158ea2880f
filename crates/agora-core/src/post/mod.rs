//! Post module
//!
//! Post records, feed sorting, and pagination.

pub mod feed;
pub mod model;
pub mod store;

pub use feed::{paginate, sort_feed, FeedPage, FeedSort};
pub use model::Post;
pub use store::PostStore;
