//! Feed sorting and pagination

use super::model::Post;
use serde::{Deserialize, Serialize};

/// Feed sort order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedSort {
    /// Newest first
    New,
    /// Highest vote count first
    Top,
}

impl FeedSort {
    /// Parse a sort string, defaulting to `New` for unknown values
    pub fn parse(s: &str) -> Self {
        match s {
            "top" => FeedSort::Top,
            _ => FeedSort::New,
        }
    }
}

impl Default for FeedSort {
    fn default() -> Self {
        FeedSort::New
    }
}

/// One page of the post feed
#[derive(Debug, Clone, Serialize)]
pub struct FeedPage {
    /// Posts on this page
    pub posts: Vec<Post>,
    /// 1-based page number
    pub page: usize,
    /// Total number of pages
    pub total_pages: usize,
    /// Total number of posts across all pages
    pub total_posts: usize,
}

/// Sort posts in place according to the feed order
pub fn sort_feed(posts: &mut [Post], sort: FeedSort) {
    match sort {
        FeedSort::New => posts.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        FeedSort::Top => posts.sort_by(|a, b| b.vote_count.cmp(&a.vote_count)),
    }
}

/// Slice a sorted post list into one page.
///
/// `page` is 1-based; out-of-range pages yield an empty post list with the
/// totals still filled in.
pub fn paginate(posts: Vec<Post>, page: usize, limit: usize) -> FeedPage {
    let total_posts = posts.len();
    let limit = limit.max(1);
    let page = page.max(1);
    let total_pages = total_posts.div_ceil(limit);

    let offset = (page - 1) * limit;
    let posts = posts.into_iter().skip(offset).take(limit).collect();

    FeedPage {
        posts,
        page,
        total_pages,
        total_posts,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::UserId;

    fn post(title: &str, votes: i64) -> Post {
        let mut p = Post::new(UserId::new(), "rust", title);
        p.vote_count = votes;
        p
    }

    #[test]
    fn test_sort_parse() {
        assert_eq!(FeedSort::parse("top"), FeedSort::Top);
        assert_eq!(FeedSort::parse("new"), FeedSort::New);
        assert_eq!(FeedSort::parse("anything"), FeedSort::New);
    }

    #[test]
    fn test_sort_by_new() {
        let older = post("older", 100);
        std::thread::sleep(std::time::Duration::from_millis(5));
        let newer = post("newer", 0);

        let mut posts = vec![older, newer];
        sort_feed(&mut posts, FeedSort::New);
        assert_eq!(posts[0].title, "newer");
    }

    #[test]
    fn test_sort_by_top() {
        let mut posts = vec![post("low", 1), post("high", 42), post("mid", 7)];
        sort_feed(&mut posts, FeedSort::Top);
        let titles: Vec<&str> = posts.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["high", "mid", "low"]);
    }

    #[test]
    fn test_paginate() {
        let posts: Vec<Post> = (0..25).map(|i| post(&format!("p{}", i), 0)).collect();

        let page = paginate(posts.clone(), 1, 10);
        assert_eq!(page.posts.len(), 10);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.total_posts, 25);

        let page = paginate(posts.clone(), 3, 10);
        assert_eq!(page.posts.len(), 5);

        let page = paginate(posts, 4, 10);
        assert!(page.posts.is_empty());
        assert_eq!(page.total_posts, 25);
    }

    #[test]
    fn test_paginate_empty() {
        let page = paginate(Vec::new(), 1, 10);
        assert!(page.posts.is_empty());
        assert_eq!(page.total_pages, 0);
    }
}
