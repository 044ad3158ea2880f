//! Comment tree assembly
//!
//! Turns the flat, oldest-first comment rows of one post into a forest of
//! reply nodes. The input is not assumed to list a parent before its
//! children; all ids are collected first, then children are linked.

use super::model::Comment;
use crate::types::CommentId;
use serde::Serialize;
use std::collections::{HashMap, HashSet};

/// A comment paired with its ordered replies
#[derive(Debug, Clone, Serialize)]
pub struct CommentNode {
    /// The comment itself
    #[serde(flatten)]
    pub comment: Comment,
    /// Direct replies, oldest first
    pub children: Vec<CommentNode>,
}

impl CommentNode {
    /// Total number of comments in this subtree, including this one
    pub fn size(&self) -> usize {
        1 + self.children.iter().map(CommentNode::size).sum::<usize>()
    }
}

/// Assemble flat comment rows into a forest of reply trees.
///
/// Sibling order follows input order, so rows fetched oldest-first yield
/// chronological threads. A comment whose parent id is not present in the
/// input (the parent was deleted) is dropped along with its whole subtree
/// rather than promoted to root. This never fails; malformed references
/// degrade to exclusion.
pub fn assemble(comments: Vec<Comment>) -> Vec<CommentNode> {
    let present: HashSet<CommentId> = comments.iter().map(|c| c.id).collect();

    let mut roots: Vec<Comment> = Vec::new();
    let mut replies: HashMap<CommentId, Vec<Comment>> = HashMap::new();

    for comment in comments {
        match comment.parent_id {
            None => roots.push(comment),
            Some(parent) if present.contains(&parent) => {
                replies.entry(parent).or_default().push(comment);
            }
            // Parent deleted out from under this reply: exclude the orphan.
            Some(_) => {}
        }
    }

    roots
        .into_iter()
        .map(|comment| attach_replies(comment, &mut replies))
        .collect()
}

fn attach_replies(
    comment: Comment,
    replies: &mut HashMap<CommentId, Vec<Comment>>,
) -> CommentNode {
    let children = replies
        .remove(&comment.id)
        .unwrap_or_default()
        .into_iter()
        .map(|child| attach_replies(child, replies))
        .collect();
    CommentNode { comment, children }
}
