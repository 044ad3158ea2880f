//! Shared in-memory forum state
//!
//! Both backends keep the whole forum in one `State` value guarded by a
//! mutex; every mutation runs with the lock held, which is what makes a
//! vote reconciliation an atomic unit here.

use agora_core::comment::Comment;
use agora_core::error::{AgoraError, Result};
use agora_core::post::Post;
use agora_core::types::{CommentId, PostId, UserId};
use agora_core::vote::{LedgerMutation, Reconciliation, Vote, VoteDirection, VotableRef, VoteOutcome};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Current schema version for persisted state files
pub const CURRENT_SCHEMA_VERSION: u32 = 1;

/// The entire forum: posts, comments, and the vote ledger
#[derive(Debug, Clone, Default)]
pub(crate) struct State {
    pub posts: HashMap<PostId, Post>,
    pub comments: HashMap<CommentId, Comment>,
    /// One row per (user, votable); absence means no vote
    pub votes: HashMap<(UserId, VotableRef), Vote>,
}

/// On-disk representation of `State`
///
/// Vote rows are stored as a flat list because the (user, votable) map key
/// has no JSON form; the map is rebuilt on load.
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct StateFile {
    pub schema_version: u32,
    pub posts: HashMap<PostId, Post>,
    pub comments: HashMap<CommentId, Comment>,
    pub votes: Vec<Vote>,
}

impl State {
    /// Convert to the on-disk form
    pub fn to_file(&self) -> StateFile {
        StateFile {
            schema_version: CURRENT_SCHEMA_VERSION,
            posts: self.posts.clone(),
            comments: self.comments.clone(),
            votes: self.votes.values().cloned().collect(),
        }
    }

    /// Rebuild from the on-disk form
    pub fn from_file(file: StateFile) -> Result<Self> {
        if file.schema_version > CURRENT_SCHEMA_VERSION {
            return Err(AgoraError::Config(format!(
                "Unsupported schema version: {}",
                file.schema_version
            )));
        }
        let votes = file
            .votes
            .into_iter()
            .map(|vote| ((vote.user_id, vote.votable), vote))
            .collect();
        Ok(Self {
            posts: file.posts,
            comments: file.comments,
            votes,
        })
    }

    // Posts

    pub fn upsert_post(&mut self, post: &Post) -> Result<()> {
        post.validate()?;
        self.posts.insert(post.id, post.clone());
        Ok(())
    }

    pub fn get_post(&self, id: &PostId) -> Result<Post> {
        self.posts
            .get(id)
            .cloned()
            .ok_or_else(|| AgoraError::PostNotFound(id.to_string()))
    }

    pub fn remove_post(&mut self, id: &PostId) -> Result<()> {
        if self.posts.remove(id).is_none() {
            return Err(AgoraError::PostNotFound(id.to_string()));
        }

        // Cascade: comments of the post and every vote row touching the
        // post or those comments.
        let removed: Vec<CommentId> = self
            .comments
            .values()
            .filter(|c| &c.post_id == id)
            .map(|c| c.id)
            .collect();
        for comment_id in &removed {
            self.comments.remove(comment_id);
        }
        self.votes.retain(|(_, votable), _| match votable {
            VotableRef::Post(post_id) => post_id != id,
            VotableRef::Comment(comment_id) => !removed.contains(comment_id),
        });
        Ok(())
    }

    // Comments

    pub fn upsert_comment(&mut self, comment: &Comment) -> Result<()> {
        if !self.posts.contains_key(&comment.post_id) {
            return Err(AgoraError::PostNotFound(comment.post_id.to_string()));
        }
        self.comments.insert(comment.id, comment.clone());
        Ok(())
    }

    pub fn get_comment(&self, id: &CommentId) -> Result<Comment> {
        self.comments
            .get(id)
            .cloned()
            .ok_or_else(|| AgoraError::CommentNotFound(id.to_string()))
    }

    pub fn comments_for_post(&self, post_id: &PostId) -> Vec<Comment> {
        let mut comments: Vec<Comment> = self
            .comments
            .values()
            .filter(|c| &c.post_id == post_id)
            .cloned()
            .collect();
        comments.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        comments
    }

    pub fn remove_comment(&mut self, id: &CommentId) -> Result<()> {
        if self.comments.remove(id).is_none() {
            return Err(AgoraError::CommentNotFound(id.to_string()));
        }
        // Replies keep their dangling parent reference; the tree assembler
        // drops them. Vote rows for the comment are removed here.
        self.votes
            .retain(|(_, votable), _| *votable != VotableRef::Comment(*id));
        Ok(())
    }

    // Vote ledger

    fn counter_mut(&mut self, votable: &VotableRef) -> Option<&mut i64> {
        match votable {
            VotableRef::Post(id) => self.posts.get_mut(id).map(|p| &mut p.vote_count),
            VotableRef::Comment(id) => self.comments.get_mut(id).map(|c| &mut c.vote_count),
        }
    }

    pub fn votable_exists(&self, votable: &VotableRef) -> bool {
        match votable {
            VotableRef::Post(id) => self.posts.contains_key(id),
            VotableRef::Comment(id) => self.comments.contains_key(id),
        }
    }

    /// Apply one reconciliation: ledger row mutation plus counter delta.
    ///
    /// The caller holds the state lock, so the whole read-decide-apply is
    /// isolated; nothing outside this method writes vote rows or counters.
    pub fn transact_vote(
        &mut self,
        user: &UserId,
        votable: &VotableRef,
        decide: &dyn Fn(Option<VoteDirection>) -> Reconciliation,
    ) -> Result<VoteOutcome> {
        if !self.votable_exists(votable) {
            return Err(AgoraError::VotableNotFound(votable.to_string()));
        }

        let key = (*user, *votable);
        let existing = self.votes.get(&key).map(|v| v.direction);
        let reconciliation = decide(existing);

        match reconciliation.mutation {
            LedgerMutation::Keep => {}
            LedgerMutation::Insert(direction) => {
                self.votes.insert(key, Vote::new(*user, *votable, direction));
            }
            LedgerMutation::Update(direction) => {
                if let Some(vote) = self.votes.get_mut(&key) {
                    vote.set_direction(direction);
                }
            }
            LedgerMutation::Delete => {
                self.votes.remove(&key);
            }
        }

        if reconciliation.delta != 0 {
            // Existence was checked above while holding the lock.
            if let Some(count) = self.counter_mut(votable) {
                *count += reconciliation.delta;
            }
        }

        Ok(VoteOutcome {
            applied_delta: reconciliation.delta,
            vote: self.votes.get(&key).map(|v| v.direction),
        })
    }

    pub fn current_vote(&self, user: &UserId, votable: &VotableRef) -> Option<VoteDirection> {
        self.votes.get(&(*user, *votable)).map(|v| v.direction)
    }

    pub fn vote_count(&self, votable: &VotableRef) -> Result<i64> {
        match votable {
            VotableRef::Post(id) => self.posts.get(id).map(|p| p.vote_count),
            VotableRef::Comment(id) => self.comments.get(id).map(|c| c.vote_count),
        }
        .ok_or_else(|| AgoraError::VotableNotFound(votable.to_string()))
    }
}
