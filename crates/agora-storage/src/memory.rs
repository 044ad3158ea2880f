//! In-memory forum storage

use crate::state::State;
use agora_core::comment::{Comment, CommentStore};
use agora_core::error::{AgoraError, Result};
use agora_core::post::{Post, PostStore};
use agora_core::types::{CommentId, PostId, UserId};
use agora_core::vote::{Reconciliation, VoteDirection, VoteLedger, VotableRef, VoteOutcome};
use std::sync::{Mutex, MutexGuard};

/// In-memory store backing posts, comments, and the vote ledger
///
/// All state lives behind one mutex; a vote reconciliation holds the lock
/// for its whole read-decide-apply, which satisfies the ledger's atomicity
/// contract.
pub struct MemoryStore {
    state: Mutex<State>,
}

impl MemoryStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self {
            state: Mutex::new(State::default()),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, State>> {
        self.state
            .lock()
            .map_err(|_| AgoraError::StorageConflict("store lock poisoned".to_string()))
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl PostStore for MemoryStore {
    fn save_post(&self, post: &Post) -> Result<()> {
        self.lock()?.upsert_post(post)
    }

    fn get_post(&self, id: &PostId) -> Result<Post> {
        self.lock()?.get_post(id)
    }

    fn list_posts(&self) -> Result<Vec<Post>> {
        Ok(self.lock()?.posts.values().cloned().collect())
    }

    fn delete_post(&self, id: &PostId) -> Result<()> {
        self.lock()?.remove_post(id)
    }

    fn post_exists(&self, id: &PostId) -> bool {
        self.lock()
            .map(|state| state.posts.contains_key(id))
            .unwrap_or(false)
    }
}

impl CommentStore for MemoryStore {
    fn save_comment(&self, comment: &Comment) -> Result<()> {
        self.lock()?.upsert_comment(comment)
    }

    fn get_comment(&self, id: &CommentId) -> Result<Comment> {
        self.lock()?.get_comment(id)
    }

    fn comments_for_post(&self, post_id: &PostId) -> Result<Vec<Comment>> {
        Ok(self.lock()?.comments_for_post(post_id))
    }

    fn delete_comment(&self, id: &CommentId) -> Result<()> {
        self.lock()?.remove_comment(id)
    }

    fn comment_exists(&self, id: &CommentId) -> bool {
        self.lock()
            .map(|state| state.comments.contains_key(id))
            .unwrap_or(false)
    }
}

impl VoteLedger for MemoryStore {
    fn transact(
        &self,
        user: &UserId,
        votable: &VotableRef,
        decide: &dyn Fn(Option<VoteDirection>) -> Reconciliation,
    ) -> Result<VoteOutcome> {
        self.lock()?.transact_vote(user, votable, decide)
    }

    fn current_vote(&self, user: &UserId, votable: &VotableRef) -> Result<Option<VoteDirection>> {
        Ok(self.lock()?.current_vote(user, votable))
    }

    fn vote_count(&self, votable: &VotableRef) -> Result<i64> {
        self.lock()?.vote_count(votable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agora_core::comment::assemble;
    use agora_core::vote::{VoteEngine, VoteIntent};
    use std::sync::Arc;

    fn store_with_post() -> (Arc<MemoryStore>, Post) {
        let store = Arc::new(MemoryStore::new());
        let post = Post::new(UserId::new(), "rust", "Hello");
        store.save_post(&post).unwrap();
        (store, post)
    }

    #[test]
    fn test_post_crud() {
        let (store, post) = store_with_post();

        let mut updated = store.get_post(&post.id).unwrap();
        updated.update("Hello again", None);
        store.save_post(&updated).unwrap();
        assert_eq!(store.get_post(&post.id).unwrap().title, "Hello again");

        store.delete_post(&post.id).unwrap();
        assert!(!store.post_exists(&post.id));
        assert!(matches!(
            store.get_post(&post.id).unwrap_err(),
            AgoraError::PostNotFound(_)
        ));
    }

    #[test]
    fn test_comments_ordered_oldest_first() {
        let (store, post) = store_with_post();
        let user = UserId::new();

        for content in ["first", "second", "third"] {
            store
                .save_comment(&Comment::new(post.id, user, content))
                .unwrap();
            std::thread::sleep(std::time::Duration::from_millis(2));
        }

        let contents: Vec<String> = store
            .comments_for_post(&post.id)
            .unwrap()
            .into_iter()
            .map(|c| c.content)
            .collect();
        assert_eq!(contents, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_comment_fetch_feeds_tree_assembly() {
        let (store, post) = store_with_post();
        let user = UserId::new();

        let root = Comment::new(post.id, user, "root");
        store.save_comment(&root).unwrap();
        std::thread::sleep(std::time::Duration::from_millis(2));
        let reply = Comment::reply(post.id, user, root.id, "reply");
        store.save_comment(&reply).unwrap();

        let forest = assemble(store.comments_for_post(&post.id).unwrap());
        assert_eq!(forest.len(), 1);
        assert_eq!(forest[0].children.len(), 1);
        assert_eq!(forest[0].children[0].comment.content, "reply");
    }

    #[test]
    fn test_deleting_parent_comment_orphans_replies() {
        let (store, post) = store_with_post();
        let user = UserId::new();

        let parent = Comment::new(post.id, user, "parent");
        store.save_comment(&parent).unwrap();
        let reply = Comment::reply(post.id, user, parent.id, "reply");
        store.save_comment(&reply).unwrap();

        store.delete_comment(&parent.id).unwrap();

        // The reply row survives but is excluded from the assembled tree.
        assert!(store.comment_exists(&reply.id));
        let forest = assemble(store.comments_for_post(&post.id).unwrap());
        assert!(forest.is_empty());
    }

    #[test]
    fn test_vote_engine_over_memory_store() {
        let (store, post) = store_with_post();
        let engine = VoteEngine::with_ledger(store.clone());
        let user = UserId::new();
        let votable = VotableRef::Post(post.id);

        let outcome = engine
            .submit(&user, &votable, VoteIntent::Cast(VoteDirection::Up))
            .unwrap();
        assert_eq!(outcome.applied_delta, 1);
        assert_eq!(store.get_post(&post.id).unwrap().vote_count, 1);

        let outcome = engine.submit(&user, &votable, VoteIntent::Retract).unwrap();
        assert_eq!(outcome.applied_delta, -1);
        assert_eq!(store.get_post(&post.id).unwrap().vote_count, 0);
    }

    #[test]
    fn test_concurrent_upvotes_none_lost() {
        let (store, post) = store_with_post();
        let votable = VotableRef::Post(post.id);
        let n = 32;

        let handles: Vec<_> = (0..n)
            .map(|_| {
                let store = store.clone();
                std::thread::spawn(move || {
                    let engine = VoteEngine::with_ledger(store);
                    engine
                        .submit(
                            &UserId::new(),
                            &votable,
                            VoteIntent::Cast(VoteDirection::Up),
                        )
                        .unwrap();
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(store.get_post(&post.id).unwrap().vote_count, n);
    }

    #[test]
    fn test_concurrent_same_user_serialized() {
        // Toggling from two threads must end in a consistent ledger state:
        // the counter always equals the single surviving row's value.
        let (store, post) = store_with_post();
        let votable = VotableRef::Post(post.id);
        let user = UserId::new();

        let handles: Vec<_> = [VoteDirection::Up, VoteDirection::Down]
            .into_iter()
            .map(|direction| {
                let store = store.clone();
                std::thread::spawn(move || {
                    let engine = VoteEngine::with_ledger(store);
                    engine
                        .submit(&user, &votable, VoteIntent::Cast(direction))
                        .unwrap();
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let engine = VoteEngine::with_ledger(store.clone());
        let count = store.get_post(&post.id).unwrap().vote_count;
        let state = engine.current_vote(&user, &votable).unwrap().unwrap();
        assert_eq!(count, state.value());
    }
}
