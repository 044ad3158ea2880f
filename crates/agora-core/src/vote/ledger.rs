//! Vote ledger storage trait

use super::engine::Reconciliation;
use super::model::{VoteDirection, VoteOutcome};
use super::registry::VotableRef;
use crate::error::Result;
use crate::types::UserId;

/// Trait for vote ledger implementations
///
/// The ledger is the source of truth for "did this user vote, and how"; it
/// also owns the denormalized `vote_count` field on each votable. No other
/// component writes either.
pub trait VoteLedger: Send + Sync {
    /// Run one reconciliation as an atomic unit.
    ///
    /// The implementation must:
    /// - fail with `VotableNotFound` before calling `decide` if the target
    ///   does not exist;
    /// - read the user's existing vote, pass it to `decide`, then apply the
    ///   returned ledger mutation and counter delta all-or-nothing;
    /// - isolate the whole read-decide-apply from concurrent calls, so no
    ///   counter update is lost and same-user calls are serialized.
    ///
    /// An implementation that cannot commit the unit fails with
    /// `StorageConflict` leaving both ledger and counter unchanged.
    fn transact(
        &self,
        user: &UserId,
        votable: &VotableRef,
        decide: &dyn Fn(Option<VoteDirection>) -> Reconciliation,
    ) -> Result<VoteOutcome>;

    /// The user's current vote on a votable, if any
    fn current_vote(&self, user: &UserId, votable: &VotableRef) -> Result<Option<VoteDirection>>;

    /// The votable's current counter value
    fn vote_count(&self, votable: &VotableRef) -> Result<i64>;
}

/// In-memory ledger for testing
#[cfg(test)]
pub mod memory {
    use super::*;
    use crate::error::AgoraError;
    use crate::vote::engine::LedgerMutation;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// In-memory vote ledger for testing engine behavior
    pub struct MemoryLedger {
        inner: Mutex<Inner>,
    }

    #[derive(Default)]
    struct Inner {
        counts: HashMap<VotableRef, i64>,
        votes: HashMap<(UserId, VotableRef), VoteDirection>,
    }

    impl MemoryLedger {
        /// Create a new empty ledger
        pub fn new() -> Self {
            Self {
                inner: Mutex::new(Inner::default()),
            }
        }

        /// Register a votable with its counter at 0
        pub fn register(&self, votable: VotableRef) {
            let mut inner = self.inner.lock().unwrap();
            inner.counts.entry(votable).or_insert(0);
        }

        /// Sum of all live vote values for a votable
        pub fn live_vote_sum(&self, votable: &VotableRef) -> i64 {
            let inner = self.inner.lock().unwrap();
            inner
                .votes
                .iter()
                .filter(|((_, v), _)| v == votable)
                .map(|(_, d)| d.value())
                .sum()
        }

        /// Number of live vote rows for a votable
        pub fn live_vote_rows(&self, votable: &VotableRef) -> usize {
            let inner = self.inner.lock().unwrap();
            inner.votes.keys().filter(|(_, v)| v == votable).count()
        }
    }

    impl Default for MemoryLedger {
        fn default() -> Self {
            Self::new()
        }
    }

    impl VoteLedger for MemoryLedger {
        fn transact(
            &self,
            user: &UserId,
            votable: &VotableRef,
            decide: &dyn Fn(Option<VoteDirection>) -> Reconciliation,
        ) -> Result<VoteOutcome> {
            let mut inner = self
                .inner
                .lock()
                .map_err(|_| AgoraError::StorageConflict("ledger lock poisoned".to_string()))?;

            if !inner.counts.contains_key(votable) {
                return Err(AgoraError::VotableNotFound(votable.to_string()));
            }

            let key = (*user, *votable);
            let existing = inner.votes.get(&key).copied();
            let reconciliation = decide(existing);

            match reconciliation.mutation {
                LedgerMutation::Keep => {}
                LedgerMutation::Insert(direction) | LedgerMutation::Update(direction) => {
                    inner.votes.insert(key, direction);
                }
                LedgerMutation::Delete => {
                    inner.votes.remove(&key);
                }
            }

            if reconciliation.delta != 0 {
                if let Some(count) = inner.counts.get_mut(votable) {
                    *count += reconciliation.delta;
                }
            }

            Ok(VoteOutcome {
                applied_delta: reconciliation.delta,
                vote: inner.votes.get(&key).copied(),
            })
        }

        fn current_vote(
            &self,
            user: &UserId,
            votable: &VotableRef,
        ) -> Result<Option<VoteDirection>> {
            let inner = self
                .inner
                .lock()
                .map_err(|_| AgoraError::StorageConflict("ledger lock poisoned".to_string()))?;
            Ok(inner.votes.get(&(*user, *votable)).copied())
        }

        fn vote_count(&self, votable: &VotableRef) -> Result<i64> {
            let inner = self
                .inner
                .lock()
                .map_err(|_| AgoraError::StorageConflict("ledger lock poisoned".to_string()))?;
            inner
                .counts
                .get(votable)
                .copied()
                .ok_or_else(|| AgoraError::VotableNotFound(votable.to_string()))
        }
    }
}
