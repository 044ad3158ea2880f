//! Vote reconciliation engine
//!
//! Applies a user's vote intent while keeping the denormalized counter equal
//! to the sum of live ledger rows. Only the counter delta is ever applied;
//! the ledger is never re-summed, so the delta arithmetic here must be exact
//! or repeated toggling would drift the counter.

use super::ledger::VoteLedger;
use super::model::{VoteDirection, VoteIntent, VoteOutcome};
use super::registry::{VotableKind, VotableRef};
use crate::error::Result;
use crate::types::UserId;
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

/// The ledger write a reconciliation requires
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedgerMutation {
    /// No write; the request was a no-op
    Keep,
    /// Insert a new vote row with this direction
    Insert(VoteDirection),
    /// Flip the existing row to this direction
    Update(VoteDirection),
    /// Delete the existing row (retraction)
    Delete,
}

/// Outcome of the reconciliation decision: one ledger mutation plus the
/// counter delta that must commit with it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reconciliation {
    /// Signed change for the votable's counter
    pub delta: i64,
    /// Required ledger write
    pub mutation: LedgerMutation,
}

/// Compute the ledger mutation and counter delta for a vote request.
///
/// Pure function over (existing vote, requested intent):
/// - no vote, retract: no-op
/// - no vote, cast d: insert, delta = d
/// - vote e, retract: delete, delta = -e
/// - vote e, cast d where d == e: no-op (idempotent re-vote)
/// - vote e, cast d where d != e: update, delta = d - e
pub fn reconcile(existing: Option<VoteDirection>, requested: VoteIntent) -> Reconciliation {
    match (existing, requested) {
        (None, VoteIntent::Retract) => Reconciliation {
            delta: 0,
            mutation: LedgerMutation::Keep,
        },
        (None, VoteIntent::Cast(direction)) => Reconciliation {
            delta: direction.value(),
            mutation: LedgerMutation::Insert(direction),
        },
        (Some(existing), VoteIntent::Retract) => Reconciliation {
            delta: -existing.value(),
            mutation: LedgerMutation::Delete,
        },
        (Some(existing), VoteIntent::Cast(direction)) if direction == existing => Reconciliation {
            delta: 0,
            mutation: LedgerMutation::Keep,
        },
        (Some(existing), VoteIntent::Cast(direction)) => Reconciliation {
            delta: direction.value() - existing.value(),
            mutation: LedgerMutation::Update(direction),
        },
    }
}

/// Engine applying vote intents against a ledger
pub struct VoteEngine {
    /// Ledger backend
    ledger: Arc<dyn VoteLedger>,
}

impl VoteEngine {
    /// Create an engine with the given ledger
    pub fn new(ledger: impl VoteLedger + 'static) -> Self {
        Self {
            ledger: Arc::new(ledger),
        }
    }

    /// Create an engine with a shared ledger
    pub fn with_ledger(ledger: Arc<dyn VoteLedger>) -> Self {
        Self { ledger }
    }

    /// Apply a vote intent for a user on a votable.
    ///
    /// The ledger mutation and counter delta commit as one atomic unit; on
    /// any failure neither is applied.
    pub fn submit(
        &self,
        user: &UserId,
        votable: &VotableRef,
        requested: VoteIntent,
    ) -> Result<VoteOutcome> {
        let outcome = self
            .ledger
            .transact(user, votable, &|existing| reconcile(existing, requested))?;
        debug!(
            user = %user,
            votable = %votable,
            delta = outcome.applied_delta,
            "vote reconciled"
        );
        Ok(outcome)
    }

    /// Boundary form of `submit`: raw kind string and wire vote value.
    ///
    /// Both are validated before any ledger access, so an invalid kind or
    /// value can never cause a partial write.
    pub fn submit_raw(
        &self,
        user: &UserId,
        kind: &str,
        votable_id: Uuid,
        value: i64,
    ) -> Result<VoteOutcome> {
        let kind = VotableKind::parse(kind)?;
        let requested = VoteIntent::from_value(value)?;
        self.submit(user, &VotableRef::new(kind, votable_id), requested)
    }

    /// The user's current vote on a votable
    pub fn current_vote(&self, user: &UserId, votable: &VotableRef) -> Result<Option<VoteDirection>> {
        self.ledger.current_vote(user, votable)
    }

    /// The votable's current counter value
    pub fn vote_count(&self, votable: &VotableRef) -> Result<i64> {
        self.ledger.vote_count(votable)
    }
}
