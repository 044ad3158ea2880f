//! Vote subsystem
//!
//! Each user holds at most one directional vote per votable item, and every
//! votable carries a denormalized counter that must always equal the sum of
//! its live vote rows. The engine computes the signed delta for each request
//! and the ledger commits the row mutation and the counter change as one
//! atomic unit.
//!
//! # Example
//!
//! ```ignore
//! use agora_core::vote::{VoteEngine, VoteIntent, VoteDirection};
//!
//! let engine = VoteEngine::new(store);
//! let outcome = engine.submit(&user, &post_id.into(), VoteIntent::Cast(VoteDirection::Up))?;
//! assert_eq!(outcome.applied_delta, 1);
//! ```

pub mod engine;
pub mod ledger;
pub mod model;
pub mod registry;

pub use engine::{reconcile, LedgerMutation, Reconciliation, VoteEngine};
pub use ledger::VoteLedger;
pub use model::{Vote, VoteDirection, VoteIntent, VoteOutcome};
pub use registry::{VotableKind, VotableRef};
