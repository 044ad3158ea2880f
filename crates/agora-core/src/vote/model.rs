//! Vote data models

use super::registry::VotableRef;
use crate::error::{AgoraError, Result};
use crate::types::UserId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Direction of a cast vote
///
/// A vote that exists is always directional; "no vote" is represented by the
/// absence of a ledger row, never by a zero value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VoteDirection {
    /// Upvote (+1)
    Up,
    /// Downvote (-1)
    Down,
}

impl VoteDirection {
    /// Signed value of this direction
    pub fn value(&self) -> i64 {
        match self {
            VoteDirection::Up => 1,
            VoteDirection::Down => -1,
        }
    }

    /// Parse from a signed value
    pub fn from_value(value: i64) -> Option<Self> {
        match value {
            1 => Some(VoteDirection::Up),
            -1 => Some(VoteDirection::Down),
            _ => None,
        }
    }
}

impl std::fmt::Display for VoteDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VoteDirection::Up => write!(f, "up"),
            VoteDirection::Down => write!(f, "down"),
        }
    }
}

/// What a vote request asks for
///
/// The external interface speaks in {-1, 0, +1}; that encoding is translated
/// here at the boundary so the rest of the engine never conflates "no vote"
/// with a vote value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteIntent {
    /// Withdraw any existing vote (wire value 0)
    Retract,
    /// Cast or switch to the given direction
    Cast(VoteDirection),
}

impl VoteIntent {
    /// Parse the wire value, rejecting anything outside {-1, 0, 1}
    pub fn from_value(value: i64) -> Result<Self> {
        match value {
            0 => Ok(VoteIntent::Retract),
            1 => Ok(VoteIntent::Cast(VoteDirection::Up)),
            -1 => Ok(VoteIntent::Cast(VoteDirection::Down)),
            other => Err(AgoraError::InvalidVoteValue(other)),
        }
    }

    /// Wire value of this intent
    pub fn value(&self) -> i64 {
        match self {
            VoteIntent::Retract => 0,
            VoteIntent::Cast(direction) => direction.value(),
        }
    }
}

/// One user's current stance on one votable item
///
/// At most one Vote exists per (user, votable) pair. Retraction deletes the
/// row rather than zeroing it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vote {
    /// Identity of the voter
    pub user_id: UserId,
    /// The post or comment voted on
    pub votable: VotableRef,
    /// Current direction
    pub direction: VoteDirection,
    /// When the vote was first cast
    pub created_at: DateTime<Utc>,
    /// When the direction last changed
    pub updated_at: DateTime<Utc>,
}

impl Vote {
    /// Create a new vote
    pub fn new(user_id: UserId, votable: VotableRef, direction: VoteDirection) -> Self {
        let now = Utc::now();
        Self {
            user_id,
            votable,
            direction,
            created_at: now,
            updated_at: now,
        }
    }

    /// Flip the direction and refresh updated_at
    pub fn set_direction(&mut self, direction: VoteDirection) {
        self.direction = direction;
        self.updated_at = Utc::now();
    }
}

/// Result of one reconciliation operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteOutcome {
    /// Signed change applied to the votable's counter
    pub applied_delta: i64,
    /// The user's vote after the operation, if any
    pub vote: Option<VoteDirection>,
}

impl VoteOutcome {
    /// Wire encoding of the resulting vote state (-1, 0, or 1)
    pub fn state_value(&self) -> i64 {
        self.vote.map(|d| d.value()).unwrap_or(0)
    }
}
