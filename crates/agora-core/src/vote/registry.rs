//! Votable registry: the closed set of things that can be voted on
//!
//! Backing-store dispatch happens on `VotableRef`, a tagged reference, so an
//! unrecognized kind string is rejected at one validation point before any
//! ledger row is touched.

use crate::error::{AgoraError, Result};
use crate::types::{CommentId, PostId};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// The two kinds of votable items
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VotableKind {
    Post,
    Comment,
}

impl VotableKind {
    /// Parse a kind string from the external interface
    ///
    /// Fails with `InvalidVotableKind` for anything other than "post" or
    /// "comment".
    pub fn parse(s: &str) -> Result<Self> {
        match s {
            "post" => Ok(VotableKind::Post),
            "comment" => Ok(VotableKind::Comment),
            other => Err(AgoraError::InvalidVotableKind(other.to_string())),
        }
    }

    /// String form used at the external interface
    pub fn as_str(&self) -> &'static str {
        match self {
            VotableKind::Post => "post",
            VotableKind::Comment => "comment",
        }
    }
}

impl fmt::Display for VotableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Typed reference to a post or comment counter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VotableRef {
    Post(PostId),
    Comment(CommentId),
}

impl VotableRef {
    /// Build a reference from an already-validated kind and a raw id
    pub fn new(kind: VotableKind, id: Uuid) -> Self {
        match kind {
            VotableKind::Post => VotableRef::Post(PostId(id)),
            VotableKind::Comment => VotableRef::Comment(CommentId(id)),
        }
    }

    /// The kind tag of this reference
    pub fn kind(&self) -> VotableKind {
        match self {
            VotableRef::Post(_) => VotableKind::Post,
            VotableRef::Comment(_) => VotableKind::Comment,
        }
    }

    /// The raw id of this reference
    pub fn id(&self) -> Uuid {
        match self {
            VotableRef::Post(id) => id.0,
            VotableRef::Comment(id) => id.0,
        }
    }
}

impl fmt::Display for VotableRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind(), self.id())
    }
}

impl From<PostId> for VotableRef {
    fn from(id: PostId) -> Self {
        VotableRef::Post(id)
    }
}

impl From<CommentId> for VotableRef {
    fn from(id: CommentId) -> Self {
        VotableRef::Comment(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_kinds() {
        assert_eq!(VotableKind::parse("post").unwrap(), VotableKind::Post);
        assert_eq!(VotableKind::parse("comment").unwrap(), VotableKind::Comment);
    }

    #[test]
    fn test_parse_rejects_unknown_kinds() {
        for bad in ["posts", "Post", "thread", "", "comment "] {
            let err = VotableKind::parse(bad).unwrap_err();
            assert!(matches!(err, AgoraError::InvalidVotableKind(k) if k == bad));
        }
    }

    #[test]
    fn test_kind_round_trip() {
        for kind in [VotableKind::Post, VotableKind::Comment] {
            assert_eq!(VotableKind::parse(kind.as_str()).unwrap(), kind);
        }
    }

    #[test]
    fn test_ref_construction() {
        let raw = Uuid::new_v4();
        let votable = VotableRef::new(VotableKind::Post, raw);
        assert_eq!(votable.kind(), VotableKind::Post);
        assert_eq!(votable.id(), raw);

        let votable = VotableRef::new(VotableKind::Comment, raw);
        assert_eq!(votable.kind(), VotableKind::Comment);
        assert_eq!(votable, VotableRef::Comment(CommentId(raw)));
    }

    #[test]
    fn test_ref_display() {
        let id = PostId::new();
        let votable: VotableRef = id.into();
        assert_eq!(votable.to_string(), format!("post {}", id));
    }
}
