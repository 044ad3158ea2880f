//! Error types for agora

use thiserror::Error;

/// Main error type for agora
#[derive(Debug, Error)]
pub enum AgoraError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(String),

    /// Vote value outside {-1, 0, 1}
    #[error("Invalid vote value: {0} (expected -1, 0, or 1)")]
    InvalidVoteValue(i64),

    /// Unrecognized votable kind string
    #[error("Invalid votable kind: {0}")]
    InvalidVotableKind(String),

    /// Vote target does not exist (may have been deleted concurrently)
    #[error("Votable not found: {0}")]
    VotableNotFound(String),

    /// The atomic ledger/counter update could not be committed.
    /// The whole operation should be retried, never a partial step.
    #[error("Storage conflict: {0}")]
    StorageConflict(String),

    /// Post not found
    #[error("Post not found: {0}")]
    PostNotFound(String),

    /// Comment not found
    #[error("Comment not found: {0}")]
    CommentNotFound(String),

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic error with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<AgoraError>,
    },
}

impl AgoraError {
    /// Add context to an error
    pub fn with_context(self, context: impl Into<String>) -> Self {
        AgoraError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }
}

/// Result type alias for agora
pub type Result<T> = std::result::Result<T, AgoraError>;
