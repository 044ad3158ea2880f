//! Comment validation

use crate::error::{AgoraError, Result};

/// Maximum comment length (default)
pub const MAX_COMMENT_LENGTH: usize = 10000;

/// Validator for comment content
pub struct CommentValidator {
    max_length: usize,
}

impl CommentValidator {
    /// Create a new validator with default settings
    pub fn new() -> Self {
        Self {
            max_length: MAX_COMMENT_LENGTH,
        }
    }

    /// Create a new validator with a custom max length
    pub fn with_max_length(max_length: usize) -> Self {
        Self { max_length }
    }

    /// Validate comment content
    pub fn validate_content(&self, content: &str) -> Result<()> {
        let trimmed = content.trim();

        if trimmed.is_empty() {
            return Err(AgoraError::Validation(
                "Comment content cannot be empty".to_string(),
            ));
        }

        if trimmed.len() > self.max_length {
            return Err(AgoraError::Validation(format!(
                "Comment content exceeds maximum length of {} characters",
                self.max_length
            )));
        }

        Ok(())
    }
}

impl Default for CommentValidator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_content() {
        let validator = CommentValidator::new();
        assert!(validator.validate_content("Looks good to me").is_ok());
    }

    #[test]
    fn test_empty_content_rejected() {
        let validator = CommentValidator::new();
        assert!(validator.validate_content("").is_err());
        assert!(validator.validate_content("   \n\t").is_err());
    }

    #[test]
    fn test_over_length_rejected() {
        let validator = CommentValidator::with_max_length(10);
        assert!(validator.validate_content("short").is_ok());
        assert!(validator.validate_content("longer than ten chars").is_err());
    }
}
