//! Domain errors - error types for the domain layer
//!
//! Display strings are the messages API callers see, so they are written for
//! end users rather than operators.

use thiserror::Error;

use crate::entities::ReactionType;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("User not found")]
    UserNotFound,

    #[error("No users found")]
    NoUsersFound,

    #[error("Comment not found")]
    CommentNotFound,

    #[error("{0} not found for the specified comment")]
    ReactionNotFound(ReactionType),

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("{0}")]
    ValidationError(String),

    #[error("Invalid status. Must be active or inactive")]
    InvalidStatus,

    #[error("Type must be either \"LIKE\" or \"DISLIKE\"")]
    InvalidReactionType,

    #[error("Invalid role provided. Only USER or ADMIN are allowed.")]
    InvalidRole,

    #[error("Password and password confirmation do not match")]
    PasswordMismatch,

    #[error("Email is already taken")]
    EmailAlreadyExists,

    #[error("Content too long: max {max} characters")]
    ContentTooLong { max: usize },

    // =========================================================================
    // Authorization Errors
    // =========================================================================
    #[error("{0}")]
    Forbidden(String),

    #[error("Cannot react to an inactive comment")]
    InactiveComment,

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("Reaction changed concurrently, please retry")]
    ReactionConflict,

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for logs and API clients
    pub fn code(&self) -> &'static str {
        match self {
            // Not Found
            Self::UserNotFound => "UNKNOWN_USER",
            Self::NoUsersFound => "NO_USERS",
            Self::CommentNotFound => "UNKNOWN_COMMENT",
            Self::ReactionNotFound(_) => "UNKNOWN_REACTION",

            // Validation
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::InvalidStatus => "INVALID_STATUS",
            Self::InvalidReactionType => "INVALID_REACTION_TYPE",
            Self::InvalidRole => "INVALID_ROLE",
            Self::PasswordMismatch => "PASSWORD_MISMATCH",
            Self::EmailAlreadyExists => "EMAIL_ALREADY_EXISTS",
            Self::ContentTooLong { .. } => "CONTENT_TOO_LONG",

            // Authorization
            Self::Forbidden(_) => "FORBIDDEN",
            Self::InactiveComment => "INACTIVE_COMMENT",

            // Conflict
            Self::ReactionConflict => "REACTION_CONFLICT",

            // Infrastructure
            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::UserNotFound
                | Self::NoUsersFound
                | Self::CommentNotFound
                | Self::ReactionNotFound(_)
        )
    }

    /// Check if this is a validation error
    ///
    /// A taken email is reported as a bad request, not a conflict.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::ValidationError(_)
                | Self::InvalidStatus
                | Self::InvalidReactionType
                | Self::InvalidRole
                | Self::PasswordMismatch
                | Self::EmailAlreadyExists
                | Self::ContentTooLong { .. }
        )
    }

    /// Check if this is an authorization error
    pub fn is_authorization(&self) -> bool {
        matches!(self, Self::Forbidden(_) | Self::InactiveComment)
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::ReactionConflict)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(DomainError::CommentNotFound.code(), "UNKNOWN_COMMENT");
        assert_eq!(DomainError::Forbidden("x".to_string()).code(), "FORBIDDEN");
        assert_eq!(DomainError::ReactionConflict.code(), "REACTION_CONFLICT");
    }

    #[test]
    fn test_is_not_found() {
        assert!(DomainError::UserNotFound.is_not_found());
        assert!(DomainError::ReactionNotFound(ReactionType::Like).is_not_found());
        assert!(!DomainError::EmailAlreadyExists.is_not_found());
    }

    #[test]
    fn test_is_authorization() {
        assert!(DomainError::InactiveComment.is_authorization());
        assert!(DomainError::Forbidden("no".to_string()).is_authorization());
        assert!(!DomainError::CommentNotFound.is_authorization());
    }

    #[test]
    fn test_taken_email_is_validation() {
        assert!(DomainError::EmailAlreadyExists.is_validation());
        assert!(!DomainError::EmailAlreadyExists.is_conflict());
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            DomainError::ReactionNotFound(ReactionType::Dislike).to_string(),
            "DISLIKE not found for the specified comment"
        );
        assert_eq!(
            DomainError::InactiveComment.to_string(),
            "Cannot react to an inactive comment"
        );
        assert_eq!(
            DomainError::InvalidReactionType.to_string(),
            "Type must be either \"LIKE\" or \"DISLIKE\""
        );
        assert_eq!(
            DomainError::ContentTooLong { max: 2000 }.to_string(),
            "Content too long: max 2000 characters"
        );
    }
}
