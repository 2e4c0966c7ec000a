//! Request DTOs for API endpoints
//!
//! Fields that carry domain vocabulary (roles, statuses, reaction types) are
//! taken as raw strings. The services parse them so a bad value gets the same
//! message whichever route it arrives on.

use serde::Deserialize;
use validator::Validate;

// ============================================================================
// Auth Requests
// ============================================================================

/// Self-service registration; always creates a USER
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub login: Option<String>,

    #[validate(length(min = 8, max = 72, message = "Password must be 8-72 characters"))]
    pub password: Option<String>,

    pub password_confirmation: Option<String>,

    pub full_name: Option<String>,

    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,
}

/// User login request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    pub password: String,
}

/// Token refresh request
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RefreshTokenRequest {
    pub refresh_token: String,
}

// ============================================================================
// User Requests
// ============================================================================

/// Admin-created user
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    pub login: Option<String>,

    pub password: Option<String>,

    pub password_confirmation: Option<String>,

    pub full_name: Option<String>,

    /// Format checked by the service once the caller is known to be an admin
    pub email: Option<String>,

    /// USER or ADMIN, any case; USER when absent
    pub role: Option<String>,
}

/// Role change
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateUserRequest {
    pub role: Option<String>,
}

// ============================================================================
// Comment Requests
// ============================================================================

/// Create comment request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateCommentRequest {
    #[validate(length(min = 1, max = 2000, message = "Content must be 1-2000 characters"))]
    pub content: String,
}

/// Status change
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateCommentStatusRequest {
    pub status: Option<String>,
}

// ============================================================================
// Reaction Requests
// ============================================================================

/// Body for setting or removing a reaction
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ReactionRequest {
    #[serde(rename = "type")]
    pub kind: Option<String>,
}
