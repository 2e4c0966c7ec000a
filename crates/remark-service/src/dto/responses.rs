//! Response DTOs for API endpoints
//!
//! All response DTOs implement `Serialize` for JSON output. Field names are
//! camelCase; ids are numbers.

use chrono::{DateTime, Utc};
use serde::Serialize;

use remark_core::{CommentStatus, EntityId, ReactionType, Role, ToggleOutcome};

// ============================================================================
// Common Response Types
// ============================================================================

/// `{ "message": ... }` acknowledgement
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

// ============================================================================
// Auth Responses
// ============================================================================

/// Authentication response with tokens
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub user: UserResponse,
}

impl AuthResponse {
    pub fn new(
        access_token: String,
        refresh_token: String,
        expires_in: i64,
        user: UserResponse,
    ) -> Self {
        Self {
            access_token,
            refresh_token,
            token_type: "Bearer".to_string(),
            expires_in,
            user,
        }
    }
}

// ============================================================================
// User Responses
// ============================================================================

/// Full user profile; never carries the password hash
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: EntityId,
    pub login: String,
    pub full_name: String,
    pub email: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Entry of the admin user listing
#[derive(Debug, Clone, Serialize)]
pub struct UserSummaryResponse {
    pub id: EntityId,
    pub email: String,
    pub role: Role,
}

/// Acknowledgement carrying the affected user
#[derive(Debug, Clone, Serialize)]
pub struct UserMutationResponse {
    pub message: String,
    pub user: UserResponse,
}

// ============================================================================
// Comment Responses
// ============================================================================

/// Comment response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentResponse {
    pub id: EntityId,
    pub author_id: EntityId,
    pub content: String,
    pub status: CommentStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Comment with its author and reactions
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentDetailResponse {
    #[serde(flatten)]
    pub comment: CommentResponse,
    pub author: ReactionAuthorResponse,
    pub likes: Vec<ReactionResponse>,
    pub like_count: i64,
    pub dislike_count: i64,
}

// ============================================================================
// Reaction Responses
// ============================================================================

/// Reaction response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReactionResponse {
    pub id: EntityId,
    pub comment_id: EntityId,
    pub author_id: EntityId,
    #[serde(rename = "type")]
    pub kind: ReactionType,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Public author fields shown next to a reaction or comment
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReactionAuthorResponse {
    pub id: EntityId,
    pub login: String,
    pub full_name: String,
}

/// Reaction listing entry
#[derive(Debug, Clone, Serialize)]
pub struct ReactionWithAuthorResponse {
    #[serde(flatten)]
    pub reaction: ReactionResponse,
    pub author: ReactionAuthorResponse,
}

/// Result of a toggle request
///
/// `like` is present when a row exists afterwards. The outcome is not
/// serialized; the HTTP layer turns it into the status code.
#[derive(Debug, Clone, Serialize)]
pub struct ReactionToggleResponse {
    #[serde(skip)]
    pub outcome: ToggleOutcome,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub like: Option<ReactionResponse>,
}

impl ReactionToggleResponse {
    pub fn new(outcome: ToggleOutcome, like: Option<ReactionResponse>) -> Self {
        let message = match outcome {
            ToggleOutcome::Created => "Reaction added successfully",
            ToggleOutcome::Updated => "Reaction updated successfully",
            ToggleOutcome::Removed => "Reaction removed successfully",
        };
        Self {
            outcome,
            message: message.to_string(),
            like,
        }
    }
}

// ============================================================================
// Health Check Responses
// ============================================================================

/// Health check response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: Utc::now(),
        }
    }
}

/// Readiness check response
#[derive(Debug, Clone, Serialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub checks: HealthChecks,
}

/// Health check status for each backing service
#[derive(Debug, Clone, Serialize)]
pub struct HealthChecks {
    pub database: String,
}

impl ReadinessResponse {
    pub fn ready(database_healthy: bool) -> Self {
        Self {
            status: if database_healthy { "ready" } else { "not_ready" }.to_string(),
            timestamp: Utc::now(),
            checks: HealthChecks {
                database: if database_healthy { "healthy" } else { "unhealthy" }.to_string(),
            },
        }
    }

    pub fn is_ready(&self) -> bool {
        self.status == "ready"
    }
}
