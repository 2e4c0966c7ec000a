//! Test fixtures and wire types
//!
//! Mirrors the JSON bodies the API accepts and returns, kept independent of
//! the server's own DTOs so tests exercise the actual wire format.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

static COUNTER: AtomicU64 = AtomicU64::new(0);

/// Suffix that keeps emails unique across tests sharing a database
pub fn unique_suffix() -> String {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.subsec_nanos())
        .unwrap_or_default();
    format!("{}{}", nanos, COUNTER.fetch_add(1, Ordering::Relaxed))
}

// ============================================================================
// Requests
// ============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub login: String,
    pub password: String,
    pub password_confirmation: String,
    pub full_name: String,
    pub email: String,
}

impl RegisterRequest {
    pub fn unique(prefix: &str) -> Self {
        let suffix = unique_suffix();
        Self {
            login: format!("{prefix}{suffix}"),
            password: "password123".to_string(),
            password_confirmation: "password123".to_string(),
            full_name: format!("{prefix} tester"),
            email: format!("{prefix}{suffix}@remark.test"),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    pub login: String,
    pub password: String,
    pub password_confirmation: String,
    pub full_name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

impl CreateUserRequest {
    pub fn unique(prefix: &str, role: Option<&str>) -> Self {
        let base = RegisterRequest::unique(prefix);
        Self {
            login: base.login,
            password: base.password,
            password_confirmation: base.password_confirmation,
            full_name: base.full_name,
            email: base.email,
            role: role.map(str::to_string),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RoleRequest {
    pub role: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ContentRequest {
    pub content: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct StatusRequest {
    pub status: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReactionRequest {
    #[serde(rename = "type")]
    pub kind: String,
}

impl ReactionRequest {
    pub fn like() -> Self {
        Self {
            kind: "LIKE".to_string(),
        }
    }

    pub fn dislike() -> Self {
        Self {
            kind: "DISLIKE".to_string(),
        }
    }
}

// ============================================================================
// Responses
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub user: UserResponse,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: i64,
    pub login: String,
    pub full_name: String,
    pub email: String,
    pub role: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UserSummary {
    pub id: i64,
    pub email: String,
    pub role: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UserMutation {
    pub message: String,
    pub user: UserResponse,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentResponse {
    pub id: i64,
    pub author_id: i64,
    pub content: String,
    pub status: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentDetail {
    pub id: i64,
    pub status: String,
    pub author: ReactionAuthor,
    pub likes: Vec<ReactionResponse>,
    pub like_count: i64,
    pub dislike_count: i64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReactionResponse {
    pub id: i64,
    pub comment_id: i64,
    pub author_id: i64,
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReactionAuthor {
    pub id: i64,
    pub login: String,
    pub full_name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReactionWithAuthor {
    #[serde(flatten)]
    pub reaction: ReactionResponse,
    pub author: ReactionAuthor,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReactionResult {
    pub message: String,
    pub like: Option<ReactionResponse>,
}
