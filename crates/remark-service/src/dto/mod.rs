//! Data transfer objects for API requests and responses
//!
//! This module provides:
//! - Request DTOs with validation for API inputs
//! - Response DTOs for serializing API outputs
//! - Mappers for converting domain entities to DTOs

pub mod mappers;
pub mod requests;
pub mod responses;

// Re-export commonly used request types
pub use requests::{
    CreateCommentRequest, CreateUserRequest, LoginRequest, ReactionRequest, RefreshTokenRequest,
    RegisterRequest, UpdateCommentStatusRequest, UpdateUserRequest,
};

// Re-export commonly used response types
pub use responses::{
    AuthResponse, CommentDetailResponse, CommentResponse, HealthChecks, HealthResponse,
    MessageResponse, ReactionAuthorResponse, ReactionResponse, ReactionToggleResponse,
    ReactionWithAuthorResponse, ReadinessResponse, UserMutationResponse, UserResponse,
    UserSummaryResponse,
};

pub use mappers::CommentWithDetails;
