//! Entity to DTO mappers
//!
//! Implements `From` conversions from domain entities to response DTOs.

use remark_core::entities::{
    Comment, Reaction, ReactionAuthor, ReactionCounts, ReactionWithAuthor, User,
};

use super::responses::{
    CommentDetailResponse, CommentResponse, ReactionAuthorResponse, ReactionResponse,
    ReactionWithAuthorResponse, UserResponse, UserSummaryResponse,
};

// ============================================================================
// User Mappers
// ============================================================================

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            login: user.login.clone(),
            full_name: user.full_name.clone(),
            email: user.email.clone(),
            role: user.role,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self::from(&user)
    }
}

impl From<&User> for UserSummaryResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            role: user.role,
        }
    }
}

impl From<&User> for ReactionAuthorResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            login: user.login.clone(),
            full_name: user.full_name.clone(),
        }
    }
}

// ============================================================================
// Comment Mappers
// ============================================================================

impl From<&Comment> for CommentResponse {
    fn from(comment: &Comment) -> Self {
        Self {
            id: comment.id,
            author_id: comment.author_id,
            content: comment.content.clone(),
            status: comment.status,
            created_at: comment.created_at,
            updated_at: comment.updated_at,
        }
    }
}

impl From<Comment> for CommentResponse {
    fn from(comment: Comment) -> Self {
        Self::from(&comment)
    }
}

/// Comment loaded together with its author and reactions
#[derive(Debug, Clone)]
pub struct CommentWithDetails {
    pub comment: Comment,
    pub author: User,
    pub reactions: Vec<Reaction>,
}

impl From<CommentWithDetails> for CommentDetailResponse {
    fn from(details: CommentWithDetails) -> Self {
        let counts = ReactionCounts::tally(&details.reactions);
        Self {
            comment: CommentResponse::from(&details.comment),
            author: ReactionAuthorResponse::from(&details.author),
            likes: details.reactions.iter().map(ReactionResponse::from).collect(),
            like_count: counts.likes,
            dislike_count: counts.dislikes,
        }
    }
}

// ============================================================================
// Reaction Mappers
// ============================================================================

impl From<&Reaction> for ReactionResponse {
    fn from(reaction: &Reaction) -> Self {
        Self {
            id: reaction.id,
            comment_id: reaction.comment_id,
            author_id: reaction.author_id,
            kind: reaction.kind,
            created_at: reaction.created_at,
            updated_at: reaction.updated_at,
        }
    }
}

impl From<Reaction> for ReactionResponse {
    fn from(reaction: Reaction) -> Self {
        Self::from(&reaction)
    }
}

impl From<ReactionAuthor> for ReactionAuthorResponse {
    fn from(author: ReactionAuthor) -> Self {
        Self {
            id: author.id,
            login: author.login,
            full_name: author.full_name,
        }
    }
}

impl From<ReactionWithAuthor> for ReactionWithAuthorResponse {
    fn from(row: ReactionWithAuthor) -> Self {
        Self {
            reaction: ReactionResponse::from(&row.reaction),
            author: ReactionAuthorResponse::from(row.author),
        }
    }
}
