//! Comment service
//!
//! Creation, lookup and the owner-or-admin lifecycle operations: status
//! changes and deletion. Deleting a comment removes its reactions with it.

use remark_core::entities::{Comment, CommentStatus};
use remark_core::policy::{AuthorizationGate, Requirement};
use remark_core::{ActorContext, DomainError, EntityId, MAX_COMMENT_LENGTH};
use tracing::{info, instrument};

use crate::dto::{
    CommentDetailResponse, CommentResponse, CommentWithDetails, MessageResponse,
    UpdateCommentStatusRequest,
};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Comment service
pub struct CommentService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> CommentService<'a> {
    /// Create a new CommentService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Post a comment as the acting user; new comments start ACTIVE
    #[instrument(skip(self, content), fields(actor_id = %actor.id))]
    pub async fn create_comment(
        &self,
        actor: &ActorContext,
        content: &str,
    ) -> ServiceResult<CommentResponse> {
        let content = content.trim();
        if content.is_empty() {
            return Err(ServiceError::validation("Content is required"));
        }
        if content.chars().count() > MAX_COMMENT_LENGTH {
            return Err(DomainError::ContentTooLong {
                max: MAX_COMMENT_LENGTH,
            }
            .into());
        }

        let comment = self.ctx.comment_repo().create(actor.id, content).await?;

        info!(comment_id = %comment.id, "Comment created");

        Ok(CommentResponse::from(comment))
    }

    /// Get a comment with its author and reactions
    #[instrument(skip(self))]
    pub async fn get_comment(&self, comment_id: EntityId) -> ServiceResult<CommentDetailResponse> {
        let comment = self.load(comment_id).await?;

        let author = self
            .ctx
            .user_repo()
            .find_by_id(comment.author_id)
            .await?
            .ok_or_else(|| ServiceError::internal("comment author is missing"))?;

        let reactions = self
            .ctx
            .reaction_repo()
            .find_by_comment(comment_id)
            .await?
            .into_iter()
            .map(|row| row.reaction)
            .collect();

        Ok(CommentDetailResponse::from(CommentWithDetails {
            comment,
            author,
            reactions,
        }))
    }

    /// Set a comment's status
    ///
    /// The status is parsed before any lookup; only the author or an admin
    /// may change it.
    #[instrument(skip(self, request), fields(actor_id = %actor.id))]
    pub async fn set_status(
        &self,
        actor: &ActorContext,
        comment_id: EntityId,
        request: UpdateCommentStatusRequest,
    ) -> ServiceResult<CommentResponse> {
        let status = request
            .status
            .as_deref()
            .ok_or(DomainError::InvalidStatus)?
            .parse::<CommentStatus>()?;

        let comment = self.load(comment_id).await?;
        AuthorizationGate::require(
            actor,
            &Requirement::owned_by(comment.author_id),
            "You can only update your own comments or be an admin",
        )?;

        let updated = self
            .ctx
            .comment_repo()
            .update_status(comment_id, status)
            .await?
            .ok_or(DomainError::CommentNotFound)?;

        info!(comment_id = %comment_id, status = %status, "Comment status updated");

        Ok(CommentResponse::from(updated))
    }

    /// Delete a comment and all its reactions
    #[instrument(skip(self), fields(actor_id = %actor.id))]
    pub async fn delete_comment(
        &self,
        actor: &ActorContext,
        comment_id: EntityId,
    ) -> ServiceResult<MessageResponse> {
        let comment = self.load(comment_id).await?;
        AuthorizationGate::require(
            actor,
            &Requirement::owned_by(comment.author_id),
            "You can only delete your own comments or be an admin",
        )?;

        if !self.ctx.comment_repo().delete(comment_id).await? {
            return Err(DomainError::CommentNotFound.into());
        }

        info!(comment_id = %comment_id, "Comment deleted");

        Ok(MessageResponse::new("Comment deleted successfully"))
    }

    async fn load(&self, comment_id: EntityId) -> ServiceResult<Comment> {
        self.ctx
            .comment_repo()
            .find_by_id(comment_id)
            .await?
            .ok_or_else(|| DomainError::CommentNotFound.into())
    }
}
