//! Reaction service
//!
//! Drives the like/dislike toggle. Each attempt reads the pair's current row,
//! plans the transition and applies it with a write that only succeeds if the
//! row still looks the way it was read and the comment is still ACTIVE. A
//! write that finds the row changed means another request got there first;
//! the attempt is repeated from a fresh read.

use remark_core::entities::{Reaction, ReactionType};
use remark_core::policy::{plan_toggle, ReactionState, TogglePlan};
use remark_core::{ActorContext, DomainError, EntityId};
use tracing::{info, instrument, warn};

use crate::dto::{
    MessageResponse, ReactionResponse, ReactionToggleResponse, ReactionWithAuthorResponse,
};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Attempts before a contended toggle gives up with `Conflict`
pub const MAX_TOGGLE_ATTEMPTS: usize = 2;

fn parse_kind(raw: Option<&str>) -> Result<ReactionType, DomainError> {
    raw.ok_or(DomainError::InvalidReactionType)?.parse()
}

/// Reaction service
pub struct ReactionService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ReactionService<'a> {
    /// Create a new ReactionService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Toggle the actor's reaction on a comment
    ///
    /// Same kind as held removes it, the other kind flips it, none inserts.
    /// The comment must exist and be ACTIVE.
    #[instrument(skip(self), fields(actor_id = %actor.id))]
    pub async fn set_reaction(
        &self,
        actor: &ActorContext,
        comment_id: EntityId,
        raw_kind: Option<&str>,
    ) -> ServiceResult<ReactionToggleResponse> {
        let kind = parse_kind(raw_kind)?;

        for attempt in 1..=MAX_TOGGLE_ATTEMPTS {
            self.ensure_active(comment_id).await?;

            let current = self
                .ctx
                .reaction_repo()
                .find_for_author(comment_id, actor.id)
                .await?;
            let plan = plan_toggle(ReactionState::from(current.map(|r| r.kind)), kind);

            if let Some(reaction) = self.apply(comment_id, actor.id, plan).await? {
                info!(
                    comment_id = %comment_id,
                    outcome = ?plan.outcome(),
                    kind = %kind,
                    "Reaction toggled"
                );
                return Ok(ReactionToggleResponse::new(
                    plan.outcome(),
                    reaction.map(ReactionResponse::from),
                ));
            }

            warn!(
                comment_id = %comment_id,
                attempt,
                "Reaction changed concurrently, re-reading"
            );
        }

        // A write refused because the comment went INACTIVE is not a conflict
        self.ensure_active(comment_id).await?;

        Err(DomainError::ReactionConflict.into())
    }

    async fn ensure_active(&self, comment_id: EntityId) -> ServiceResult<()> {
        let comment = self
            .ctx
            .comment_repo()
            .find_by_id(comment_id)
            .await?
            .ok_or(DomainError::CommentNotFound)?;
        if !comment.is_active() {
            return Err(DomainError::InactiveComment.into());
        }
        Ok(())
    }

    /// Run one planned write
    ///
    /// `None` means the row no longer matched the plan. `Some(None)` is a
    /// completed removal.
    async fn apply(
        &self,
        comment_id: EntityId,
        author_id: EntityId,
        plan: TogglePlan,
    ) -> ServiceResult<Option<Option<Reaction>>> {
        let repo = self.ctx.reaction_repo();

        let applied = match plan {
            TogglePlan::Insert(kind) => repo
                .insert_if_absent(comment_id, author_id, kind)
                .await?
                .map(Some),
            TogglePlan::Flip { from, to } => repo
                .update_kind_if(comment_id, author_id, from, to)
                .await?
                .map(Some),
            TogglePlan::Remove(kind) => repo
                .delete_if(comment_id, author_id, kind)
                .await?
                .then_some(None),
        };

        Ok(applied)
    }

    /// Remove the actor's reaction only if it is of the given kind
    #[instrument(skip(self), fields(actor_id = %actor.id))]
    pub async fn remove_reaction(
        &self,
        actor: &ActorContext,
        comment_id: EntityId,
        raw_kind: Option<&str>,
    ) -> ServiceResult<MessageResponse> {
        let kind = parse_kind(raw_kind)?;

        if !self
            .ctx
            .reaction_repo()
            .delete_if(comment_id, actor.id, kind)
            .await?
        {
            return Err(DomainError::ReactionNotFound(kind).into());
        }

        info!(comment_id = %comment_id, kind = %kind, "Reaction removed");

        Ok(MessageResponse::new(format!("{kind} removed successfully")))
    }

    /// List every reaction on a comment with its author
    ///
    /// An unknown comment yields an empty list.
    #[instrument(skip(self))]
    pub async fn list_reactions(
        &self,
        comment_id: EntityId,
    ) -> ServiceResult<Vec<ReactionWithAuthorResponse>> {
        let rows = self.ctx.reaction_repo().find_by_comment(comment_id).await?;

        Ok(rows
            .into_iter()
            .map(ReactionWithAuthorResponse::from)
            .collect())
    }
}
