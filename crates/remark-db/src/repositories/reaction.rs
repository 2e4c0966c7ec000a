//! PostgreSQL implementation of ReactionRepository
//!
//! Each write is a single statement conditioned on the pair's current row, so
//! PostgreSQL's row locking serializes concurrent writers on the same pair and
//! `UNIQUE (comment_id, author_id)` rules out a second row. Inserts and flips
//! take a share lock on the comment and write nothing unless it is ACTIVE,
//! so a concurrent status change cannot slip in between.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use remark_core::entities::{Reaction, ReactionType, ReactionWithAuthor};
use remark_core::error::DomainError;
use remark_core::traits::{ReactionRepository, RepoResult};
use remark_core::value_objects::EntityId;

use crate::models::{ReactionModel, ReactionWithAuthorModel};

use super::error::{map_db_error, map_rows};

/// PostgreSQL implementation of ReactionRepository
#[derive(Clone)]
pub struct PgReactionRepository {
    pool: PgPool,
}

impl PgReactionRepository {
    /// Create a new PgReactionRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// A reaction insert can race a comment delete; report the comment as gone
fn map_insert_error(e: sqlx::Error) -> DomainError {
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_foreign_key_violation() {
            return DomainError::CommentNotFound;
        }
    }
    map_db_error(e)
}

#[async_trait]
impl ReactionRepository for PgReactionRepository {
    #[instrument(skip(self))]
    async fn find_for_author(
        &self,
        comment_id: EntityId,
        author_id: EntityId,
    ) -> RepoResult<Option<Reaction>> {
        let result = sqlx::query_as::<_, ReactionModel>(
            r"
            SELECT id, comment_id, author_id, type, created_at, updated_at
            FROM reactions
            WHERE comment_id = $1 AND author_id = $2
            ",
        )
        .bind(comment_id.into_inner())
        .bind(author_id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(Reaction::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn find_by_comment(&self, comment_id: EntityId) -> RepoResult<Vec<ReactionWithAuthor>> {
        let rows = sqlx::query_as::<_, ReactionWithAuthorModel>(
            r"
            SELECT r.id, r.comment_id, r.author_id, r.type, r.created_at, r.updated_at,
                   u.login AS author_login, u.full_name AS author_full_name
            FROM reactions r
            JOIN users u ON u.id = r.author_id
            WHERE r.comment_id = $1
            ORDER BY r.id
            ",
        )
        .bind(comment_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        map_rows(rows)
    }

    #[instrument(skip(self))]
    async fn insert_if_absent(
        &self,
        comment_id: EntityId,
        author_id: EntityId,
        kind: ReactionType,
    ) -> RepoResult<Option<Reaction>> {
        let result = sqlx::query_as::<_, ReactionModel>(
            r"
            INSERT INTO reactions (comment_id, author_id, type)
            SELECT $1, $2, $3
            WHERE EXISTS (
                SELECT 1 FROM comments
                WHERE id = $1 AND status = 'ACTIVE'
                FOR SHARE
            )
            ON CONFLICT (comment_id, author_id) DO NOTHING
            RETURNING id, comment_id, author_id, type, created_at, updated_at
            ",
        )
        .bind(comment_id.into_inner())
        .bind(author_id.into_inner())
        .bind(kind.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_insert_error)?;

        result.map(Reaction::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn update_kind_if(
        &self,
        comment_id: EntityId,
        author_id: EntityId,
        from: ReactionType,
        to: ReactionType,
    ) -> RepoResult<Option<Reaction>> {
        let result = sqlx::query_as::<_, ReactionModel>(
            r"
            UPDATE reactions
            SET type = $4, updated_at = NOW()
            WHERE comment_id = $1 AND author_id = $2 AND type = $3
              AND EXISTS (
                  SELECT 1 FROM comments
                  WHERE id = $1 AND status = 'ACTIVE'
                  FOR SHARE
              )
            RETURNING id, comment_id, author_id, type, created_at, updated_at
            ",
        )
        .bind(comment_id.into_inner())
        .bind(author_id.into_inner())
        .bind(from.as_str())
        .bind(to.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(Reaction::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn delete_if(
        &self,
        comment_id: EntityId,
        author_id: EntityId,
        kind: ReactionType,
    ) -> RepoResult<bool> {
        let result = sqlx::query(
            r"
            DELETE FROM reactions
            WHERE comment_id = $1 AND author_id = $2 AND type = $3
            ",
        )
        .bind(comment_id.into_inner())
        .bind(author_id.into_inner())
        .bind(kind.as_str())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }
}
