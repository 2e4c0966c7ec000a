//! PostgreSQL implementation of CommentRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use remark_core::entities::{Comment, CommentStatus};
use remark_core::traits::{CommentRepository, RepoResult};
use remark_core::value_objects::EntityId;

use crate::models::CommentModel;

use super::error::map_db_error;

/// PostgreSQL implementation of CommentRepository
#[derive(Clone)]
pub struct PgCommentRepository {
    pool: PgPool,
}

impl PgCommentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CommentRepository for PgCommentRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: EntityId) -> RepoResult<Option<Comment>> {
        let result = sqlx::query_as::<_, CommentModel>(
            r"
            SELECT id, author_id, content, status, created_at, updated_at
            FROM comments
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(Comment::try_from).transpose()
    }

    #[instrument(skip(self, content))]
    async fn create(&self, author_id: EntityId, content: &str) -> RepoResult<Comment> {
        let row = sqlx::query_as::<_, CommentModel>(
            r"
            INSERT INTO comments (author_id, content, status)
            VALUES ($1, $2, 'ACTIVE')
            RETURNING id, author_id, content, status, created_at, updated_at
            ",
        )
        .bind(author_id.into_inner())
        .bind(content)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Comment::try_from(row)
    }

    #[instrument(skip(self))]
    async fn update_status(
        &self,
        id: EntityId,
        status: CommentStatus,
    ) -> RepoResult<Option<Comment>> {
        let result = sqlx::query_as::<_, CommentModel>(
            r"
            UPDATE comments
            SET status = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING id, author_id, content, status, created_at, updated_at
            ",
        )
        .bind(id.into_inner())
        .bind(status.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(Comment::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: EntityId) -> RepoResult<bool> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        sqlx::query("DELETE FROM reactions WHERE comment_id = $1")
            .bind(id.into_inner())
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;

        let result = sqlx::query("DELETE FROM comments WHERE id = $1")
            .bind(id.into_inner())
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;

        tx.commit().await.map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }
}
