//! Reaction database models

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Row of the reactions table
#[derive(Debug, Clone, FromRow)]
pub struct ReactionModel {
    pub id: i64,
    pub comment_id: i64,
    pub author_id: i64,
    #[sqlx(rename = "type")]
    pub kind: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Reaction joined with the columns of its author
#[derive(Debug, Clone, FromRow)]
pub struct ReactionWithAuthorModel {
    #[sqlx(flatten)]
    pub reaction: ReactionModel,
    pub author_login: String,
    pub author_full_name: String,
}
