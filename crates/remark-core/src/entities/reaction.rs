//! Reaction entity - one user's like or dislike on one comment

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::value_objects::EntityId;

/// Kind of reaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ReactionType {
    Like,
    Dislike,
}

impl ReactionType {
    #[inline]
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Like => "LIKE",
            Self::Dislike => "DISLIKE",
        }
    }

    /// The other kind
    #[inline]
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::Like => Self::Dislike,
            Self::Dislike => Self::Like,
        }
    }
}

impl fmt::Display for ReactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReactionType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "LIKE" => Ok(Self::Like),
            "DISLIKE" => Ok(Self::Dislike),
            _ => Err(DomainError::InvalidReactionType),
        }
    }
}

/// Reaction entity
///
/// At most one exists per `(comment_id, author_id)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reaction {
    pub id: EntityId,
    pub comment_id: EntityId,
    pub author_id: EntityId,
    pub kind: ReactionType,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Author fields shown next to a reaction in listings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReactionAuthor {
    pub id: EntityId,
    pub login: String,
    pub full_name: String,
}

/// Reaction joined with its author
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReactionWithAuthor {
    pub reaction: Reaction,
    pub author: ReactionAuthor,
}

/// Like/dislike totals for one comment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReactionCounts {
    pub likes: i64,
    pub dislikes: i64,
}

impl ReactionCounts {
    /// Tally a slice of reactions
    pub fn tally<'a>(reactions: impl IntoIterator<Item = &'a Reaction>) -> Self {
        reactions
            .into_iter()
            .fold(Self::default(), |mut acc, r| {
                match r.kind {
                    ReactionType::Like => acc.likes += 1,
                    ReactionType::Dislike => acc.dislikes += 1,
                }
                acc
            })
    }
}
