//! Comment model -> entity mapper

use remark_core::entities::{Comment, CommentStatus};
use remark_core::{DomainError, EntityId};

use crate::models::CommentModel;

impl TryFrom<CommentModel> for Comment {
    type Error = DomainError;

    fn try_from(model: CommentModel) -> Result<Self, Self::Error> {
        let status: CommentStatus = model
            .status
            .parse()
            .map_err(|_| super::corrupt("status", &model.status))?;

        Ok(Comment {
            id: EntityId::new(model.id),
            author_id: EntityId::new(model.author_id),
            content: model.content,
            status,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}
