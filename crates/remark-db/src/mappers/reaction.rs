//! Reaction model -> entity mappers

use remark_core::entities::{Reaction, ReactionAuthor, ReactionType, ReactionWithAuthor};
use remark_core::{DomainError, EntityId};

use crate::models::{ReactionModel, ReactionWithAuthorModel};

impl TryFrom<ReactionModel> for Reaction {
    type Error = DomainError;

    fn try_from(model: ReactionModel) -> Result<Self, Self::Error> {
        let kind: ReactionType = model
            .kind
            .parse()
            .map_err(|_| super::corrupt("type", &model.kind))?;

        Ok(Reaction {
            id: EntityId::new(model.id),
            comment_id: EntityId::new(model.comment_id),
            author_id: EntityId::new(model.author_id),
            kind,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}

impl TryFrom<ReactionWithAuthorModel> for ReactionWithAuthor {
    type Error = DomainError;

    fn try_from(model: ReactionWithAuthorModel) -> Result<Self, Self::Error> {
        let reaction = Reaction::try_from(model.reaction)?;
        Ok(ReactionWithAuthor {
            author: ReactionAuthor {
                id: reaction.author_id,
                login: model.author_login,
                full_name: model.author_full_name,
            },
            reaction,
        })
    }
}
