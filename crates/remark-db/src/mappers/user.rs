//! User model -> entity mapper

use remark_core::entities::{Role, User};
use remark_core::{DomainError, EntityId};

use crate::models::UserModel;

impl TryFrom<UserModel> for User {
    type Error = DomainError;

    fn try_from(model: UserModel) -> Result<Self, Self::Error> {
        let role: Role = model
            .role
            .parse()
            .map_err(|_| super::corrupt("role", &model.role))?;

        Ok(User {
            id: EntityId::new(model.id),
            login: model.login,
            full_name: model.full_name,
            email: model.email,
            role,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}
