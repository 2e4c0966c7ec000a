//! Actor context - who is performing an action

use crate::entities::{Role, User};
use crate::value_objects::EntityId;

/// Identity and role of the caller, resolved once per request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActorContext {
    pub id: EntityId,
    pub role: Role,
}

impl ActorContext {
    #[inline]
    pub const fn new(id: EntityId, role: Role) -> Self {
        Self { id, role }
    }

    #[inline]
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

impl From<&User> for ActorContext {
    fn from(user: &User) -> Self {
        Self::new(user.id, user.role)
    }
}
