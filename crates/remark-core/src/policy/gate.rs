//! Authorization gate
//!
//! One rule guards every mutation on an owned resource or an admin-only
//! action. An actor passes if any of the following holds:
//!
//! * its role is in the requirement's allowed roles,
//! * the resource has an owner and the actor is an admin,
//! * the actor is the resource's owner.

use crate::entities::Role;
use crate::error::DomainError;
use crate::value_objects::{ActorContext, EntityId};

/// Reason attached to every denial
pub const DENY_REASON: &str = "not owner and not authorized role";

/// What a resource demands of the actor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Requirement<'a> {
    pub owner_id: Option<EntityId>,
    pub allowed_roles: &'a [Role],
}

impl Requirement<'static> {
    /// Resource owned by `owner_id`; its owner or an admin may act
    #[must_use]
    pub const fn owned_by(owner_id: EntityId) -> Self {
        Self {
            owner_id: Some(owner_id),
            allowed_roles: &[Role::Admin],
        }
    }

    /// Action with no owner, open only to admins
    #[must_use]
    pub const fn admin_only() -> Self {
        Self {
            owner_id: None,
            allowed_roles: &[Role::Admin],
        }
    }
}

impl<'a> Requirement<'a> {
    /// Role-only requirement
    #[must_use]
    pub const fn roles(allowed_roles: &'a [Role]) -> Self {
        Self {
            owner_id: None,
            allowed_roles,
        }
    }
}

/// Gate verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Deny(&'static str),
}

impl Decision {
    #[inline]
    pub fn is_allowed(self) -> bool {
        matches!(self, Self::Allow)
    }
}

/// Stateless decision function
#[derive(Debug, Clone, Copy, Default)]
pub struct AuthorizationGate;

impl AuthorizationGate {
    #[must_use]
    pub fn decide(actor: &ActorContext, requirement: &Requirement<'_>) -> Decision {
        if requirement.allowed_roles.contains(&actor.role) {
            return Decision::Allow;
        }

        match requirement.owner_id {
            Some(_) if actor.is_admin() => Decision::Allow,
            Some(owner) if owner == actor.id => Decision::Allow,
            _ => Decision::Deny(DENY_REASON),
        }
    }

    /// Decide and turn a denial into `Forbidden` carrying `message`
    ///
    /// `message` is what the caller sees; the gate's own reason stays internal.
    pub fn require(
        actor: &ActorContext,
        requirement: &Requirement<'_>,
        message: &str,
    ) -> Result<(), DomainError> {
        match Self::decide(actor, requirement) {
            Decision::Allow => Ok(()),
            Decision::Deny(_) => Err(DomainError::Forbidden(message.to_string())),
        }
    }
}
