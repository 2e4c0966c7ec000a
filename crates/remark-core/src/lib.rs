//! # remark-core
//!
//! Domain layer containing entities, value objects, the access and toggle
//! policies, and repository traits.
//! This crate has zero dependencies on infrastructure (database, web framework, etc.).

pub mod entities;
pub mod error;
pub mod policy;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{
    Comment, CommentStatus, NewUser, Reaction, ReactionAuthor, ReactionCounts, ReactionType,
    ReactionWithAuthor, Role, User, MAX_COMMENT_LENGTH,
};
pub use error::DomainError;
pub use policy::{
    plan_toggle, AuthorizationGate, Decision, ReactionState, Requirement, ToggleOutcome,
    TogglePlan,
};
pub use traits::{CommentRepository, ReactionRepository, RepoResult, UserRepository};
pub use value_objects::{ActorContext, EntityId, EntityIdParseError};
