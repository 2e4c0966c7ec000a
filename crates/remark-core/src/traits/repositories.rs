//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation. Implementations must be safe to share across
//! request tasks; they hold no per-request state.

use async_trait::async_trait;

use crate::entities::{
    Comment, CommentStatus, NewUser, Reaction, ReactionType, ReactionWithAuthor, Role, User,
};
use crate::error::DomainError;
use crate::value_objects::EntityId;

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// User Repository
// ============================================================================

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: EntityId) -> RepoResult<Option<User>>;

    /// Find user by email
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>>;

    /// All users, oldest first
    async fn find_all(&self) -> RepoResult<Vec<User>>;

    /// Check if email is already taken
    async fn email_exists(&self, email: &str) -> RepoResult<bool>;

    /// Insert a user and return it with its assigned id
    ///
    /// Fails with `EmailAlreadyExists` if another account holds the email.
    async fn create(&self, user: &NewUser) -> RepoResult<User>;

    /// Change a user's role; `None` if the user does not exist
    async fn update_role(&self, id: EntityId, role: Role) -> RepoResult<Option<User>>;

    /// Delete a user together with their comments and every reaction that
    /// references either the user or one of those comments
    ///
    /// Returns `false` if the user did not exist.
    async fn delete_cascade(&self, id: EntityId) -> RepoResult<bool>;

    /// Get password hash for authentication
    async fn get_password_hash(&self, id: EntityId) -> RepoResult<Option<String>>;
}

// ============================================================================
// Comment Repository
// ============================================================================

#[async_trait]
pub trait CommentRepository: Send + Sync {
    /// Find comment by ID
    async fn find_by_id(&self, id: EntityId) -> RepoResult<Option<Comment>>;

    /// Insert an `ACTIVE` comment
    async fn create(&self, author_id: EntityId, content: &str) -> RepoResult<Comment>;

    /// Persist a new status; `None` if the comment does not exist
    async fn update_status(
        &self,
        id: EntityId,
        status: CommentStatus,
    ) -> RepoResult<Option<Comment>>;

    /// Delete a comment and its reactions; `false` if it did not exist
    async fn delete(&self, id: EntityId) -> RepoResult<bool>;
}

// ============================================================================
// Reaction Repository
// ============================================================================

/// Reaction storage keyed by the unique `(comment_id, author_id)` pair
///
/// The three writes are conditional on the pair's current state and apply
/// atomically. A write whose condition no longer holds changes nothing and
/// reports it (`None` / `false`), which callers treat as a lost race.
///
/// Inserts and flips only land on an ACTIVE comment. A store may refuse one
/// with `DomainError::InactiveComment` or report it as `None`; callers re-read
/// the comment to tell that apart from a lost race.
#[async_trait]
pub trait ReactionRepository: Send + Sync {
    /// Current reaction of `author_id` on `comment_id`
    async fn find_for_author(
        &self,
        comment_id: EntityId,
        author_id: EntityId,
    ) -> RepoResult<Option<Reaction>>;

    /// All reactions on a comment joined with their authors, oldest first
    async fn find_by_comment(&self, comment_id: EntityId) -> RepoResult<Vec<ReactionWithAuthor>>;

    /// Insert a reaction unless the pair already has one or the comment is
    /// not ACTIVE
    async fn insert_if_absent(
        &self,
        comment_id: EntityId,
        author_id: EntityId,
        kind: ReactionType,
    ) -> RepoResult<Option<Reaction>>;

    /// Change the kind from `from` to `to`, only if the row still holds `from`
    /// and the comment is ACTIVE
    async fn update_kind_if(
        &self,
        comment_id: EntityId,
        author_id: EntityId,
        from: ReactionType,
        to: ReactionType,
    ) -> RepoResult<Option<Reaction>>;

    /// Delete the pair's reaction, only if it holds `kind`
    async fn delete_if(
        &self,
        comment_id: EntityId,
        author_id: EntityId,
        kind: ReactionType,
    ) -> RepoResult<bool>;
}
