//! In-memory implementation of the repository traits
//!
//! All three tables live behind one `RwLock`, so every write (including a
//! cascading delete) is applied atomically with respect to other callers.
//! The store enforces the same rules as the PostgreSQL schema: unique
//! emails, one reaction per `(comment_id, author_id)`, and cascades from
//! users and comments down to reactions. State is lost on drop.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use remark_core::entities::{
    Comment, CommentStatus, NewUser, Reaction, ReactionAuthor, ReactionType, ReactionWithAuthor,
    Role, User,
};
use remark_core::error::DomainError;
use remark_core::traits::{CommentRepository, ReactionRepository, RepoResult, UserRepository};
use remark_core::value_objects::EntityId;

#[derive(Debug, Default)]
struct Tables {
    users: BTreeMap<EntityId, (User, String)>,
    comments: BTreeMap<EntityId, Comment>,
    reactions: BTreeMap<EntityId, Reaction>,
    next_id: i64,
}

impl Tables {
    fn next_id(&mut self) -> EntityId {
        self.next_id += 1;
        EntityId::new(self.next_id)
    }

    fn reaction_for(&self, comment_id: EntityId, author_id: EntityId) -> Option<&Reaction> {
        self.reactions
            .values()
            .find(|r| r.comment_id == comment_id && r.author_id == author_id)
    }
}

/// Process-local store for tests and database-less runs
#[derive(Debug, Default)]
pub struct InMemoryStore {
    tables: RwLock<Tables>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of reaction rows held for a pair; never more than one
    pub async fn reaction_rows(&self, comment_id: EntityId, author_id: EntityId) -> usize {
        let tables = self.tables.read().await;
        tables
            .reactions
            .values()
            .filter(|r| r.comment_id == comment_id && r.author_id == author_id)
            .count()
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn find_by_id(&self, id: EntityId) -> RepoResult<Option<User>> {
        let tables = self.tables.read().await;
        Ok(tables.users.get(&id).map(|(user, _)| user.clone()))
    }

    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        let tables = self.tables.read().await;
        Ok(tables
            .users
            .values()
            .find(|(user, _)| user.email == email)
            .map(|(user, _)| user.clone()))
    }

    async fn find_all(&self) -> RepoResult<Vec<User>> {
        let tables = self.tables.read().await;
        Ok(tables.users.values().map(|(user, _)| user.clone()).collect())
    }

    async fn email_exists(&self, email: &str) -> RepoResult<bool> {
        let tables = self.tables.read().await;
        Ok(tables.users.values().any(|(user, _)| user.email == email))
    }

    async fn create(&self, new_user: &NewUser) -> RepoResult<User> {
        let mut tables = self.tables.write().await;
        if tables.users.values().any(|(u, _)| u.email == new_user.email) {
            return Err(DomainError::EmailAlreadyExists);
        }

        let now = Utc::now();
        let user = User {
            id: tables.next_id(),
            login: new_user.login.clone(),
            full_name: new_user.full_name.clone(),
            email: new_user.email.clone(),
            role: new_user.role,
            created_at: now,
            updated_at: now,
        };
        tables
            .users
            .insert(user.id, (user.clone(), new_user.password_hash.clone()));
        Ok(user)
    }

    async fn update_role(&self, id: EntityId, role: Role) -> RepoResult<Option<User>> {
        let mut tables = self.tables.write().await;
        Ok(tables.users.get_mut(&id).map(|(user, _)| {
            user.role = role;
            user.updated_at = Utc::now();
            user.clone()
        }))
    }

    async fn delete_cascade(&self, id: EntityId) -> RepoResult<bool> {
        let mut tables = self.tables.write().await;
        if tables.users.remove(&id).is_none() {
            return Ok(false);
        }

        let owned: Vec<EntityId> = tables
            .comments
            .values()
            .filter(|c| c.author_id == id)
            .map(|c| c.id)
            .collect();

        tables
            .reactions
            .retain(|_, r| r.author_id != id && !owned.contains(&r.comment_id));
        tables.comments.retain(|_, c| c.author_id != id);
        Ok(true)
    }

    async fn get_password_hash(&self, id: EntityId) -> RepoResult<Option<String>> {
        let tables = self.tables.read().await;
        Ok(tables.users.get(&id).map(|(_, hash)| hash.clone()))
    }
}

#[async_trait]
impl CommentRepository for InMemoryStore {
    async fn find_by_id(&self, id: EntityId) -> RepoResult<Option<Comment>> {
        let tables = self.tables.read().await;
        Ok(tables.comments.get(&id).cloned())
    }

    async fn create(&self, author_id: EntityId, content: &str) -> RepoResult<Comment> {
        let mut tables = self.tables.write().await;
        if !tables.users.contains_key(&author_id) {
            return Err(DomainError::UserNotFound);
        }

        let now = Utc::now();
        let comment = Comment {
            id: tables.next_id(),
            author_id,
            content: content.to_string(),
            status: CommentStatus::Active,
            created_at: now,
            updated_at: now,
        };
        tables.comments.insert(comment.id, comment.clone());
        Ok(comment)
    }

    async fn update_status(
        &self,
        id: EntityId,
        status: CommentStatus,
    ) -> RepoResult<Option<Comment>> {
        let mut tables = self.tables.write().await;
        Ok(tables.comments.get_mut(&id).map(|comment| {
            comment.status = status;
            comment.updated_at = Utc::now();
            comment.clone()
        }))
    }

    async fn delete(&self, id: EntityId) -> RepoResult<bool> {
        let mut tables = self.tables.write().await;
        if tables.comments.remove(&id).is_none() {
            return Ok(false);
        }
        tables.reactions.retain(|_, r| r.comment_id != id);
        Ok(true)
    }
}

#[async_trait]
impl ReactionRepository for InMemoryStore {
    async fn find_for_author(
        &self,
        comment_id: EntityId,
        author_id: EntityId,
    ) -> RepoResult<Option<Reaction>> {
        let tables = self.tables.read().await;
        Ok(tables.reaction_for(comment_id, author_id).cloned())
    }

    async fn find_by_comment(&self, comment_id: EntityId) -> RepoResult<Vec<ReactionWithAuthor>> {
        let tables = self.tables.read().await;
        Ok(tables
            .reactions
            .values()
            .filter(|r| r.comment_id == comment_id)
            .filter_map(|r| {
                tables.users.get(&r.author_id).map(|(user, _)| ReactionWithAuthor {
                    reaction: r.clone(),
                    author: ReactionAuthor {
                        id: user.id,
                        login: user.login.clone(),
                        full_name: user.full_name.clone(),
                    },
                })
            })
            .collect())
    }

    async fn insert_if_absent(
        &self,
        comment_id: EntityId,
        author_id: EntityId,
        kind: ReactionType,
    ) -> RepoResult<Option<Reaction>> {
        let mut tables = self.tables.write().await;
        match tables.comments.get(&comment_id) {
            None => return Err(DomainError::CommentNotFound),
            Some(comment) if !comment.is_active() => return Err(DomainError::InactiveComment),
            Some(_) => {}
        }
        if !tables.users.contains_key(&author_id) {
            return Err(DomainError::UserNotFound);
        }
        if tables.reaction_for(comment_id, author_id).is_some() {
            return Ok(None);
        }

        let now = Utc::now();
        let reaction = Reaction {
            id: tables.next_id(),
            comment_id,
            author_id,
            kind,
            created_at: now,
            updated_at: now,
        };
        tables.reactions.insert(reaction.id, reaction.clone());
        Ok(Some(reaction))
    }

    async fn update_kind_if(
        &self,
        comment_id: EntityId,
        author_id: EntityId,
        from: ReactionType,
        to: ReactionType,
    ) -> RepoResult<Option<Reaction>> {
        let mut tables = self.tables.write().await;
        if tables
            .comments
            .get(&comment_id)
            .is_some_and(|comment| !comment.is_active())
        {
            return Err(DomainError::InactiveComment);
        }
        Ok(tables
            .reactions
            .values_mut()
            .find(|r| r.comment_id == comment_id && r.author_id == author_id && r.kind == from)
            .map(|r| {
                r.kind = to;
                r.updated_at = Utc::now();
                r.clone()
            }))
    }

    async fn delete_if(
        &self,
        comment_id: EntityId,
        author_id: EntityId,
        kind: ReactionType,
    ) -> RepoResult<bool> {
        let mut tables = self.tables.write().await;
        let target = tables
            .reactions
            .values()
            .find(|r| r.comment_id == comment_id && r.author_id == author_id && r.kind == kind)
            .map(|r| r.id);

        Ok(match target {
            Some(id) => tables.reactions.remove(&id).is_some(),
            None => false,
        })
    }
}
