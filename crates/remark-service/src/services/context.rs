//! Service context - dependency container for services
//!
//! Holds the repositories and the token service. Handed to every service by
//! reference; there is no global store handle anywhere in the crate.

use std::sync::Arc;

use remark_common::auth::JwtService;
use remark_core::traits::{CommentRepository, ReactionRepository, UserRepository};
use remark_db::{InMemoryStore, PgCommentRepository, PgPool, PgReactionRepository, PgUserRepository};

use super::error::{ServiceError, ServiceResult};

/// Service context containing all dependencies
#[derive(Clone)]
pub struct ServiceContext {
    // Set only when backed by PostgreSQL; used for readiness checks
    pool: Option<PgPool>,

    // Repositories
    user_repo: Arc<dyn UserRepository>,
    comment_repo: Arc<dyn CommentRepository>,
    reaction_repo: Arc<dyn ReactionRepository>,

    jwt_service: Arc<JwtService>,
}

impl ServiceContext {
    /// Wire the PostgreSQL repositories over one pool
    pub fn postgres(pool: PgPool, jwt_service: Arc<JwtService>) -> Self {
        Self {
            user_repo: Arc::new(PgUserRepository::new(pool.clone())),
            comment_repo: Arc::new(PgCommentRepository::new(pool.clone())),
            reaction_repo: Arc::new(PgReactionRepository::new(pool.clone())),
            pool: Some(pool),
            jwt_service,
        }
    }

    /// Wire every repository to one shared in-memory store
    pub fn in_memory(store: Arc<InMemoryStore>, jwt_service: Arc<JwtService>) -> Self {
        Self {
            pool: None,
            user_repo: store.clone(),
            comment_repo: store.clone(),
            reaction_repo: store,
            jwt_service,
        }
    }

    // === Database Pool ===

    /// PostgreSQL pool, if the context is database-backed
    pub fn pool(&self) -> Option<&PgPool> {
        self.pool.as_ref()
    }

    // === Repositories ===

    pub fn user_repo(&self) -> &dyn UserRepository {
        self.user_repo.as_ref()
    }

    pub fn comment_repo(&self) -> &dyn CommentRepository {
        self.comment_repo.as_ref()
    }

    pub fn reaction_repo(&self) -> &dyn ReactionRepository {
        self.reaction_repo.as_ref()
    }

    // === Services ===

    pub fn jwt_service(&self) -> &JwtService {
        self.jwt_service.as_ref()
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("pool", &self.pool.as_ref().map(|_| "PgPool"))
            .field("repositories", &"...")
            .finish_non_exhaustive()
    }
}

/// Builder for assembling a ServiceContext from arbitrary repositories
#[derive(Default)]
pub struct ServiceContextBuilder {
    pool: Option<PgPool>,
    user_repo: Option<Arc<dyn UserRepository>>,
    comment_repo: Option<Arc<dyn CommentRepository>>,
    reaction_repo: Option<Arc<dyn ReactionRepository>>,
    jwt_service: Option<Arc<JwtService>>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pool(mut self, pool: PgPool) -> Self {
        self.pool = Some(pool);
        self
    }

    pub fn user_repo(mut self, repo: Arc<dyn UserRepository>) -> Self {
        self.user_repo = Some(repo);
        self
    }

    pub fn comment_repo(mut self, repo: Arc<dyn CommentRepository>) -> Self {
        self.comment_repo = Some(repo);
        self
    }

    pub fn reaction_repo(mut self, repo: Arc<dyn ReactionRepository>) -> Self {
        self.reaction_repo = Some(repo);
        self
    }

    pub fn jwt_service(mut self, service: Arc<JwtService>) -> Self {
        self.jwt_service = Some(service);
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Internal` if a repository or the token service
    /// is missing
    pub fn build(self) -> ServiceResult<ServiceContext> {
        let missing = |what: &str| ServiceError::internal(format!("{what} is required"));

        Ok(ServiceContext {
            pool: self.pool,
            user_repo: self.user_repo.ok_or_else(|| missing("user_repo"))?,
            comment_repo: self.comment_repo.ok_or_else(|| missing("comment_repo"))?,
            reaction_repo: self.reaction_repo.ok_or_else(|| missing("reaction_repo"))?,
            jwt_service: self.jwt_service.ok_or_else(|| missing("jwt_service"))?,
        })
    }
}
