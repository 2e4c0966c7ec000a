//! Shared fixtures for service tests

use std::sync::Arc;

use remark_common::auth::JwtService;
use remark_core::entities::{Comment, NewUser, Role, User};
use remark_core::traits::{CommentRepository, UserRepository};
use remark_core::ActorContext;
use remark_db::InMemoryStore;

use super::context::ServiceContext;

pub(crate) struct Fixture {
    pub store: Arc<InMemoryStore>,
    pub ctx: ServiceContext,
}

impl Fixture {
    pub fn new() -> Self {
        let store = Arc::new(InMemoryStore::new());
        let ctx = ServiceContext::in_memory(store.clone(), jwt());
        Self { store, ctx }
    }
}

pub(crate) fn jwt() -> Arc<JwtService> {
    Arc::new(JwtService::new("service-test-secret-key-long-enough", 900, 3600))
}

/// Insert a user directly; `login@example.com` is the email
pub(crate) async fn seed_user(store: &Arc<InMemoryStore>, login: &str, role: Role) -> User {
    UserRepository::create(
        store.as_ref(),
        &NewUser {
            login: login.to_string(),
            full_name: format!("{login} tester"),
            email: format!("{login}@example.com"),
            role,
            password_hash: "not-a-real-hash".to_string(),
        },
    )
    .await
    .unwrap()
}

pub(crate) async fn seed_comment(store: &Arc<InMemoryStore>, author: &User) -> Comment {
    CommentRepository::create(store.as_ref(), author.id, "seeded comment")
        .await
        .unwrap()
}

pub(crate) fn actor(user: &User) -> ActorContext {
    ActorContext::from(user)
}
