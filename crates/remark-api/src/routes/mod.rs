//! Route definitions
//!
//! Resource routes sit at the root; health routes are exported separately so
//! they stay outside the rate limiter.

use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers::{auth, comments, health, reactions, users};
use crate::state::AppState;

/// Create the main API router with all resource routes
pub fn create_router() -> Router<AppState> {
    Router::new()
        .merge(auth_routes())
        .merge(user_routes())
        .merge(comment_routes())
}

/// Health check routes (exported separately to bypass rate limiting)
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

/// Authentication routes
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/auth/refresh", post(auth::refresh_token))
}

/// User routes
fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(users::list_users).post(users::create_user))
        .route(
            "/users/:id",
            get(users::get_user)
                .patch(users::update_user)
                .delete(users::delete_user),
        )
}

/// Comment and reaction routes
fn comment_routes() -> Router<AppState> {
    Router::new()
        .route("/comments", post(comments::create_comment))
        .route(
            "/comments/:id",
            get(comments::get_comment)
                .patch(comments::update_comment_status)
                .delete(comments::delete_comment),
        )
        .route(
            "/comments/:id/likes",
            post(reactions::set_reaction)
                .get(reactions::list_reactions)
                .delete(reactions::remove_reaction),
        )
}
