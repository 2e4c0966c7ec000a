//! Server setup and initialization
//!
//! Provides the main application builder and server runner.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use remark_common::{AppConfig, AppError, JwtService};
use remark_db::{create_pool, run_migrations, DatabaseConfig, InMemoryStore};
use remark_service::{AuthService, ServiceContext};
use tokio::net::TcpListener;
use tracing::info;

use crate::middleware::{apply_middleware, apply_rate_limit};
use crate::routes::{create_router, health_routes};
use crate::state::AppState;

/// Build the complete Axum application with all routes and middleware
///
/// Health routes bypass the rate limiter.
pub fn create_app(state: AppState) -> Router {
    let config = state.config();

    let api = apply_rate_limit(create_router(), &config.rate_limit);
    let router = api.merge(health_routes());
    let router = apply_middleware(router, &config.cors, config.app.env.is_production());

    router.with_state(state)
}

fn jwt_service(config: &AppConfig) -> Arc<JwtService> {
    Arc::new(JwtService::new(
        &config.jwt.secret,
        config.jwt.access_token_expiry,
        config.jwt.refresh_token_expiry,
    ))
}

/// Initialize all dependencies and create AppState
pub async fn create_app_state(config: AppConfig) -> Result<AppState, AppError> {
    info!("Connecting to PostgreSQL...");
    let db_config = DatabaseConfig::new(
        config.database.url.clone(),
        config.database.max_connections,
        config.database.min_connections,
    );
    let pool = create_pool(&db_config)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    info!("PostgreSQL connection established");

    run_migrations(&pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

    let service_context = ServiceContext::postgres(pool, jwt_service(&config));

    Ok(AppState::new(service_context, config))
}

/// Create AppState over an in-memory store
///
/// Nothing outlives the process; used by tests and local experiments.
pub fn create_app_state_with_store(config: AppConfig, store: Arc<InMemoryStore>) -> AppState {
    let service_context = ServiceContext::in_memory(store, jwt_service(&config));
    AppState::new(service_context, config)
}

/// Create the configured admin account if it does not exist yet
pub async fn bootstrap(state: &AppState) -> Result<(), AppError> {
    let Some(admin) = &state.config().bootstrap_admin else {
        return Ok(());
    };

    AuthService::new(state.service_context())
        .ensure_bootstrap_admin(admin)
        .await?;

    Ok(())
}

/// Run the HTTP server
pub async fn run_server(app: Router, addr: SocketAddr) -> Result<(), AppError> {
    info!("Starting HTTP server on {}", addr);

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind to {}: {}", addr, e)))?;

    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| AppError::Config(format!("Server error: {}", e)))?;

    Ok(())
}

/// Run the complete server with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let addr: SocketAddr = config
        .api
        .address()
        .parse()
        .map_err(|e| AppError::Config(format!("Invalid listen address: {e}")))?;

    let state = create_app_state(config).await?;
    bootstrap(&state).await?;

    let app = create_app(state);

    run_server(app, addr).await
}
