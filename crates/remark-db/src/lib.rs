//! # remark-db
//!
//! Storage layer implementing the repository traits from `remark-core`.
//!
//! ## Overview
//!
//! - PostgreSQL via SQLx: connection pool, schema bootstrap, `FromRow`
//!   models, model -> entity mappers and the `Pg*Repository` types
//! - [`InMemoryStore`]: a process-local store implementing all three traits
//!   with the same uniqueness and cascade rules, for tests and local runs
//!
//! ## Usage
//!
//! ```rust,ignore
//! use remark_db::{create_pool, run_migrations, DatabaseConfig, PgUserRepository};
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let pool = create_pool(&DatabaseConfig::new("postgres://localhost/remark", 10, 1)).await?;
//!     run_migrations(&pool).await?;
//!     let users = PgUserRepository::new(pool);
//!     Ok(())
//! }
//! ```

pub mod mappers;
pub mod memory;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use memory::InMemoryStore;
pub use pool::{create_pool, ping, run_migrations, DatabaseConfig, PgPool};
pub use repositories::{PgCommentRepository, PgReactionRepository, PgUserRepository};
