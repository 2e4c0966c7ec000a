//! Repository implementations
//!
//! PostgreSQL implementations of the repository traits defined in remark-core.

mod comment;
mod error;
mod reaction;
mod user;

pub use comment::PgCommentRepository;
pub use reaction::PgReactionRepository;
pub use user::PgUserRepository;
