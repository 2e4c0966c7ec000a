//! Repository ports

mod repositories;

pub use repositories::{CommentRepository, ReactionRepository, RepoResult, UserRepository};
