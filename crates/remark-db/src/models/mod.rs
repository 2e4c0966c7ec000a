//! Database models - SQLx row types

mod comment;
mod reaction;
mod user;

pub use comment::CommentModel;
pub use reaction::{ReactionModel, ReactionWithAuthorModel};
pub use user::UserModel;
