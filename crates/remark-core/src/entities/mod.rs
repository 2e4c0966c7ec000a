//! Domain entities - core business objects

mod comment;
mod reaction;
mod user;

pub use comment::{Comment, CommentStatus, MAX_COMMENT_LENGTH};
pub use reaction::{
    Reaction, ReactionAuthor, ReactionCounts, ReactionType, ReactionWithAuthor,
};
pub use user::{NewUser, Role, User};
