//! Model -> entity conversions
//!
//! Enum columns are stored as text; a value outside the CHECK constraint
//! surfaces as a database error rather than a panic.

mod comment;
mod reaction;
mod user;

use remark_core::DomainError;

fn corrupt(column: &str, value: &str) -> DomainError {
    DomainError::DatabaseError(format!("unexpected {column} value in store: {value:?}"))
}
