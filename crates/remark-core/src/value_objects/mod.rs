//! Value objects - immutable types that represent domain concepts

mod actor;
mod entity_id;

pub use actor::ActorContext;
pub use entity_id::{EntityId, EntityIdParseError};
