//! Reaction toggle automaton
//!
//! A user's reaction to a comment is in one of three states. Asking for the
//! kind already held clears it, asking for the other kind flips the existing
//! row in place, and asking from `None` inserts one row.
//!
//! | current  | requested | next     | outcome |
//! |----------|-----------|----------|---------|
//! | None     | LIKE      | Liked    | created |
//! | None     | DISLIKE   | Disliked | created |
//! | Liked    | LIKE      | None     | removed |
//! | Liked    | DISLIKE   | Disliked | updated |
//! | Disliked | DISLIKE   | None     | removed |
//! | Disliked | LIKE      | Liked    | updated |

use crate::entities::ReactionType;

/// Logical state of one `(comment, author)` pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReactionState {
    #[default]
    None,
    Liked,
    Disliked,
}

impl ReactionState {
    #[must_use]
    pub fn kind(self) -> Option<ReactionType> {
        match self {
            Self::None => None,
            Self::Liked => Some(ReactionType::Like),
            Self::Disliked => Some(ReactionType::Dislike),
        }
    }
}

impl From<Option<ReactionType>> for ReactionState {
    fn from(kind: Option<ReactionType>) -> Self {
        match kind {
            None => Self::None,
            Some(ReactionType::Like) => Self::Liked,
            Some(ReactionType::Dislike) => Self::Disliked,
        }
    }
}

/// Store write needed to reach the next state
///
/// Each variant names the state it expects to find so the store can apply it
/// conditionally.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TogglePlan {
    /// No row yet; insert one of `kind`
    Insert(ReactionType),
    /// Row of `from` exists; change its kind to `to`
    Flip { from: ReactionType, to: ReactionType },
    /// Row of `kind` exists; delete it
    Remove(ReactionType),
}

impl TogglePlan {
    #[must_use]
    pub fn outcome(self) -> ToggleOutcome {
        match self {
            Self::Insert(_) => ToggleOutcome::Created,
            Self::Flip { .. } => ToggleOutcome::Updated,
            Self::Remove(_) => ToggleOutcome::Removed,
        }
    }

    /// State after the write lands
    #[must_use]
    pub fn next_state(self) -> ReactionState {
        match self {
            Self::Insert(kind) | Self::Flip { to: kind, .. } => Some(kind).into(),
            Self::Remove(_) => ReactionState::None,
        }
    }
}

/// What a toggle did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    Created,
    Updated,
    Removed,
}

/// Pick the write that moves `current` to the next state for `requested`
#[must_use]
pub fn plan_toggle(current: ReactionState, requested: ReactionType) -> TogglePlan {
    match current.kind() {
        None => TogglePlan::Insert(requested),
        Some(held) if held == requested => TogglePlan::Remove(held),
        Some(held) => TogglePlan::Flip {
            from: held,
            to: requested,
        },
    }
}
