//! Access and state-transition rules
//!
//! Both modules are pure: no I/O, no clocks, no store handles. Services call
//! them between loading a record and writing it back.

pub mod gate;
pub mod toggle;

pub use gate::{AuthorizationGate, Decision, Requirement, DENY_REASON};
pub use toggle::{plan_toggle, ReactionState, ToggleOutcome, TogglePlan};
