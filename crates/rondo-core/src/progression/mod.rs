//! World progression state
//!
//! Durable milestone flags plus the one-time first-kill transition that
//! decides which reward path a death event takes.

pub mod flags;
pub mod transition;

pub use flags::{FlagId, ProgressionFlags};
pub use transition::{observe_kill, peek, TransitionState};
