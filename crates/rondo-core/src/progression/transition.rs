//! First-kill transition state machine
//!
//! Each milestone encounter moves through `NeverDefeated ->
//! JustTransitioned -> SteadyState` exactly once per world.
//! `JustTransitioned` is reported to exactly one death event, ever: the
//! check-and-set is the registry's own [`ProgressionFlags::set`], a single
//! step behind the `&mut` borrow, so a "losing" simultaneous report simply
//! observes `SteadyState`.

use serde::{Deserialize, Serialize};
use strum::Display;
use tracing::info;

use crate::encounter::EncounterKind;
use crate::progression::ProgressionFlags;

/// Where an encounter kind stands in its first-kill lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub enum TransitionState {
    /// The encounter has never been defeated in this world
    NeverDefeated,
    /// This very event is the first defeat; observed once, ever
    JustTransitioned,
    /// Defeated before; every later death lands here
    SteadyState,
}

/// Record a death of `kind` and report its transition outcome.
///
/// The first kill of a milestone raises its progression flag and reports
/// `JustTransitioned`; every later kill reports `SteadyState`. Encounter
/// kinds with no progression flag are permanently in steady state.
pub fn observe_kill(flags: &mut ProgressionFlags, kind: EncounterKind) -> TransitionState {
    let Some(flag) = kind.progress_flag() else {
        return TransitionState::SteadyState;
    };
    if flags.set(flag) {
        info!(encounter = %kind, "first defeat of milestone encounter");
        TransitionState::JustTransitioned
    } else {
        TransitionState::SteadyState
    }
}

/// Read-only view of an encounter's transition state.
///
/// Never reports `JustTransitioned`; that outcome belongs only to the
/// death event that caused it.
pub fn peek(flags: &ProgressionFlags, kind: EncounterKind) -> TransitionState {
    match kind.progress_flag() {
        None => TransitionState::SteadyState,
        Some(flag) if flags.get(flag) => TransitionState::SteadyState,
        Some(_) => TransitionState::NeverDefeated,
    }
}
