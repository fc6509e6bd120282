//! Per-participant claim ledger
//!
//! Tracks which participants have already received a one-time milestone
//! keepsake, so the grant is exactly once per participant per encounter
//! kind. The real ledger lives with the participant's inventory state
//! outside this core; [`MemoryLedger`] is the shipped in-process form.

use hashbrown::HashSet;
use serde::{Deserialize, Serialize};

use crate::encounter::{EncounterKind, ParticipantId};

/// Externally-owned record of one-time reward claims
pub trait ParticipantLedger {
    /// Whether `who` has already claimed the keepsake for `encounter`.
    fn has_claimed(&self, who: ParticipantId, encounter: EncounterKind) -> bool;

    /// Record the claim; returns true if it was newly recorded. Check
    /// and record are one call so a grant can never double-fire.
    fn try_claim(&mut self, who: ParticipantId, encounter: EncounterKind) -> bool;
}

/// In-process ledger backed by a claim set
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MemoryLedger {
    claims: HashSet<(ParticipantId, EncounterKind)>,
}

impl MemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ParticipantLedger for MemoryLedger {
    fn has_claimed(&self, who: ParticipantId, encounter: EncounterKind) -> bool {
        self.claims.contains(&(who, encounter))
    }

    fn try_claim(&mut self, who: ParticipantId, encounter: EncounterKind) -> bool {
        self.claims.insert((who, encounter))
    }
}
