//! Encounter identities and the per-kill event context
//!
//! Defines WHICH entity died and under what circumstances. A `KillEvent` is
//! built by the combat collaborator at the moment of death and consumed
//! synchronously by the progression core; it is never persisted.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use crate::progression::FlagId;

/// A defeatable encounter kind
///
/// The three symphonic movements are milestone encounters: defeating one
/// permanently raises a progression flag. Common encounters carry no flag
/// and are rewarded purely through their drop rules.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter,
)]
pub enum EncounterKind {
    /// Eroica, the Heroic Movement
    Eroica,
    /// Pastorale, the Verdant Movement
    Pastorale,
    /// Tempest, the Raging Movement
    Tempest,
    /// Dissonant stray, a common enemy
    Dissonant,
}

impl EncounterKind {
    /// The progression flag raised when this encounter first falls.
    ///
    /// Common encounters have no flag and are permanently in steady state.
    pub const fn progress_flag(&self) -> Option<FlagId> {
        match self {
            EncounterKind::Eroica => Some(FlagId::EroicaDefeated),
            EncounterKind::Pastorale => Some(FlagId::PastoraleDefeated),
            EncounterKind::Tempest => Some(FlagId::TempestDefeated),
            EncounterKind::Dissonant => None,
        }
    }

    /// Whether defeating this encounter is a permanent world milestone
    pub const fn is_milestone(&self) -> bool {
        self.progress_flag().is_some()
    }

    /// Display title used in reward tooltips and log lines
    pub const fn title(&self) -> &'static str {
        match self {
            EncounterKind::Eroica => "Eroica, the Heroic Movement",
            EncounterKind::Pastorale => "Pastorale, the Verdant Movement",
            EncounterKind::Tempest => "Tempest, the Raging Movement",
            EncounterKind::Dissonant => "a Dissonant stray",
        }
    }
}

/// World difficulty mode in effect when a kill happens
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
)]
pub enum GameMode {
    /// Standard difficulty: steady-state rewards spawn directly in the world
    #[default]
    Standard,
    /// Elevated difficulty: steady-state rewards route through the spoils
    /// cache instead of spawning directly
    Elevated,
}

impl GameMode {
    pub const fn is_elevated(&self) -> bool {
        matches!(self, GameMode::Elevated)
    }
}

/// Which role this game instance plays in a session
///
/// Only the authoritative instance (standalone or server) may decide kills
/// and mutate progression flags; clients are read-only observers that learn
/// of spawns through the sync channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display)]
pub enum NetRole {
    /// Single instance, no cooperating participants
    #[default]
    Standalone,
    /// Authoritative host of a cooperative session
    Server,
    /// Cooperating participant; never decides kills
    Client,
}

impl NetRole {
    /// Whether this instance is the single authoritative decision point
    pub const fn is_authoritative(&self) -> bool {
        matches!(self, NetRole::Standalone | NetRole::Server)
    }

    /// Whether spawns decided here must be synchronized to other participants
    pub const fn needs_sync(&self) -> bool {
        matches!(self, NetRole::Server)
    }
}

/// World position where rewards are placed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Pos {
    pub x: i32,
    pub y: i32,
}

impl Pos {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Identifies a cooperating participant (player slot)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ParticipantId(pub u8);

/// Per-death event context
///
/// Ephemeral: created when an encounter entity dies, consumed by
/// `WorldState::on_kill`, discarded after dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KillEvent {
    /// Which encounter kind died
    pub encounter: EncounterKind,
    /// Difficulty mode in effect for this death
    pub mode: GameMode,
    /// Where the dying entity stood; rewards spawn here
    pub pos: Pos,
    /// Participant credited with the kill
    pub slayer: ParticipantId,
}

impl KillEvent {
    pub fn new(encounter: EncounterKind, mode: GameMode, pos: Pos, slayer: ParticipantId) -> Self {
        Self {
            encounter,
            mode,
            pos,
            slayer,
        }
    }
}
