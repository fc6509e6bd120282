//! Error taxonomy for the progression core
//!
//! Authoring mistakes in drop tables are fatal at registration; store
//! problems are recoverable (the world loads fail-open with empty flags).

use thiserror::Error;

use crate::encounter::EncounterKind;
use crate::loot::ItemKind;

/// Drop-table authoring errors, detected when a table is registered
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LootError {
    #[error("transition condition references '{encounter}', which has no progression flag")]
    TransitionOnUnflagged { encounter: EncounterKind },

    #[error("reward range for '{item}' is empty: [{min}, {max}]")]
    EmptyRewardRange { item: ItemKind, min: u32, max: u32 },

    #[error("encounter '{encounter}' already has a registered loot entry")]
    DuplicateEntry { encounter: EncounterKind },
}

/// Flag-store errors
///
/// Loading never aborts the world: callers recover by treating any of these
/// as "no flags persisted yet".
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("store io error: {0}")]
    Io(String),

    #[error("not a world-flags file (bad magic)")]
    InvalidMagic,

    #[error("flags version mismatch: expected {expected}, found {found}")]
    VersionMismatch { expected: u32, found: u32 },

    #[error("corrupt flags payload: {0}")]
    Corrupted(String),
}

impl From<std::io::Error> for StoreError {
    fn from(e: std::io::Error) -> Self {
        StoreError::Io(e.to_string())
    }
}
