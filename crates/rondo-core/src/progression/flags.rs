//! Progression flag registry
//!
//! One durable boolean per gated milestone. Flags are monotonic: once
//! raised they are never cleared for the lifetime of the persisted world.
//! All mutation goes through [`ProgressionFlags::set`]; collaborators
//! (conditions, UI, visual triggers) only read.

use hashbrown::{HashMap, HashSet};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};
use tracing::{info, warn};

/// Identifier of a progression flag, one per gated milestone
///
/// Variant names double as the persisted key strings, so renaming a
/// variant is a save-format change.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    EnumString,
)]
pub enum FlagId {
    /// Eroica has fallen at least once
    EroicaDefeated,
    /// Pastorale has fallen at least once
    PastoraleDefeated,
    /// Tempest has fallen at least once
    TempestDefeated,
}

impl FlagId {
    /// Short subject name used when composing tooltip text
    pub const fn subject(&self) -> &'static str {
        match self {
            FlagId::EroicaDefeated => "Eroica",
            FlagId::PastoraleDefeated => "Pastorale",
            FlagId::TempestDefeated => "Tempest",
        }
    }
}

/// Durable store of defeated-milestone flags
///
/// Owned by the world state; loaded and saved with it. Reads are total
/// (the flag set is a closed enum) and default to false.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProgressionFlags {
    raised: HashSet<FlagId>,
}

impl ProgressionFlags {
    /// Empty registry: no milestone reached yet
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a flag. Never fails; unset flags are false.
    pub fn get(&self, flag: FlagId) -> bool {
        self.raised.contains(&flag)
    }

    /// Raise a flag. Returns true if this call raised it, false if it was
    /// already set (idempotent; no side effect on repeat).
    pub fn set(&mut self, flag: FlagId) -> bool {
        let newly = self.raised.insert(flag);
        if newly {
            info!(%flag, "progression flag raised");
        }
        newly
    }

    /// Number of raised flags
    pub fn raised_count(&self) -> usize {
        self.raised.len()
    }

    /// Iterate over currently raised flags (arbitrary order)
    pub fn iter_raised(&self) -> impl Iterator<Item = FlagId> + '_ {
        self.raised.iter().copied()
    }

    /// Key/value snapshot in the shape the persistence store consumes.
    ///
    /// Every known flag is written explicitly so a restore reproduces the
    /// exact truth values.
    pub fn to_store_map(&self) -> HashMap<String, bool> {
        use strum::IntoEnumIterator;
        FlagId::iter()
            .map(|flag| (flag.to_string(), self.get(flag)))
            .collect()
    }

    /// Rebuild a registry from persisted key/value pairs.
    ///
    /// Fail-open: unknown keys are skipped with a warning, missing keys
    /// default to false. A milestone is never invented by a bad payload.
    pub fn from_store_map(map: &HashMap<String, bool>) -> Self {
        let mut flags = Self::new();
        for (key, &value) in map {
            match key.parse::<FlagId>() {
                Ok(flag) => {
                    if value {
                        flags.raised.insert(flag);
                    }
                }
                Err(_) => {
                    warn!(key = %key, "ignoring unknown progression flag in store");
                }
            }
        }
        flags
    }
}
