//! Reward items, specs and resolved stacks

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use crate::error::LootError;
use crate::rng::GameRng;

/// Every item kind the progression core can award
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
pub enum ItemKind {
    /// Eroica's first-kill trophy
    SymphonicCore,
    /// Common steady-state energy drop
    ResonantEnergy,
    /// Fragment of Eroica, dropped on repeat defeats
    EroicaRemnant,
    /// Pastorale's signature drop
    MeadowChime,
    /// Tempest's signature drop
    StormSliver,
    /// Essence carried by Dissonant strays once Eroica has fallen
    DissonantEssence,
    /// Once-per-participant milestone keepsake
    ConcertLaurel,
}

impl ItemKind {
    /// Display name used in tooltips and spawn log lines
    pub const fn name(&self) -> &'static str {
        match self {
            ItemKind::SymphonicCore => "Symphonic Core",
            ItemKind::ResonantEnergy => "Resonant Energy",
            ItemKind::EroicaRemnant => "Eroica Remnant",
            ItemKind::MeadowChime => "Meadow Chime",
            ItemKind::StormSliver => "Storm Sliver",
            ItemKind::DissonantEssence => "Dissonant Essence",
            ItemKind::ConcertLaurel => "Concert Laurel",
        }
    }
}

/// An approved reward before quantity resolution
///
/// Quantity is drawn uniformly from the inclusive `[min, max]` range, once
/// per successful terminal rule node per event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewardSpec {
    pub item: ItemKind,
    pub min: u32,
    pub max: u32,
}

impl RewardSpec {
    pub const fn new(item: ItemKind, min: u32, max: u32) -> Self {
        Self { item, min, max }
    }

    /// Spec for exactly `n` of an item
    pub const fn exact(item: ItemKind, n: u32) -> Self {
        Self { item, min: n, max: n }
    }

    /// Reject ranges that can never yield an item.
    ///
    /// Caught at table registration so a bad range is an authoring error,
    /// not a silent zero-drop at play time.
    pub fn validate(&self) -> Result<(), LootError> {
        if self.min == 0 || self.min > self.max {
            return Err(LootError::EmptyRewardRange {
                item: self.item,
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }

    /// Resolve to a concrete stack by uniform draw
    pub fn roll(&self, rng: &mut GameRng) -> ItemStack {
        ItemStack {
            kind: self.item,
            quantity: rng.roll_range(self.min, self.max),
        }
    }
}

/// A quantity-resolved reward, ready for the dispatcher
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemStack {
    pub kind: ItemKind,
    pub quantity: u32,
}

impl ItemStack {
    pub const fn new(kind: ItemKind, quantity: u32) -> Self {
        Self { kind, quantity }
    }
}

impl std::fmt::Display for ItemStack {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} x{}", self.kind.name(), self.quantity)
    }
}
