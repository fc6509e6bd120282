//! rondo-core: progression gating and encounter loot for Rondo
//!
//! The core answers two questions when a high-tier encounter dies: has it
//! (or a prerequisite) already been permanently marked defeated, and which
//! rewards should this death produce, through which path. It owns the
//! durable progression flags, the first-kill transition, the conditional
//! drop-rule trees and the dispatch seam toward the spawn/network
//! collaborators. Rendering, audio, UI and combat simulation live
//! elsewhere and only read flags or receive spawn instructions.

pub mod encounter;
pub mod error;
pub mod ledger;
pub mod loot;
pub mod progression;
pub mod save;
pub mod world;

mod rng;

pub use encounter::{EncounterKind, GameMode, KillEvent, NetRole, ParticipantId, Pos};
pub use error::{LootError, StoreError};
pub use ledger::{MemoryLedger, ParticipantLedger};
pub use loot::{
    DropCondition, DropRuleNode, ItemKind, ItemStack, KillContext, LootEntry, LootTables,
    RewardSink, RewardSpec, SpawnId,
};
pub use progression::{FlagId, ProgressionFlags, TransitionState};
pub use rng::GameRng;
pub use save::{FileFlagStore, FlagStore, MemoryFlagStore};
pub use world::WorldState;
