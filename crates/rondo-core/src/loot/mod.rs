//! Conditional drop rules, reward resolution and the dispatch boundary

pub mod condition;
pub mod dispatch;
pub mod engine;
pub mod reward;
pub mod rule;
pub mod tables;

pub use condition::{DropCondition, KillContext};
pub use dispatch::{dispatch, RewardSink, SpawnId};
pub use engine::evaluate;
pub use reward::{ItemKind, ItemStack, RewardSpec};
pub use rule::DropRuleNode;
pub use tables::{LootEntry, LootTables};
