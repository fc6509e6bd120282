//! Drop-rule trees
//!
//! A node carries one leading condition, an optional terminal reward and
//! any number of child nodes. Nesting is logical AND (a child is reached
//! only through its passing parent); siblings are independent, additive
//! branches, not first-match alternatives.

use serde::{Deserialize, Serialize};

use crate::error::LootError;
use crate::loot::condition::DropCondition;
use crate::loot::reward::RewardSpec;

/// One node of a drop-rule tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropRuleNode {
    pub condition: DropCondition,
    pub reward: Option<RewardSpec>,
    pub children: Vec<DropRuleNode>,
}

impl DropRuleNode {
    /// Gate node with no reward of its own
    pub fn gate(condition: DropCondition) -> Self {
        Self {
            condition,
            reward: None,
            children: Vec::new(),
        }
    }

    /// Terminal node: a reward behind a condition
    pub fn drop(condition: DropCondition, reward: RewardSpec) -> Self {
        Self {
            condition,
            reward: Some(reward),
            children: Vec::new(),
        }
    }

    /// Unconditional terminal node, used as a leaf under an AND gate
    pub fn leaf(reward: RewardSpec) -> Self {
        Self::drop(DropCondition::Always, reward)
    }

    /// Attach a child branch (builder style)
    pub fn child(mut self, node: DropRuleNode) -> Self {
        self.children.push(node);
        self
    }

    /// Validate the whole subtree.
    ///
    /// Fails fast on authoring mistakes: conditions that can never hold
    /// and reward ranges that can never yield an item.
    pub fn validate(&self) -> Result<(), LootError> {
        self.condition.validate()?;
        if let Some(reward) = &self.reward {
            reward.validate()?;
        }
        for node in &self.children {
            node.validate()?;
        }
        Ok(())
    }
}
