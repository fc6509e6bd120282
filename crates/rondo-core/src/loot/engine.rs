//! Drop-rule evaluation
//!
//! Depth-first walk with strict short-circuit: a failing condition prunes
//! its entire subtree, a passing node contributes its own reward and then
//! every child independently. Evaluation is pure; quantity resolution
//! happens later, in the caller, so re-evaluating is always safe.

use tracing::trace;

use crate::loot::condition::KillContext;
use crate::loot::reward::RewardSpec;
use crate::loot::rule::DropRuleNode;
use crate::progression::ProgressionFlags;

/// Walk `rules` against current flags and the event context, collecting
/// every approved reward spec.
pub fn evaluate(
    rules: &[DropRuleNode],
    flags: &ProgressionFlags,
    ctx: &KillContext,
) -> Vec<RewardSpec> {
    let mut approved = Vec::new();
    for node in rules {
        walk(node, flags, ctx, &mut approved);
    }
    approved
}

fn walk(
    node: &DropRuleNode,
    flags: &ProgressionFlags,
    ctx: &KillContext,
    approved: &mut Vec<RewardSpec>,
) {
    if !node.condition.eval(flags, ctx) {
        trace!(condition = ?node.condition, "drop branch pruned");
        return;
    }
    if let Some(reward) = node.reward {
        approved.push(reward);
    }
    for child in &node.children {
        walk(child, flags, ctx, approved);
    }
}
