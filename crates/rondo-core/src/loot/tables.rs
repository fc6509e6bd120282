//! Per-encounter loot tables
//!
//! Each encounter kind owns at most one entry: the deterministic
//! first-kill rewards (taken when the transition machine reports
//! `JustTransitioned`, bypassing the rule engine) and the conditional
//! rule trees walked on every steady-state kill. Registration validates
//! the whole entry, so authoring mistakes surface at startup rather than
//! as silent missing drops.

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use crate::encounter::{EncounterKind, GameMode};
use crate::error::LootError;
use crate::loot::condition::DropCondition;
use crate::loot::reward::{ItemKind, RewardSpec};
use crate::loot::rule::DropRuleNode;
use crate::progression::{FlagId, TransitionState};

/// Everything one encounter kind can drop
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LootEntry {
    /// Deterministic rewards for the first-ever defeat
    pub first_kill: Vec<RewardSpec>,
    /// Rule trees walked on every later defeat
    pub rules: Vec<DropRuleNode>,
}

impl LootEntry {
    fn validate(&self) -> Result<(), LootError> {
        for spec in &self.first_kill {
            spec.validate()?;
        }
        for node in &self.rules {
            node.validate()?;
        }
        Ok(())
    }
}

/// Registry of loot entries, keyed by encounter kind
#[derive(Debug, Clone, Default)]
pub struct LootTables {
    entries: HashMap<EncounterKind, LootEntry>,
}

impl LootTables {
    /// Empty table set, for tests and custom content
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an entry for `kind`, validating it first.
    pub fn register(&mut self, kind: EncounterKind, entry: LootEntry) -> Result<(), LootError> {
        if self.entries.contains_key(&kind) {
            return Err(LootError::DuplicateEntry { encounter: kind });
        }
        entry.validate()?;
        self.entries.insert(kind, entry);
        Ok(())
    }

    /// The registered entry for `kind`, if any
    pub fn entry(&self, kind: EncounterKind) -> Option<&LootEntry> {
        self.entries.get(&kind)
    }

    /// The shipped drop tables for all encounter kinds.
    pub fn builtin() -> Result<Self, LootError> {
        let mut tables = Self::new();

        // Eroica: deterministic core on the first kill; afterwards the
        // steady branch splits by mode. Elevated rewards sit under the
        // same transition gate as standard ones.
        tables.register(
            EncounterKind::Eroica,
            LootEntry {
                first_kill: vec![RewardSpec::new(ItemKind::SymphonicCore, 20, 30)],
                rules: vec![DropRuleNode::gate(DropCondition::Transition {
                    encounter: EncounterKind::Eroica,
                    requires: TransitionState::SteadyState,
                })
                .child(
                    DropRuleNode::gate(DropCondition::ModeIs(GameMode::Standard))
                        .child(DropRuleNode::leaf(RewardSpec::new(
                            ItemKind::ResonantEnergy,
                            5,
                            10,
                        )))
                        .child(DropRuleNode::leaf(RewardSpec::new(
                            ItemKind::EroicaRemnant,
                            20,
                            30,
                        ))),
                )
                .child(
                    DropRuleNode::gate(DropCondition::ModeIs(GameMode::Elevated))
                        .child(DropRuleNode::leaf(RewardSpec::new(
                            ItemKind::ResonantEnergy,
                            5,
                            10,
                        )))
                        .child(DropRuleNode::leaf(RewardSpec::new(
                            ItemKind::EroicaRemnant,
                            25,
                            40,
                        ))),
                )],
            },
        )?;

        tables.register(
            EncounterKind::Pastorale,
            LootEntry {
                first_kill: vec![RewardSpec::new(ItemKind::MeadowChime, 10, 16)],
                rules: vec![DropRuleNode::gate(DropCondition::Transition {
                    encounter: EncounterKind::Pastorale,
                    requires: TransitionState::SteadyState,
                })
                .child(DropRuleNode::drop(
                    DropCondition::ModeIs(GameMode::Standard),
                    RewardSpec::new(ItemKind::MeadowChime, 6, 9),
                ))
                .child(DropRuleNode::drop(
                    DropCondition::ModeIs(GameMode::Elevated),
                    RewardSpec::new(ItemKind::MeadowChime, 8, 12),
                ))],
            },
        )?;

        // Tempest's steady standard branch carries an extra drop once the
        // prerequisite Eroica milestone has been reached.
        tables.register(
            EncounterKind::Tempest,
            LootEntry {
                first_kill: vec![RewardSpec::new(ItemKind::StormSliver, 12, 18)],
                rules: vec![DropRuleNode::gate(DropCondition::Transition {
                    encounter: EncounterKind::Tempest,
                    requires: TransitionState::SteadyState,
                })
                .child(
                    DropRuleNode::gate(DropCondition::ModeIs(GameMode::Standard))
                        .child(DropRuleNode::leaf(RewardSpec::new(
                            ItemKind::StormSliver,
                            8,
                            14,
                        )))
                        .child(DropRuleNode::drop(
                            DropCondition::FlagSet(FlagId::EroicaDefeated),
                            RewardSpec::new(ItemKind::ResonantEnergy, 3, 6),
                        )),
                )
                .child(DropRuleNode::drop(
                    DropCondition::ModeIs(GameMode::Elevated),
                    RewardSpec::new(ItemKind::StormSliver, 10, 18),
                ))],
            },
        )?;

        // Common enemy: no milestone, drops gated purely on world progress.
        tables.register(
            EncounterKind::Dissonant,
            LootEntry {
                first_kill: Vec::new(),
                rules: vec![DropRuleNode::drop(
                    DropCondition::FlagSet(FlagId::EroicaDefeated),
                    RewardSpec::new(ItemKind::DissonantEssence, 1, 3),
                )],
            },
        )?;

        Ok(tables)
    }
}
