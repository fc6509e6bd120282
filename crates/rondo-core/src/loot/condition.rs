//! Drop conditions
//!
//! Immutable, side-effect-free predicates over the flag registry and the
//! per-kill context. A condition may be evaluated several times per event,
//! so evaluation must never mutate anything.

use serde::{Deserialize, Serialize};

use crate::encounter::{EncounterKind, GameMode};
use crate::error::LootError;
use crate::progression::{self, FlagId, ProgressionFlags, TransitionState};

/// Per-event inputs a condition may consult
///
/// `transition` is the outcome the state machine reported for the
/// triggering encounter of this event; conditions about other encounters
/// fall back to the registry.
#[derive(Debug, Clone, Copy)]
pub struct KillContext {
    pub encounter: EncounterKind,
    pub mode: GameMode,
    pub transition: TransitionState,
}

/// A drop-rule predicate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DropCondition {
    /// Passes unconditionally; the leaf under an AND gate
    Always,
    /// The named progression flag has been raised
    FlagSet(FlagId),
    /// The named progression flag is still down
    FlagClear(FlagId),
    /// The event's difficulty mode matches
    ModeIs(GameMode),
    /// The encounter's first-kill lifecycle is in the required state
    Transition {
        encounter: EncounterKind,
        requires: TransitionState,
    },
}

impl DropCondition {
    /// Evaluate against current flags and the triggering event.
    pub fn eval(&self, flags: &ProgressionFlags, ctx: &KillContext) -> bool {
        match self {
            DropCondition::Always => true,
            DropCondition::FlagSet(flag) => flags.get(*flag),
            DropCondition::FlagClear(flag) => !flags.get(*flag),
            DropCondition::ModeIs(mode) => ctx.mode == *mode,
            DropCondition::Transition { encounter, requires } => {
                let state = if *encounter == ctx.encounter {
                    ctx.transition
                } else {
                    progression::peek(flags, *encounter)
                };
                state == *requires
            }
        }
    }

    /// Reject conditions that can never be satisfied by world state.
    ///
    /// A `Transition` check on a kind with no progression flag is a
    /// rule-authoring mistake: such kinds are permanently in steady state.
    pub fn validate(&self) -> Result<(), LootError> {
        if let DropCondition::Transition { encounter, .. } = self {
            if encounter.progress_flag().is_none() {
                return Err(LootError::TransitionOnUnflagged {
                    encounter: *encounter,
                });
            }
        }
        Ok(())
    }

    /// Tooltip text shown next to the rewards this condition gates
    pub fn description(&self) -> String {
        match self {
            DropCondition::Always => "Always drops".to_string(),
            DropCondition::FlagSet(flag) => {
                format!("Drops once {} has been defeated", flag.subject())
            }
            DropCondition::FlagClear(flag) => {
                format!("Drops while {} remains undefeated", flag.subject())
            }
            DropCondition::ModeIs(GameMode::Standard) => {
                "Drops in standard mode".to_string()
            }
            DropCondition::ModeIs(GameMode::Elevated) => {
                "Drops in elevated mode".to_string()
            }
            DropCondition::Transition { encounter, requires } => match requires {
                TransitionState::NeverDefeated => {
                    format!("Drops before {} has ever been defeated", encounter.title())
                }
                TransitionState::JustTransitioned => {
                    format!("Drops on the first defeat of {}", encounter.title())
                }
                TransitionState::SteadyState => {
                    format!("Drops from {} after its first defeat", encounter.title())
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(encounter: EncounterKind, mode: GameMode, transition: TransitionState) -> KillContext {
        KillContext {
            encounter,
            mode,
            transition,
        }
    }

    #[test]
    fn test_flag_conditions() {
        let mut flags = ProgressionFlags::new();
        let c = ctx(
            EncounterKind::Dissonant,
            GameMode::Standard,
            TransitionState::SteadyState,
        );

        let set = DropCondition::FlagSet(FlagId::EroicaDefeated);
        let clear = DropCondition::FlagClear(FlagId::EroicaDefeated);
        assert!(!set.eval(&flags, &c));
        assert!(clear.eval(&flags, &c));

        flags.set(FlagId::EroicaDefeated);
        assert!(set.eval(&flags, &c));
        assert!(!clear.eval(&flags, &c));
    }

    #[test]
    fn test_mode_condition() {
        let flags = ProgressionFlags::new();
        let standard = DropCondition::ModeIs(GameMode::Standard);
        assert!(standard.eval(
            &flags,
            &ctx(
                EncounterKind::Eroica,
                GameMode::Standard,
                TransitionState::SteadyState
            )
        ));
        assert!(!standard.eval(
            &flags,
            &ctx(
                EncounterKind::Eroica,
                GameMode::Elevated,
                TransitionState::SteadyState
            )
        ));
    }

    #[test]
    fn test_transition_condition_uses_event_outcome() {
        let flags = ProgressionFlags::new();
        let cond = DropCondition::Transition {
            encounter: EncounterKind::Eroica,
            requires: TransitionState::JustTransitioned,
        };
        // For the triggering encounter the per-event outcome wins even
        // though the registry already shows the flag raised.
        assert!(cond.eval(
            &flags,
            &ctx(
                EncounterKind::Eroica,
                GameMode::Standard,
                TransitionState::JustTransitioned
            )
        ));
        assert!(!cond.eval(
            &flags,
            &ctx(
                EncounterKind::Eroica,
                GameMode::Standard,
                TransitionState::SteadyState
            )
        ));
    }

    #[test]
    fn test_transition_condition_on_other_encounter_reads_registry() {
        let mut flags = ProgressionFlags::new();
        let cond = DropCondition::Transition {
            encounter: EncounterKind::Eroica,
            requires: TransitionState::SteadyState,
        };
        let c = ctx(
            EncounterKind::Tempest,
            GameMode::Standard,
            TransitionState::JustTransitioned,
        );
        assert!(!cond.eval(&flags, &c));
        flags.set(FlagId::EroicaDefeated);
        assert!(cond.eval(&flags, &c));
    }

    #[test]
    fn test_validate_rejects_transition_on_flagless_kind() {
        let bad = DropCondition::Transition {
            encounter: EncounterKind::Dissonant,
            requires: TransitionState::SteadyState,
        };
        assert_eq!(
            bad.validate(),
            Err(LootError::TransitionOnUnflagged {
                encounter: EncounterKind::Dissonant
            })
        );
        let good = DropCondition::Transition {
            encounter: EncounterKind::Eroica,
            requires: TransitionState::SteadyState,
        };
        assert!(good.validate().is_ok());
    }

    #[test]
    fn test_descriptions_are_distinct_text() {
        let conds = [
            DropCondition::Always,
            DropCondition::FlagSet(FlagId::EroicaDefeated),
            DropCondition::FlagClear(FlagId::EroicaDefeated),
            DropCondition::ModeIs(GameMode::Elevated),
            DropCondition::Transition {
                encounter: EncounterKind::Eroica,
                requires: TransitionState::SteadyState,
            },
        ];
        let texts: Vec<String> = conds.iter().map(|c| c.description()).collect();
        for (i, a) in texts.iter().enumerate() {
            assert!(!a.is_empty());
            for b in &texts[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
