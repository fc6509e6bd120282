//! World progression state and the kill entry point
//!
//! [`WorldState`] aggregates the flag registry, loot tables, RNG and
//! participant ledger behind the single `on_kill` decision point. All
//! mutation flows through `&mut self`, so the exactly-once transition is
//! enforced by the borrow: callers sharing a world across threads wrap
//! it in a mutex and every kill report serializes through it.

use tracing::{debug, info, warn};

use crate::encounter::{EncounterKind, KillEvent, NetRole};
use crate::error::{LootError, StoreError};
use crate::ledger::{MemoryLedger, ParticipantLedger};
use crate::loot::{self, ItemKind, ItemStack, KillContext, LootTables, RewardSink, RewardSpec};
use crate::progression::{self, ProgressionFlags, TransitionState};
use crate::rng::GameRng;
use crate::save::FlagStore;

/// The progression core's owned state
pub struct WorldState {
    flags: ProgressionFlags,
    tables: LootTables,
    rng: GameRng,
    role: NetRole,
    ledger: Box<dyn ParticipantLedger + Send>,
}

impl WorldState {
    /// New world with the shipped drop tables.
    ///
    /// Errs only if the builtin tables fail validation, which is a bug.
    pub fn new(role: NetRole, seed: u64) -> Result<Self, LootError> {
        Ok(Self::with_tables(role, seed, LootTables::builtin()?))
    }

    /// New world over custom tables (already validated by registration)
    pub fn with_tables(role: NetRole, seed: u64, tables: LootTables) -> Self {
        Self {
            flags: ProgressionFlags::new(),
            tables,
            rng: GameRng::new(seed),
            role,
            ledger: Box::new(MemoryLedger::new()),
        }
    }

    /// Swap in an externally-owned claim ledger
    pub fn with_ledger(mut self, ledger: Box<dyn ParticipantLedger + Send>) -> Self {
        self.ledger = ledger;
        self
    }

    /// Read-only flag view for cosmetic collaborators
    pub fn flags(&self) -> &ProgressionFlags {
        &self.flags
    }

    pub fn role(&self) -> NetRole {
        self.role
    }

    /// Whether `kind` has been defeated at least once in this world.
    ///
    /// False for kinds that carry no milestone flag.
    pub fn is_defeated(&self, kind: EncounterKind) -> bool {
        kind.progress_flag().is_some_and(|flag| self.flags.get(flag))
    }

    /// The single kill entry point: approved, quantity-resolved rewards.
    ///
    /// Performs the transition check, walks the drop rules, resolves
    /// quantities and appends any one-time keepsake. Non-authoritative
    /// instances decide nothing and get nothing.
    pub fn on_kill(&mut self, event: &KillEvent) -> Vec<ItemStack> {
        if !self.role.is_authoritative() {
            warn!(role = %self.role, encounter = %event.encounter, "kill ignored on non-authoritative instance");
            return Vec::new();
        }

        let transition = progression::observe_kill(&mut self.flags, event.encounter);
        let ctx = KillContext {
            encounter: event.encounter,
            mode: event.mode,
            transition,
        };

        let approved: Vec<RewardSpec> = match self.tables.entry(event.encounter) {
            Some(entry) if transition == TransitionState::JustTransitioned => {
                // Deterministic first-kill path; the rule engine is not
                // consulted for this event.
                entry.first_kill.clone()
            }
            Some(entry) => loot::evaluate(&entry.rules, &self.flags, &ctx),
            None => Vec::new(),
        };

        let mut stacks: Vec<ItemStack> = approved
            .iter()
            .map(|spec| spec.roll(&mut self.rng))
            .collect();

        if event.encounter.is_milestone() && self.ledger.try_claim(event.slayer, event.encounter) {
            info!(slayer = event.slayer.0, encounter = %event.encounter, "milestone keepsake granted");
            stacks.push(ItemStack::new(ItemKind::ConcertLaurel, 1));
        }

        debug!(encounter = %event.encounter, mode = %event.mode, ?transition, rewards = stacks.len(), "kill processed");
        stacks
    }

    /// `on_kill` followed by dispatch through `sink`, in that order.
    pub fn handle_kill(&mut self, event: &KillEvent, sink: &mut dyn RewardSink) -> Vec<ItemStack> {
        let stacks = self.on_kill(event);
        loot::dispatch(sink, self.role, event, &stacks);
        stacks
    }

    /// Restore flags from `store`.
    ///
    /// Fail-open: any store error means no milestones reached, logged
    /// and recovered, never a failed world load.
    pub fn load(&mut self, store: &dyn FlagStore) {
        self.flags = match store.load_flags() {
            Ok(map) => ProgressionFlags::from_store_map(&map),
            Err(err) => {
                warn!(%err, "flag store unreadable, starting with no milestones");
                ProgressionFlags::new()
            }
        };
    }

    /// Persist the current flags to `store`.
    pub fn save(&self, store: &mut dyn FlagStore) -> Result<(), StoreError> {
        store.save_flags(&self.flags.to_store_map())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encounter::{GameMode, ParticipantId, Pos};
    use crate::progression::FlagId;
    use crate::save::MemoryFlagStore;

    fn kill(encounter: EncounterKind, mode: GameMode) -> KillEvent {
        KillEvent::new(encounter, mode, Pos::new(0, 0), ParticipantId(0))
    }

    fn world() -> WorldState {
        WorldState::new(NetRole::Standalone, 42).unwrap()
    }

    #[test]
    fn test_first_kill_takes_direct_path() {
        let mut world = world();
        let stacks = world.on_kill(&kill(EncounterKind::Eroica, GameMode::Standard));

        let core = stacks
            .iter()
            .find(|s| s.kind == ItemKind::SymphonicCore)
            .expect("first kill drops the core");
        assert!((20..=30).contains(&core.quantity));
        assert!(world.is_defeated(EncounterKind::Eroica));
    }

    #[test]
    fn test_steady_standard_kill_takes_rule_path() {
        let mut world = world();
        world.on_kill(&kill(EncounterKind::Eroica, GameMode::Standard));

        let stacks = world.on_kill(&kill(EncounterKind::Eroica, GameMode::Standard));
        let kinds: Vec<ItemKind> = stacks.iter().map(|s| s.kind).collect();
        assert!(kinds.contains(&ItemKind::ResonantEnergy));
        assert!(kinds.contains(&ItemKind::EroicaRemnant));
        assert!(!kinds.contains(&ItemKind::SymphonicCore));
    }

    #[test]
    fn test_gated_common_drop() {
        let mut world = world();
        assert!(world.on_kill(&kill(EncounterKind::Dissonant, GameMode::Standard)).is_empty());

        world.on_kill(&kill(EncounterKind::Eroica, GameMode::Standard));
        let stacks = world.on_kill(&kill(EncounterKind::Dissonant, GameMode::Standard));
        assert_eq!(stacks.len(), 1);
        assert_eq!(stacks[0].kind, ItemKind::DissonantEssence);
        assert!((1..=3).contains(&stacks[0].quantity));
    }

    #[test]
    fn test_keepsake_once_per_slayer() {
        let mut world = world();
        let by = |slayer: u8| {
            KillEvent::new(
                EncounterKind::Pastorale,
                GameMode::Standard,
                Pos::new(0, 0),
                ParticipantId(slayer),
            )
        };

        let laurels = |stacks: &[ItemStack]| {
            stacks.iter().filter(|s| s.kind == ItemKind::ConcertLaurel).count()
        };
        assert_eq!(laurels(&world.on_kill(&by(0))), 1);
        assert_eq!(laurels(&world.on_kill(&by(0))), 0);
        assert_eq!(laurels(&world.on_kill(&by(1))), 1);
    }

    #[test]
    fn test_no_keepsake_for_common_kills() {
        let mut world = world();
        world.on_kill(&kill(EncounterKind::Eroica, GameMode::Standard));
        let stacks = world.on_kill(&kill(EncounterKind::Dissonant, GameMode::Standard));
        assert!(stacks.iter().all(|s| s.kind != ItemKind::ConcertLaurel));
    }

    #[test]
    fn test_client_decides_nothing() {
        let mut world = WorldState::new(NetRole::Client, 42).unwrap();
        assert!(world.on_kill(&kill(EncounterKind::Eroica, GameMode::Standard)).is_empty());
        assert!(!world.is_defeated(EncounterKind::Eroica));
    }

    #[test]
    fn test_store_roundtrip() {
        let mut store = MemoryFlagStore::new();
        let mut world = world();
        world.on_kill(&kill(EncounterKind::Eroica, GameMode::Standard));
        world.save(&mut store).unwrap();

        let mut restored = WorldState::new(NetRole::Standalone, 7).unwrap();
        restored.load(&store);
        assert!(restored.is_defeated(EncounterKind::Eroica));
        assert!(!restored.is_defeated(EncounterKind::Tempest));

        // A restored defeat stays on the rule path.
        let stacks = restored.on_kill(&kill(EncounterKind::Eroica, GameMode::Standard));
        assert!(stacks.iter().all(|s| s.kind != ItemKind::SymphonicCore));
    }

    #[test]
    fn test_load_fails_open() {
        struct BrokenStore;
        impl FlagStore for BrokenStore {
            fn load_flags(&self) -> Result<hashbrown::HashMap<String, bool>, StoreError> {
                Err(StoreError::InvalidMagic)
            }
            fn save_flags(&mut self, _: &hashbrown::HashMap<String, bool>) -> Result<(), StoreError> {
                Ok(())
            }
        }

        let mut world = world();
        world.load(&BrokenStore);
        assert!(!world.is_defeated(EncounterKind::Eroica));
        assert_eq!(world.flags().raised_count(), 0);
    }

    #[test]
    fn test_is_defeated_tracks_flags_only() {
        let mut world = world();
        assert!(!world.is_defeated(EncounterKind::Dissonant));
        world.on_kill(&kill(EncounterKind::Dissonant, GameMode::Standard));
        assert!(!world.is_defeated(EncounterKind::Dissonant));
        assert!(!world.flags().get(FlagId::EroicaDefeated));
    }
}
