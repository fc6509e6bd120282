//! Loot spawn dispatch boundary
//!
//! Translates resolved stacks into world-spawn or cache-delivery requests
//! against a [`RewardSink`], the seam to the rendering/networking
//! collaborators. Dispatch is fire-and-forget: a failed spawn is the
//! sink's problem, never retried here, and never rolls back progression
//! state (flags record "defeated", not "reward delivered").

use tracing::{debug, warn};

use crate::encounter::{KillEvent, NetRole, ParticipantId, Pos};
use crate::loot::reward::ItemStack;

/// Identifies a spawned world item toward cooperating participants
pub type SpawnId = u32;

/// External collaborator that realizes approved rewards
pub trait RewardSink {
    /// Place a stack in the world. Err means the world refused it
    /// (e.g. no room at the position).
    fn spawn(&mut self, stack: ItemStack, pos: Pos) -> Result<SpawnId, String>;

    /// Tell cooperating participants about a spawned item so each
    /// observes it exactly once. Called only on the server role.
    fn sync(&mut self, id: SpawnId);

    /// Deliver a stack to a participant's spoils cache instead of the
    /// world. The elevated-mode reward container.
    fn cache(&mut self, slayer: ParticipantId, stack: ItemStack);
}

/// Realize `stacks` for one kill event.
///
/// Standard-mode rewards spawn directly at the event position; on the
/// server role each successful spawn also emits the sync obligation.
/// Elevated-mode rewards route to the slayer's spoils cache.
pub fn dispatch(sink: &mut dyn RewardSink, role: NetRole, event: &KillEvent, stacks: &[ItemStack]) {
    for &stack in stacks {
        if event.mode.is_elevated() {
            debug!(%stack, slayer = event.slayer.0, "reward cached");
            sink.cache(event.slayer, stack);
            continue;
        }
        match sink.spawn(stack, event.pos) {
            Ok(id) => {
                debug!(%stack, id, "reward spawned");
                if role.needs_sync() {
                    sink.sync(id);
                }
            }
            Err(reason) => {
                // Lost for this event; flags already reflect the defeat.
                warn!(%stack, %reason, "reward spawn failed, not retried");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encounter::{EncounterKind, GameMode};
    use crate::loot::reward::ItemKind;

    #[derive(Default)]
    struct RecordingSink {
        spawned: Vec<(ItemStack, Pos)>,
        synced: Vec<SpawnId>,
        cached: Vec<(ParticipantId, ItemStack)>,
        fail_spawns: bool,
    }

    impl RewardSink for RecordingSink {
        fn spawn(&mut self, stack: ItemStack, pos: Pos) -> Result<SpawnId, String> {
            if self.fail_spawns {
                return Err("no room".to_string());
            }
            self.spawned.push((stack, pos));
            Ok(self.spawned.len() as SpawnId)
        }

        fn sync(&mut self, id: SpawnId) {
            self.synced.push(id);
        }

        fn cache(&mut self, slayer: ParticipantId, stack: ItemStack) {
            self.cached.push((slayer, stack));
        }
    }

    fn event(mode: GameMode) -> KillEvent {
        KillEvent::new(EncounterKind::Eroica, mode, Pos::new(40, -3), ParticipantId(2))
    }

    fn stacks() -> Vec<ItemStack> {
        vec![
            ItemStack::new(ItemKind::ResonantEnergy, 7),
            ItemStack::new(ItemKind::EroicaRemnant, 25),
        ]
    }

    #[test]
    fn test_standard_mode_spawns_at_event_pos() {
        let mut sink = RecordingSink::default();
        dispatch(&mut sink, NetRole::Standalone, &event(GameMode::Standard), &stacks());

        assert_eq!(sink.spawned.len(), 2);
        assert!(sink.spawned.iter().all(|(_, pos)| *pos == Pos::new(40, -3)));
        assert!(sink.cached.is_empty());
        // Standalone has nobody to sync with.
        assert!(sink.synced.is_empty());
    }

    #[test]
    fn test_server_syncs_each_spawn_once() {
        let mut sink = RecordingSink::default();
        dispatch(&mut sink, NetRole::Server, &event(GameMode::Standard), &stacks());
        assert_eq!(sink.synced, vec![1, 2]);
    }

    #[test]
    fn test_elevated_mode_routes_to_cache() {
        let mut sink = RecordingSink::default();
        dispatch(&mut sink, NetRole::Server, &event(GameMode::Elevated), &stacks());

        assert!(sink.spawned.is_empty());
        assert!(sink.synced.is_empty());
        assert_eq!(sink.cached.len(), 2);
        assert!(sink.cached.iter().all(|(who, _)| *who == ParticipantId(2)));
    }

    #[test]
    fn test_spawn_failure_is_swallowed() {
        let mut sink = RecordingSink {
            fail_spawns: true,
            ..Default::default()
        };
        dispatch(&mut sink, NetRole::Server, &event(GameMode::Standard), &stacks());
        assert!(sink.spawned.is_empty());
        assert!(sink.synced.is_empty());
    }
}
