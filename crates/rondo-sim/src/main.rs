//! Scripted campaign driver for the Rondo progression core
//!
//! Runs a fixed sequence of encounter deaths through the real world
//! state, printing every spawn and cache delivery, and persisting
//! progression flags between runs so a second invocation starts past
//! the milestones of the first.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use tracing::info;

use rondo_core::{
    EncounterKind, FileFlagStore, GameMode, ItemStack, KillEvent, NetRole, ParticipantId, Pos,
    RewardSink, SpawnId, WorldState,
};

#[derive(Parser)]
#[command(name = "rondo-sim", about = "Scripted Rondo progression campaign")]
struct Args {
    /// RNG seed for reward rolls
    #[arg(long, default_value_t = 0xC0DA)]
    seed: u64,

    /// Difficulty mode for the scripted kills
    #[arg(long, value_enum, default_value = "standard")]
    mode: Mode,

    /// Flags file persisted between runs
    #[arg(long, default_value = "rondo-world.rndo")]
    world: PathBuf,
}

#[derive(Clone, Copy, ValueEnum)]
enum Mode {
    Standard,
    Elevated,
}

impl From<Mode> for GameMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Standard => GameMode::Standard,
            Mode::Elevated => GameMode::Elevated,
        }
    }
}

/// Console sink: prints what the game client would render
struct ConsoleSink {
    next_id: SpawnId,
}

impl ConsoleSink {
    fn new() -> Self {
        Self { next_id: 0 }
    }
}

impl RewardSink for ConsoleSink {
    fn spawn(&mut self, stack: ItemStack, pos: Pos) -> Result<SpawnId, String> {
        self.next_id += 1;
        println!("  spawned {stack} at ({}, {})", pos.x, pos.y);
        Ok(self.next_id)
    }

    fn sync(&mut self, id: SpawnId) {
        println!("  synced spawn #{id} to participants");
    }

    fn cache(&mut self, slayer: ParticipantId, stack: ItemStack) {
        println!("  cached {stack} for participant {}", slayer.0);
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let mode: GameMode = args.mode.into();

    let mut store = FileFlagStore::new(&args.world);
    let mut world = match WorldState::new(NetRole::Server, args.seed) {
        Ok(world) => world,
        Err(err) => {
            eprintln!("builtin drop tables failed validation: {err}");
            std::process::exit(1);
        }
    };
    if store.exists() {
        world.load(&store);
    }
    info!(seed = args.seed, %mode, world = %args.world.display(), "campaign starting");

    let mut sink = ConsoleSink::new();
    let slayer = ParticipantId(0);
    let script = [
        (EncounterKind::Dissonant, Pos::new(10, 4)),
        (EncounterKind::Eroica, Pos::new(64, 12)),
        (EncounterKind::Eroica, Pos::new(66, 11)),
        (EncounterKind::Tempest, Pos::new(-20, 30)),
        (EncounterKind::Tempest, Pos::new(-18, 28)),
        (EncounterKind::Dissonant, Pos::new(12, 5)),
    ];

    for (encounter, pos) in script {
        println!("{} falls:", encounter.title());
        let event = KillEvent::new(encounter, mode, pos, slayer);
        let stacks = world.handle_kill(&event, &mut sink);
        if stacks.is_empty() {
            println!("  no rewards");
        }
    }

    println!("\nworld progression:");
    for kind in [
        EncounterKind::Eroica,
        EncounterKind::Pastorale,
        EncounterKind::Tempest,
    ] {
        let mark = if world.is_defeated(kind) { "defeated" } else { "undefeated" };
        println!("  {}: {mark}", kind.title());
    }

    if let Err(err) = world.save(&mut store) {
        eprintln!("failed to persist flags: {err}");
        std::process::exit(1);
    }
    info!(world = %args.world.display(), "flags saved");
}
