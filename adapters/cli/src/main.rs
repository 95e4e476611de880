#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that generates the arena progression table.

use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use reefkeep_balance::BalanceStore;
use reefkeep_core::GameTables;
use reefkeep_sim::{SimConfig, DEFAULT_SAMPLES, DEFAULT_SEED};

#[derive(Parser, Debug)]
#[command(
    name = "reefkeep-xp",
    version,
    about = "Monte-Carlo sweep over all arenas, emitting the level-progression table"
)]
struct Args {
    /// Monte-Carlo repetitions per arena
    #[arg(long, default_value_t = DEFAULT_SAMPLES)]
    samples: u32,

    /// Base seed from which per-sample seeds are derived
    #[arg(long, default_value_t = DEFAULT_SEED)]
    seed: u64,

    /// Destination for the generated JSON table
    #[arg(long, default_value = "arena_progression.json")]
    output: PathBuf,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    let tables = GameTables::standard();
    let balance = BalanceStore::for_tables(&tables);
    let table = reefkeep_sim::run(
        &tables,
        &balance,
        SimConfig {
            samples: args.samples,
            seed: args.seed,
        },
    )
    .context("configuration tables failed validation")?;

    for (arena, entry) in &table.arenas {
        tracing::info!(
            arena,
            total_xp = entry.total_xp,
            final_level = entry.final_level,
            pending_level_ups = entry.pending_level_ups,
            "arena averaged"
        );
    }

    let json =
        serde_json::to_string_pretty(&table).context("serialising the progression table")?;
    fs::write(&args.output, json)
        .with_context(|| format!("writing {}", args.output.display()))?;
    tracing::info!(
        samples = table.samples,
        seed = table.seed,
        output = %args.output.display(),
        "progression table written"
    );

    Ok(())
}
