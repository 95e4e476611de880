//! Full live-loop replay: identical seeds must reproduce identical event
//! streams across world, planner, allocator, and orchestrator.

use reefkeep_balance::Tuning;
use reefkeep_core::{Command, Event};
use reefkeep_system_orchestrator::{Config, Orchestrator};
use reefkeep_world::{apply, query, World};

const FRAMES: u32 = 30_000;
const WORLD_SEED: u64 = 0xfeed_5eed;
const PACING_SEED: u64 = 0x0dd_ba11;

/// Kills applied per frame while enemies are pending; keeps waves finishing.
const KILLS_PER_FRAME: u32 = 3;

fn replay(frames: u32) -> Vec<Event> {
    let mut world = World::with_seed(WORLD_SEED);
    let mut orchestrator = Orchestrator::new(Config::new(PACING_SEED));
    let mut log = Vec::new();
    let mut pending_kills = 0u32;

    for _ in 0..frames {
        for _ in 0..pending_kills.min(KILLS_PER_FRAME) {
            apply(&mut world, Command::RecordEnemyDefeat, &mut log);
            pending_kills -= 1;
        }

        let frame_start = log.len();
        apply(&mut world, Command::Tick, &mut log);

        let mut commands = Vec::new();
        {
            let tuning = Tuning::new(world.tables(), world.balance());
            let snapshot = query::wave_snapshot(&world);
            orchestrator.handle(&log[frame_start..], snapshot.as_ref(), &tuning, &mut commands);
        }
        for command in commands {
            apply(&mut world, command, &mut log);
        }

        for event in &log[frame_start..] {
            if let Event::EnemiesSpawned { count, .. } = event {
                pending_kills += count;
            }
        }
    }

    log
}

#[test]
fn identical_seeds_replay_identically() {
    let first = replay(FRAMES);
    let second = replay(FRAMES);
    assert_eq!(first, second, "replay diverged between runs");
}

#[test]
fn replay_makes_real_progress_and_respects_wave_accounting() {
    let log = replay(FRAMES);

    let waves_started = log
        .iter()
        .filter(|event| matches!(event, Event::WaveStarted { .. }))
        .count();
    let waves_cleared = log
        .iter()
        .filter(|event| matches!(event, Event::WaveCleared { .. }))
        .count();
    assert!(waves_started >= 3, "only {waves_started} waves started");
    assert!(waves_cleared >= 2, "only {waves_cleared} waves cleared");

    // Every wave's spawned cost stays within its announced budget.
    let mut budget = 0u64;
    let mut spent = 0u64;
    let tables = reefkeep_core::GameTables::standard();
    for event in &log {
        match event {
            Event::WaveStarted { budget_total, .. } => {
                budget = u64::from(*budget_total);
                spent = 0;
            }
            Event::EnemiesSpawned {
                archetype, count, ..
            } => {
                let slug = tables
                    .catalog
                    .get(*archetype)
                    .expect("catalog entry")
                    .slug();
                let cost = tables
                    .budgets
                    .cost_for(slug)
                    .expect("cost entry")
                    .unit_cost();
                spent += u64::from(cost) * u64::from(*count);
                assert!(
                    spent <= budget,
                    "wave overspent: {spent} of {budget} budget"
                );
            }
            _ => {}
        }
    }
}
