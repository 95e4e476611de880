//! Boss-chase segment arithmetic across a full arena-1 campaign.

use reefkeep_core::{Command, Event, WavePhase};
use reefkeep_world::{apply, query, World};

const WAVE_INTRO_FRAMES: u32 = 360;
const WAVE_CLEAR_FRAMES: u32 = 270;
const BOSS_INTRO_FRAMES: u32 = 540;
const BOSS_DEFEATED_FRAMES: u32 = 180;
const BOSS_RETREAT_FRAMES: u32 = 60;
const ARENA_TRANSITION_FRAMES: u32 = 60;

fn pump(world: &mut World, frames: u32, log: &mut Vec<Event>) {
    for _ in 0..frames {
        apply(world, Command::Tick, log);
    }
}

/// Drives the active wave to completion without spawning anything.
fn clear_active_wave(world: &mut World, log: &mut Vec<Event>) {
    assert_eq!(query::phase(world), WavePhase::WaveActive);
    apply(world, Command::ExhaustSpawnBudget, log);
    assert_eq!(query::phase(world), WavePhase::WaveClear);
}

/// Runs one complete wave: intro, instant extermination, clear timer.
fn run_wave(world: &mut World, log: &mut Vec<Event>) {
    pump(world, WAVE_INTRO_FRAMES + 1, log);
    clear_active_wave(world, log);
    pump(world, WAVE_CLEAR_FRAMES + 1, log);
}

#[test]
fn boss_returns_at_cumulative_waves_three_five_and_seven() {
    let mut world = World::with_seed(1234);
    let mut log = Vec::new();

    // Waves 1 and 2 clear without a boss visit.
    run_wave(&mut world, &mut log);
    assert_eq!(query::phase(&world), WavePhase::WaveIntro);
    assert_eq!(query::wave(&world), 2);
    run_wave(&mut world, &mut log);
    assert_eq!(query::phase(&world), WavePhase::WaveIntro);
    assert_eq!(query::wave(&world), 3);

    // Wave 3 triggers the first encounter.
    run_wave(&mut world, &mut log);
    assert_eq!(query::phase(&world), WavePhase::BossIntro);
    pump(&mut world, BOSS_INTRO_FRAMES + 1, &mut log);
    assert!(log.iter().any(|event| matches!(
        event,
        Event::BossSummoned {
            encounter: 1,
            persistent_health: None,
            ..
        }
    )));
    assert!(query::boss_active(&world));

    // First retreat carries health forward.
    apply(&mut world, Command::RetreatBoss { remaining_health: 833 }, &mut log);
    assert_eq!(query::phase(&world), WavePhase::BossRetreat);
    pump(&mut world, BOSS_RETREAT_FRAMES, &mut log);
    assert!(log
        .iter()
        .any(|event| matches!(event, Event::BossRetreated { segment: 2, encounters: 1 })));
    assert_eq!(query::wave(&world), 4);
    assert_eq!(query::chase_progress(&world), Some((2, 1, Some(833))));

    // Waves 4 and 5; the fifth clear summons encounter two.
    run_wave(&mut world, &mut log);
    assert_eq!(query::phase(&world), WavePhase::WaveIntro);
    run_wave(&mut world, &mut log);
    assert_eq!(query::phase(&world), WavePhase::BossIntro);
    pump(&mut world, BOSS_INTRO_FRAMES + 1, &mut log);
    assert!(log.iter().any(|event| matches!(
        event,
        Event::BossSummoned {
            encounter: 2,
            persistent_health: Some(833),
            ..
        }
    )));

    apply(&mut world, Command::RetreatBoss { remaining_health: 416 }, &mut log);
    pump(&mut world, BOSS_RETREAT_FRAMES, &mut log);
    assert_eq!(query::chase_progress(&world), Some((3, 2, Some(416))));
    assert_eq!(query::wave(&world), 6);

    // Waves 6 and 7; the seventh clear summons the final encounter.
    run_wave(&mut world, &mut log);
    assert_eq!(query::phase(&world), WavePhase::WaveIntro);
    run_wave(&mut world, &mut log);
    assert_eq!(query::phase(&world), WavePhase::BossIntro);
    pump(&mut world, BOSS_INTRO_FRAMES + 1, &mut log);
    assert!(log.iter().any(|event| matches!(
        event,
        Event::BossSummoned {
            encounter: 3,
            persistent_health: Some(416),
            ..
        }
    )));

    // Encounter three is single-life: retreat requests are refused.
    apply(&mut world, Command::RetreatBoss { remaining_health: 99 }, &mut log);
    assert_eq!(query::phase(&world), WavePhase::BossActive);

    apply(&mut world, Command::RecordBossDefeat, &mut log);
    assert_eq!(query::phase(&world), WavePhase::BossDefeated);
    assert!(log
        .iter()
        .any(|event| matches!(event, Event::BossDefeated { .. })));

    pump(&mut world, BOSS_DEFEATED_FRAMES + 1, &mut log);
    assert_eq!(query::phase(&world), WavePhase::ArenaTransition);
    pump(&mut world, ARENA_TRANSITION_FRAMES + 1, &mut log);
    assert!(log
        .iter()
        .any(|event| matches!(event, Event::ArenaTransitioned { .. })));
    assert_eq!(query::arena(&world).get(), 2);
    assert_eq!(query::wave(&world), 1);
}

#[test]
fn non_chase_arenas_fight_the_boss_once() {
    let mut world = World::with_seed(77);
    let mut log = Vec::new();
    apply(
        &mut world,
        Command::StartRun {
            arena: reefkeep_core::ArenaId::new(2),
        },
        &mut log,
    );
    assert_eq!(query::chase_progress(&world), None);

    // All five waves clear before any boss appears.
    for expected_wave in 1..=5 {
        assert_eq!(query::wave(&world), expected_wave);
        run_wave(&mut world, &mut log);
    }
    assert_eq!(query::phase(&world), WavePhase::BossIntro);
    pump(&mut world, BOSS_INTRO_FRAMES + 1, &mut log);

    // Retreat is a chase-only concept here.
    apply(&mut world, Command::RetreatBoss { remaining_health: 10 }, &mut log);
    assert_eq!(query::phase(&world), WavePhase::BossActive);
}
