//! Immutable queries over the authoritative run state.
//!
//! Systems never touch the world directly; they read these snapshots and
//! respond with command batches.

use reefkeep_core::{ArenaId, WavePhase, WaveSnapshot};

use crate::World;

/// Current phase of the run.
#[must_use]
pub fn phase(world: &World) -> WavePhase {
    world.phase_value()
}

/// Arena the run is currently in.
#[must_use]
pub fn arena(world: &World) -> ArenaId {
    world.arena_value()
}

/// 1-based wave index within the current arena.
#[must_use]
pub fn wave(world: &World) -> u32 {
    world.wave_value()
}

/// Monotonic frame counter since the run started.
#[must_use]
pub fn frame(world: &World) -> u64 {
    world.frame_value()
}

/// Number of enemies currently alive.
#[must_use]
pub fn live_enemy_count(world: &World) -> u32 {
    world.live_enemies_value()
}

/// Whether a boss is currently active.
#[must_use]
pub fn boss_active(world: &World) -> bool {
    world.boss_active_value()
}

/// Unspent budget of the active wave, if one is executing.
#[must_use]
pub fn budget_remaining(world: &World) -> Option<u32> {
    world
        .execution()
        .map(|(_, ledger)| ledger.budget_remaining())
}

/// Cognitive points charged so far in the active wave.
#[must_use]
pub fn cognitive_used(world: &World) -> Option<u32> {
    world.execution().map(|(_, ledger)| ledger.cognitive_used())
}

/// Complete snapshot of the active wave for the pacing system.
#[must_use]
pub fn wave_snapshot(world: &World) -> Option<WaveSnapshot<'_>> {
    world.execution().map(|(plan, ledger)| WaveSnapshot {
        phase: world.phase_value(),
        arena: world.arena_value(),
        wave: world.wave_value(),
        kind: plan.kind,
        modifier: plan.modifier,
        pool: &plan.pool,
        ledger,
        live_enemies: world.live_enemies_value(),
        boss_active: world.boss_active_value(),
    })
}

/// XP multiplier and wave bonus of the active wave, consumed by the entity
/// layer when awarding kill rewards.
#[must_use]
pub fn wave_xp_context(world: &World) -> Option<(f64, f64)> {
    world
        .execution()
        .map(|(plan, _)| (plan.xp_mult, plan.wave_bonus))
}

/// Chase progress for the current arena: segment, completed encounters, and
/// the boss's carried-over health.
#[must_use]
pub fn chase_progress(world: &World) -> Option<(u8, u8, Option<u32>)> {
    world.chase_progress()
}
