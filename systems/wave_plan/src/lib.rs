#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic wave planning: classification, modifier selection, budget
//! computation, and the eligible enemy pool.
//!
//! Planning happens exactly once per wave, at the moment its intro phase
//! ends. The resulting [`WavePlan`] is immutable for the wave's duration;
//! balance edits made mid-wave affect per-pick cost/weight reads but never
//! the pool composition. All randomness flows through the injected generator
//! so the offline simulator reproduces plans bit-for-bit from a seed.

use rand::seq::SliceRandom;
use rand::Rng;

use reefkeep_balance::Tuning;
use reefkeep_core::{ArchetypeId, ArenaId, ModifierKind, WaveKind, GENERIC_MODIFIERS};

/// Probability floor for rolling a generic modifier; grows per arena.
const MODIFIER_CHANCE_BASE: f64 = 0.10;
const MODIFIER_CHANCE_PER_ARENA: f64 = 0.05;

/// First arena whose exam wave is forced to the harbingers finale.
const HARBINGERS_MIN_ARENA: u8 = 3;

/// Immutable plan governing one wave's spawning phase.
#[derive(Clone, Debug, PartialEq)]
pub struct WavePlan {
    /// Classification of the wave.
    pub kind: WaveKind,
    /// Modifier selected at wave start, if any.
    pub modifier: Option<ModifierKind>,
    /// Total threat budget after scaling and modifier multipliers.
    pub budget_total: u32,
    /// Cognitive cap in effect for the wave.
    pub cognitive_max: u32,
    /// Eligible archetype pool, fixed for the wave's duration.
    pub pool: Vec<ArchetypeId>,
    /// XP multiplier contributed by the modifier.
    pub xp_mult: f64,
    /// Pacing interval multiplier contributed by the modifier.
    pub interval_mult: f64,
    /// Bonus multiplier rewarding deeper waves.
    pub wave_bonus: f64,
}

/// Selects the wave's modifier, if any.
///
/// Lesson waves are never modified. Configured breather waves force the
/// breather modifier; the exam wave of arena three onward forces the
/// harbingers finale. Everything else rolls `0.10 + arena × 0.05` for a
/// uniform pick among the generic modifiers.
pub fn select_modifier<R: Rng>(
    tuning: &Tuning<'_>,
    arena: ArenaId,
    wave: u32,
    max_waves: u32,
    rng: &mut R,
) -> Option<ModifierKind> {
    if WaveKind::classify(wave, max_waves) == WaveKind::Lesson {
        return None;
    }

    if tuning.is_breather_wave(arena, wave) {
        return Some(ModifierKind::Breather);
    }

    if wave == max_waves && arena.get() >= HARBINGERS_MIN_ARENA {
        return Some(ModifierKind::Harbingers);
    }

    let chance = MODIFIER_CHANCE_BASE + f64::from(arena.get()) * MODIFIER_CHANCE_PER_ARENA;
    if rng.gen::<f64>() > chance {
        return None;
    }

    let index = (rng.gen::<f64>() * GENERIC_MODIFIERS.len() as f64) as usize;
    Some(GENERIC_MODIFIERS[index])
}

/// Builds the eligible archetype pool for a wave.
///
/// A modifier that dictates composition returns its forced list verbatim,
/// bypassing the cognitive cap and arena filters entirely. Otherwise the
/// arena's featured lesson enemy leads the pool when it is itself eligible,
/// and a uniform shuffle of the remaining eligible archetypes fills the pool
/// up to the arena's distinct-type cap.
pub fn build_pool<R: Rng>(
    tuning: &Tuning<'_>,
    arena: ArenaId,
    wave: u32,
    modifier: Option<ModifierKind>,
    rng: &mut R,
) -> Vec<ArchetypeId> {
    let catalog = tuning.catalog();

    if let Some(forced) = modifier
        .and_then(|kind| tuning.modifier(kind))
        .and_then(|modifier| modifier.forced_types())
    {
        return forced
            .iter()
            .filter_map(|slug| catalog.by_slug(slug))
            .collect();
    }

    let max_types = tuning.max_pool_types(arena);
    let lesson_slug = tuning.lesson_enemy(arena);

    let mut lesson = None;
    let mut others = Vec::new();
    for (id, archetype) in catalog.iter() {
        if tuning.spawn_weight(id) <= 0.0 {
            continue;
        }
        if archetype.is_boss_minion() {
            continue;
        }
        if !archetype.passes_gates(arena, wave) {
            continue;
        }
        if archetype.slug() == lesson_slug {
            lesson = Some(id);
        } else {
            others.push(id);
        }
    }

    let mut pool = Vec::with_capacity(max_types);
    if let Some(id) = lesson {
        pool.push(id);
    }

    others.shuffle(rng);
    for id in others {
        if pool.len() >= max_types {
            break;
        }
        pool.push(id);
    }

    pool
}

/// Produces the complete plan for a wave.
pub fn plan_wave<R: Rng>(
    tuning: &Tuning<'_>,
    arena: ArenaId,
    wave: u32,
    rng: &mut R,
) -> WavePlan {
    let max_waves = tuning.max_waves(arena);
    let kind = WaveKind::classify(wave, max_waves);
    let modifier = select_modifier(tuning, arena, wave, max_waves, rng);
    let definition = modifier.and_then(|kind| tuning.modifier(kind));

    let base = tuning.wave_budget(arena, kind);
    let budget_mult = definition.map_or(1.0, |modifier| modifier.budget_mult());
    let budget_total =
        (f64::from(base.total) * tuning.arena_scale(arena) * budget_mult).floor() as u32;
    let cognitive_max = definition
        .and_then(|modifier| modifier.cognitive_max())
        .unwrap_or(base.max_cognitive);

    let pool = build_pool(tuning, arena, wave, modifier, rng);

    WavePlan {
        kind,
        modifier,
        budget_total,
        cognitive_max,
        pool,
        xp_mult: definition.map_or(1.0, |modifier| modifier.xp_mult()),
        interval_mult: definition.map_or(1.0, |modifier| modifier.interval_mult()),
        wave_bonus: reefkeep_core::wave_progress_bonus(wave),
    }
}
