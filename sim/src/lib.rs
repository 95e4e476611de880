#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Offline Monte-Carlo arena simulator.
//!
//! Replays every wave of every arena with the exact live planning and
//! allocation code, but drains each wave synchronously: no pacing, no
//! population caps, no stress pauses. Repeated runs over derived seeds are
//! averaged into the level-progression table the live game reads when a
//! player starts directly at a later arena. Determinism is a hard contract
//! here: the same base seed must reproduce the table bit for bit.

use std::collections::BTreeMap;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use reefkeep_balance::Tuning;
use reefkeep_core::{ArenaId, BudgetLedger, GameTables, LevelProgression, ModifierKind};
use reefkeep_system_allocation::{decision_xp, pick_next};
use reefkeep_system_wave_plan::plan_wave;

/// Default Monte-Carlo repetition count.
pub const DEFAULT_SAMPLES: u32 = 250;
/// Default base seed.
pub const DEFAULT_SEED: u64 = 1_337;

/// Seed stride separating arena sample streams.
const ARENA_SEED_STRIDE: u64 = 1_000;

/// Flat boss reward added per arena: `15 + arena × 5`.
const BOSS_XP_BASE: u64 = 15;
const BOSS_XP_PER_ARENA: u64 = 5;

/// Simulator run parameters.
#[derive(Clone, Copy, Debug)]
pub struct SimConfig {
    /// Monte-Carlo repetitions per arena.
    pub samples: u32,
    /// Base seed from which per-sample seeds are derived.
    pub seed: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            samples: DEFAULT_SAMPLES,
            seed: DEFAULT_SEED,
        }
    }
}

/// Configuration problems that abort the simulator before any sampling.
///
/// The live game degrades gracefully around these; the offline tool fails
/// fast so a human fixes the tables.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// The enemy catalog holds no archetypes.
    #[error("enemy catalog is empty")]
    EmptyCatalog,
    /// The arena table holds no arenas.
    #[error("arena table is empty")]
    NoArenas,
    /// A spawnable archetype has no threat-cost entry.
    #[error("archetype `{0}` has no threat cost entry")]
    MissingCost(String),
    /// An arena designates a lesson enemy the catalog does not know.
    #[error("arena {arena} designates unknown lesson enemy `{slug}`")]
    UnknownLessonEnemy {
        /// Arena at fault.
        arena: u8,
        /// The unresolved slug.
        slug: String,
    },
    /// A modifier forces an archetype the catalog does not know.
    #[error("modifier {kind:?} forces unknown archetype `{slug}`")]
    UnknownForcedType {
        /// Modifier at fault.
        kind: ModifierKind,
        /// The unresolved slug.
        slug: String,
    },
    /// The school size range is inverted.
    #[error("school size range is inverted ({min}..{max})")]
    InvalidSchoolRange {
        /// Configured minimum.
        min: u32,
        /// Configured maximum.
        max: u32,
    },
}

/// Generated progression table, persisted for the live game to pre-award XP.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressionTable {
    /// Sample count the table was generated with.
    pub samples: u32,
    /// Base seed the table was generated with.
    pub seed: u64,
    /// Per-arena progression entries, keyed by arena id.
    pub arenas: BTreeMap<u8, LevelProgression>,
}

/// Validates the tables the way the offline tool needs them: fatal on any
/// hole the live path would paper over.
pub fn validate_tables(tables: &GameTables) -> Result<(), ConfigError> {
    if tables.catalog.is_empty() {
        return Err(ConfigError::EmptyCatalog);
    }

    for (_, archetype) in tables.catalog.iter() {
        if archetype.spawn_weight() > 0.0
            && !archetype.is_boss_minion()
            && tables.budgets.cost_for(archetype.slug()).is_none()
        {
            return Err(ConfigError::MissingCost(archetype.slug().to_owned()));
        }
    }

    let mut any_arena = false;
    for arena in tables.arenas.iter() {
        any_arena = true;
        if let Some(slug) = arena.lesson_enemy() {
            if tables.catalog.by_slug(slug).is_none() {
                return Err(ConfigError::UnknownLessonEnemy {
                    arena: arena.id().get(),
                    slug: slug.to_owned(),
                });
            }
        }
    }
    if !any_arena {
        return Err(ConfigError::NoArenas);
    }

    for modifier in tables.modifiers.iter() {
        if let Some(forced) = modifier.forced_types() {
            for slug in forced {
                if tables.catalog.by_slug(slug).is_none() {
                    return Err(ConfigError::UnknownForcedType {
                        kind: modifier.kind(),
                        slug: (*slug).to_owned(),
                    });
                }
            }
        }
    }

    let (min, max) = tables.school.size_range();
    if min > max {
        return Err(ConfigError::InvalidSchoolRange { min, max });
    }

    Ok(())
}

/// Plans one wave and drains the allocator to exhaustion, returning the XP
/// the wave would award.
pub fn simulate_wave<R: Rng>(
    tuning: &Tuning<'_>,
    arena: ArenaId,
    wave: u32,
    rng: &mut R,
) -> u64 {
    let plan = plan_wave(tuning, arena, wave, rng);
    let mut ledger = BudgetLedger::new(plan.budget_total, plan.cognitive_max);
    let mut total = 0u64;
    while let Some(decision) = pick_next(tuning, arena, wave, &plan.pool, &mut ledger, rng) {
        total += decision_xp(tuning, &decision, plan.xp_mult, plan.wave_bonus);
    }
    total
}

/// Simulates a full arena run and returns its total XP including the boss
/// reward.
pub fn simulate_arena<R: Rng>(tuning: &Tuning<'_>, arena: ArenaId, rng: &mut R) -> u64 {
    let max_waves = tuning.max_waves(arena);
    let mut total = 0u64;
    for wave in 1..=max_waves {
        total += simulate_wave(tuning, arena, wave, rng);
    }
    total + BOSS_XP_BASE + BOSS_XP_PER_ARENA * u64::from(arena.get())
}

/// Runs the Monte-Carlo sweep and derives the progression table.
pub fn run(
    tables: &GameTables,
    balance: &reefkeep_balance::BalanceStore,
    config: SimConfig,
) -> Result<ProgressionTable, ConfigError> {
    validate_tables(tables)?;
    let samples = config.samples.max(1);
    let tuning = Tuning::new(tables, balance);

    let mut arenas = BTreeMap::new();
    for arena_config in tables.arenas.iter() {
        let arena = arena_config.id();
        let mut accumulated = 0u64;
        for sample in 0..samples {
            let seed = config
                .seed
                .wrapping_add(u64::from(arena.get()) * ARENA_SEED_STRIDE)
                .wrapping_add(u64::from(sample));
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            accumulated += simulate_arena(&tuning, arena, &mut rng);
        }
        let average = (accumulated as f64 / f64::from(samples)).round() as u64;
        tracing::debug!(arena = arena.get(), average, "arena sweep complete");
        let _ = arenas.insert(arena.get(), LevelProgression::from_total_xp(average));
    }

    Ok(ProgressionTable {
        samples,
        seed: config.seed,
        arenas,
    })
}
