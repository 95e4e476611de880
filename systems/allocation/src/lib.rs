#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! The threat-budget allocator.
//!
//! Each call selects one affordable archetype from the wave's eligible pool
//! by weighted random draw, optionally promotes it to a school, and charges
//! the wave's ledger. Candidates are rebuilt from the catalog and tuning view
//! on every call so live balance edits are always observed; only the pool
//! itself is fixed for the wave. `None` is a meaningful terminal state, never
//! an error: it means the budget is spent or nothing affordable remains.

use rand::Rng;

use reefkeep_balance::Tuning;
use reefkeep_core::{
    xp_per_unit, ArchetypeId, ArenaId, BudgetLedger, SchoolConfig, SpawnDecision,
};

struct Candidate {
    id: ArchetypeId,
    slug: &'static str,
    unit_cost: u32,
    cognitive: u32,
    weight: f64,
}

/// Draws, commits, and returns the next spawn decision for a wave.
///
/// Returns `None` when the eligible pool offers no archetype whose full unit
/// cost fits the remaining budget and whose cognitive charge fits the cap.
/// Schools roll a size first and clamp it to what the ledger can actually
/// afford; a clamp below three degrades the pick to a plain single unit.
pub fn pick_next<R: Rng>(
    tuning: &Tuning<'_>,
    arena: ArenaId,
    wave: u32,
    pool: &[ArchetypeId],
    ledger: &mut BudgetLedger,
    rng: &mut R,
) -> Option<SpawnDecision> {
    if pool.is_empty() {
        return None;
    }

    let featured = tuning.lesson_enemy(arena);
    let featured_bonus = tuning.featured_type_bonus();

    let mut candidates: Vec<Candidate> = Vec::new();
    let mut total_weight = 0.0;
    for (id, archetype) in tuning.catalog().iter() {
        let base_weight = tuning.spawn_weight(id);
        if base_weight <= 0.0 {
            continue;
        }
        if archetype.is_boss_minion() {
            continue;
        }
        if !pool.contains(&id) {
            continue;
        }
        if !archetype.passes_gates(arena, wave) {
            continue;
        }

        let cost = tuning.threat_cost(id);
        let unit_cost = cost.unit_cost();
        // A free unit could never drain the budget; refuse it outright so the
        // drain loop always terminates.
        if unit_cost == 0 {
            continue;
        }
        if !ledger.can_afford(unit_cost) {
            continue;
        }
        if !ledger.cognitive_allows(cost.cognitive) {
            continue;
        }

        let weight = if archetype.slug() == featured {
            base_weight * featured_bonus
        } else {
            base_weight
        };
        total_weight += weight;
        candidates.push(Candidate {
            id,
            slug: archetype.slug(),
            unit_cost,
            cognitive: cost.cognitive,
            weight,
        });
    }

    if candidates.is_empty() {
        return None;
    }

    let mut roll = rng.gen::<f64>() * total_weight;
    let mut chosen = &candidates[0];
    for candidate in &candidates {
        roll -= candidate.weight;
        if roll <= 0.0 {
            chosen = candidate;
            break;
        }
    }

    let mut count = 1;
    let mut school = false;
    if tuning.school_allows(chosen.slug)
        && rng.gen::<f64>() < tuning.school_chance(arena, wave)
    {
        let (size_min, size_max) = tuning.school_size_range();
        let rolled = rng.gen_range(size_min..=size_max);
        let mut affordable = rolled.min(ledger.budget_remaining() / chosen.unit_cost);
        if chosen.cognitive > 0 {
            affordable = affordable.min(ledger.cognitive_headroom() / chosen.cognitive);
        }
        if affordable >= SchoolConfig::MIN_COMMIT {
            count = affordable;
            school = true;
        }
    }

    ledger.commit(chosen.unit_cost, chosen.cognitive, count);
    Some(if school {
        SpawnDecision::school(chosen.id, count)
    } else {
        SpawnDecision::single(chosen.id)
    })
}

/// Experience awarded for a committed decision.
#[must_use]
pub fn decision_xp(
    tuning: &Tuning<'_>,
    decision: &SpawnDecision,
    xp_mult: f64,
    wave_bonus: f64,
) -> u64 {
    let per_unit = xp_per_unit(tuning.xp_value(decision.archetype), xp_mult, wave_bonus);
    per_unit * u64::from(decision.count)
}
