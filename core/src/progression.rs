//! Experience and level-progression arithmetic.

use serde::{Deserialize, Serialize};

/// First level-up threshold; each subsequent threshold grows by 25%, floored.
const BASE_XP_TO_LEVEL: u64 = 10;
const XP_GROWTH: f64 = 1.25;

/// Bonus multiplier rewarding deeper waves within an arena.
#[must_use]
pub fn wave_progress_bonus(wave: u32) -> f64 {
    1.0 + f64::from(wave.saturating_sub(1)) * 0.15
}

/// Experience awarded per defeated unit.
///
/// Both the modifier multiplication and the wave bonus floor independently;
/// the double floor is intentional and matched by the balancing tables.
#[must_use]
pub fn xp_per_unit(xp_value: f64, xp_mult: f64, wave_bonus: f64) -> u64 {
    let base = (xp_value * xp_mult).floor();
    (base * wave_bonus).floor().max(0.0) as u64
}

/// Precomputed level progression for starting a run at a later arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelProgression {
    /// Average total XP earned across the arena.
    pub total_xp: u64,
    /// Level the player lands on after consuming the XP.
    pub final_level: u32,
    /// Level-up picks owed to the player.
    pub pending_level_ups: u32,
    /// XP left over after the final level-up.
    pub xp_remainder: u64,
    /// Threshold for the next level after the remainder.
    pub xp_to_next_level: u64,
}

impl LevelProgression {
    /// Converts a total XP figure into a progression entry by repeatedly
    /// subtracting the growing level-up threshold.
    #[must_use]
    pub fn from_total_xp(total_xp: u64) -> Self {
        let mut xp = total_xp;
        let mut xp_to_level = BASE_XP_TO_LEVEL;
        let mut pending_level_ups = 0u32;

        while xp >= xp_to_level {
            xp -= xp_to_level;
            pending_level_ups += 1;
            xp_to_level = (xp_to_level as f64 * XP_GROWTH).floor() as u64;
        }

        Self {
            total_xp,
            final_level: 1 + pending_level_ups,
            pending_level_ups,
            xp_remainder: xp,
            xp_to_next_level: xp_to_level,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{wave_progress_bonus, xp_per_unit, LevelProgression};

    #[test]
    fn wave_bonus_grows_by_fifteen_percent_per_wave() {
        assert!((wave_progress_bonus(1) - 1.0).abs() < f64::EPSILON);
        assert!((wave_progress_bonus(2) - 1.15).abs() < f64::EPSILON);
        assert!((wave_progress_bonus(5) - 1.6).abs() < 1e-9);
    }

    #[test]
    fn xp_floors_twice() {
        // floor(4.0 * 1.5) = 6, floor(6 * 1.15) = 6.
        assert_eq!(xp_per_unit(4.0, 1.5, 1.15), 6);
        // floor(0.8 * 1.0) = 0 stays zero regardless of wave bonus.
        assert_eq!(xp_per_unit(0.8, 1.0, 2.05), 0);
    }

    #[test]
    fn zero_xp_yields_level_one() {
        let progression = LevelProgression::from_total_xp(0);
        assert_eq!(progression.final_level, 1);
        assert_eq!(progression.pending_level_ups, 0);
        assert_eq!(progression.xp_remainder, 0);
        assert_eq!(progression.xp_to_next_level, 10);
    }

    #[test]
    fn thresholds_grow_and_floor() {
        // 10 + 12 + 15 = 37 consumed; 3 level-ups; next threshold 18.
        let progression = LevelProgression::from_total_xp(40);
        assert_eq!(progression.final_level, 4);
        assert_eq!(progression.pending_level_ups, 3);
        assert_eq!(progression.xp_remainder, 3);
        assert_eq!(progression.xp_to_next_level, 18);
    }

    #[test]
    fn progression_round_trips_through_bincode() {
        let progression = LevelProgression::from_total_xp(12_345);
        let bytes = bincode::serialize(&progression).expect("serialize");
        let restored: LevelProgression = bincode::deserialize(&bytes).expect("deserialize");
        assert_eq!(restored, progression);
    }
}
