//! Static balance tables: threat budgets, modifiers, cognitive limits,
//! schooling, pacing, and arena configuration.
//!
//! The values here are the shipped defaults. Live tuning never mutates these
//! tables; overrides flow through the balance store and are resolved on every
//! read by the tuning view.

use crate::{ArenaId, WaveKind};

/// Threat cost charged when spawning one unit of an archetype.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ThreatCost {
    /// Durability component of the unit cost.
    pub durability: u32,
    /// Damage component of the unit cost.
    pub damage: u32,
    /// Complexity charged against the wave's cognitive cap.
    pub cognitive: u32,
}

impl ThreatCost {
    /// Fallback applied on the live path when an archetype has no cost entry.
    pub const FALLBACK: ThreatCost = ThreatCost::new(20, 10, 1);

    /// Creates a new cost triple.
    #[must_use]
    pub const fn new(durability: u32, damage: u32, cognitive: u32) -> Self {
        Self {
            durability,
            damage,
            cognitive,
        }
    }

    /// Budget points consumed per spawned unit.
    #[must_use]
    pub const fn unit_cost(&self) -> u32 {
        self.durability + self.damage
    }
}

/// Budget profile of one wave classification.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WaveBudget {
    /// Total threat points available to the wave before scaling.
    pub total: u32,
    /// Cognitive cap for the wave.
    pub max_cognitive: u32,
}

impl WaveBudget {
    /// Creates a new wave budget profile.
    #[must_use]
    pub const fn new(total: u32, max_cognitive: u32) -> Self {
        Self {
            total,
            max_cognitive,
        }
    }
}

/// Partial per-arena override merged over a base [`WaveBudget`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WaveBudgetOverride {
    /// Replacement total, if any.
    pub total: Option<u32>,
    /// Replacement cognitive cap, if any.
    pub max_cognitive: Option<u32>,
}

/// Per-wave-kind budgets, arena scaling, arena overrides, and unit costs.
#[derive(Clone, Debug)]
pub struct ThreatBudgetTable {
    lesson: WaveBudget,
    integration: WaveBudget,
    exam: WaveBudget,
    arena_scaling: Vec<(ArenaId, f64)>,
    arena_overrides: Vec<(ArenaId, WaveKind, WaveBudgetOverride)>,
    costs: Vec<(&'static str, ThreatCost)>,
}

impl ThreatBudgetTable {
    /// Creates a budget table from explicit parts.
    #[must_use]
    pub fn new(
        lesson: WaveBudget,
        integration: WaveBudget,
        exam: WaveBudget,
        arena_scaling: Vec<(ArenaId, f64)>,
        arena_overrides: Vec<(ArenaId, WaveKind, WaveBudgetOverride)>,
        costs: Vec<(&'static str, ThreatCost)>,
    ) -> Self {
        Self {
            lesson,
            integration,
            exam,
            arena_scaling,
            arena_overrides,
            costs,
        }
    }

    /// The shipped Reefkeep budget table.
    #[must_use]
    pub fn standard() -> Self {
        Self::new(
            WaveBudget::new(500, 120),
            WaveBudget::new(900, 200),
            WaveBudget::new(1_400, 280),
            vec![
                (ArenaId::new(1), 1.0),
                (ArenaId::new(2), 1.1),
                (ArenaId::new(3), 1.25),
                (ArenaId::new(4), 1.4),
                (ArenaId::new(5), 1.55),
                (ArenaId::new(6), 1.75),
            ],
            vec![
                // The shallows run longer waves, so integration stays gentle.
                (
                    ArenaId::new(1),
                    WaveKind::Integration,
                    WaveBudgetOverride {
                        total: Some(700),
                        max_cognitive: None,
                    },
                ),
                (
                    ArenaId::new(6),
                    WaveKind::Exam,
                    WaveBudgetOverride {
                        total: Some(1_800),
                        max_cognitive: Some(320),
                    },
                ),
            ],
            vec![
                ("grunt", ThreatCost::new(12, 8, 1)),
                ("minnow", ThreatCost::new(3, 2, 1)),
                ("shellback", ThreatCost::new(30, 10, 2)),
                ("lurker", ThreatCost::new(24, 16, 2)),
                ("darter", ThreatCost::new(18, 14, 2)),
                ("splitter", ThreatCost::new(28, 12, 3)),
                ("blinker", ThreatCost::new(30, 18, 3)),
                ("mauler", ThreatCost::new(45, 25, 3)),
                ("husk", ThreatCost::new(10, 5, 1)),
                ("spawnling", ThreatCost::new(8, 6, 1)),
            ],
        )
    }

    /// Base budget for a wave kind before scaling and modifiers.
    #[must_use]
    pub const fn kind_budget(&self, kind: WaveKind) -> WaveBudget {
        match kind {
            WaveKind::Lesson => self.lesson,
            WaveKind::Integration => self.integration,
            WaveKind::Exam => self.exam,
        }
    }

    /// Per-arena override for a wave kind, if one is configured.
    #[must_use]
    pub fn arena_override(&self, arena: ArenaId, kind: WaveKind) -> Option<WaveBudgetOverride> {
        self.arena_overrides
            .iter()
            .find(|(a, k, _)| *a == arena && *k == kind)
            .map(|(_, _, over)| *over)
    }

    /// Arena difficulty scale multiplier; unconfigured arenas scale by 1.0.
    #[must_use]
    pub fn arena_scale(&self, arena: ArenaId) -> f64 {
        self.arena_scaling
            .iter()
            .find(|(a, _)| *a == arena)
            .map_or(1.0, |(_, scale)| *scale)
    }

    /// Cost entry for an archetype slug, if one is configured.
    #[must_use]
    pub fn cost_for(&self, slug: &str) -> Option<ThreatCost> {
        self.costs
            .iter()
            .find(|(s, _)| *s == slug)
            .map(|(_, cost)| *cost)
    }
}

/// The five wave-wide modifier kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ModifierKind {
    /// Heavy-type composition with richer rewards.
    Elite,
    /// Accelerated spawn cadence.
    Rush,
    /// Cheap-type flood with an inflated budget.
    Swarm,
    /// Deliberate low-pressure wave.
    Breather,
    /// Stronger unlocked-type finale before a late-arena boss.
    Harbingers,
}

/// The generic modifiers rolled for ordinary integration/exam waves.
pub const GENERIC_MODIFIERS: [ModifierKind; 3] =
    [ModifierKind::Elite, ModifierKind::Rush, ModifierKind::Swarm];

/// Wave-wide effect applied for the duration of one wave.
#[derive(Clone, Debug)]
pub struct WaveModifier {
    kind: ModifierKind,
    forced_types: Option<Vec<&'static str>>,
    budget_mult: f64,
    xp_mult: f64,
    interval_mult: f64,
    cognitive_max: Option<u32>,
    announcement: &'static str,
}

impl WaveModifier {
    /// Creates a new modifier description.
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub const fn new(
        kind: ModifierKind,
        forced_types: Option<Vec<&'static str>>,
        budget_mult: f64,
        xp_mult: f64,
        interval_mult: f64,
        cognitive_max: Option<u32>,
        announcement: &'static str,
    ) -> Self {
        Self {
            kind,
            forced_types,
            budget_mult,
            xp_mult,
            interval_mult,
            cognitive_max,
            announcement,
        }
    }

    /// The modifier's kind.
    #[must_use]
    pub const fn kind(&self) -> ModifierKind {
        self.kind
    }

    /// Composition dictated by the modifier, bypassing normal pool selection.
    #[must_use]
    pub fn forced_types(&self) -> Option<&[&'static str]> {
        self.forced_types.as_deref()
    }

    /// Multiplier applied to the wave's total budget.
    #[must_use]
    pub const fn budget_mult(&self) -> f64 {
        self.budget_mult
    }

    /// Multiplier applied to per-unit XP.
    #[must_use]
    pub const fn xp_mult(&self) -> f64 {
        self.xp_mult
    }

    /// Multiplier applied to the spawn pacing interval.
    #[must_use]
    pub const fn interval_mult(&self) -> f64 {
        self.interval_mult
    }

    /// Replacement cognitive cap, if the modifier overrides it.
    #[must_use]
    pub const fn cognitive_max(&self) -> Option<u32> {
        self.cognitive_max
    }

    /// Player-facing announcement text.
    #[must_use]
    pub const fn announcement(&self) -> &'static str {
        self.announcement
    }
}

/// Table of all wave modifiers.
#[derive(Clone, Debug)]
pub struct ModifierTable {
    entries: Vec<WaveModifier>,
}

impl ModifierTable {
    /// Creates a modifier table from explicit entries.
    #[must_use]
    pub fn new(entries: Vec<WaveModifier>) -> Self {
        Self { entries }
    }

    /// The shipped Reefkeep modifier set.
    #[must_use]
    pub fn standard() -> Self {
        Self::new(vec![
            WaveModifier::new(
                ModifierKind::Elite,
                Some(vec!["shellback", "mauler"]),
                1.25,
                1.5,
                1.15,
                None,
                "ELITE VANGUARD",
            ),
            WaveModifier::new(
                ModifierKind::Rush,
                None,
                1.0,
                1.2,
                0.55,
                None,
                "RIPTIDE",
            ),
            WaveModifier::new(
                ModifierKind::Swarm,
                Some(vec!["minnow", "grunt"]),
                1.3,
                1.0,
                0.8,
                None,
                "THE SHOAL RISES",
            ),
            WaveModifier::new(
                ModifierKind::Breather,
                None,
                0.5,
                1.0,
                1.5,
                Some(12),
                "CALM CURRENTS",
            ),
            WaveModifier::new(
                ModifierKind::Harbingers,
                Some(vec!["splitter", "blinker", "mauler"]),
                1.15,
                1.35,
                0.9,
                None,
                "HARBINGERS OF THE DEEP",
            ),
        ])
    }

    /// Looks up a modifier by kind.
    #[must_use]
    pub fn get(&self, kind: ModifierKind) -> Option<&WaveModifier> {
        self.entries.iter().find(|entry| entry.kind == kind)
    }

    /// Iterates all configured modifiers.
    pub fn iter(&self) -> impl Iterator<Item = &WaveModifier> {
        self.entries.iter()
    }
}

/// Caps bounding how many distinct mechanics a player faces at once.
#[derive(Clone, Debug)]
pub struct CognitiveLimits {
    max_types_per_wave: Vec<(ArenaId, usize)>,
    default_max_types: usize,
    featured_type_bonus: f64,
}

impl CognitiveLimits {
    /// Creates a new cognitive-limit table.
    #[must_use]
    pub fn new(
        max_types_per_wave: Vec<(ArenaId, usize)>,
        default_max_types: usize,
        featured_type_bonus: f64,
    ) -> Self {
        Self {
            max_types_per_wave,
            default_max_types,
            featured_type_bonus,
        }
    }

    /// The shipped limits: shallow arenas stay simple, late arenas widen.
    #[must_use]
    pub fn standard() -> Self {
        Self::new(
            vec![
                (ArenaId::new(1), 2),
                (ArenaId::new(2), 3),
                (ArenaId::new(3), 3),
                (ArenaId::new(4), 4),
                (ArenaId::new(5), 4),
                (ArenaId::new(6), 5),
            ],
            4,
            3.0,
        )
    }

    /// Maximum distinct archetypes allowed in an arena's wave pool.
    #[must_use]
    pub fn max_types(&self, arena: ArenaId) -> usize {
        self.max_types_per_wave
            .iter()
            .find(|(a, _)| *a == arena)
            .map_or(self.default_max_types, |(_, max)| *max)
    }

    /// Weight multiplier applied to the arena's featured lesson enemy.
    #[must_use]
    pub const fn featured_type_bonus(&self) -> f64 {
        self.featured_type_bonus
    }
}

/// Configuration for schooling (grouped spawns of one weak type).
#[derive(Clone, Debug)]
pub struct SchoolConfig {
    enabled: bool,
    exclude: Vec<&'static str>,
    size_min: u32,
    size_max: u32,
    chance_default: Vec<(u32, f64)>,
    chance_by_arena: Vec<(ArenaId, Vec<(u32, f64)>)>,
}

impl SchoolConfig {
    /// Wave index whose chance entry doubles as the fallback for waves the
    /// tables do not enumerate.
    pub const FALLBACK_WAVE: u32 = 3;

    /// Minimum committed size for a school; smaller clamps degrade to singles.
    pub const MIN_COMMIT: u32 = 3;

    /// Creates a new schooling configuration.
    #[must_use]
    pub fn new(
        enabled: bool,
        exclude: Vec<&'static str>,
        size_min: u32,
        size_max: u32,
        chance_default: Vec<(u32, f64)>,
        chance_by_arena: Vec<(ArenaId, Vec<(u32, f64)>)>,
    ) -> Self {
        Self {
            enabled,
            exclude,
            size_min,
            size_max,
            chance_default,
            chance_by_arena,
        }
    }

    /// The shipped schooling table.
    #[must_use]
    pub fn standard() -> Self {
        Self::new(
            true,
            vec!["shellback", "lurker", "mauler", "splitter", "blinker"],
            4,
            9,
            vec![(2, 0.10), (3, 0.18), (4, 0.22), (5, 0.25), (6, 0.28)],
            vec![(
                ArenaId::new(1),
                vec![(1, 0.05), (2, 0.10), (3, 0.15)],
            )],
        )
    }

    /// Whether schooling is enabled at all.
    #[must_use]
    pub const fn enabled(&self) -> bool {
        self.enabled
    }

    /// Whether the archetype may form schools.
    #[must_use]
    pub fn allows(&self, slug: &str) -> bool {
        self.enabled && !self.exclude.iter().any(|excluded| *excluded == slug)
    }

    /// Inclusive size range rolled before the affordability clamp.
    #[must_use]
    pub const fn size_range(&self) -> (u32, u32) {
        (self.size_min, self.size_max)
    }

    /// Schooling chance for an arena/wave.
    ///
    /// Looks up the arena's table (falling back to the default table), then
    /// the exact wave entry, then the wave-3 entry, then zero.
    #[must_use]
    pub fn chance(&self, arena: ArenaId, wave: u32) -> f64 {
        let table = self
            .chance_by_arena
            .iter()
            .find(|(a, _)| *a == arena)
            .map_or(self.chance_default.as_slice(), |(_, table)| {
                table.as_slice()
            });
        lookup_wave_chance(table, wave)
            .or_else(|| lookup_wave_chance(table, Self::FALLBACK_WAVE))
            .unwrap_or(0.0)
    }
}

fn lookup_wave_chance(table: &[(u32, f64)], wave: u32) -> Option<f64> {
    table
        .iter()
        .find(|(w, _)| *w == wave)
        .map(|(_, chance)| *chance)
}

/// Frame-counted pacing configuration for the live orchestrator.
///
/// All values are frames at the nominal 60 fps tick; nothing in the core
/// reads a wall clock.
#[derive(Clone, Debug)]
pub struct PacingConfig {
    /// Spawn interval for lesson waves.
    pub lesson_interval: u32,
    /// Burst chance for lesson waves.
    pub lesson_burst: f64,
    /// Spawn interval for exam waves.
    pub exam_interval: u32,
    /// Burst chance for exam waves.
    pub exam_burst: f64,
    /// Integration interval at wave zero, before the per-wave ramp.
    pub integration_interval_base: u32,
    /// Frames removed from the integration interval per wave index.
    pub integration_interval_step: u32,
    /// Floor the integration interval never drops below.
    pub integration_interval_min: u32,
    /// Integration burst chance at wave zero.
    pub integration_burst_base: f64,
    /// Burst chance added per wave index.
    pub integration_burst_step: f64,
    /// Cap the integration burst chance never exceeds.
    pub integration_burst_max: f64,
    /// Live-enemy count at which spawning pauses entirely.
    pub stress_pause_threshold: u32,
    /// Number of spawned units between micro-breathers.
    pub micro_breather_interval: u32,
    /// Duration of a micro-breather in frames.
    pub micro_breather_frames: u32,
}

impl PacingConfig {
    /// The shipped pacing profile.
    #[must_use]
    pub const fn standard() -> Self {
        Self {
            lesson_interval: 90,
            lesson_burst: 0.05,
            exam_interval: 48,
            exam_burst: 0.25,
            integration_interval_base: 84,
            integration_interval_step: 4,
            integration_interval_min: 42,
            integration_burst_base: 0.10,
            integration_burst_step: 0.02,
            integration_burst_max: 0.30,
            stress_pause_threshold: 18,
            micro_breather_interval: 12,
            micro_breather_frames: 150,
        }
    }

    /// Spawn interval in frames for a wave, before modifier multipliers.
    #[must_use]
    pub fn interval_for(&self, kind: WaveKind, wave: u32) -> u32 {
        match kind {
            WaveKind::Lesson => self.lesson_interval,
            WaveKind::Exam => self.exam_interval,
            WaveKind::Integration => self
                .integration_interval_base
                .saturating_sub(wave.saturating_mul(self.integration_interval_step))
                .max(self.integration_interval_min),
        }
    }

    /// Burst chance for a wave, before corridor/modifier adjustments.
    #[must_use]
    pub fn burst_chance_for(&self, kind: WaveKind, wave: u32) -> f64 {
        match kind {
            WaveKind::Lesson => self.lesson_burst,
            WaveKind::Exam => self.exam_burst,
            WaveKind::Integration => (self.integration_burst_base
                + f64::from(wave) * self.integration_burst_step)
                .min(self.integration_burst_max),
        }
    }
}

/// Boss-chase configuration for an arena whose boss recurs across segments.
#[derive(Clone, Debug)]
pub struct ChaseConfig {
    segment_waves: Vec<u32>,
    retreat_health_fractions: Vec<f64>,
}

impl ChaseConfig {
    /// Creates a chase configuration.
    #[must_use]
    pub fn new(segment_waves: Vec<u32>, retreat_health_fractions: Vec<f64>) -> Self {
        Self {
            segment_waves,
            retreat_health_fractions,
        }
    }

    /// Wave counts per segment, in encounter order.
    #[must_use]
    pub fn segment_waves(&self) -> &[u32] {
        &self.segment_waves
    }

    /// Total boss encounters across the arena.
    #[must_use]
    pub fn max_encounters(&self) -> u8 {
        self.segment_waves.len() as u8
    }

    /// Health fractions at which early encounters retreat, consumed by the
    /// boss collaborator.
    #[must_use]
    pub fn retreat_health_fractions(&self) -> &[f64] {
        &self.retreat_health_fractions
    }

    /// Cumulative wave counter that triggers the boss for `segment` (1-based).
    #[must_use]
    pub fn segment_wave_target(&self, segment: u8) -> u32 {
        self.segment_waves
            .iter()
            .take(segment as usize)
            .sum::<u32>()
    }
}

/// Static description of one arena.
#[derive(Clone, Debug)]
pub struct ArenaConfig {
    id: ArenaId,
    name: &'static str,
    waves: u32,
    features: Vec<&'static str>,
    lesson_enemy: Option<&'static str>,
    breather_waves: Vec<u32>,
    corridor: bool,
    chase: Option<ChaseConfig>,
}

impl ArenaConfig {
    /// Creates a new arena description.
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: ArenaId,
        name: &'static str,
        waves: u32,
        features: Vec<&'static str>,
        lesson_enemy: Option<&'static str>,
        breather_waves: Vec<u32>,
        corridor: bool,
        chase: Option<ChaseConfig>,
    ) -> Self {
        Self {
            id,
            name,
            waves,
            features,
            lesson_enemy,
            breather_waves,
            corridor,
            chase,
        }
    }

    /// Arena identifier.
    #[must_use]
    pub const fn id(&self) -> ArenaId {
        self.id
    }

    /// Display name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Number of waves before the boss.
    #[must_use]
    pub const fn waves(&self) -> u32 {
        self.waves
    }

    /// World-building feature tags; opaque to the spawning core.
    #[must_use]
    pub fn features(&self) -> &[&'static str] {
        &self.features
    }

    /// Featured lesson enemy slug, if the arena designates one.
    #[must_use]
    pub const fn lesson_enemy(&self) -> Option<&'static str> {
        self.lesson_enemy
    }

    /// Explicit low-pressure wave indices.
    #[must_use]
    pub fn breather_waves(&self) -> &[u32] {
        &self.breather_waves
    }

    /// Corridor-constrained arenas halve burst probability.
    #[must_use]
    pub const fn corridor(&self) -> bool {
        self.corridor
    }

    /// Boss-chase configuration, for arenas whose boss recurs.
    #[must_use]
    pub const fn chase(&self) -> Option<&ChaseConfig> {
        self.chase.as_ref()
    }
}

/// Table of all six arenas.
#[derive(Clone, Debug)]
pub struct ArenaTable {
    arenas: Vec<ArenaConfig>,
}

impl ArenaTable {
    /// Wave count assumed for arenas missing from the table.
    pub const DEFAULT_WAVES: u32 = 10;

    /// Creates an arena table from explicit entries.
    #[must_use]
    pub fn new(arenas: Vec<ArenaConfig>) -> Self {
        Self { arenas }
    }

    /// The shipped six-arena campaign.
    #[must_use]
    pub fn standard() -> Self {
        Self::new(vec![
            ArenaConfig::new(
                ArenaId::new(1),
                "Tidal Shallows",
                7,
                vec!["open_sand", "landmarks"],
                None,
                Vec::new(),
                false,
                Some(ChaseConfig::new(vec![3, 2, 2], vec![0.66, 0.33])),
            ),
            ArenaConfig::new(
                ArenaId::new(2),
                "Shellward Gardens",
                5,
                vec!["open_sand", "pillars"],
                Some("shellback"),
                Vec::new(),
                false,
                None,
            ),
            ArenaConfig::new(
                ArenaId::new(3),
                "Kelp Spires",
                6,
                vec!["pillars", "vertical", "ramps"],
                Some("lurker"),
                Vec::new(),
                false,
                None,
            ),
            ArenaConfig::new(
                ArenaId::new(4),
                "Drift Terraces",
                8,
                vec!["platforms", "multi_level"],
                Some("darter"),
                Vec::new(),
                false,
                None,
            ),
            ArenaConfig::new(
                ArenaId::new(5),
                "Coral Labyrinth",
                8,
                vec!["tunnels", "chokepoints"],
                Some("splitter"),
                Vec::new(),
                true,
                None,
            ),
            ArenaConfig::new(
                ArenaId::new(6),
                "The Abyssal Court",
                10,
                vec!["tunnels", "hazards", "hybrid"],
                Some("blinker"),
                vec![3, 6, 9],
                false,
                None,
            ),
        ])
    }

    /// Looks up an arena configuration.
    #[must_use]
    pub fn get(&self, arena: ArenaId) -> Option<&ArenaConfig> {
        self.arenas.iter().find(|config| config.id() == arena)
    }

    /// Wave count for an arena, with the default for unknown arenas.
    #[must_use]
    pub fn max_waves(&self, arena: ArenaId) -> u32 {
        self.get(arena).map_or(Self::DEFAULT_WAVES, ArenaConfig::waves)
    }

    /// Iterates the arenas in campaign order.
    pub fn iter(&self) -> impl Iterator<Item = &ArenaConfig> {
        self.arenas.iter()
    }

    /// Identifier of the final arena in the campaign.
    #[must_use]
    pub fn last_arena(&self) -> Option<ArenaId> {
        self.arenas.iter().map(ArenaConfig::id).max()
    }
}

/// Bundle of every static table the spawning core consumes.
#[derive(Clone, Debug)]
pub struct GameTables {
    /// Enemy archetype catalog.
    pub catalog: crate::EnemyCatalog,
    /// Threat budgets, scaling, and unit costs.
    pub budgets: ThreatBudgetTable,
    /// Wave modifier definitions.
    pub modifiers: ModifierTable,
    /// Pool-size caps and the featured-type bonus.
    pub cognitive: CognitiveLimits,
    /// Schooling configuration.
    pub school: SchoolConfig,
    /// Live pacing configuration.
    pub pacing: PacingConfig,
    /// Arena campaign table.
    pub arenas: ArenaTable,
}

impl GameTables {
    /// The complete shipped configuration.
    #[must_use]
    pub fn standard() -> Self {
        Self {
            catalog: crate::EnemyCatalog::standard(),
            budgets: ThreatBudgetTable::standard(),
            modifiers: ModifierTable::standard(),
            cognitive: CognitiveLimits::standard(),
            school: SchoolConfig::standard(),
            pacing: PacingConfig::standard(),
            arenas: ArenaTable::standard(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{
        ArenaTable, ChaseConfig, CognitiveLimits, PacingConfig, SchoolConfig, ThreatBudgetTable,
        ThreatCost,
    };
    use crate::{ArenaId, WaveKind};

    #[test]
    fn unit_cost_sums_durability_and_damage() {
        assert_eq!(ThreatCost::new(12, 8, 1).unit_cost(), 20);
        assert_eq!(ThreatCost::FALLBACK.unit_cost(), 30);
    }

    #[test]
    fn arena_override_merges_only_configured_kinds() {
        let table = ThreatBudgetTable::standard();
        let over = table
            .arena_override(ArenaId::new(1), WaveKind::Integration)
            .expect("arena 1 integration override");
        assert_eq!(over.total, Some(700));
        assert_eq!(over.max_cognitive, None);
        assert!(table
            .arena_override(ArenaId::new(1), WaveKind::Lesson)
            .is_none());
    }

    #[test]
    fn unknown_arena_scales_by_one() {
        let table = ThreatBudgetTable::standard();
        assert!((table.arena_scale(ArenaId::new(9)) - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn school_chance_falls_back_to_wave_three() {
        let school = SchoolConfig::standard();
        // Wave 7 is not tabulated for arena 2; the default table's wave-3
        // entry applies.
        assert!((school.chance(ArenaId::new(2), 7) - 0.18).abs() < f64::EPSILON);
        // Arena 1 has its own table; wave 9 falls back to its wave-3 entry.
        assert!((school.chance(ArenaId::new(1), 9) - 0.15).abs() < f64::EPSILON);
        assert!((school.chance(ArenaId::new(1), 1) - 0.05).abs() < f64::EPSILON);
    }

    #[test]
    fn school_exclusions_block_heavies() {
        let school = SchoolConfig::standard();
        assert!(school.allows("minnow"));
        assert!(!school.allows("mauler"));
    }

    #[test]
    fn integration_interval_ramps_to_its_floor() {
        let pacing = PacingConfig::standard();
        assert_eq!(pacing.interval_for(WaveKind::Integration, 2), 76);
        assert_eq!(pacing.interval_for(WaveKind::Integration, 40), 42);
        assert_eq!(pacing.interval_for(WaveKind::Lesson, 1), 90);
    }

    #[test]
    fn integration_burst_caps() {
        let pacing = PacingConfig::standard();
        assert!((pacing.burst_chance_for(WaveKind::Integration, 3) - 0.16).abs() < 1e-9);
        assert!(
            (pacing.burst_chance_for(WaveKind::Integration, 40) - 0.30).abs() < f64::EPSILON
        );
    }

    #[test]
    fn chase_targets_accumulate_segment_waves() {
        let chase = ChaseConfig::new(vec![3, 2, 2], vec![0.66, 0.33]);
        assert_eq!(chase.segment_wave_target(1), 3);
        assert_eq!(chase.segment_wave_target(2), 5);
        assert_eq!(chase.segment_wave_target(3), 7);
        assert_eq!(chase.max_encounters(), 3);
    }

    #[test]
    fn arena_table_reports_waves_with_default() {
        let arenas = ArenaTable::standard();
        assert_eq!(arenas.max_waves(ArenaId::new(1)), 7);
        assert_eq!(arenas.max_waves(ArenaId::new(6)), 10);
        assert_eq!(arenas.max_waves(ArenaId::new(9)), ArenaTable::DEFAULT_WAVES);
        assert_eq!(arenas.last_arena(), Some(ArenaId::new(6)));
    }

    #[test]
    fn featured_bonus_matches_shipped_value() {
        assert!((CognitiveLimits::standard().featured_type_bonus() - 3.0).abs() < f64::EPSILON);
    }
}
