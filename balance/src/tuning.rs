//! Effective-value resolution: shipped tables plus live overrides.

use reefkeep_core::{
    ArchetypeId, ArenaId, EnemyCatalog, GameTables, ModifierKind, ThreatCost, WaveBudget,
    WaveKind, WaveModifier,
};

use crate::BalanceStore;

/// Lesson enemy assumed for arenas that do not designate one.
const DEFAULT_LESSON_ENEMY: &str = "grunt";

/// Borrowed view coupling the static tables with the live override store.
///
/// Every getter resolves overrides at call time; nothing is cached, so a
/// tuner's edits are visible to the very next pick. The wave pool itself is
/// the only state fixed at wave start, per the wave contract.
#[derive(Clone, Copy, Debug)]
pub struct Tuning<'a> {
    tables: &'a GameTables,
    balance: &'a BalanceStore,
}

impl<'a> Tuning<'a> {
    /// Couples tables with an override store.
    #[must_use]
    pub const fn new(tables: &'a GameTables, balance: &'a BalanceStore) -> Self {
        Self { tables, balance }
    }

    /// The underlying enemy catalog.
    #[must_use]
    pub const fn catalog(&self) -> &'a EnemyCatalog {
        &self.tables.catalog
    }

    /// The underlying table bundle.
    #[must_use]
    pub const fn tables(&self) -> &'a GameTables {
        self.tables
    }

    fn archetype_override(&self, slug: &str, field: &str) -> Option<f64> {
        self.balance.override_for(&format!("enemy.{slug}.{field}"))
    }

    /// Effective spawn weight for an archetype.
    #[must_use]
    pub fn spawn_weight(&self, id: ArchetypeId) -> f64 {
        let Some(archetype) = self.tables.catalog.get(id) else {
            return 0.0;
        };
        self.archetype_override(archetype.slug(), "weight")
            .unwrap_or_else(|| archetype.spawn_weight())
    }

    /// Effective base XP value for an archetype.
    #[must_use]
    pub fn xp_value(&self, id: ArchetypeId) -> f64 {
        let Some(archetype) = self.tables.catalog.get(id) else {
            return 0.0;
        };
        self.archetype_override(archetype.slug(), "xp")
            .unwrap_or_else(|| archetype.xp_value())
    }

    /// Effective threat cost for an archetype.
    ///
    /// Archetypes missing from the cost table fall back to
    /// [`ThreatCost::FALLBACK`] so the live game keeps running.
    #[must_use]
    pub fn threat_cost(&self, id: ArchetypeId) -> ThreatCost {
        let Some(archetype) = self.tables.catalog.get(id) else {
            return ThreatCost::FALLBACK;
        };
        let slug = archetype.slug();
        let base = self
            .tables
            .budgets
            .cost_for(slug)
            .unwrap_or(ThreatCost::FALLBACK);
        ThreatCost::new(
            self.resolve_u32(self.archetype_override(slug, "durability"), base.durability),
            self.resolve_u32(self.archetype_override(slug, "damage"), base.damage),
            self.resolve_u32(self.archetype_override(slug, "cognitive"), base.cognitive),
        )
    }

    fn resolve_u32(&self, over: Option<f64>, base: u32) -> u32 {
        over.map_or(base, |value| value.max(0.0).round() as u32)
    }

    /// Effective base budget for a wave kind in an arena, before the arena
    /// scale and modifier multiplier are applied.
    #[must_use]
    pub fn wave_budget(&self, arena: ArenaId, kind: WaveKind) -> WaveBudget {
        let label = match kind {
            WaveKind::Lesson => "lesson",
            WaveKind::Integration => "integration",
            WaveKind::Exam => "exam",
        };
        let base = self.tables.budgets.kind_budget(kind);
        let total = self.resolve_u32(
            self.balance
                .override_for(&format!("waves.budget.{label}_total")),
            base.total,
        );
        let max_cognitive = self.resolve_u32(
            self.balance
                .override_for(&format!("waves.budget.{label}_cognitive")),
            base.max_cognitive,
        );

        let merged = self
            .tables
            .budgets
            .arena_override(arena, kind)
            .unwrap_or_default();
        WaveBudget::new(
            merged.total.unwrap_or(total),
            merged.max_cognitive.unwrap_or(max_cognitive),
        )
    }

    /// Arena difficulty scale multiplier.
    #[must_use]
    pub fn arena_scale(&self, arena: ArenaId) -> f64 {
        self.tables.budgets.arena_scale(arena)
    }

    /// Weight multiplier applied to the arena's featured lesson enemy.
    #[must_use]
    pub fn featured_type_bonus(&self) -> f64 {
        self.tables.cognitive.featured_type_bonus()
    }

    /// Maximum distinct archetypes allowed in an arena's wave pool.
    #[must_use]
    pub fn max_pool_types(&self, arena: ArenaId) -> usize {
        self.tables.cognitive.max_types(arena)
    }

    /// Featured lesson enemy slug for an arena.
    #[must_use]
    pub fn lesson_enemy(&self, arena: ArenaId) -> &'a str {
        self.tables
            .arenas
            .get(arena)
            .and_then(|config| config.lesson_enemy())
            .unwrap_or(DEFAULT_LESSON_ENEMY)
    }

    /// Wave count for an arena.
    #[must_use]
    pub fn max_waves(&self, arena: ArenaId) -> u32 {
        self.tables.arenas.max_waves(arena)
    }

    /// Whether the arena marks this wave as an explicit breather.
    #[must_use]
    pub fn is_breather_wave(&self, arena: ArenaId, wave: u32) -> bool {
        self.tables
            .arenas
            .get(arena)
            .map_or(false, |config| config.breather_waves().contains(&wave))
    }

    /// Whether the arena is corridor-constrained (halved burst chance).
    #[must_use]
    pub fn corridor(&self, arena: ArenaId) -> bool {
        self.tables
            .arenas
            .get(arena)
            .map_or(false, |config| config.corridor())
    }

    /// Modifier definition lookup.
    #[must_use]
    pub fn modifier(&self, kind: ModifierKind) -> Option<&'a WaveModifier> {
        self.tables.modifiers.get(kind)
    }

    /// Whether the archetype may form schools.
    #[must_use]
    pub fn school_allows(&self, slug: &str) -> bool {
        self.tables.school.allows(slug)
    }

    /// Inclusive school size range.
    #[must_use]
    pub fn school_size_range(&self) -> (u32, u32) {
        self.tables.school.size_range()
    }

    /// Schooling chance for an arena/wave.
    #[must_use]
    pub fn school_chance(&self, arena: ArenaId, wave: u32) -> f64 {
        self.tables.school.chance(arena, wave)
    }

    /// Effective stress-pause population threshold.
    #[must_use]
    pub fn stress_pause_threshold(&self) -> u32 {
        self.resolve_u32(
            self.balance.override_for("waves.pacing.stress_threshold"),
            self.tables.pacing.stress_pause_threshold,
        )
    }

    /// Effective micro-breather spawn interval.
    #[must_use]
    pub fn micro_breather_interval(&self) -> u32 {
        self.resolve_u32(
            self.balance.override_for("waves.pacing.breather_interval"),
            self.tables.pacing.micro_breather_interval,
        )
        .max(1)
    }

    /// Effective micro-breather duration in frames.
    #[must_use]
    pub fn micro_breather_frames(&self) -> u32 {
        self.resolve_u32(
            self.balance.override_for("waves.pacing.breather_frames"),
            self.tables.pacing.micro_breather_frames,
        )
    }

    /// Spawn interval in frames for a wave, before modifier multipliers.
    #[must_use]
    pub fn spawn_interval(&self, kind: WaveKind, wave: u32) -> u32 {
        self.tables.pacing.interval_for(kind, wave)
    }

    /// Burst chance for a wave, before corridor/modifier adjustments.
    #[must_use]
    pub fn burst_chance(&self, kind: WaveKind, wave: u32) -> f64 {
        self.tables.pacing.burst_chance_for(kind, wave)
    }
}
