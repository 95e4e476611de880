#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Reefkeep spawning engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters submit [`Command`] values
//! describing desired mutations, the world executes those commands via its
//! `apply` entry point, and then broadcasts [`Event`] values for systems to
//! react to deterministically. The crate also carries the static balance
//! tables (enemy catalog, threat budgets, modifiers, pacing) consumed by the
//! planning and allocation systems, and the per-wave [`BudgetLedger`] those
//! systems spend against.

mod catalog;
mod ledger;
mod progression;
mod tables;

pub use catalog::{EnemyArchetype, EnemyCatalog};
pub use ledger::BudgetLedger;
pub use progression::{wave_progress_bonus, xp_per_unit, LevelProgression};
pub use tables::{
    ArenaConfig, ArenaTable, ChaseConfig, CognitiveLimits, GameTables, ModifierKind,
    ModifierTable, PacingConfig, SchoolConfig, ThreatBudgetTable, ThreatCost, WaveBudget,
    WaveBudgetOverride, WaveModifier, GENERIC_MODIFIERS,
};

/// Unique identifier assigned to an enemy archetype within the catalog.
///
/// Identifiers are allocated in catalog table order, which also defines the
/// deterministic iteration order used by weighted selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ArchetypeId(u32);

impl ArchetypeId {
    /// Creates a new archetype identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Identifier of one of the six themed arenas.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ArenaId(u8);

impl ArenaId {
    /// Creates a new arena identifier.
    #[must_use]
    pub const fn new(value: u8) -> Self {
        Self(value)
    }

    /// Retrieves the underlying arena number (1-based).
    #[must_use]
    pub const fn get(&self) -> u8 {
        self.0
    }

    /// Returns the identifier of the arena that follows this one.
    #[must_use]
    pub const fn next(&self) -> ArenaId {
        ArenaId(self.0 + 1)
    }
}

/// Classification of a wave within an arena.
///
/// The first wave teaches, the final wave tests, and everything between
/// integrates. Each classification carries its own budget and pacing profile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum WaveKind {
    /// Wave 1 of an arena: gentle budget, slow cadence, never modified.
    Lesson,
    /// Waves between the first and the last.
    Integration,
    /// The arena's final wave before the boss.
    Exam,
}

impl WaveKind {
    /// Classifies a 1-based wave index against the arena's wave count.
    #[must_use]
    pub const fn classify(wave: u32, max_waves: u32) -> Self {
        if wave <= 1 {
            Self::Lesson
        } else if wave >= max_waves {
            Self::Exam
        } else {
            Self::Integration
        }
    }
}

/// Tagged wave/boss phase of the live run.
///
/// Transitions are enumerated by [`WavePhase::permits`]; the world refuses any
/// transition outside that table. Spawning is only legal during
/// [`WavePhase::WaveActive`], which also encodes the "paused during
/// announcements" guard: intro and clear phases simply are not active.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum WavePhase {
    /// Wave announcement plays; spawning is paused.
    WaveIntro,
    /// Budgeted spawning is in progress.
    WaveActive,
    /// The wave was exterminated; celebration timer runs.
    WaveClear,
    /// Boss announcement and entrance.
    BossIntro,
    /// Boss fight in progress.
    BossActive,
    /// Chase-arena boss withdraws to return in a later segment.
    BossRetreat,
    /// Boss died; rewards and portal flow run.
    BossDefeated,
    /// Moving to the next arena.
    ArenaTransition,
}

impl WavePhase {
    /// Reports whether a transition from this phase to `next` is allowed.
    #[must_use]
    pub const fn permits(&self, next: WavePhase) -> bool {
        matches!(
            (self, next),
            (WavePhase::WaveIntro, WavePhase::WaveActive)
                | (WavePhase::WaveActive, WavePhase::WaveClear)
                | (WavePhase::WaveClear, WavePhase::WaveIntro)
                | (WavePhase::WaveClear, WavePhase::BossIntro)
                | (WavePhase::BossIntro, WavePhase::BossActive)
                | (WavePhase::BossActive, WavePhase::BossRetreat)
                | (WavePhase::BossActive, WavePhase::BossDefeated)
                | (WavePhase::BossRetreat, WavePhase::WaveIntro)
                | (WavePhase::BossDefeated, WavePhase::ArenaTransition)
                | (WavePhase::ArenaTransition, WavePhase::WaveIntro)
        )
    }
}

/// One committed allocator pick: spawn `count` copies of `archetype`.
///
/// `school` is only set on grouped picks of at least three units; a schooling
/// roll whose affordable clamp falls below three degrades to a plain
/// single-unit decision.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SpawnDecision {
    /// Archetype to spawn.
    pub archetype: ArchetypeId,
    /// Number of units in this decision.
    pub count: u32,
    /// Whether this decision is a school (grouped cluster of one weak type).
    pub school: bool,
}

impl SpawnDecision {
    /// Creates a single-unit decision.
    #[must_use]
    pub const fn single(archetype: ArchetypeId) -> Self {
        Self {
            archetype,
            count: 1,
            school: false,
        }
    }

    /// Creates a school decision of `count` units.
    #[must_use]
    pub const fn school(archetype: ArchetypeId, count: u32) -> Self {
        Self {
            archetype,
            count,
            school: true,
        }
    }
}

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Advances the simulation by exactly one rendered frame.
    Tick,
    /// Starts (or restarts) a run at the provided arena.
    StartRun {
        /// Arena the run begins in.
        arena: ArenaId,
    },
    /// Commits an allocator decision, deducting budget and spawning units.
    SpawnEnemies {
        /// The decision to commit.
        decision: SpawnDecision,
    },
    /// Forces the remaining wave budget to zero.
    ///
    /// Anti-stall safety valve: submitted when no affordable archetype remains
    /// while budget is still unspent.
    ExhaustSpawnBudget,
    /// Reports that one live enemy was defeated by the player.
    RecordEnemyDefeat,
    /// Reports that the active boss was defeated.
    RecordBossDefeat,
    /// Requests a chase-arena boss withdrawal, carrying its remaining health.
    RetreatBoss {
        /// Hit points the boss retains for its next appearance.
        remaining_health: u32,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// Indicates that the simulation clock advanced one frame.
    TimeAdvanced {
        /// Monotonic frame counter since the run started.
        frame: u64,
    },
    /// Announces that a run started at the provided arena.
    RunStarted {
        /// Arena the run begins in.
        arena: ArenaId,
    },
    /// Announces that a wave's spawning phase began.
    WaveStarted {
        /// Arena containing the wave.
        arena: ArenaId,
        /// 1-based wave index within the arena.
        wave: u32,
        /// Classification of the wave.
        kind: WaveKind,
        /// Total threat budget computed for the wave.
        budget_total: u32,
        /// Cognitive cap in effect for the wave.
        cognitive_max: u32,
        /// Modifier selected for the wave, if any.
        modifier: Option<ModifierKind>,
    },
    /// First appearance of a modifier within the current arena.
    ModifierAnnounced {
        /// The modifier being announced.
        modifier: ModifierKind,
        /// Player-facing announcement text.
        announcement: &'static str,
    },
    /// Confirms a committed spawn decision for the entity layer to realise.
    EnemiesSpawned {
        /// Archetype to spawn.
        archetype: ArchetypeId,
        /// Number of units.
        count: u32,
        /// Whether the units form a school.
        school: bool,
    },
    /// The safety valve tripped: budget remained but nothing was affordable.
    SpawnStarved {
        /// Budget that was forcibly zeroed.
        budget_remaining: u32,
    },
    /// Announces that a wave was fully exterminated.
    WaveCleared {
        /// Arena containing the wave.
        arena: ArenaId,
        /// 1-based wave index within the arena.
        wave: u32,
    },
    /// Requests the boss collaborator to spawn the arena boss.
    BossSummoned {
        /// Arena whose boss enters.
        arena: ArenaId,
        /// 1-based encounter number (only chase arenas exceed 1).
        encounter: u8,
        /// Carried-over hit points for recurring chase bosses.
        persistent_health: Option<u32>,
    },
    /// A chase boss completed its withdrawal.
    BossRetreated {
        /// Segment the chase advances into.
        segment: u8,
        /// Encounters completed so far.
        encounters: u8,
    },
    /// The arena boss was defeated for good.
    BossDefeated {
        /// Arena whose boss died.
        arena: ArenaId,
    },
    /// The run moved from one arena to the next.
    ArenaTransitioned {
        /// Arena that was completed.
        from: ArenaId,
        /// Arena the run continues in.
        to: ArenaId,
    },
    /// The final arena's boss fell; the run is over.
    RunCompleted,
}

/// Read-only snapshot of the active wave consumed by the pacing system.
#[derive(Clone, Copy, Debug)]
pub struct WaveSnapshot<'a> {
    /// Current phase of the run.
    pub phase: WavePhase,
    /// Arena the wave belongs to.
    pub arena: ArenaId,
    /// 1-based wave index within the arena.
    pub wave: u32,
    /// Classification of the wave.
    pub kind: WaveKind,
    /// Modifier in effect, if any.
    pub modifier: Option<ModifierKind>,
    /// Eligible archetype pool, fixed at wave start.
    pub pool: &'a [ArchetypeId],
    /// Copy of the wave's budget ledger.
    pub ledger: BudgetLedger,
    /// Number of enemies currently alive.
    pub live_enemies: u32,
    /// Whether a boss is currently active.
    pub boss_active: bool,
}

#[cfg(test)]
mod tests {
    use super::{ArchetypeId, ArenaId, SpawnDecision, WaveKind, WavePhase};

    #[test]
    fn wave_kind_classification_covers_all_positions() {
        assert_eq!(WaveKind::classify(1, 7), WaveKind::Lesson);
        assert_eq!(WaveKind::classify(2, 7), WaveKind::Integration);
        assert_eq!(WaveKind::classify(6, 7), WaveKind::Integration);
        assert_eq!(WaveKind::classify(7, 7), WaveKind::Exam);
    }

    #[test]
    fn single_wave_arena_counts_as_lesson() {
        assert_eq!(WaveKind::classify(1, 1), WaveKind::Lesson);
    }

    #[test]
    fn phase_table_rejects_skipped_states() {
        assert!(WavePhase::WaveIntro.permits(WavePhase::WaveActive));
        assert!(!WavePhase::WaveIntro.permits(WavePhase::WaveClear));
        assert!(!WavePhase::WaveActive.permits(WavePhase::BossActive));
        assert!(WavePhase::BossActive.permits(WavePhase::BossRetreat));
        assert!(!WavePhase::BossRetreat.permits(WavePhase::BossActive));
        assert!(WavePhase::BossRetreat.permits(WavePhase::WaveIntro));
    }

    #[test]
    fn school_constructor_tags_decisions() {
        let single = SpawnDecision::single(ArchetypeId::new(1));
        assert_eq!(single.count, 1);
        assert!(!single.school);

        let school = SpawnDecision::school(ArchetypeId::new(1), 5);
        assert_eq!(school.count, 5);
        assert!(school.school);
    }

    #[test]
    fn arena_id_advances() {
        assert_eq!(ArenaId::new(1).next(), ArenaId::new(2));
    }
}
