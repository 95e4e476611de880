//! Enemy archetype catalog.

use crate::{ArchetypeId, ArenaId};

/// Static description of one enemy archetype.
///
/// Costs live in the threat-budget table, not here; the catalog only carries
/// selection-relevant attributes. Values may be overridden live through the
/// balance store, which is consulted on every read by the tuning view.
#[derive(Clone, Debug, PartialEq)]
pub struct EnemyArchetype {
    slug: &'static str,
    spawn_weight: f64,
    xp_value: f64,
    arena_intro: Option<u8>,
    max_arena: Option<u8>,
    min_wave: Option<u32>,
    is_boss_minion: bool,
}

impl EnemyArchetype {
    /// Creates a new archetype description.
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub const fn new(
        slug: &'static str,
        spawn_weight: f64,
        xp_value: f64,
        arena_intro: Option<u8>,
        max_arena: Option<u8>,
        min_wave: Option<u32>,
        is_boss_minion: bool,
    ) -> Self {
        Self {
            slug,
            spawn_weight,
            xp_value,
            arena_intro,
            max_arena,
            min_wave,
            is_boss_minion,
        }
    }

    /// Stable identifier used in balance keys and telemetry.
    #[must_use]
    pub const fn slug(&self) -> &'static str {
        self.slug
    }

    /// Base relative selection weight; zero disables the archetype.
    #[must_use]
    pub const fn spawn_weight(&self) -> f64 {
        self.spawn_weight
    }

    /// Base experience awarded per defeated unit.
    #[must_use]
    pub const fn xp_value(&self) -> f64 {
        self.xp_value
    }

    /// First arena in which this archetype may appear, if gated.
    #[must_use]
    pub const fn arena_intro(&self) -> Option<u8> {
        self.arena_intro
    }

    /// Last arena in which this archetype may appear, if gated.
    #[must_use]
    pub const fn max_arena(&self) -> Option<u8> {
        self.max_arena
    }

    /// Minimum wave index within an arena, if gated.
    #[must_use]
    pub const fn min_wave(&self) -> Option<u32> {
        self.min_wave
    }

    /// Boss minions never enter normal wave pools.
    #[must_use]
    pub const fn is_boss_minion(&self) -> bool {
        self.is_boss_minion
    }

    /// Checks the arena/wave gates (intro, retirement, minimum wave).
    ///
    /// Weight and boss-minion exclusions are the caller's concern; this only
    /// answers whether the archetype exists at this point of the campaign.
    #[must_use]
    pub fn passes_gates(&self, arena: ArenaId, wave: u32) -> bool {
        if let Some(intro) = self.arena_intro {
            if intro > arena.get() {
                return false;
            }
        }
        if let Some(max) = self.max_arena {
            if arena.get() > max {
                return false;
            }
        }
        if let Some(min) = self.min_wave {
            if wave < min {
                return false;
            }
        }
        true
    }
}

/// Ordered table of all enemy archetypes.
///
/// Table order is load-bearing: it defines [`ArchetypeId`] allocation and the
/// deterministic iteration order that breaks weighted-selection ties.
#[derive(Clone, Debug, Default)]
pub struct EnemyCatalog {
    entries: Vec<EnemyArchetype>,
}

impl EnemyCatalog {
    /// Creates a catalog from an ordered list of archetypes.
    #[must_use]
    pub fn new(entries: Vec<EnemyArchetype>) -> Self {
        Self { entries }
    }

    /// The built-in Reefkeep roster.
    #[must_use]
    pub fn standard() -> Self {
        Self::new(vec![
            EnemyArchetype::new("grunt", 10.0, 2.0, None, None, None, false),
            EnemyArchetype::new("minnow", 8.0, 0.8, None, Some(5), None, false),
            EnemyArchetype::new("shellback", 6.0, 4.0, Some(2), None, None, false),
            EnemyArchetype::new("lurker", 5.0, 4.5, Some(3), None, Some(2), false),
            EnemyArchetype::new("darter", 6.0, 4.0, Some(4), None, None, false),
            EnemyArchetype::new("splitter", 4.0, 5.5, Some(5), None, None, false),
            EnemyArchetype::new("blinker", 4.0, 6.0, Some(6), None, None, false),
            EnemyArchetype::new("mauler", 2.0, 9.0, Some(3), None, Some(3), false),
            // Retired archetype kept for old balance payloads; weight zero.
            EnemyArchetype::new("husk", 0.0, 1.5, None, None, None, false),
            EnemyArchetype::new("spawnling", 3.0, 1.0, None, None, None, true),
        ])
    }

    /// Looks up an archetype by identifier.
    #[must_use]
    pub fn get(&self, id: ArchetypeId) -> Option<&EnemyArchetype> {
        self.entries.get(id.get() as usize)
    }

    /// Resolves a slug to its identifier.
    #[must_use]
    pub fn by_slug(&self, slug: &str) -> Option<ArchetypeId> {
        self.entries
            .iter()
            .position(|entry| entry.slug == slug)
            .map(|index| ArchetypeId::new(index as u32))
    }

    /// Iterates the catalog in table order.
    pub fn iter(&self) -> impl Iterator<Item = (ArchetypeId, &EnemyArchetype)> {
        self.entries
            .iter()
            .enumerate()
            .map(|(index, entry)| (ArchetypeId::new(index as u32), entry))
    }

    /// Number of archetypes in the catalog.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Reports whether the catalog holds no archetypes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
