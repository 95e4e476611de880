#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Live spawn pacing for active waves.
//!
//! The orchestrator consumes world events and a read-only wave snapshot each
//! frame and proposes spawn commands; the world remains the sole authority
//! over the ledger. Pacing is entirely frame-counted: intervals, bursts,
//! stress pauses, and micro-breathers all advance on [`Event::TimeAdvanced`]
//! and never read a wall clock, so a frame-scripted run replays identically.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use reefkeep_balance::Tuning;
use reefkeep_core::{Command, Event, ModifierKind, WavePhase, WaveSnapshot};
use reefkeep_system_allocation::pick_next;

/// Burst spawns add one or two extra picks on top of the paced one.
const BURST_EXTRA_MIN: u32 = 1;
const BURST_EXTRA_SPREAD: u32 = 2;

/// Corridor-constrained arenas halve burst probability.
const CORRIDOR_BURST_FACTOR: f64 = 0.5;

/// Configuration parameters required to construct the orchestrator.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    rng_seed: u64,
}

impl Config {
    /// Creates a new configuration using the provided seed.
    #[must_use]
    pub const fn new(rng_seed: u64) -> Self {
        Self { rng_seed }
    }
}

/// Frame-driven system that paces allocator picks during active waves.
#[derive(Debug)]
pub struct Orchestrator {
    rng: ChaCha8Rng,
    frames_since_spawn: u32,
    spawned_units: u32,
    breather_frames_left: u32,
    last_breather_at: u32,
    stress_paused: bool,
    starve_reported: bool,
}

impl Orchestrator {
    /// Creates a new orchestrator using the supplied configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(config.rng_seed),
            frames_since_spawn: 0,
            spawned_units: 0,
            breather_frames_left: 0,
            last_breather_at: 0,
            stress_paused: false,
            starve_reported: false,
        }
    }

    /// Whether spawning is currently paused by live-population stress.
    #[must_use]
    pub const fn stress_paused(&self) -> bool {
        self.stress_paused
    }

    /// Whether a micro-breather is currently holding spawns back.
    #[must_use]
    pub const fn in_micro_breather(&self) -> bool {
        self.breather_frames_left > 0
    }

    /// Consumes events and the wave snapshot to emit spawn commands.
    ///
    /// At most one paced spawn round happens per tick; a successful burst
    /// roll turns that round into two or three picks. When the allocator
    /// reports nothing affordable while budget remains, a single
    /// [`Command::ExhaustSpawnBudget`] is emitted for the wave.
    pub fn handle(
        &mut self,
        events: &[Event],
        snapshot: Option<&WaveSnapshot<'_>>,
        tuning: &Tuning<'_>,
        out: &mut Vec<Command>,
    ) {
        let mut ticked = false;
        for event in events {
            match event {
                Event::WaveStarted { .. } => self.reset_wave_counters(),
                Event::TimeAdvanced { .. } => ticked = true,
                _ => {}
            }
        }

        if !ticked {
            return;
        }
        let Some(snapshot) = snapshot else {
            return;
        };
        if snapshot.phase != WavePhase::WaveActive || snapshot.ledger.is_exhausted() {
            return;
        }

        if snapshot.live_enemies >= tuning.stress_pause_threshold() {
            self.stress_paused = true;
            return;
        }
        self.stress_paused = false;

        if self.breather_frames_left > 0 {
            self.breather_frames_left -= 1;
            return;
        }
        // Schools can jump the unit counter past an exact multiple, so the
        // trigger is a threshold rather than a modulus.
        let breather_every = tuning.micro_breather_interval();
        if self.spawned_units >= self.last_breather_at + breather_every {
            self.breather_frames_left = tuning.micro_breather_frames();
            self.last_breather_at = self.spawned_units;
            return;
        }

        self.frames_since_spawn += 1;
        let interval = self.spawn_interval(snapshot, tuning);
        if self.frames_since_spawn <= interval {
            return;
        }

        let attempts = self.roll_attempts(snapshot, tuning);
        let mut ledger = snapshot.ledger;
        for _ in 0..attempts {
            if ledger.is_exhausted() {
                break;
            }
            match pick_next(
                tuning,
                snapshot.arena,
                snapshot.wave,
                snapshot.pool,
                &mut ledger,
                &mut self.rng,
            ) {
                Some(decision) => {
                    self.spawned_units += decision.count;
                    out.push(Command::SpawnEnemies { decision });
                }
                None => {
                    if !self.starve_reported {
                        self.starve_reported = true;
                        out.push(Command::ExhaustSpawnBudget);
                    }
                    break;
                }
            }
        }
        self.frames_since_spawn = 0;
    }

    fn spawn_interval(&self, snapshot: &WaveSnapshot<'_>, tuning: &Tuning<'_>) -> u32 {
        let base = tuning.spawn_interval(snapshot.kind, snapshot.wave);
        let mult = snapshot
            .modifier
            .and_then(|kind| tuning.modifier(kind))
            .map_or(1.0, |modifier| modifier.interval_mult());
        (f64::from(base) * mult).round() as u32
    }

    fn roll_attempts(&mut self, snapshot: &WaveSnapshot<'_>, tuning: &Tuning<'_>) -> u32 {
        let mut chance = tuning.burst_chance(snapshot.kind, snapshot.wave);
        if snapshot.modifier == Some(ModifierKind::Breather) {
            chance = 0.0;
        }
        if tuning.corridor(snapshot.arena) {
            chance *= CORRIDOR_BURST_FACTOR;
        }
        if self.rng.gen::<f64>() < chance {
            BURST_EXTRA_MIN + 1 + self.rng.gen_range(0..BURST_EXTRA_SPREAD)
        } else {
            1
        }
    }

    fn reset_wave_counters(&mut self) {
        self.frames_since_spawn = 0;
        self.spawned_units = 0;
        self.breather_frames_left = 0;
        self.last_breather_at = 0;
        self.stress_paused = false;
        self.starve_reported = false;
    }
}

#[cfg(test)]
mod tests {
    use super::{Config, Orchestrator};
    use reefkeep_balance::{BalanceStore, Tuning};
    use reefkeep_core::{
        ArenaId, BudgetLedger, Command, Event, GameTables, WaveKind, WavePhase, WaveSnapshot,
    };

    fn tick_events() -> Vec<Event> {
        vec![Event::TimeAdvanced { frame: 1 }]
    }

    fn snapshot<'a>(
        pool: &'a [reefkeep_core::ArchetypeId],
        ledger: BudgetLedger,
        live: u32,
    ) -> WaveSnapshot<'a> {
        WaveSnapshot {
            phase: WavePhase::WaveActive,
            arena: ArenaId::new(1),
            wave: 1,
            kind: WaveKind::Lesson,
            modifier: None,
            pool,
            ledger,
            live_enemies: live,
            boss_active: false,
        }
    }

    #[test]
    fn no_spawns_before_the_interval_elapses() {
        let tables = GameTables::standard();
        let balance = BalanceStore::for_tables(&tables);
        let tuning = Tuning::new(&tables, &balance);
        let pool = vec![tables.catalog.by_slug("grunt").expect("grunt")];

        let mut orchestrator = Orchestrator::new(Config::new(7));
        let mut out = Vec::new();
        let snap = snapshot(&pool, BudgetLedger::new(500, 120), 0);
        // Lesson interval is 90 frames; nothing may fire within it.
        for _ in 0..90 {
            orchestrator.handle(&tick_events(), Some(&snap), &tuning, &mut out);
        }
        assert!(out.is_empty());
        orchestrator.handle(&tick_events(), Some(&snap), &tuning, &mut out);
        assert!(matches!(out[0], Command::SpawnEnemies { .. }));
    }

    #[test]
    fn stress_pauses_spawning_until_population_drops() {
        let tables = GameTables::standard();
        let balance = BalanceStore::for_tables(&tables);
        let tuning = Tuning::new(&tables, &balance);
        let pool = vec![tables.catalog.by_slug("grunt").expect("grunt")];

        let mut orchestrator = Orchestrator::new(Config::new(7));
        let mut out = Vec::new();
        let stressed = snapshot(&pool, BudgetLedger::new(500, 120), 18);
        for _ in 0..500 {
            orchestrator.handle(&tick_events(), Some(&stressed), &tuning, &mut out);
        }
        assert!(out.is_empty());
        assert!(orchestrator.stress_paused());

        // Population drops below the threshold and pacing resumes.
        let calm = snapshot(&pool, BudgetLedger::new(500, 120), 3);
        for _ in 0..200 {
            orchestrator.handle(&tick_events(), Some(&calm), &tuning, &mut out);
        }
        assert!(!orchestrator.stress_paused());
        assert!(!out.is_empty());
    }

    #[test]
    fn starvation_trips_the_safety_valve_once() {
        let tables = GameTables::standard();
        let balance = BalanceStore::for_tables(&tables);
        let tuning = Tuning::new(&tables, &balance);
        let pool = vec![tables.catalog.by_slug("grunt").expect("grunt")];

        let mut orchestrator = Orchestrator::new(Config::new(7));
        let mut out = Vec::new();
        // Budget remains but no grunt (cost 20) fits.
        let starved = snapshot(&pool, BudgetLedger::new(10, 120), 0);
        for _ in 0..2_000 {
            orchestrator.handle(&tick_events(), Some(&starved), &tuning, &mut out);
        }
        let trips = out
            .iter()
            .filter(|command| matches!(command, Command::ExhaustSpawnBudget))
            .count();
        assert_eq!(trips, 1);
    }

    #[test]
    fn exhausted_waves_stay_silent() {
        let tables = GameTables::standard();
        let balance = BalanceStore::for_tables(&tables);
        let tuning = Tuning::new(&tables, &balance);
        let pool = vec![tables.catalog.by_slug("grunt").expect("grunt")];

        let mut orchestrator = Orchestrator::new(Config::new(7));
        let mut out = Vec::new();
        let mut ledger = BudgetLedger::new(20, 120);
        ledger.exhaust();
        let done = snapshot(&pool, ledger, 0);
        for _ in 0..500 {
            orchestrator.handle(&tick_events(), Some(&done), &tuning, &mut out);
        }
        assert!(out.is_empty());
    }

    #[test]
    fn micro_breather_opens_a_gap_after_enough_spawns() {
        let tables = GameTables::standard();
        let balance = BalanceStore::for_tables(&tables);
        let tuning = Tuning::new(&tables, &balance);
        let pool = vec![tables.catalog.by_slug("minnow").expect("minnow")];

        let mut orchestrator = Orchestrator::new(Config::new(11));
        let snap = snapshot(&pool, BudgetLedger::new(5_000, 5_000), 0);
        let mut breather_seen = false;
        let mut out = Vec::new();
        for _ in 0..40_000 {
            orchestrator.handle(&tick_events(), Some(&snap), &tuning, &mut out);
            if orchestrator.in_micro_breather() {
                breather_seen = true;
                break;
            }
        }
        assert!(breather_seen, "micro-breather never engaged");
    }

    #[test]
    fn wave_start_resets_pacing_state() {
        let tables = GameTables::standard();
        let balance = BalanceStore::for_tables(&tables);
        let tuning = Tuning::new(&tables, &balance);
        let pool = vec![tables.catalog.by_slug("grunt").expect("grunt")];

        let mut orchestrator = Orchestrator::new(Config::new(7));
        let mut out = Vec::new();
        let starved = snapshot(&pool, BudgetLedger::new(10, 120), 0);
        for _ in 0..200 {
            orchestrator.handle(&tick_events(), Some(&starved), &tuning, &mut out);
        }
        assert_eq!(out.len(), 1);

        // A fresh wave may trip the valve again.
        let restart = vec![Event::WaveStarted {
            arena: ArenaId::new(1),
            wave: 2,
            kind: WaveKind::Integration,
            budget_total: 10,
            cognitive_max: 120,
            modifier: None,
        }];
        orchestrator.handle(&restart, None, &tuning, &mut out);
        for _ in 0..200 {
            orchestrator.handle(&tick_events(), Some(&starved), &tuning, &mut out);
        }
        let trips = out
            .iter()
            .filter(|command| matches!(command, Command::ExhaustSpawnBudget))
            .count();
        assert_eq!(trips, 2);
    }
}
