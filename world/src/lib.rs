#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative run state for the Reefkeep spawning engine.
//!
//! The world owns the wave/boss phase machine, the per-wave budget ledger,
//! and the boss-chase bookkeeping. Adapters submit [`Command`] values once
//! per rendered frame; the world mutates synchronously and broadcasts
//! [`Event`] values that systems and the entity layer consume. All timers
//! are frame counters so a scripted command sequence replays identically.

pub mod query;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use reefkeep_balance::{BalanceStore, Tuning};
use reefkeep_core::{
    ArenaId, BudgetLedger, Command, Event, GameTables, ModifierKind, SpawnDecision, WavePhase,
};
use reefkeep_system_wave_plan::{plan_wave, WavePlan};

const DEFAULT_RNG_SEED: u64 = 0x7ee1_a2b4_99d3_0c55;

const WAVE_INTRO_FRAMES: u32 = 360;
const WAVE_CLEAR_FRAMES: u32 = 270;
const BOSS_INTRO_FRAMES: u32 = 540;
const BOSS_DEFEATED_FRAMES: u32 = 180;
const BOSS_RETREAT_FRAMES: u32 = 60;
const ARENA_TRANSITION_FRAMES: u32 = 60;

/// Arena the campaign opens in.
const FIRST_ARENA: ArenaId = ArenaId::new(1);

#[derive(Debug)]
struct WaveExecution {
    plan: WavePlan,
    ledger: BudgetLedger,
    starved: bool,
}

#[derive(Clone, Copy, Debug)]
struct ChaseState {
    segment: u8,
    encounters: u8,
    persistent_health: Option<u32>,
}

/// Represents the authoritative Reefkeep run state.
#[derive(Debug)]
pub struct World {
    tables: GameTables,
    balance: BalanceStore,
    rng: ChaCha8Rng,
    arena: ArenaId,
    wave: u32,
    phase: WavePhase,
    phase_frames: u32,
    frame: u64,
    live_enemies: u32,
    boss_active: bool,
    completed: bool,
    exec: Option<WaveExecution>,
    chase: Option<ChaseState>,
    announced_modifiers: Vec<(ArenaId, ModifierKind)>,
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

impl World {
    /// Creates a world with the shipped tables and the default seed.
    #[must_use]
    pub fn new() -> Self {
        Self::with_seed(DEFAULT_RNG_SEED)
    }

    /// Creates a world with the shipped tables and an injected seed.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        let tables = GameTables::standard();
        let balance = BalanceStore::for_tables(&tables);
        Self::with_tables(tables, balance, seed)
    }

    /// Creates a world over explicit tables and balance store.
    #[must_use]
    pub fn with_tables(tables: GameTables, balance: BalanceStore, seed: u64) -> Self {
        let chase = initial_chase(&tables, FIRST_ARENA);
        Self {
            tables,
            balance,
            rng: ChaCha8Rng::seed_from_u64(seed),
            arena: FIRST_ARENA,
            wave: 1,
            phase: WavePhase::WaveIntro,
            phase_frames: 0,
            frame: 0,
            live_enemies: 0,
            boss_active: false,
            completed: false,
            exec: None,
            chase,
            announced_modifiers: Vec::new(),
        }
    }

    /// Read access to the live balance store for the tuner UI.
    #[must_use]
    pub fn balance(&self) -> &BalanceStore {
        &self.balance
    }

    /// Write access to the live balance store for the tuner UI.
    pub fn balance_mut(&mut self) -> &mut BalanceStore {
        &mut self.balance
    }

    /// The static table bundle this world runs on.
    #[must_use]
    pub fn tables(&self) -> &GameTables {
        &self.tables
    }

    fn set_phase(&mut self, next: WavePhase) {
        debug_assert!(
            self.phase.permits(next),
            "illegal phase transition {:?} -> {next:?}",
            self.phase
        );
        self.phase = next;
        self.phase_frames = 0;
    }

    fn tick(&mut self, out: &mut Vec<Event>) {
        self.frame += 1;
        out.push(Event::TimeAdvanced { frame: self.frame });

        match self.phase {
            WavePhase::WaveIntro => {
                self.phase_frames += 1;
                if self.phase_frames > WAVE_INTRO_FRAMES {
                    self.begin_wave(out);
                }
            }
            WavePhase::WaveActive => self.check_wave_complete(out),
            WavePhase::WaveClear => {
                self.phase_frames += 1;
                if self.phase_frames > WAVE_CLEAR_FRAMES {
                    self.advance_after_clear();
                }
            }
            WavePhase::BossIntro => {
                self.phase_frames += 1;
                if self.phase_frames > BOSS_INTRO_FRAMES {
                    self.summon_boss(out);
                }
            }
            WavePhase::BossActive => {}
            WavePhase::BossRetreat => {
                self.phase_frames += 1;
                if self.phase_frames >= BOSS_RETREAT_FRAMES {
                    self.complete_retreat(out);
                }
            }
            WavePhase::BossDefeated => {
                self.phase_frames += 1;
                if self.phase_frames > BOSS_DEFEATED_FRAMES {
                    self.set_phase(WavePhase::ArenaTransition);
                }
            }
            WavePhase::ArenaTransition => {
                if self.completed {
                    return;
                }
                self.phase_frames += 1;
                if self.phase_frames > ARENA_TRANSITION_FRAMES {
                    self.advance_arena(out);
                }
            }
        }
    }

    fn begin_wave(&mut self, out: &mut Vec<Event>) {
        let tuning = Tuning::new(&self.tables, &self.balance);
        let plan = plan_wave(&tuning, self.arena, self.wave, &mut self.rng);

        if let Some(kind) = plan.modifier {
            let key = (self.arena, kind);
            if !self.announced_modifiers.contains(&key) {
                self.announced_modifiers.push(key);
                if let Some(definition) = tuning.modifier(kind) {
                    out.push(Event::ModifierAnnounced {
                        modifier: kind,
                        announcement: definition.announcement(),
                    });
                }
            }
        }

        tracing::info!(
            arena = self.arena.get(),
            wave = self.wave,
            kind = ?plan.kind,
            budget = plan.budget_total,
            cognitive_max = plan.cognitive_max,
            modifier = ?plan.modifier,
            "wave started"
        );
        out.push(Event::WaveStarted {
            arena: self.arena,
            wave: self.wave,
            kind: plan.kind,
            budget_total: plan.budget_total,
            cognitive_max: plan.cognitive_max,
            modifier: plan.modifier,
        });

        self.exec = Some(WaveExecution {
            ledger: BudgetLedger::new(plan.budget_total, plan.cognitive_max),
            plan,
            starved: false,
        });
        self.set_phase(WavePhase::WaveActive);
    }

    fn commit_spawn(&mut self, decision: SpawnDecision, out: &mut Vec<Event>) {
        if self.phase != WavePhase::WaveActive {
            return;
        }
        let tuning = Tuning::new(&self.tables, &self.balance);
        let cost = tuning.threat_cost(decision.archetype);
        let Some(exec) = self.exec.as_mut() else {
            return;
        };
        let total = cost.unit_cost().saturating_mul(decision.count);
        let cognitive_total = cost.cognitive.saturating_mul(decision.count);
        if total > exec.ledger.budget_remaining()
            || exec.ledger.cognitive_used() + cognitive_total > exec.ledger.cognitive_max()
        {
            // Stale proposal raced a balance edit; drop it rather than
            // overdraw the wave.
            return;
        }
        exec.ledger.commit(cost.unit_cost(), cost.cognitive, decision.count);
        self.live_enemies += decision.count;
        out.push(Event::EnemiesSpawned {
            archetype: decision.archetype,
            count: decision.count,
            school: decision.school,
        });
        self.check_wave_complete(out);
    }

    fn exhaust_budget(&mut self, out: &mut Vec<Event>) {
        if self.phase != WavePhase::WaveActive {
            return;
        }
        let Some(exec) = self.exec.as_mut() else {
            return;
        };
        if !exec.ledger.is_exhausted() {
            let budget_remaining = exec.ledger.budget_remaining();
            exec.ledger.exhaust();
            if !exec.starved {
                exec.starved = true;
                tracing::warn!(
                    arena = self.arena.get(),
                    wave = self.wave,
                    budget_remaining,
                    cognitive_used = exec.ledger.cognitive_used(),
                    cognitive_max = exec.ledger.cognitive_max(),
                    "no affordable enemy; zeroing wave budget"
                );
                out.push(Event::SpawnStarved { budget_remaining });
            }
        }
        self.check_wave_complete(out);
    }

    fn check_wave_complete(&mut self, out: &mut Vec<Event>) {
        if self.phase != WavePhase::WaveActive {
            return;
        }
        let exhausted = self
            .exec
            .as_ref()
            .map_or(false, |exec| exec.ledger.is_exhausted());
        if exhausted && self.live_enemies == 0 && !self.boss_active {
            tracing::info!(arena = self.arena.get(), wave = self.wave, "wave cleared");
            out.push(Event::WaveCleared {
                arena: self.arena,
                wave: self.wave,
            });
            self.exec = None;
            self.set_phase(WavePhase::WaveClear);
        }
    }

    fn advance_after_clear(&mut self) {
        if self.boss_should_return() {
            self.set_phase(WavePhase::BossIntro);
            return;
        }
        let max_waves = self.tables.arenas.max_waves(self.arena);
        if self.wave >= max_waves {
            self.set_phase(WavePhase::BossIntro);
        } else {
            self.wave += 1;
            self.set_phase(WavePhase::WaveIntro);
        }
    }

    fn boss_should_return(&self) -> bool {
        let Some(config) = self
            .tables
            .arenas
            .get(self.arena)
            .and_then(|arena| arena.chase())
        else {
            return false;
        };
        let Some(state) = self.chase.as_ref() else {
            return false;
        };
        if state.encounters >= config.max_encounters() {
            return false;
        }
        self.wave >= config.segment_wave_target(state.segment)
    }

    fn summon_boss(&mut self, out: &mut Vec<Event>) {
        self.boss_active = true;
        let encounter = self.chase.as_ref().map_or(1, |state| state.encounters + 1);
        let persistent_health = self.chase.as_ref().and_then(|state| state.persistent_health);
        tracing::info!(
            arena = self.arena.get(),
            encounter,
            persistent_health,
            "boss summoned"
        );
        out.push(Event::BossSummoned {
            arena: self.arena,
            encounter,
            persistent_health,
        });
        self.set_phase(WavePhase::BossActive);
    }

    fn retreat_boss(&mut self, remaining_health: u32) {
        if self.phase != WavePhase::BossActive {
            return;
        }
        let allowed = match (
            self.chase.as_ref(),
            self.tables
                .arenas
                .get(self.arena)
                .and_then(|arena| arena.chase()),
        ) {
            // The final configured encounter fights to the death.
            (Some(state), Some(config)) => state.encounters + 1 < config.max_encounters(),
            _ => false,
        };
        if !allowed {
            tracing::warn!(
                arena = self.arena.get(),
                "boss retreat requested outside chase flow; ignoring"
            );
            return;
        }
        if let Some(state) = self.chase.as_mut() {
            state.persistent_health = Some(remaining_health);
        }
        self.set_phase(WavePhase::BossRetreat);
    }

    fn complete_retreat(&mut self, out: &mut Vec<Event>) {
        self.boss_active = false;
        if let Some(state) = self.chase.as_mut() {
            state.segment += 1;
            state.encounters += 1;
            tracing::info!(
                arena = self.arena.get(),
                segment = state.segment,
                encounters = state.encounters,
                persistent_health = state.persistent_health,
                "boss retreat complete"
            );
            out.push(Event::BossRetreated {
                segment: state.segment,
                encounters: state.encounters,
            });
        }
        self.wave += 1;
        self.set_phase(WavePhase::WaveIntro);
    }

    fn record_boss_defeat(&mut self, out: &mut Vec<Event>) {
        if self.phase != WavePhase::BossActive {
            return;
        }
        self.boss_active = false;
        tracing::info!(arena = self.arena.get(), "boss defeated");
        out.push(Event::BossDefeated { arena: self.arena });
        self.set_phase(WavePhase::BossDefeated);
    }

    fn advance_arena(&mut self, out: &mut Vec<Event>) {
        if self.tables.arenas.last_arena() == Some(self.arena) {
            self.completed = true;
            tracing::info!("run completed");
            out.push(Event::RunCompleted);
            return;
        }
        let from = self.arena;
        self.arena = self.arena.next();
        self.wave = 1;
        self.exec = None;
        self.chase = initial_chase(&self.tables, self.arena);
        tracing::info!(from = from.get(), to = self.arena.get(), "arena transition");
        out.push(Event::ArenaTransitioned {
            from,
            to: self.arena,
        });
        self.set_phase(WavePhase::WaveIntro);
    }

    fn start_run(&mut self, arena: ArenaId, out: &mut Vec<Event>) {
        self.arena = arena;
        self.wave = 1;
        self.phase = WavePhase::WaveIntro;
        self.phase_frames = 0;
        self.live_enemies = 0;
        self.boss_active = false;
        self.completed = false;
        self.exec = None;
        self.chase = initial_chase(&self.tables, arena);
        self.announced_modifiers.clear();
        tracing::info!(arena = arena.get(), "run started");
        out.push(Event::RunStarted { arena });
    }

    pub(crate) fn phase_value(&self) -> WavePhase {
        self.phase
    }

    pub(crate) fn arena_value(&self) -> ArenaId {
        self.arena
    }

    pub(crate) fn wave_value(&self) -> u32 {
        self.wave
    }

    pub(crate) fn frame_value(&self) -> u64 {
        self.frame
    }

    pub(crate) fn live_enemies_value(&self) -> u32 {
        self.live_enemies
    }

    pub(crate) fn boss_active_value(&self) -> bool {
        self.boss_active
    }

    pub(crate) fn execution(&self) -> Option<(&WavePlan, BudgetLedger)> {
        self.exec.as_ref().map(|exec| (&exec.plan, exec.ledger))
    }

    pub(crate) fn chase_progress(&self) -> Option<(u8, u8, Option<u32>)> {
        self.chase
            .map(|state| (state.segment, state.encounters, state.persistent_health))
    }
}

fn initial_chase(tables: &GameTables, arena: ArenaId) -> Option<ChaseState> {
    tables
        .arenas
        .get(arena)
        .and_then(|config| config.chase())
        .map(|_| ChaseState {
            segment: 1,
            encounters: 0,
            persistent_health: None,
        })
}

/// Applies a single command to the world, appending resulting events.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::Tick => world.tick(out_events),
        Command::StartRun { arena } => world.start_run(arena, out_events),
        Command::SpawnEnemies { decision } => world.commit_spawn(decision, out_events),
        Command::ExhaustSpawnBudget => world.exhaust_budget(out_events),
        Command::RecordEnemyDefeat => {
            world.live_enemies = world.live_enemies.saturating_sub(1);
            world.check_wave_complete(out_events);
        }
        Command::RecordBossDefeat => world.record_boss_defeat(out_events),
        Command::RetreatBoss { remaining_health } => world.retreat_boss(remaining_health),
    }
}
