//! Target mode: tap targets before they expire
//!
//! Targets carry their own deadline; expiry is reaped inside the step, so a target removed by a
//! tap can never be counted as a miss later. Order within a step:
//! spawn → reap expired → termination → difficulty.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::difficulty::{TargetDifficulty, target_difficulty};
use super::entity::{EntityArena, EntityId};
use super::state::{Field, GameEvent, GamePhase};
use crate::tuning::TargetTuning;

/// Complete target-game run state
#[derive(Debug, Clone)]
pub struct TargetState {
    pub tuning: TargetTuning,
    pub field: Field,
    pub phase: GamePhase,
    /// Successful taps this run
    pub score: u64,
    /// Targets that expired untapped this run
    pub missed: u32,
    pub difficulty: TargetDifficulty,
    pub targets: EntityArena,
    /// Run clock (ms)
    pub time_ms: u64,
    since_spawn_ms: u32,
    seed: u64,
    rng: Pcg32,
}

impl TargetState {
    pub fn new(tuning: TargetTuning) -> Self {
        let tuning = tuning.sanitized();
        let seed = tuning.seed.unwrap_or(0);
        Self {
            difficulty: TargetDifficulty::initial(&tuning),
            tuning,
            field: Field::default(),
            phase: GamePhase::Idle,
            score: 0,
            missed: 0,
            targets: EntityArena::new(),
            time_ms: 0,
            since_spawn_ms: 0,
            seed,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    pub fn with_field(mut self, field: Field) -> Self {
        self.field = field;
        self
    }

    /// Seed of the current (or last) run
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Idle → Running. Seeds the spawn RNG for this run.
    pub fn start(&mut self, events: &mut Vec<GameEvent>) -> bool {
        if self.phase != GamePhase::Idle {
            return false;
        }
        self.seed = self.tuning.seed.unwrap_or_else(rand::random);
        self.rng = Pcg32::seed_from_u64(self.seed);
        self.phase = GamePhase::Running;
        events.push(GameEvent::Started);
        log::info!("Target game started (seed {})", self.seed);
        true
    }

    /// Discard the run and return to Idle. Field and tuning survive.
    pub fn reset(&mut self) {
        *self = Self::new(self.tuning.clone()).with_field(self.field);
    }

    /// Consume a target. Absent IDs (already expired or tapped) are ignored.
    pub fn tap(&mut self, id: EntityId, events: &mut Vec<GameEvent>) -> bool {
        if self.phase != GamePhase::Running || self.targets.remove(id).is_none() {
            return false;
        }
        self.score += 1;
        events.push(GameEvent::Tapped(id));
        true
    }

    /// Advance the run clock by `dt_ms`
    pub fn step(&mut self, dt_ms: u32, events: &mut Vec<GameEvent>) {
        if self.phase != GamePhase::Running {
            return;
        }
        self.time_ms += dt_ms as u64;

        self.since_spawn_ms = self.since_spawn_ms.saturating_add(dt_ms);
        while self.since_spawn_ms >= self.difficulty.spawn_interval_ms {
            self.since_spawn_ms -= self.difficulty.spawn_interval_ms;
            // Back-date to the moment the cadence actually elapsed
            let spawned_at = self.time_ms - self.since_spawn_ms as u64;
            self.spawn_target(spawned_at, events);
        }

        let now = self.time_ms;
        for id in self.targets.drain_where(|t| t.is_expired(now)) {
            self.missed += 1;
            events.push(GameEvent::Missed(id));
            log::debug!("Target {:?} expired, {} missed", id, self.missed);
        }

        if self.missed > self.tuning.max_misses {
            self.phase = GamePhase::GameOver;
            events.push(GameEvent::GameOver { score: self.score });
            log::info!(
                "Target game over after {} misses, final score {}",
                self.missed,
                self.score
            );
            return;
        }

        self.difficulty = target_difficulty(self.score, &self.tuning);
    }

    fn spawn_target(&mut self, spawned_at: u64, events: &mut Vec<GameEvent>) {
        let size = self.tuning.target_size;
        let max_x = self.field.width - size;
        let max_y = self.field.height - size;
        if !self.field.is_measured() || max_x < 0.0 || max_y < 0.0 {
            log::debug!("Field too small for a target, skipping spawn");
            return;
        }
        let pos = Vec2::new(
            self.rng.random_range(0.0..=max_x).floor(),
            self.rng.random_range(0.0..=max_y).floor(),
        );
        let deadline = spawned_at + self.difficulty.target_duration_ms as u64;
        let id = self
            .targets
            .spawn(pos, Vec2::splat(size), spawned_at, Some(deadline));
        log::debug!("Spawned target {:?} at {:?}, expires t={}ms", id, pos, deadline);
        events.push(GameEvent::Spawned(id));
    }
}

impl Default for TargetState {
    fn default() -> Self {
        Self::new(TargetTuning::default())
    }
}
