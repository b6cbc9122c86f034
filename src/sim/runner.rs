//! Runner mode: jump over obstacles scrolling in from the right
//!
//! One call to [`RunnerState::tick`] is one fixed step. Order within a step:
//! spawn → move obstacles → integrate character → collision → score → difficulty.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::first_collision;
use super::difficulty::runner_speed;
use super::entity::{Entity, EntityArena};
use super::physics::Character;
use super::state::{Field, GameEvent, GamePhase};
use crate::tuning::RunnerTuning;

/// Complete runner run state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunnerState {
    pub tuning: RunnerTuning,
    pub field: Field,
    pub phase: GamePhase,
    /// Ticks survived this run
    pub score: u64,
    /// Current forward speed (units per tick)
    pub speed: f32,
    pub character: Character,
    pub obstacles: EntityArena,
    /// Run clock (ms)
    pub time_ms: u64,
    since_spawn_ms: u32,
}

impl RunnerState {
    pub fn new(tuning: RunnerTuning) -> Self {
        let tuning = tuning.sanitized();
        Self {
            speed: tuning.initial_speed,
            tuning,
            field: Field::default(),
            phase: GamePhase::Idle,
            score: 0,
            character: Character::at_rest(),
            obstacles: EntityArena::new(),
            time_ms: 0,
            since_spawn_ms: 0,
        }
    }

    pub fn with_field(mut self, field: Field) -> Self {
        self.field = field;
        self
    }

    /// Idle → Running
    pub fn start(&mut self, events: &mut Vec<GameEvent>) -> bool {
        if self.phase != GamePhase::Idle {
            return false;
        }
        self.phase = GamePhase::Running;
        events.push(GameEvent::Started);
        log::info!("Runner started (field {}x{})", self.field.width, self.field.height);
        true
    }

    /// Discard the run and return to Idle. Field and tuning survive.
    pub fn reset(&mut self) {
        *self = Self::new(self.tuning.clone()).with_field(self.field);
    }

    /// Jump input; ignored outside Running
    pub fn jump(&mut self) -> bool {
        self.phase == GamePhase::Running && self.character.jump(&self.tuning)
    }

    /// Advance one fixed step
    pub fn tick(&mut self, events: &mut Vec<GameEvent>) {
        if self.phase != GamePhase::Running {
            return;
        }

        let tick_ms = self.tuning.tick_ms;
        self.time_ms += tick_ms as u64;

        // Spawn on its own cadence
        self.since_spawn_ms = self.since_spawn_ms.saturating_add(tick_ms);
        while self.since_spawn_ms >= self.tuning.spawn_interval_ms {
            self.since_spawn_ms -= self.tuning.spawn_interval_ms;
            self.spawn_obstacle(events);
        }

        // Move obstacles and drop the ones that left the field
        for obstacle in self.obstacles.iter_mut() {
            obstacle.pos.x -= self.speed;
        }
        for id in self.obstacles.drain_where(Entity::is_off_field) {
            events.push(GameEvent::Despawned(id));
        }

        self.character.integrate(self.tuning.gravity, self.tuning.landing);

        if let Some(hit) = first_collision(
            &self.character,
            &self.obstacles,
            self.field.height,
            &self.tuning,
        ) {
            self.phase = GamePhase::GameOver;
            events.push(GameEvent::Collided(hit));
            events.push(GameEvent::GameOver { score: self.score });
            log::info!("Runner hit obstacle {:?}, final score {}", hit, self.score);
            return;
        }

        self.score += 1;
        self.speed = runner_speed(self.score, &self.tuning);
    }

    fn spawn_obstacle(&mut self, events: &mut Vec<GameEvent>) {
        if !self.field.is_measured() {
            log::debug!("Field not measured, skipping obstacle spawn");
            return;
        }
        let size = Vec2::splat(self.tuning.obstacle_size);
        let id = self
            .obstacles
            .spawn(Vec2::new(self.field.width, 0.0), size, self.time_ms, None);
        log::debug!("Spawned obstacle {:?} at t={}ms", id, self.time_ms);
        events.push(GameEvent::Spawned(id));
    }
}

impl Default for RunnerState {
    fn default() -> Self {
        Self::new(RunnerTuning::default())
    }
}
