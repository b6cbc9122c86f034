//! Run driver
//!
//! A `Session` owns one game, its tick clock, the best-score record and the store behind it.
//! It sequences Idle → Running → GameOver → (restart) → Running, feeds wall time through the
//! fixed-step clock, and commits a new record when a run ends.

use serde::Serialize;

use crate::highscore::BestScore;
use crate::persistence::ScoreStore;
use crate::sim::{
    Character, EntityArena, EntityId, Field, GameEvent, GamePhase, RunnerState, TargetState,
    TickClock,
};

/// A game mode the session can drive
pub trait Arcade {
    /// Discrete player input
    type Action;

    /// Store key for this mode's best score
    const STORAGE_KEY: &'static str;

    fn phase(&self) -> GamePhase;
    fn score(&self) -> u64;
    fn missed(&self) -> u32 {
        0
    }
    /// Fixed step length (ms)
    fn tick_ms(&self) -> u32;
    fn field(&self) -> Field;
    fn set_field(&mut self, field: Field);
    fn entities(&self) -> &EntityArena;
    fn character(&self) -> Option<CharacterView> {
        None
    }

    fn start(&mut self, events: &mut Vec<GameEvent>) -> bool;
    fn reset(&mut self);
    fn step(&mut self, events: &mut Vec<GameEvent>);
    /// Apply input immediately; false if ignored
    fn act(&mut self, action: Self::Action, events: &mut Vec<GameEvent>) -> bool;
}

/// Runner input: the single "activate" event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Jump;

impl Arcade for RunnerState {
    type Action = Jump;
    const STORAGE_KEY: &'static str = "runner_high_score";

    fn phase(&self) -> GamePhase {
        self.phase
    }

    fn score(&self) -> u64 {
        self.score
    }

    fn tick_ms(&self) -> u32 {
        self.tuning.tick_ms
    }

    fn field(&self) -> Field {
        self.field
    }

    fn set_field(&mut self, field: Field) {
        self.field = field;
    }

    fn entities(&self) -> &EntityArena {
        &self.obstacles
    }

    fn character(&self) -> Option<CharacterView> {
        Some(CharacterView::new(&self.character, self))
    }

    fn start(&mut self, events: &mut Vec<GameEvent>) -> bool {
        RunnerState::start(self, events)
    }

    fn reset(&mut self) {
        RunnerState::reset(self)
    }

    fn step(&mut self, events: &mut Vec<GameEvent>) {
        self.tick(events)
    }

    fn act(&mut self, _action: Jump, _events: &mut Vec<GameEvent>) -> bool {
        self.jump()
    }
}

impl Arcade for TargetState {
    /// Tap on the target with this ID
    type Action = EntityId;
    const STORAGE_KEY: &'static str = "target_high_score";

    fn phase(&self) -> GamePhase {
        self.phase
    }

    fn score(&self) -> u64 {
        self.score
    }

    fn missed(&self) -> u32 {
        self.missed
    }

    fn tick_ms(&self) -> u32 {
        self.tuning.tick_ms
    }

    fn field(&self) -> Field {
        self.field
    }

    fn set_field(&mut self, field: Field) {
        self.field = field;
    }

    fn entities(&self) -> &EntityArena {
        &self.targets
    }

    fn start(&mut self, events: &mut Vec<GameEvent>) -> bool {
        TargetState::start(self, events)
    }

    fn reset(&mut self) {
        TargetState::reset(self)
    }

    fn step(&mut self, events: &mut Vec<GameEvent>) {
        let dt = self.tuning.tick_ms;
        TargetState::step(self, dt, events)
    }

    fn act(&mut self, id: EntityId, events: &mut Vec<GameEvent>) -> bool {
        self.tap(id, events)
    }
}

/// Entity as seen by the presentation layer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntityView {
    pub id: EntityId,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// Runner character as seen by the presentation layer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CharacterView {
    pub x: f32,
    /// Height above the ground
    pub y: f32,
    pub size: f32,
}

impl CharacterView {
    fn new(character: &Character, runner: &RunnerState) -> Self {
        Self {
            x: runner.tuning.character_x,
            y: character.y,
            size: runner.tuning.character_size,
        }
    }
}

/// Read-only view of a session after a tick
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub phase: GamePhase,
    pub score: u64,
    pub missed: u32,
    pub high_score: u64,
    pub field: Field,
    pub character: Option<CharacterView>,
    pub entities: Vec<EntityView>,
}

pub struct Session<A: Arcade, S: ScoreStore> {
    game: A,
    clock: TickClock,
    best: BestScore,
    store: S,
    events: Vec<GameEvent>,
}

impl<A: Arcade, S: ScoreStore> Session<A, S> {
    /// Wrap a game; reads the best score from `store` once
    pub fn new(game: A, store: S) -> Self {
        let best = BestScore::load(&store, A::STORAGE_KEY);
        let clock = TickClock::new(game.tick_ms());
        Self {
            game,
            clock,
            best,
            store,
            events: Vec::new(),
        }
    }

    pub fn game(&self) -> &A {
        &self.game
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn phase(&self) -> GamePhase {
        self.game.phase()
    }

    pub fn high_score(&self) -> u64 {
        self.best.get()
    }

    /// Presentation measured (or re-measured) the play field
    pub fn set_field(&mut self, field: Field) {
        self.game.set_field(field);
    }

    /// Idle → Running
    pub fn start(&mut self) -> bool {
        if !self.game.start(&mut self.events) {
            return false;
        }
        self.clock.start();
        true
    }

    /// GameOver → Idle. Clears score, misses, entities and difficulty.
    pub fn reset(&mut self) -> bool {
        if self.game.phase() != GamePhase::GameOver {
            return false;
        }
        self.clock.stop();
        self.game.reset();
        true
    }

    /// GameOver → Idle → Running in one go
    pub fn restart(&mut self) -> bool {
        self.reset() && self.start()
    }

    /// Player input; ignored outside Running
    pub fn act(&mut self, action: A::Action) -> bool {
        if self.game.phase() != GamePhase::Running {
            return false;
        }
        self.game.act(action, &mut self.events)
    }

    /// Feed elapsed wall time; runs whatever ticks are due. Returns the number run.
    pub fn advance(&mut self, elapsed_ms: u32) -> u32 {
        let due = self.clock.advance(elapsed_ms);
        let mut ran = 0;
        for _ in 0..due.count {
            if !self.clock.is_current(due.generation) {
                break;
            }
            self.game.step(&mut self.events);
            ran += 1;
            if self.game.phase() == GamePhase::GameOver {
                self.finish_run();
            }
        }
        ran
    }

    /// Events since the last drain, in order
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            phase: self.game.phase(),
            score: self.game.score(),
            missed: self.game.missed(),
            high_score: self.best.get(),
            field: self.game.field(),
            character: self.game.character(),
            entities: self
                .game
                .entities()
                .iter()
                .map(|e| EntityView {
                    id: e.id,
                    x: e.pos.x,
                    y: e.pos.y,
                    width: e.size.x,
                    height: e.size.y,
                })
                .collect(),
        }
    }

    /// Stop the clock and commit a new record if the run earned one
    fn finish_run(&mut self) {
        let score = self.game.score();
        log::debug!("Run over after {} ticks, score {}", self.clock.elapsed_ticks(), score);
        self.clock.stop();
        let Some(previous) = self.best.submit(score) else {
            return;
        };
        log::info!("New best score {} (was {})", score, previous);
        self.events.push(GameEvent::NewBest { score, previous });
        if let Err(e) = self.best.save(&mut self.store, A::STORAGE_KEY) {
            log::warn!("Failed to persist best score: {}", e);
        }
    }
}
