//! Dash Tap - real-time arcade simulation core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, physics, collisions, difficulty)
//! - `session`: Run state machine driver, best-score tracking, render snapshots
//! - `persistence`: Key-value stores for the best score
//! - `tuning`: Data-driven game balance

pub mod highscore;
pub mod persistence;
pub mod session;
pub mod sim;
pub mod tuning;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use highscore::BestScore;
pub use persistence::{MemoryStore, ScoreStore, StoreError};
pub use session::{Arcade, Session, Snapshot};
pub use sim::{GameEvent, GamePhase, RunnerState, TargetState};
pub use tuning::{RunnerTuning, TargetTuning, Tuning};

/// Game configuration constants
///
/// Reference values; `tuning` defaults are built from these.
pub mod consts {
    /// Runner tick length in milliseconds (~60 Hz)
    pub const TICK_MS: u32 = 16;
    /// Maximum ticks released per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Largest frame delta accepted by the clock (ms)
    pub const MAX_FRAME_MS: u32 = 250;

    /// Runner character
    pub const CHARACTER_X: f32 = 20.0;
    pub const CHARACTER_SIZE: f32 = 48.0;
    /// Runner obstacles
    pub const OBSTACLE_SIZE: f32 = 32.0;
    pub const OBSTACLE_SPAWN_MS: u32 = 2000;

    /// Runner physics (units per tick, y up from the ground)
    pub const GRAVITY: f32 = 0.6;
    pub const JUMP_VELOCITY: f32 = -12.0;

    /// Runner forward speed ramp (units per tick)
    pub const INITIAL_SPEED: f32 = 2.0;
    pub const SPEED_INCREMENT: f32 = 0.0005;

    /// Target spawn cadence (ms)
    pub const INITIAL_SPAWN_INTERVAL: u32 = 2000;
    pub const MIN_SPAWN_INTERVAL: u32 = 800;
    pub const SPAWN_DECREMENT: u32 = 50;

    /// Target lifetime (ms)
    pub const INITIAL_TARGET_DURATION: u32 = 1500;
    pub const MIN_TARGET_DURATION: u32 = 800;
    pub const DURATION_DECREMENT: u32 = 30;

    /// Score points per difficulty step in the target game
    pub const SCORE_STEP: u64 = 5;
    /// Misses tolerated before the target game ends
    pub const MAX_MISSES: u32 = 5;
    pub const TARGET_SIZE: f32 = 50.0;

    /// Default play field (matches the reference 448x320 container)
    pub const FIELD_WIDTH: f32 = 448.0;
    pub const FIELD_HEIGHT: f32 = 320.0;
}
