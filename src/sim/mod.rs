//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering, storage or platform dependencies

pub mod clock;
pub mod collision;
pub mod difficulty;
pub mod entity;
pub mod physics;
pub mod runner;
pub mod state;
pub mod target;

pub use clock::TickClock;
pub use collision::{Rect, character_rect, first_collision, obstacle_rect};
pub use difficulty::{TargetDifficulty, runner_speed, target_difficulty};
pub use entity::{Entity, EntityArena, EntityId};
pub use physics::Character;
pub use runner::RunnerState;
pub use state::{Field, GameEvent, GamePhase};
pub use target::TargetState;
