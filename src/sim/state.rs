//! Shared run types: phase, play field and tick events

use serde::{Deserialize, Serialize};

use super::entity::EntityId;
use crate::consts::{FIELD_HEIGHT, FIELD_WIDTH};

/// Current phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// No entities, score 0, waiting for start
    #[default]
    Idle,
    /// Active gameplay: ticks, spawns and input are live
    Running,
    /// Run ended; nothing moves until restart
    GameOver,
}

/// Visible play field, measured by the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub width: f32,
    pub height: f32,
}

impl Default for Field {
    fn default() -> Self {
        Self {
            width: FIELD_WIDTH,
            height: FIELD_HEIGHT,
        }
    }
}

impl Field {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Layout has been measured (non-zero, finite)
    pub fn is_measured(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

/// Things that happened during a tick, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    Started,
    Spawned(EntityId),
    /// Left the field (runner)
    Despawned(EntityId),
    /// Consumed by the player (target game)
    Tapped(EntityId),
    /// Expired untapped (target game)
    Missed(EntityId),
    /// Character hit an obstacle (runner)
    Collided(EntityId),
    GameOver { score: u64 },
    /// Final score beat the stored best
    NewBest { score: u64, previous: u64 },
}
