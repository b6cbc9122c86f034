//! Runner character physics
//!
//! One-dimensional vertical motion with constant gravity. `y` is the height above the
//! ground and is clamped at zero.
//!
//! Note: with the default [`LandingRule::KeepVelocity`] the clamp only pins the position;
//! velocity keeps integrating while the character sits on the ground. This is the
//! reference behavior and is kept on purpose. `LandingRule::ResetVelocity` zeroes it.

use serde::{Deserialize, Serialize};

use crate::tuning::{LandingRule, RunnerTuning};

/// Ground level
pub const GROUND_Y: f32 = 0.0;

/// The player's character (x is fixed by tuning)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Character {
    /// Height above the ground
    pub y: f32,
    /// Vertical velocity (units per tick)
    pub vy: f32,
}

impl Character {
    pub fn at_rest() -> Self {
        Self::default()
    }

    pub fn is_grounded(&self) -> bool {
        self.y <= GROUND_Y
    }

    /// Apply one tick of gravity, then move and clamp at the ground
    pub fn integrate(&mut self, gravity: f32, landing: LandingRule) {
        self.vy += gravity;
        let next = self.y + self.vy;
        if next < GROUND_Y {
            self.y = GROUND_Y;
            if landing == LandingRule::ResetVelocity {
                self.vy = 0.0;
            }
        } else {
            self.y = next;
        }
    }

    /// Jump impulse. Returns false when a grounded-only rule rejects it.
    pub fn jump(&mut self, tuning: &RunnerTuning) -> bool {
        if !tuning.air_jumps && !self.is_grounded() {
            return false;
        }
        self.vy = tuning.jump_velocity;
        true
    }
}
