//! Data-driven game balance
//!
//! Every knob defaults to the reference constants in [`crate::consts`]. A tuning file only
//! needs to name the fields it changes:
//!
//! ```
//! let tuning = dash_tap::Tuning::from_json(r#"{ "target": { "max_misses": 3 } }"#).unwrap();
//! assert_eq!(tuning.target.max_misses, 3);
//! assert_eq!(tuning.runner.gravity, 0.6);
//! ```

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// What happens to vertical velocity when the character is clamped at the ground
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum LandingRule {
    /// Clamp position only; velocity keeps accumulating (reference behavior)
    #[default]
    KeepVelocity,
    /// Clamp position and zero the velocity on the tick the clamp engages
    ResetVelocity,
}

/// Runner (jump over obstacles) balance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunnerTuning {
    /// Main tick length (ms)
    pub tick_ms: u32,
    /// Obstacle spawn cadence (ms), independent of the tick
    pub spawn_interval_ms: u32,
    pub character_x: f32,
    pub character_size: f32,
    pub obstacle_size: f32,
    pub gravity: f32,
    pub jump_velocity: f32,
    /// Jumping while airborne is allowed (reference behavior)
    pub air_jumps: bool,
    pub landing: LandingRule,
    pub initial_speed: f32,
    pub speed_increment: f32,
}

impl Default for RunnerTuning {
    fn default() -> Self {
        Self {
            tick_ms: TICK_MS,
            spawn_interval_ms: OBSTACLE_SPAWN_MS,
            character_x: CHARACTER_X,
            character_size: CHARACTER_SIZE,
            obstacle_size: OBSTACLE_SIZE,
            gravity: GRAVITY,
            jump_velocity: JUMP_VELOCITY,
            air_jumps: true,
            landing: LandingRule::KeepVelocity,
            initial_speed: INITIAL_SPEED,
            speed_increment: SPEED_INCREMENT,
        }
    }
}

/// Target (tap the spawning target) balance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TargetTuning {
    /// Step length used by the session clock (ms)
    pub tick_ms: u32,
    pub initial_spawn_ms: u32,
    pub min_spawn_ms: u32,
    pub spawn_decrement_ms: u32,
    pub initial_duration_ms: u32,
    pub min_duration_ms: u32,
    pub duration_decrement_ms: u32,
    /// Score points per difficulty step
    pub score_step: u64,
    /// The run ends once misses exceed this
    pub max_misses: u32,
    pub target_size: f32,
    /// Fixed RNG seed; `None` draws a fresh one per run
    pub seed: Option<u64>,
}

impl Default for TargetTuning {
    fn default() -> Self {
        Self {
            tick_ms: TICK_MS,
            initial_spawn_ms: INITIAL_SPAWN_INTERVAL,
            min_spawn_ms: MIN_SPAWN_INTERVAL,
            spawn_decrement_ms: SPAWN_DECREMENT,
            initial_duration_ms: INITIAL_TARGET_DURATION,
            min_duration_ms: MIN_TARGET_DURATION,
            duration_decrement_ms: DURATION_DECREMENT,
            score_step: SCORE_STEP,
            max_misses: MAX_MISSES,
            target_size: TARGET_SIZE,
            seed: None,
        }
    }
}

/// Complete balance for both modes
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub runner: RunnerTuning,
    pub target: TargetTuning,
}

impl Tuning {
    /// Parse a (possibly partial) tuning document and sanitize it
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let tuning: Tuning = serde_json::from_str(json)?;
        Ok(tuning.sanitized())
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn sanitized(self) -> Self {
        Self {
            runner: self.runner.sanitized(),
            target: self.target.sanitized(),
        }
    }
}

/// Longest accepted tick or spawn cadence (ms)
pub const MAX_INTERVAL_MS: u32 = 10 * 60 * 1000;

/// Replace non-finite or negative values with a fallback
fn non_negative(value: f32, fallback: f32) -> f32 {
    if value.is_finite() && value >= 0.0 {
        value
    } else {
        fallback
    }
}

impl RunnerTuning {
    /// Clamp into a playable range: non-zero cadences, non-negative sizes and ramps
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        self.tick_ms = self.tick_ms.clamp(1, MAX_INTERVAL_MS);
        self.spawn_interval_ms = self.spawn_interval_ms.clamp(1, MAX_INTERVAL_MS);
        self.character_size = non_negative(self.character_size, defaults.character_size);
        self.obstacle_size = non_negative(self.obstacle_size, defaults.obstacle_size);
        self.initial_speed = non_negative(self.initial_speed, defaults.initial_speed);
        self.speed_increment = non_negative(self.speed_increment, defaults.speed_increment);
        if !self.character_x.is_finite() {
            self.character_x = defaults.character_x;
        }
        if !self.gravity.is_finite() {
            self.gravity = defaults.gravity;
        }
        if !self.jump_velocity.is_finite() {
            self.jump_velocity = defaults.jump_velocity;
        }
        self
    }
}

impl TargetTuning {
    /// Clamp into a playable range: `1 <= min <= initial <= MAX_INTERVAL_MS` for both ramps
    pub fn sanitized(mut self) -> Self {
        self.tick_ms = self.tick_ms.clamp(1, MAX_INTERVAL_MS);
        self.min_spawn_ms = self.min_spawn_ms.clamp(1, MAX_INTERVAL_MS);
        self.initial_spawn_ms = self.initial_spawn_ms.clamp(self.min_spawn_ms, MAX_INTERVAL_MS);
        self.min_duration_ms = self.min_duration_ms.clamp(1, MAX_INTERVAL_MS);
        self.initial_duration_ms = self
            .initial_duration_ms
            .clamp(self.min_duration_ms, MAX_INTERVAL_MS);
        self.score_step = self.score_step.max(1);
        self.target_size = non_negative(self.target_size, TARGET_SIZE);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_reference() {
        let tuning = Tuning::default();
        assert_eq!(tuning.runner.tick_ms, 16);
        assert_eq!(tuning.runner.spawn_interval_ms, 2000);
        assert_eq!(tuning.runner.jump_velocity, -12.0);
        assert_eq!(tuning.runner.landing, LandingRule::KeepVelocity);
        assert!(tuning.runner.air_jumps);
        assert_eq!(tuning.target.initial_spawn_ms, 2000);
        assert_eq!(tuning.target.min_duration_ms, 800);
        assert_eq!(tuning.target.max_misses, 5);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning =
            Tuning::from_json(r#"{ "runner": { "landing": "reset_velocity", "air_jumps": false } }"#)
                .unwrap();
        assert_eq!(tuning.runner.landing, LandingRule::ResetVelocity);
        assert!(!tuning.runner.air_jumps);
        assert_eq!(tuning.runner.gravity, GRAVITY);
        assert_eq!(tuning.target, TargetTuning::default());
    }

    #[test]
    fn test_sanitize_orders_bounds() {
        let tuning = Tuning::from_json(
            r#"{ "target": { "initial_spawn_ms": 500, "min_spawn_ms": 900, "min_duration_ms": 0, "score_step": 0 } }"#,
        )
        .unwrap();
        assert_eq!(tuning.target.min_spawn_ms, 900);
        assert_eq!(tuning.target.initial_spawn_ms, 900);
        assert_eq!(tuning.target.min_duration_ms, 1);
        assert_eq!(tuning.target.score_step, 1);
    }

    #[test]
    fn test_sanitize_rejects_negative_sizes() {
        let runner = RunnerTuning {
            obstacle_size: -4.0,
            speed_increment: f32::NAN,
            tick_ms: 0,
            ..Default::default()
        }
        .sanitized();
        assert_eq!(runner.obstacle_size, OBSTACLE_SIZE);
        assert_eq!(runner.speed_increment, SPEED_INCREMENT);
        assert_eq!(runner.tick_ms, 1);
    }

    #[test]
    fn test_sanitize_caps_huge_intervals() {
        let tuning = Tuning::from_json(&format!(
            r#"{{ "runner": {{ "spawn_interval_ms": {max}, "tick_ms": {max} }},
                 "target": {{ "initial_spawn_ms": {max}, "min_spawn_ms": {max}, "initial_duration_ms": {max} }} }}"#,
            max = u32::MAX
        ))
        .unwrap();
        assert_eq!(tuning.runner.spawn_interval_ms, MAX_INTERVAL_MS);
        assert_eq!(tuning.runner.tick_ms, MAX_INTERVAL_MS);
        assert_eq!(tuning.target.min_spawn_ms, MAX_INTERVAL_MS);
        assert_eq!(tuning.target.initial_spawn_ms, MAX_INTERVAL_MS);
        assert_eq!(tuning.target.initial_duration_ms, MAX_INTERVAL_MS);
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        assert!(Tuning::from_json("{ runner: ").is_err());
    }

    #[test]
    fn test_json_roundtrip_preserves_seed() {
        let mut tuning = Tuning::default();
        tuning.target.seed = Some(42);
        let json = tuning.to_json().unwrap();
        assert_eq!(Tuning::from_json(&json).unwrap(), tuning);
    }
}
