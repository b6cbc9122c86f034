//! Difficulty scaling
//!
//! Pure functions of the current score. Nothing here is stored; callers recompute each tick.

use serde::{Deserialize, Serialize};

use crate::tuning::{RunnerTuning, TargetTuning};

/// Runner forward speed (units per tick). Linear and unbounded above.
pub fn runner_speed(score: u64, tuning: &RunnerTuning) -> f32 {
    tuning.initial_speed + score as f32 * tuning.speed_increment
}

/// Target game cadence and lifetime for a given score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetDifficulty {
    pub spawn_interval_ms: u32,
    pub target_duration_ms: u32,
}

impl TargetDifficulty {
    pub fn initial(tuning: &TargetTuning) -> Self {
        target_difficulty(0, tuning)
    }
}

/// `max(min, initial - floor(score / step) * decrement)`, never above `initial`
fn stepped(score: u64, step: u64, initial: u32, min: u32, decrement: u32) -> u32 {
    let steps = score / step.max(1);
    let drop = steps.saturating_mul(decrement as u64);
    let value = (initial as u64).saturating_sub(drop);
    (value as u32).max(min).min(initial.max(min))
}

pub fn target_difficulty(score: u64, tuning: &TargetTuning) -> TargetDifficulty {
    TargetDifficulty {
        spawn_interval_ms: stepped(
            score,
            tuning.score_step,
            tuning.initial_spawn_ms,
            tuning.min_spawn_ms,
            tuning.spawn_decrement_ms,
        ),
        target_duration_ms: stepped(
            score,
            tuning.score_step,
            tuning.initial_duration_ms,
            tuning.min_duration_ms,
            tuning.duration_decrement_ms,
        ),
    }
}
