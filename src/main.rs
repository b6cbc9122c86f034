//! Dash Tap headless driver
//!
//! Plays both modes with a simple bot at simulated 60 FPS and logs the outcome. Useful for
//! balance work: point `DASH_TAP_TUNING` at a tuning JSON file and watch the runs.
//!
//! Environment:
//! - `DASH_TAP_TUNING`: path to a tuning JSON file (optional)
//! - `DASH_TAP_SCORES`: path to the best-score file (default `dash_tap_scores.json`)
//! - `RUST_LOG`: log filter (default `info`)

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::collections::HashMap;

    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg32;

    use dash_tap::persistence::{JsonFileStore, ScoreStore};
    use dash_tap::session::Jump;
    use dash_tap::sim::{EntityArena, EntityId, GameEvent, GamePhase};
    use dash_tap::{RunnerState, Session, TargetState, Tuning};

    /// Simulated frame length (ms)
    const FRAME_MS: u32 = 16;
    /// Give up on a run after this much simulated time
    const MAX_RUN_MS: u64 = 5 * 60 * 1000;

    fn load_tuning() -> Tuning {
        let Ok(path) = std::env::var("DASH_TAP_TUNING") else {
            return Tuning::default();
        };
        match std::fs::read_to_string(&path) {
            Ok(json) => Tuning::from_json(&json).unwrap_or_else(|e| {
                log::warn!("Bad tuning file {} ({}), using defaults", path, e);
                Tuning::default()
            }),
            Err(e) => {
                log::warn!("Cannot read tuning file {} ({}), using defaults", path, e);
                Tuning::default()
            }
        }
    }

    fn log_events(mode: &str, events: &[GameEvent]) {
        for event in events {
            match event {
                GameEvent::GameOver { score } => log::info!("[{}] game over, score {}", mode, score),
                GameEvent::NewBest { score, previous } => {
                    log::info!("[{}] new best {} (previous {})", mode, score, previous)
                }
                other => log::trace!("[{}] {:?}", mode, other),
            }
        }
    }

    /// Jump when the nearest obstacle is about to reach the character
    fn play_runner<S: ScoreStore>(session: &mut Session<RunnerState, S>) {
        session.start();
        let mut elapsed = 0u64;
        while session.phase() == GamePhase::Running && elapsed < MAX_RUN_MS {
            let game = session.game();
            let reach = game.tuning.character_x + game.tuning.character_size + game.speed * 12.0;
            let threatened = game
                .obstacles
                .iter()
                .any(|o| o.pos.x > game.tuning.character_x && o.pos.x < reach);
            if threatened && game.character.is_grounded() {
                session.act(Jump);
            }
            session.advance(FRAME_MS);
            elapsed += FRAME_MS as u64;
            log_events("runner", &session.drain_events());
        }
        let snap = session.snapshot();
        log::info!(
            "[runner] finished {:?} after {}s: score {}, best {}",
            snap.phase,
            elapsed / 1000,
            snap.score,
            snap.high_score
        );
    }

    /// Drop reaction times for targets that expired before the bot got to them
    fn forget_gone(reactions: &mut HashMap<EntityId, u64>, targets: &EntityArena) {
        reactions.retain(|id, _| targets.contains(*id));
    }

    /// Tap each target after a random reaction time; sometimes too slow
    fn play_target<S: ScoreStore>(session: &mut Session<TargetState, S>) {
        session.start();
        let seed = session.game().seed();
        log::info!("[target] seed {}", seed);
        let mut rng = Pcg32::seed_from_u64(seed.wrapping_add(1));
        let mut reactions: HashMap<EntityId, u64> = HashMap::new();
        let mut elapsed = 0u64;
        while session.phase() == GamePhase::Running && elapsed < MAX_RUN_MS {
            session.advance(FRAME_MS);
            elapsed += FRAME_MS as u64;

            let now = session.game().time_ms;
            forget_gone(&mut reactions, &session.game().targets);
            let mut due = Vec::new();
            for target in session.game().targets.iter() {
                let tap_at = *reactions
                    .entry(target.id)
                    .or_insert_with(|| target.created_at_ms + rng.random_range(300..1800));
                if now >= tap_at {
                    due.push(target.id);
                }
            }
            for id in due {
                session.act(id);
                reactions.remove(&id);
            }
            log_events("target", &session.drain_events());
        }
        let snap = session.snapshot();
        log::info!(
            "[target] finished {:?} after {}s: score {}, missed {}, best {}",
            snap.phase,
            elapsed / 1000,
            snap.score,
            snap.missed,
            snap.high_score
        );
    }

    pub fn run() {
        let tuning = load_tuning();
        let path =
            std::env::var("DASH_TAP_SCORES").unwrap_or_else(|_| "dash_tap_scores.json".into());
        let mut store = match JsonFileStore::open(&path) {
            Ok(store) => store,
            Err(e) => {
                log::error!("Cannot open score file {}: {}", path, e);
                return;
            }
        };
        log::info!("Best scores in {}", store.path().display());

        {
            let mut runner = Session::new(RunnerState::new(tuning.runner.clone()), &mut store);
            play_runner(&mut runner);
        }

        let mut target = Session::new(TargetState::new(tuning.target), &mut store);
        play_target(&mut target);
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use glam::Vec2;

        #[test]
        fn test_expired_targets_leave_reaction_map() {
            let mut targets = EntityArena::new();
            let kept = targets.spawn(Vec2::ZERO, Vec2::splat(50.0), 0, Some(1500));
            let expired = targets.spawn(Vec2::ZERO, Vec2::splat(50.0), 0, Some(1500));
            let mut reactions = HashMap::from([(kept, 400), (expired, 900)]);

            targets.remove(expired);
            forget_gone(&mut reactions, &targets);

            assert_eq!(reactions.len(), 1);
            assert!(reactions.contains_key(&kept));
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Dash Tap (headless) starting...");
    headless::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is `web::wasm_start`, this is just to satisfy the compiler
}
