//! Browser bindings
//!
//! Thin wasm-bindgen wrappers so a JS/DOM presentation layer can drive a session from
//! `requestAnimationFrame` and render the JSON snapshot.

use wasm_bindgen::prelude::*;

use crate::persistence::{LocalStorageStore, MemoryStore, ScoreStore};
use crate::session::{Jump, Session};
use crate::sim::{EntityId, Field, RunnerState, TargetState};
use crate::tuning::Tuning;

/// LocalStorage when available, otherwise an in-memory fallback (private browsing)
fn open_store() -> Box<dyn ScoreStore> {
    match LocalStorageStore::new() {
        Ok(store) => Box::new(store),
        Err(e) => {
            log::warn!("{}; best score will not persist", e);
            Box::new(MemoryStore::new())
        }
    }
}

fn parse_tuning(json: Option<String>) -> Tuning {
    json.and_then(|json| match Tuning::from_json(&json) {
        Ok(tuning) => Some(tuning),
        Err(e) => {
            log::warn!("Bad tuning JSON ({}), using defaults", e);
            None
        }
    })
    .unwrap_or_default()
}

/// Module init: panic hook and console logging
#[wasm_bindgen(start)]
pub fn wasm_start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    log::info!("Dash Tap core loaded");
}

fn to_json<T: serde::Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|e| {
        log::error!("Snapshot encoding failed: {}", e);
        String::from("{}")
    })
}

#[wasm_bindgen]
pub struct WebRunner {
    session: Session<RunnerState, Box<dyn ScoreStore>>,
}

#[wasm_bindgen]
impl WebRunner {
    #[wasm_bindgen(constructor)]
    pub fn new(width: f32, height: f32, tuning_json: Option<String>) -> WebRunner {
        let tuning = parse_tuning(tuning_json);
        let game = RunnerState::new(tuning.runner).with_field(Field::new(width, height));
        WebRunner {
            session: Session::new(game, open_store()),
        }
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.session.set_field(Field::new(width, height));
    }

    pub fn start(&mut self) -> bool {
        self.session.start()
    }

    pub fn restart(&mut self) -> bool {
        self.session.restart()
    }

    pub fn jump(&mut self) -> bool {
        self.session.act(Jump)
    }

    /// Advance by a frame delta; returns ticks run
    pub fn frame(&mut self, elapsed_ms: f64) -> u32 {
        self.session.advance(elapsed_ms.max(0.0) as u32)
    }

    pub fn snapshot_json(&self) -> String {
        to_json(&self.session.snapshot())
    }

    pub fn events_json(&mut self) -> String {
        to_json(&self.session.drain_events())
    }
}

#[wasm_bindgen]
pub struct WebTarget {
    session: Session<TargetState, Box<dyn ScoreStore>>,
}

#[wasm_bindgen]
impl WebTarget {
    #[wasm_bindgen(constructor)]
    pub fn new(width: f32, height: f32, tuning_json: Option<String>) -> WebTarget {
        let tuning = parse_tuning(tuning_json);
        let game = TargetState::new(tuning.target).with_field(Field::new(width, height));
        WebTarget {
            session: Session::new(game, open_store()),
        }
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.session.set_field(Field::new(width, height));
    }

    pub fn start(&mut self) -> bool {
        self.session.start()
    }

    pub fn restart(&mut self) -> bool {
        self.session.restart()
    }

    pub fn tap(&mut self, id: u32) -> bool {
        self.session.act(EntityId(id))
    }

    pub fn frame(&mut self, elapsed_ms: f64) -> u32 {
        self.session.advance(elapsed_ms.max(0.0) as u32)
    }

    pub fn snapshot_json(&self) -> String {
        to_json(&self.session.snapshot())
    }

    pub fn events_json(&mut self) -> String {
        to_json(&self.session.drain_events())
    }
}
