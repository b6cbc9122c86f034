//! Best-score record
//!
//! Read once from the store when a session opens; written back only when a run's final score
//! strictly beats it.

use serde::{Deserialize, Serialize};

use crate::persistence::{ScoreStore, StoreError};

/// The highest final score ever achieved for one mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BestScore {
    value: u64,
}

impl BestScore {
    pub fn new(value: u64) -> Self {
        Self { value }
    }

    pub fn get(&self) -> u64 {
        self.value
    }

    /// Interpret a raw stored value. Missing, negative or non-numeric reads as 0.
    pub fn parse(raw: Option<&str>) -> u64 {
        let Some(raw) = raw.map(str::trim) else {
            return 0;
        };
        if let Ok(value) = raw.parse::<u64>() {
            return value;
        }
        // Tolerate values written as floats ("12.0")
        match raw.parse::<f64>() {
            Ok(value) if value.is_finite() && value >= 0.0 => value.floor() as u64,
            _ => {
                log::warn!("Ignoring unreadable stored best score {:?}", raw);
                0
            }
        }
    }

    /// Load the record for `key`
    pub fn load<S: ScoreStore + ?Sized>(store: &S, key: &str) -> Self {
        let value = Self::parse(store.get(key).as_deref());
        log::info!("Best score for {}: {}", key, value);
        Self::new(value)
    }

    /// Offer a final score. Returns the previous record if this one beats it.
    pub fn submit(&mut self, score: u64) -> Option<u64> {
        if score > self.value {
            let previous = self.value;
            self.value = score;
            Some(previous)
        } else {
            None
        }
    }

    pub fn save<S: ScoreStore + ?Sized>(&self, store: &mut S, key: &str) -> Result<(), StoreError> {
        store.set(key, self.value)
    }
}
