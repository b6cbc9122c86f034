//! Best-score persistence
//!
//! The core only needs a tiny key-value contract: read a raw value, write an integer.
//! Backends:
//! - `MemoryStore`: in-process map (tests, headless runs)
//! - `JsonFileStore`: flat JSON object on disk (native)
//! - `LocalStorageStore`: browser LocalStorage (wasm32)

use std::collections::BTreeMap;

use thiserror::Error;

#[cfg(not(target_arch = "wasm32"))]
pub mod file;
#[cfg(target_arch = "wasm32")]
pub mod local_storage;

#[cfg(not(target_arch = "wasm32"))]
pub use file::JsonFileStore;
#[cfg(target_arch = "wasm32")]
pub use local_storage::LocalStorageStore;

/// Errors raised by storage backends
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("storage encoding failed: {0}")]
    Json(#[from] serde_json::Error),
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Key-value store holding best scores
pub trait ScoreStore {
    /// Raw stored value, if any. Callers must tolerate garbage.
    fn get(&self, key: &str) -> Option<String>;

    fn set(&mut self, key: &str, value: u64) -> Result<(), StoreError>;
}

impl<T: ScoreStore + ?Sized> ScoreStore for &mut T {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: u64) -> Result<(), StoreError> {
        (**self).set(key, value)
    }
}

impl<T: ScoreStore + ?Sized> ScoreStore for Box<T> {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: u64) -> Result<(), StoreError> {
        (**self).set(key, value)
    }
}

/// In-memory store
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: BTreeMap<String, String>,
    writes: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a raw value, bypassing `set` (simulates whatever another writer left behind)
    pub fn insert_raw(&mut self, key: &str, raw: &str) {
        self.values.insert(key.to_string(), raw.to_string());
    }

    /// Number of successful `set` calls
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl ScoreStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: u64) -> Result<(), StoreError> {
        self.values.insert(key.to_string(), value.to_string());
        self.writes += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_roundtrip() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get("k"), None);
        store.set("k", 12).unwrap();
        assert_eq!(store.get("k").as_deref(), Some("12"));
        assert_eq!(store.writes(), 1);
    }

    #[test]
    fn test_store_through_mut_ref() {
        fn write_three<S: ScoreStore>(mut store: S) {
            store.set("k", 3).unwrap();
        }
        let mut store = MemoryStore::new();
        write_three(&mut store);
        assert_eq!(store.get("k").as_deref(), Some("3"));
    }

    #[test]
    fn test_error_messages() {
        let err = StoreError::Unavailable("no window".into());
        assert_eq!(err.to_string(), "storage unavailable: no window");
    }
}
