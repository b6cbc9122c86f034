//! Browser LocalStorage store (wasm32)

use super::{ScoreStore, StoreError};

pub struct LocalStorageStore {
    storage: web_sys::Storage,
}

impl LocalStorageStore {
    pub fn new() -> Result<Self, StoreError> {
        let storage = web_sys::window()
            .ok_or_else(|| StoreError::Unavailable("no window".into()))?
            .local_storage()
            .map_err(|e| StoreError::Unavailable(format!("{:?}", e)))?
            .ok_or_else(|| StoreError::Unavailable("localStorage disabled".into()))?;
        Ok(Self { storage })
    }
}

impl ScoreStore for LocalStorageStore {
    fn get(&self, key: &str) -> Option<String> {
        self.storage.get_item(key).ok().flatten()
    }

    fn set(&mut self, key: &str, value: u64) -> Result<(), StoreError> {
        self.storage
            .set_item(key, &value.to_string())
            .map_err(|e| StoreError::Unavailable(format!("{:?}", e)))
    }
}
