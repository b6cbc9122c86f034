//! JSON file store (native)
//!
//! A flat `{ "key": "value" }` object. Writes go to a sibling temp file first and are renamed
//! over the old file so a crash never leaves a half-written record.

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::{ScoreStore, StoreError};

#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl JsonFileStore {
    /// Open (or lazily create) the store at `path`. A corrupt file is treated as empty.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        let values = match fs::read_to_string(&path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(values) => values,
                Err(e) => {
                    log::warn!("Score file {} is corrupt ({}), starting fresh", path.display(), e);
                    BTreeMap::new()
                }
            },
            Err(e) if e.kind() == ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(e.into()),
        };
        log::info!("Opened score file {} ({} entries)", path.display(), values.len());
        Ok(Self { path, values })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(&self.values)?;
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)?;
        }
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl ScoreStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: u64) -> Result<(), StoreError> {
        self.values.insert(key.to_string(), value.to_string());
        self.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_path(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("dash-tap-{}-{}", name, std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        dir.join("scores.json")
    }

    #[test]
    fn test_missing_file_is_empty() {
        let path = scratch_path("missing");
        let store = JsonFileStore::open(&path).unwrap();
        assert_eq!(store.get("runner_high_score"), None);
        assert!(!path.exists());
    }

    #[test]
    fn test_set_persists_across_reopen() {
        let path = scratch_path("persist");
        let mut store = JsonFileStore::open(&path).unwrap();
        store.set("runner_high_score", 314).unwrap();
        store.set("target_high_score", 9).unwrap();

        let reopened = JsonFileStore::open(&path).unwrap();
        assert_eq!(reopened.get("runner_high_score").as_deref(), Some("314"));
        assert_eq!(reopened.get("target_high_score").as_deref(), Some("9"));
        assert!(!path.with_extension("tmp").exists());
    }

    #[test]
    fn test_corrupt_file_starts_fresh() {
        let path = scratch_path("corrupt");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "{ not json").unwrap();
        let mut store = JsonFileStore::open(&path).unwrap();
        assert_eq!(store.get("runner_high_score"), None);
        store.set("runner_high_score", 5).unwrap();
        assert_eq!(
            JsonFileStore::open(&path).unwrap().get("runner_high_score").as_deref(),
            Some("5")
        );
    }
}
