use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use thiserror::Error;

/// Key under which the high score is stored
pub const HIGH_SCORE_KEY: &str = "snakeHighScore";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("high score storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("high score storage is malformed: {0}")]
    Format(#[from] serde_json::Error),
    #[error("stored high score is not a valid score: {0}")]
    InvalidValue(Value),
}

/// A single persisted high score.
///
/// Callers treat a failed `get` as "no previous high score" and drop failed
/// writes; the score is best-effort.
pub trait HighScoreStore: Send {
    fn get(&self) -> Result<u32, StoreError>;
    fn set(&mut self, score: u32) -> Result<(), StoreError>;
}

/// In-memory store. Clones share the same value.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    value: Arc<AtomicU32>,
}

impl MemoryStore {
    pub fn new(initial: u32) -> Self {
        Self {
            value: Arc::new(AtomicU32::new(initial)),
        }
    }
}

impl HighScoreStore for MemoryStore {
    fn get(&self) -> Result<u32, StoreError> {
        Ok(self.value.load(Ordering::Relaxed))
    }

    fn set(&mut self, score: u32) -> Result<(), StoreError> {
        self.value.store(score, Ordering::Relaxed);
        Ok(())
    }
}

/// Key-value JSON file holding the high score under [`HIGH_SCORE_KEY`].
///
/// Other keys in the file are preserved on write. A missing file reads as 0.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_map(&self) -> Result<Map<String, Value>, StoreError> {
        if !self.path.exists() {
            return Ok(Map::new());
        }
        let json = std::fs::read_to_string(&self.path)?;
        if json.trim().is_empty() {
            return Ok(Map::new());
        }
        Ok(serde_json::from_str(&json)?)
    }
}

impl HighScoreStore for JsonFileStore {
    fn get(&self) -> Result<u32, StoreError> {
        let map = self.read_map()?;
        match map.get(HIGH_SCORE_KEY) {
            None => Ok(0),
            Some(value) => value
                .as_u64()
                .and_then(|v| u32::try_from(v).ok())
                .ok_or_else(|| StoreError::InvalidValue(value.clone())),
        }
    }

    fn set(&mut self, score: u32) -> Result<(), StoreError> {
        // A corrupt file is overwritten rather than blocking new records
        let mut map = self.read_map().unwrap_or_default();
        map.insert(HIGH_SCORE_KEY.to_string(), Value::from(score));

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(&Value::Object(map))?;
        std::fs::write(&self.path, json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_memory_store_shares_value() {
        let store = MemoryStore::new(30);
        let mut handle = store.clone();

        handle.set(70).unwrap();
        assert_eq!(store.get().unwrap(), 70);
    }

    #[test]
    fn test_missing_file_reads_zero() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path().join("scores.json"));
        assert_eq!(store.get().unwrap(), 0);
    }

    #[test]
    fn test_file_store_persists() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("scores.json");

        let mut store = JsonFileStore::new(&path);
        store.set(120).unwrap();

        let reopened = JsonFileStore::new(&path);
        assert_eq!(reopened.get().unwrap(), 120);

        let raw: Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw[HIGH_SCORE_KEY], 120);
    }

    #[test]
    fn test_other_keys_preserved() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("scores.json");
        std::fs::write(&path, r#"{"theme": "dark", "snakeHighScore": 10}"#).unwrap();

        let mut store = JsonFileStore::new(&path);
        store.set(40).unwrap();

        let raw: Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw["theme"], "dark");
        assert_eq!(raw[HIGH_SCORE_KEY], 40);
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("scores.json");
        std::fs::write(&path, "{ not json").unwrap();

        let store = JsonFileStore::new(&path);
        assert!(matches!(store.get(), Err(StoreError::Format(_))));
    }

    #[test]
    fn test_invalid_value_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("scores.json");
        std::fs::write(&path, r#"{"snakeHighScore": "lots"}"#).unwrap();

        let store = JsonFileStore::new(&path);
        assert!(matches!(store.get(), Err(StoreError::InvalidValue(_))));
    }

    #[test]
    fn test_corrupt_file_is_overwritten_on_set() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("scores.json");
        std::fs::write(&path, "garbage").unwrap();

        let mut store = JsonFileStore::new(&path);
        store.set(5).unwrap();
        assert_eq!(store.get().unwrap(), 5);
    }
}
