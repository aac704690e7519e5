//! Key-value persistence collaborator
//!
//! The builder persists its entire history under a single key as one JSON
//! value (load-modify-write, no incremental diff). Concurrent writers are
//! not coordinated; the storage layer is last-write-wins.

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::error::{Result, SearchError};

/// Asynchronous, fallible key-value store
#[async_trait]
pub trait KvStore: Send + Sync {
    /// Read the value stored under `key`, if any
    async fn get(&self, key: &str) -> Result<Option<Value>>;

    /// Store `value` under `key`, replacing any previous value
    async fn set(&self, key: &str, value: Value) -> Result<()>;
}

/// In-memory store used by tests and ephemeral sessions
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, Value>>,
}

impl MemoryStore {
    /// Create an empty in-memory store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KvStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<Value>> {
        Ok(self.entries.lock().get(key).cloned())
    }

    async fn set(&self, key: &str, value: Value) -> Result<()> {
        self.entries.lock().insert(key.to_string(), value);
        Ok(())
    }
}

/// Flat-file store holding a single JSON object
///
/// A missing file reads as an empty store; the parent directory is created
/// on first write.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Create a store backed by the given file path
    #[must_use]
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// The file path backing this store
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_map(&self) -> Result<Map<String, Value>> {
        let bytes = match fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Map::new()),
            Err(e) => return Err(e.into()),
        };

        match serde_json::from_slice::<Value>(&bytes)? {
            Value::Object(map) => Ok(map),
            other => Err(SearchError::storage(format!(
                "expected a JSON object in {}, found {}",
                self.path.display(),
                json_type_name(&other)
            ))),
        }
    }

    async fn write_map(&self, map: &Map<String, Value>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).await?;
        }
        let bytes = serde_json::to_vec_pretty(&Value::Object(map.clone()))?;
        fs::write(&self.path, bytes).await?;
        Ok(())
    }
}

#[async_trait]
impl KvStore for JsonFileStore {
    async fn get(&self, key: &str) -> Result<Option<Value>> {
        let map = self.read_map().await?;
        Ok(map.get(key).cloned())
    }

    async fn set(&self, key: &str, value: Value) -> Result<()> {
        let mut map = self.read_map().await?;
        map.insert(key.to_string(), value);
        self.write_map(&map).await
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_memory_store_roundtrip() {
        let store = MemoryStore::new();
        assert!(store.get("missing").await.unwrap().is_none());

        store.set("key", json!(["a", "b"])).await.unwrap();
        assert_eq!(store.get("key").await.unwrap(), Some(json!(["a", "b"])));

        store.set("key", json!([])).await.unwrap();
        assert_eq!(store.get("key").await.unwrap(), Some(json!([])));
    }

    #[tokio::test]
    async fn test_file_store_missing_file_reads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("history.json"));
        assert!(store.get("anything").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_file_store_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("nested").join("history.json"));

        store.set("alpha", json!({"n": 1})).await.unwrap();
        store.set("beta", json!("two")).await.unwrap();

        // Both keys survive the load-modify-write cycle
        assert_eq!(store.get("alpha").await.unwrap(), Some(json!({"n": 1})));
        assert_eq!(store.get("beta").await.unwrap(), Some(json!("two")));
    }

    #[tokio::test]
    async fn test_file_store_rejects_non_object() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.json");
        std::fs::write(&path, b"[1, 2, 3]").unwrap();

        let store = JsonFileStore::new(&path);
        let err = store.get("key").await.unwrap_err();
        assert!(err.to_string().contains("expected a JSON object"));
    }

    #[tokio::test]
    async fn test_file_store_last_write_wins() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.json");
        let first = JsonFileStore::new(&path);
        let second = JsonFileStore::new(&path);

        first.set("key", json!(1)).await.unwrap();
        second.set("key", json!(2)).await.unwrap();
        assert_eq!(first.get("key").await.unwrap(), Some(json!(2)));
    }
}
