//! Persisted key-value store
//!
//! The session layer only needs batched get/set/remove of string values, so
//! that is all the trait offers. `FileStore` keeps everything in one JSON
//! object on disk; `MemoryStore` lives and dies with the process.

use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;
use std::sync::Mutex as StdMutex;
use tokio::fs;
use tokio::sync::Mutex;

use crate::error::StoreError;

/// Durable string key-value storage
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read several keys at once, in order; absent keys yield `None`
    async fn get_many(&self, keys: &[&str]) -> Result<Vec<Option<String>>, StoreError>;

    /// Write several entries at once, overwriting existing values
    async fn set_many(&self, entries: &[(&str, &str)]) -> Result<(), StoreError>;

    /// Remove several keys at once; missing keys are ignored
    async fn remove_many(&self, keys: &[&str]) -> Result<(), StoreError>;
}

/// Store backed by a single JSON file
pub struct FileStore {
    path: PathBuf,
    // Serializes read-modify-write cycles within this process
    lock: Mutex<()>,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileStore {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    async fn read_map(&self) -> Result<BTreeMap<String, String>, StoreError> {
        match fs::read_to_string(&self.path).await {
            Ok(content) if content.trim().is_empty() => Ok(BTreeMap::new()),
            Ok(content) => Ok(serde_json::from_str(&content)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    /// Write through a temp file so a crash never leaves half a file behind
    async fn write_map(&self, map: &BTreeMap<String, String>) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }

        let content = serde_json::to_string_pretty(map)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, content).await?;
        fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}

#[async_trait]
impl KeyValueStore for FileStore {
    async fn get_many(&self, keys: &[&str]) -> Result<Vec<Option<String>>, StoreError> {
        let _guard = self.lock.lock().await;
        let map = self.read_map().await?;
        Ok(keys.iter().map(|k| map.get(*k).cloned()).collect())
    }

    async fn set_many(&self, entries: &[(&str, &str)]) -> Result<(), StoreError> {
        let _guard = self.lock.lock().await;
        let mut map = self.read_map().await?;
        for (key, value) in entries {
            map.insert((*key).to_string(), (*value).to_string());
        }
        self.write_map(&map).await
    }

    async fn remove_many(&self, keys: &[&str]) -> Result<(), StoreError> {
        let _guard = self.lock.lock().await;
        let mut map = self.read_map().await?;
        let before = map.len();
        for key in keys {
            map.remove(*key);
        }
        if map.len() == before {
            return Ok(());
        }
        self.write_map(&map).await
    }
}

/// In-process store, used for tests and for runs without a data directory
#[derive(Default)]
pub struct MemoryStore {
    entries: StdMutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store pre-populated with the given entries
    pub fn with_entries(entries: &[(&str, &str)]) -> Self {
        let map = entries
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        MemoryStore {
            entries: StdMutex::new(map),
        }
    }

    /// Synchronous peek, handy for assertions
    pub fn get(&self, key: &str) -> Option<String> {
        self.entries
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(key)
            .cloned()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get_many(&self, keys: &[&str]) -> Result<Vec<Option<String>>, StoreError> {
        let entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        Ok(keys.iter().map(|k| entries.get(*k).cloned()).collect())
    }

    async fn set_many(&self, pairs: &[(&str, &str)]) -> Result<(), StoreError> {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        for (key, value) in pairs {
            entries.insert((*key).to_string(), (*value).to_string());
        }
        Ok(())
    }

    async fn remove_many(&self, keys: &[&str]) -> Result<(), StoreError> {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        for key in keys {
            entries.remove(*key);
        }
        Ok(())
    }
}
