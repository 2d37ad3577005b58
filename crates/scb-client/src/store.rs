//! Persisted last-update records for index staleness checks.
//!
//! One JSON map on disk, keys shaped `index-last-update-time--<type>`,
//! values RFC 3339 timestamps. A missing or corrupt file degrades to an
//! empty map; the scheduler then treats every index as stale.

use std::collections::HashMap;
use std::io;
use std::path::PathBuf;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::warn;

#[async_trait]
pub trait UpdateTimeStore: Send + Sync {
    async fn last_update(&self, key: &str) -> Option<String>;
    async fn set_last_update(&self, key: &str, value: &str) -> io::Result<()>;
}

pub struct FileUpdateTimeStore {
    path: PathBuf,
    cache: Mutex<Option<HashMap<String, String>>>,
}

impl FileUpdateTimeStore {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            cache: Mutex::new(None),
        }
    }

    pub fn default_path() -> PathBuf {
        scb_util::state_file_path("index-updates.json")
    }

    fn load(&self) -> HashMap<String, String> {
        let data = match std::fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return HashMap::new(),
            Err(e) => {
                warn!("failed to read {}: {e}", self.path.display());
                return HashMap::new();
            }
        };
        match serde_json::from_slice(&data) {
            Ok(map) => map,
            Err(e) => {
                warn!("failed to parse {}: {e}", self.path.display());
                HashMap::new()
            }
        }
    }
}

#[async_trait]
impl UpdateTimeStore for FileUpdateTimeStore {
    async fn last_update(&self, key: &str) -> Option<String> {
        let mut cache = self.cache.lock().await;
        let map = cache.get_or_insert_with(|| self.load());
        map.get(key).cloned()
    }

    async fn set_last_update(&self, key: &str, value: &str) -> io::Result<()> {
        let mut cache = self.cache.lock().await;
        let map = cache.get_or_insert_with(|| self.load());
        map.insert(key.to_string(), value.to_string());
        scb_util::write_json_atomic(&self.path, map)
    }
}

/// Volatile store for tests and hosts that opt out of persistence.
#[derive(Default)]
pub struct MemoryUpdateTimeStore {
    map: Mutex<HashMap<String, String>>,
}

#[async_trait]
impl UpdateTimeStore for MemoryUpdateTimeStore {
    async fn last_update(&self, key: &str) -> Option<String> {
        self.map.lock().await.get(key).cloned()
    }

    async fn set_last_update(&self, key: &str, value: &str) -> io::Result<()> {
        self.map.lock().await.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn file_store_round_trips_across_instances() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("index-updates.json");

        let store = FileUpdateTimeStore::new(path.clone());
        store
            .set_last_update("index-last-update-time--platform", "2026-08-30T10:00:00Z")
            .await
            .expect("set");

        let reopened = FileUpdateTimeStore::new(path);
        assert_eq!(
            reopened
                .last_update("index-last-update-time--platform")
                .await
                .as_deref(),
            Some("2026-08-30T10:00:00Z")
        );
        assert_eq!(
            reopened.last_update("index-last-update-time--library").await,
            None
        );
    }

    #[tokio::test]
    async fn corrupt_file_degrades_to_empty_map() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("index-updates.json");
        std::fs::write(&path, b"not json at all").expect("write");

        let store = FileUpdateTimeStore::new(path);
        assert_eq!(store.last_update("index-last-update-time--platform").await, None);
    }
}
