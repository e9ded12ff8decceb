use crate::errors::StoreError;
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, path::Path};
use tokio::fs;
use tracing::{debug, error};

/// Synchronous string-keyed store the tracker persists into.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: String) -> Result<(), StoreError>;
    fn remove(&mut self, key: &str) -> Option<String>;
    fn keys(&self) -> Vec<String>;
}

/// In-memory store with an optional byte quota, snapshotted to disk by the server.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LocalStorage {
    entries: BTreeMap<String, String>,
    #[serde(skip)]
    quota: Option<usize>,
}

impl LocalStorage {
    pub const DEFAULT_QUOTA: usize = 5 * 1024 * 1024;

    pub fn with_quota(quota: usize) -> Self {
        Self {
            entries: BTreeMap::new(),
            quota: Some(quota),
        }
    }

    pub fn set_quota(&mut self, quota: Option<usize>) {
        self.quota = quota;
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Bytes in use, counting keys and values.
    pub fn usage(&self) -> usize {
        self.entries
            .iter()
            .map(|(key, value)| key.len() + value.len())
            .sum()
    }
}

impl KeyValueStore for LocalStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), StoreError> {
        if let Some(limit) = self.quota {
            let replaced = self
                .entries
                .get(key)
                .map(|old| key.len() + old.len())
                .unwrap_or(0);
            let needed = self.usage() - replaced + key.len() + value.len();
            if needed > limit {
                return Err(StoreError::QuotaExceeded {
                    key: key.to_string(),
                    needed,
                    limit,
                });
            }
        }
        self.entries.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Option<String> {
        self.entries.remove(key)
    }

    fn keys(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }
}

pub async fn load_data(path: &Path) -> LocalStorage {
    match fs::read(path).await {
        Ok(bytes) => match serde_json::from_slice::<LocalStorage>(&bytes) {
            Ok(data) => {
                debug!(entries = data.len(), "loaded data file");
                data
            }
            Err(err) => {
                error!("failed to parse data file: {err}");
                LocalStorage::default()
            }
        },
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => LocalStorage::default(),
        Err(err) => {
            error!("failed to read data file: {err}");
            LocalStorage::default()
        }
    }
}

pub async fn persist_data(path: &Path, data: &LocalStorage) -> Result<(), StoreError> {
    let payload = serde_json::to_vec_pretty(data)?;
    fs::write(path, payload).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(tag: &str) -> std::path::PathBuf {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        std::env::temp_dir().join(format!(
            "daily_tracker_{tag}_{}_{nanos}.json",
            std::process::id()
        ))
    }

    #[test]
    fn set_overwrites_and_remove_returns_old_value() {
        let mut storage = LocalStorage::default();
        storage.set("a", "1".to_string()).unwrap();
        storage.set("a", "2".to_string()).unwrap();
        assert_eq!(storage.get("a").as_deref(), Some("2"));
        assert_eq!(storage.remove("a").as_deref(), Some("2"));
        assert!(storage.is_empty());
    }

    #[test]
    fn quota_rejects_write_without_changing_state() {
        let mut storage = LocalStorage::with_quota(10);
        storage.set("k", "12345".to_string()).unwrap();
        let err = storage.set("other", "123456".to_string()).unwrap_err();
        assert!(matches!(err, StoreError::QuotaExceeded { limit: 10, .. }));
        assert_eq!(storage.keys(), vec!["k".to_string()]);

        // replacing an entry only counts the difference
        storage.set("k", "123456789".to_string()).unwrap();
        assert_eq!(storage.usage(), 10);
    }

    #[tokio::test]
    async fn persist_then_load_restores_entries() {
        let path = temp_path("roundtrip");
        let mut storage = LocalStorage::default();
        storage.set("tasks_x", "[]".to_string()).unwrap();
        persist_data(&path, &storage).await.unwrap();

        let loaded = load_data(&path).await;
        assert_eq!(loaded.get("tasks_x").as_deref(), Some("[]"));
        let _ = std::fs::remove_file(&path);
    }

    #[tokio::test]
    async fn load_missing_or_corrupt_file_starts_empty() {
        let missing = temp_path("missing");
        assert!(load_data(&missing).await.is_empty());

        let corrupt = temp_path("corrupt");
        std::fs::write(&corrupt, b"{not json").unwrap();
        assert!(load_data(&corrupt).await.is_empty());
        let _ = std::fs::remove_file(&corrupt);
    }
}
