use crate::errors::StoreError;
use crate::models::{PROGRESS_PREFIX, TASKS_PREFIX};
use crate::storage::KeyValueStore;
use crate::tracker::Tracker;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use tracing::{error, info, warn};

fn is_tracker_key(key: &str) -> bool {
    key.starts_with(TASKS_PREFIX) || key.starts_with(PROGRESS_PREFIX)
}

impl<S: KeyValueStore> Tracker<S> {
    /// Serializes every task list and progress entry as `{ key: raw value }`.
    pub fn export(&self) -> Result<String, StoreError> {
        let snapshot: BTreeMap<String, String> = self
            .storage
            .keys()
            .into_iter()
            .filter(|key| is_tracker_key(key))
            .filter_map(|key| self.storage.get(&key).map(|value| (key, value)))
            .collect();

        Ok(serde_json::to_string_pretty(&snapshot)?)
    }

    /// Writes every key of `snapshot` verbatim over the current storage.
    ///
    /// Returns `Ok(false)` and leaves storage untouched when the snapshot is
    /// not a JSON object. Values are not checked against the record shapes.
    /// A rejected write undoes the keys already written and returns the error.
    pub fn import(&mut self, snapshot: &str) -> Result<bool, StoreError> {
        let entries: Map<String, Value> = match serde_json::from_str(snapshot) {
            Ok(entries) => entries,
            Err(err) => {
                error!("error importing data: {err}");
                return Ok(false);
            }
        };

        let mut written: Vec<(String, Option<String>)> = Vec::with_capacity(entries.len());
        for (key, value) in entries {
            let raw = match value {
                Value::String(raw) => raw,
                other => other.to_string(),
            };
            let previous = self.storage.get(&key);
            if let Err(err) = self.storage.set(&key, raw) {
                self.undo_import(written);
                return Err(err);
            }
            written.push((key, previous));
        }

        info!(keys = written.len(), "imported snapshot");
        Ok(true)
    }

    fn undo_import(&mut self, written: Vec<(String, Option<String>)>) {
        for (key, previous) in written.into_iter().rev() {
            match previous {
                Some(raw) => {
                    if let Err(err) = self.storage.set(&key, raw) {
                        warn!(key = %key, "failed to roll back import: {err}");
                    }
                }
                None => {
                    self.storage.remove(&key);
                }
            }
        }
    }
}
