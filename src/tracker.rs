use crate::errors::StoreError;
use crate::ledger::summarize;
use crate::models::{DayKey, ProgressEntry, Task};
use crate::storage::KeyValueStore;
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

/// Daily task lists and their progress ledger over one key-value store.
///
/// Every mutation rewrites the day's task list and then its progress entry,
/// so `progress_<day>` always describes `tasks_<day>`.
#[derive(Debug)]
pub struct Tracker<S> {
    pub(crate) storage: S,
    last_id: u64,
}

impl<S: KeyValueStore> Tracker<S> {
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            last_id: 0,
        }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Replaces the storage, returning the one it held.
    pub fn restore_storage(&mut self, storage: S) -> S {
        std::mem::replace(&mut self.storage, storage)
    }

    /// Tasks for `day` in creation order; empty when the day has none.
    pub fn list_tasks(&self, day: &DayKey) -> Result<Vec<Task>, StoreError> {
        Ok(self.read_record(&day.tasks_key())?.unwrap_or_default())
    }

    /// Returns `None` without touching storage when `text` is blank.
    pub fn add_task(&mut self, day: &DayKey, text: &str) -> Result<Option<Task>, StoreError> {
        self.add_task_at(day, text, Utc::now())
    }

    pub fn add_task_at(
        &mut self,
        day: &DayKey,
        text: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<Task>, StoreError> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(None);
        }

        let mut tasks = self.list_tasks(day)?;
        let task = Task {
            id: self.next_id(&tasks, now),
            text: text.to_string(),
            completed: false,
            created_at: now,
        };
        tasks.push(task.clone());
        self.save_tasks(day, &tasks, now)?;

        debug!(day = %day, id = task.id, "added task");
        Ok(Some(task))
    }

    /// Flips `completed` on the matching task; `None` when no task has `id`.
    pub fn toggle_task(&mut self, day: &DayKey, id: u64) -> Result<Option<Task>, StoreError> {
        self.toggle_task_at(day, id, Utc::now())
    }

    pub fn toggle_task_at(
        &mut self,
        day: &DayKey,
        id: u64,
        now: DateTime<Utc>,
    ) -> Result<Option<Task>, StoreError> {
        let mut tasks = self.list_tasks(day)?;
        let Some(task) = tasks.iter_mut().find(|task| task.id == id) else {
            return Ok(None);
        };
        task.completed = !task.completed;
        let toggled = task.clone();
        self.save_tasks(day, &tasks, now)?;

        debug!(day = %day, id, completed = toggled.completed, "toggled task");
        Ok(Some(toggled))
    }

    /// Removes the matching task; `None` when no task has `id`.
    pub fn delete_task(&mut self, day: &DayKey, id: u64) -> Result<Option<Task>, StoreError> {
        self.delete_task_at(day, id, Utc::now())
    }

    pub fn delete_task_at(
        &mut self,
        day: &DayKey,
        id: u64,
        now: DateTime<Utc>,
    ) -> Result<Option<Task>, StoreError> {
        let mut tasks = self.list_tasks(day)?;
        let Some(index) = tasks.iter().position(|task| task.id == id) else {
            return Ok(None);
        };
        let removed = tasks.remove(index);
        self.save_tasks(day, &tasks, now)?;

        debug!(day = %day, id, "deleted task");
        Ok(Some(removed))
    }

    pub(crate) fn read_record<T: DeserializeOwned>(
        &self,
        key: &str,
    ) -> Result<Option<T>, StoreError> {
        match self.storage.get(key) {
            Some(raw) => serde_json::from_str(&raw)
                .map(Some)
                .map_err(|err| StoreError::corrupt(key, err)),
            None => Ok(None),
        }
    }

    pub(crate) fn write_progress(&mut self, entry: &ProgressEntry) -> Result<(), StoreError> {
        let payload = serde_json::to_string(entry)?;
        self.storage.set(&entry.date.progress_key(), payload)
    }

    fn save_tasks(
        &mut self,
        day: &DayKey,
        tasks: &[Task],
        now: DateTime<Utc>,
    ) -> Result<ProgressEntry, StoreError> {
        let tasks_key = day.tasks_key();
        let previous = self.storage.get(&tasks_key);
        self.storage.set(&tasks_key, serde_json::to_string(tasks)?)?;

        let entry = summarize(day, tasks, now);
        if let Err(err) = self.write_progress(&entry) {
            // put the old list back so the ledger still describes it
            let restored = match previous {
                Some(raw) => self.storage.set(&tasks_key, raw),
                None => {
                    self.storage.remove(&tasks_key);
                    Ok(())
                }
            };
            if let Err(restore_err) = restored {
                warn!(day = %day, "failed to restore task list: {restore_err}");
            }
            return Err(err);
        }
        Ok(entry)
    }

    fn next_id(&mut self, tasks: &[Task], now: DateTime<Utc>) -> u64 {
        let millis = u64::try_from(now.timestamp_millis()).unwrap_or(0);
        let above_existing = tasks
            .iter()
            .map(|task| task.id.saturating_add(1))
            .max()
            .unwrap_or(0);
        let id = millis.max(self.last_id.saturating_add(1)).max(above_existing);
        self.last_id = id;
        id
    }
}
