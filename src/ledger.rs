use crate::errors::StoreError;
use crate::models::{DayKey, ProgressEntry, Task};
use crate::storage::KeyValueStore;
use crate::tracker::Tracker;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Progress bar colour band for a day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Empty,
    Danger,
    Warning,
    Complete,
}

pub fn summarize(day: &DayKey, tasks: &[Task], now: DateTime<Utc>) -> ProgressEntry {
    let total = tasks.len();
    let completed = tasks.iter().filter(|task| task.completed).count();
    let completion_rate = if total > 0 {
        completed as f64 / total as f64 * 100.0
    } else {
        0.0
    };

    ProgressEntry {
        date: day.clone(),
        total,
        completed,
        completion_rate,
        timestamp: now,
    }
}

impl ProgressEntry {
    /// Completion rounded to a whole percent, as shown on the page.
    pub fn percent(&self) -> u8 {
        self.completion_rate.round().clamp(0.0, 100.0) as u8
    }

    pub fn tier(&self) -> Tier {
        if self.total == 0 {
            return Tier::Empty;
        }
        match self.percent() {
            100 => Tier::Complete,
            70..=99 => Tier::Warning,
            _ => Tier::Danger,
        }
    }
}

impl<S: KeyValueStore> Tracker<S> {
    /// Rebuilds and stores the progress entry for `day` from its task list.
    pub fn recompute(&mut self, day: &DayKey) -> Result<ProgressEntry, StoreError> {
        self.recompute_at(day, Utc::now())
    }

    pub fn recompute_at(
        &mut self,
        day: &DayKey,
        now: DateTime<Utc>,
    ) -> Result<ProgressEntry, StoreError> {
        let tasks = self.list_tasks(day)?;
        let entry = summarize(day, &tasks, now);
        self.write_progress(&entry)?;
        Ok(entry)
    }

    /// `None` when nothing was ever recorded for `day`.
    pub fn progress(&self, day: &DayKey) -> Result<Option<ProgressEntry>, StoreError> {
        self.read_record(&day.progress_key())
    }
}
