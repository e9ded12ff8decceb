use crate::ledger::Tier;
use chrono::{DateTime, Local, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const TASKS_PREFIX: &str = "tasks_";
pub const PROGRESS_PREFIX: &str = "progress_";

/// Identifies one calendar day in local time, e.g. `Mon Oct 19 2026`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DayKey(String);

impl DayKey {
    const FORMAT: &'static str = "%a %b %d %Y";

    pub fn from_date(date: NaiveDate) -> Self {
        Self(date.format(Self::FORMAT).to_string())
    }

    pub fn today() -> Self {
        Self::from_date(Local::now().date_naive())
    }

    /// Accepts either an ISO date (`2026-10-19`) or the key form itself.
    pub fn parse(input: &str) -> Option<Self> {
        let input = input.trim();
        NaiveDate::parse_from_str(input, "%Y-%m-%d")
            .or_else(|_| NaiveDate::parse_from_str(input, Self::FORMAT))
            .ok()
            .map(Self::from_date)
    }

    pub fn date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.0, Self::FORMAT).ok()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn tasks_key(&self) -> String {
        format!("{TASKS_PREFIX}{}", self.0)
    }

    pub fn progress_key(&self) -> String {
        format!("{PROGRESS_PREFIX}{}", self.0)
    }
}

impl fmt::Display for DayKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: u64,
    pub text: String,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressEntry {
    pub date: DayKey,
    pub total: usize,
    pub completed: usize,
    pub completion_rate: f64,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct AddTaskRequest {
    pub text: String,
    pub date: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct DateQuery {
    pub date: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct CalendarQuery {
    pub year: Option<i32>,
    pub month: Option<u32>,
    pub offset: Option<i32>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DayView {
    pub date: DayKey,
    pub tasks: Vec<Task>,
    pub progress: Option<ProgressEntry>,
    pub percent: u8,
    pub tier: Tier,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ImportResponse {
    pub imported: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MotivationResponse {
    pub quote: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn day_key_matches_date_string_format() {
        let date = NaiveDate::from_ymd_opt(2026, 10, 5).unwrap();
        let key = DayKey::from_date(date);
        assert_eq!(key.as_str(), "Mon Oct 05 2026");
        assert_eq!(key.tasks_key(), "tasks_Mon Oct 05 2026");
        assert_eq!(key.progress_key(), "progress_Mon Oct 05 2026");
        assert_eq!(key.date(), Some(date));
    }

    #[test]
    fn day_key_parses_iso_and_key_form() {
        let iso = DayKey::parse("2026-10-19").unwrap();
        let native = DayKey::parse(" Mon Oct 19 2026 ").unwrap();
        assert_eq!(iso, native);
        assert!(DayKey::parse("yesterday").is_none());
    }

    #[test]
    fn task_uses_camel_case_fields() {
        let raw = r#"{"id":1760870400000,"text":"run","completed":true,"createdAt":"2026-10-19T10:00:00.000Z"}"#;
        let task: Task = serde_json::from_str(raw).unwrap();
        assert_eq!(task.id, 1_760_870_400_000);
        assert!(task.completed);

        let json = serde_json::to_value(&task).unwrap();
        assert!(json.get("createdAt").is_some());
    }
}
