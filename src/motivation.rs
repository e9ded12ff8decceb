use crate::models::ProgressEntry;
use chrono::{DateTime, Local, TimeZone, Timelike};
use tracing::warn;

pub const QUOTES: [&str; 10] = [
    "Tomorrow is a chance to do better. Don't give up! ❄️",
    "Every small step counts. Keep pushing forward! 🌟",
    "The comeback is always stronger than the setback! 💪",
    "Winter teaches us that after every ending comes a new beginning! 🌨️",
    "You're closer than you were yesterday. Keep going! 🎯",
    "Great achievements require great dedication! ✨",
    "The journey of a thousand miles begins with a single step! 🚀",
    "Your future self is counting on you today! ⏰",
    "Champions are made when nobody's watching! 🏆",
    "The best time to plant a tree was 20 years ago. The second best time is now! 🌱",
];

/// Late in the day with unfinished tasks.
pub fn should_prompt<Tz: TimeZone>(
    now: &DateTime<Tz>,
    progress: Option<&ProgressEntry>,
    threshold_hour: u32,
) -> bool {
    let Some(entry) = progress else {
        return false;
    };
    now.hour() >= threshold_hour && entry.total > 0 && entry.percent() < 100
}

pub fn pick_quote() -> &'static str {
    let mut bytes = [0u8; 4];
    let index = match getrandom::fill(&mut bytes) {
        Ok(()) => u32::from_le_bytes(bytes) as usize % QUOTES.len(),
        Err(err) => {
            warn!("random source unavailable: {err}");
            0
        }
    };
    QUOTES[index]
}

/// The quote to show right now, if any.
pub fn prompt(progress: Option<&ProgressEntry>, threshold_hour: u32) -> Option<&'static str> {
    should_prompt(&Local::now(), progress, threshold_hour).then(pick_quote)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::summarize;
    use crate::models::Task;
    use crate::tracker::tests::{day, instant};
    use chrono::Utc;

    fn progress(done: &[bool]) -> ProgressEntry {
        let tasks: Vec<Task> = done
            .iter()
            .enumerate()
            .map(|(i, &completed)| Task {
                id: i as u64,
                text: format!("t{i}"),
                completed,
                created_at: instant(),
            })
            .collect();
        summarize(&day(19), &tasks, instant())
    }

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 19, hour, 5, 0).unwrap()
    }

    #[test]
    fn prompts_after_threshold_when_incomplete() {
        let entry = progress(&[true, false]);
        assert!(should_prompt(&at(22), Some(&entry), 22));
        assert!(should_prompt(&at(23), Some(&entry), 22));
        assert!(!should_prompt(&at(21), Some(&entry), 22));
    }

    #[test]
    fn complete_or_empty_days_are_not_prompted() {
        let done = progress(&[true, true, true]);
        assert_eq!(done.completion_rate, 100.0);
        assert!(!should_prompt(&at(23), Some(&done), 22));

        let empty = progress(&[]);
        assert!(!should_prompt(&at(23), Some(&empty), 22));
        assert!(!should_prompt(&at(23), None, 22));
    }

    #[test]
    fn picked_quote_is_from_the_list() {
        for _ in 0..20 {
            assert!(QUOTES.contains(&pick_quote()));
        }
    }
}
