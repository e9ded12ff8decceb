use crate::models::{DayKey, ProgressEntry};
use crate::storage::KeyValueStore;
use crate::tracker::Tracker;
use chrono::{Datelike, Local, NaiveDate};
use serde::Serialize;
use tracing::warn;

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Badge {
    None,
    Partial { percent: u8 },
    Complete,
}

impl Badge {
    pub fn for_entry(entry: Option<&ProgressEntry>) -> Self {
        match entry {
            Some(entry) if entry.completion_rate == 100.0 => Badge::Complete,
            Some(entry) if entry.total > 0 => Badge::Partial {
                percent: entry.percent(),
            },
            _ => Badge::None,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CalendarDay {
    pub day: u32,
    pub date: DayKey,
    pub is_today: bool,
    pub is_past: bool,
    pub badge: Badge,
}

#[derive(Debug, Serialize)]
pub struct MonthView {
    pub year: i32,
    pub month: u32,
    pub label: String,
    /// Empty cells before the 1st, weeks starting on Sunday.
    pub leading_blanks: u32,
    pub days: Vec<CalendarDay>,
}

/// Shifts a 1-based month by `delta`, wrapping across years.
///
/// `None` when `month` is outside `1..=12` or the result does not fit an `i32` year.
pub fn navigate_month(year: i32, month: u32, delta: i32) -> Option<(i32, u32)> {
    if !(1..=12).contains(&month) {
        return None;
    }
    let index = i64::from(year) * 12 + i64::from(month) - 1 + i64::from(delta);
    let year = i32::try_from(index.div_euclid(12)).ok()?;
    Some((year, index.rem_euclid(12) as u32 + 1))
}

pub fn month_view<S: KeyValueStore>(
    tracker: &Tracker<S>,
    year: i32,
    month: u32,
) -> Option<MonthView> {
    month_view_at(tracker, year, month, Local::now().date_naive())
}

/// `None` when `year`/`month` do not name a real month.
pub fn month_view_at<S: KeyValueStore>(
    tracker: &Tracker<S>,
    year: i32,
    month: u32,
    today: NaiveDate,
) -> Option<MonthView> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let (next_year, next_month) = navigate_month(year, month, 1)?;
    let days_in_month = NaiveDate::from_ymd_opt(next_year, next_month, 1)?
        .pred_opt()?
        .day();

    let days = (1..=days_in_month)
        .filter_map(|day| first.with_day(day))
        .map(|date| {
            let key = DayKey::from_date(date);
            let entry = match tracker.progress(&key) {
                Ok(entry) => entry,
                Err(err) => {
                    warn!(day = %key, "skipping unreadable progress entry: {err}");
                    None
                }
            };
            CalendarDay {
                day: date.day(),
                badge: Badge::for_entry(entry.as_ref()),
                date: key,
                is_today: date == today,
                is_past: date < today,
            }
        })
        .collect();

    Some(MonthView {
        year,
        month,
        label: format!("{} {year}", MONTH_NAMES[month as usize - 1]),
        leading_blanks: first.weekday().num_days_from_sunday(),
        days,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::LocalStorage;
    use crate::tracker::tests::day;

    fn october() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
    }

    fn badge_on(view: &MonthView, day: u32) -> Badge {
        view.days[day as usize - 1].badge
    }

    #[test]
    fn navigate_month_wraps_years() {
        assert_eq!(navigate_month(2026, 12, 1), Some((2027, 1)));
        assert_eq!(navigate_month(2026, 1, -1), Some((2025, 12)));
        assert_eq!(navigate_month(2026, 10, 0), Some((2026, 10)));
        assert_eq!(navigate_month(2026, 3, -15), Some((2024, 12)));
    }

    #[test]
    fn navigate_month_rejects_bad_months_and_overflow() {
        assert_eq!(navigate_month(2026, 0, 0), None);
        assert_eq!(navigate_month(2026, 13, 0), None);
        assert_eq!(navigate_month(2026, 25, -12), None);
        assert_eq!(navigate_month(i32::MAX, 12, 1), None);
        assert_eq!(navigate_month(i32::MIN, 1, -1), None);
        assert_eq!(navigate_month(i32::MAX, 1, 0), Some((i32::MAX, 1)));
    }

    #[test]
    fn month_view_outside_calendar_range_is_none() {
        let tracker = Tracker::new(LocalStorage::default());
        assert!(month_view_at(&tracker, i32::MAX, 1, october()).is_none());
        assert!(month_view_at(&tracker, 2026, 0, october()).is_none());
    }

    #[test]
    fn month_grid_shape() {
        let tracker = Tracker::new(LocalStorage::default());
        let view = month_view_at(&tracker, 2026, 10, october()).unwrap();
        assert_eq!(view.label, "October 2026");
        assert_eq!(view.days.len(), 31);
        // Oct 1 2026 is a Thursday
        assert_eq!(view.leading_blanks, 4);
        assert!(view.days[18].is_today);
        assert!(view.days[17].is_past);
        assert!(!view.days[19].is_past);

        let feb = month_view_at(&tracker, 2026, 2, october()).unwrap();
        assert_eq!(feb.days.len(), 28);
        assert_eq!(feb.leading_blanks, 0);
        assert_eq!(month_view_at(&tracker, 2028, 2, october()).unwrap().days.len(), 29);
        assert!(month_view_at(&tracker, 2026, 13, october()).is_none());
    }

    #[test]
    fn partial_day_shows_percent_not_check() {
        let mut tracker = Tracker::new(LocalStorage::default());
        let d = day(12);
        tracker.add_task(&d, "a").unwrap();
        let b = tracker.add_task(&d, "b").unwrap().unwrap();
        tracker.toggle_task(&d, b.id).unwrap();

        let entry = tracker.progress(&d).unwrap().unwrap();
        assert_eq!(entry.completion_rate, 50.0);
        let view = month_view_at(&tracker, 2026, 10, october()).unwrap();
        assert_eq!(badge_on(&view, 12), Badge::Partial { percent: 50 });
    }

    #[test]
    fn fully_done_day_shows_check() {
        let mut tracker = Tracker::new(LocalStorage::default());
        let d = day(5);
        for text in ["a", "b", "c"] {
            let task = tracker.add_task(&d, text).unwrap().unwrap();
            tracker.toggle_task(&d, task.id).unwrap();
        }

        let view = month_view_at(&tracker, 2026, 10, october()).unwrap();
        assert_eq!(badge_on(&view, 5), Badge::Complete);
        assert_eq!(badge_on(&view, 6), Badge::None);
    }

    #[test]
    fn emptied_day_has_no_badge() {
        let mut tracker = Tracker::new(LocalStorage::default());
        let d = day(7);
        let task = tracker.add_task(&d, "a").unwrap().unwrap();
        tracker.delete_task(&d, task.id).unwrap();

        let view = month_view_at(&tracker, 2026, 10, october()).unwrap();
        assert_eq!(badge_on(&view, 7), Badge::None);
    }

    #[test]
    fn corrupt_entry_renders_without_badge() {
        let mut storage = LocalStorage::default();
        storage
            .set(&day(9).progress_key(), "not json".to_string())
            .unwrap();
        let tracker = Tracker::new(storage);

        let view = month_view_at(&tracker, 2026, 10, october()).unwrap();
        assert_eq!(badge_on(&view, 9), Badge::None);
    }
}
