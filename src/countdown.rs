use chrono::{DateTime, Local, NaiveDateTime, TimeZone};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Countdown {
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
    pub finished: bool,
}

pub fn countdown(target: NaiveDateTime) -> Countdown {
    let target = Local
        .from_local_datetime(&target)
        .earliest()
        .unwrap_or_else(|| Local.from_utc_datetime(&target));
    countdown_at(Local::now(), target)
}

/// Time left until `target`, zeroed once it has passed.
pub fn countdown_at<Tz: TimeZone>(now: DateTime<Tz>, target: DateTime<Tz>) -> Countdown {
    const SECOND: i64 = 1000;
    const MINUTE: i64 = 60 * SECOND;
    const HOUR: i64 = 60 * MINUTE;
    const DAY: i64 = 24 * HOUR;

    let distance = target.signed_duration_since(now).num_milliseconds();
    if distance <= 0 {
        return Countdown {
            days: 0,
            hours: 0,
            minutes: 0,
            seconds: 0,
            finished: true,
        };
    }

    Countdown {
        days: distance / DAY,
        hours: distance % DAY / HOUR,
        minutes: distance % HOUR / MINUTE,
        seconds: distance % MINUTE / SECOND,
        finished: false,
    }
}
