use std::fmt;

use chrono::{Duration, NaiveDateTime, NaiveTime};

use crate::models::prayer::{DailyPrayerTimes, Prayer};
use crate::service::recurrence::truncate_to_minute;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NextPrayer {
    pub prayer: Prayer,
    /// The clock time as published in the schedule.
    pub scheduled: NaiveTime,
    pub at: NaiveDateTime,
}

/// Whole seconds until the next prayer, split for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Countdown {
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
}

impl Countdown {
    /// `max(0, target - from)`, floored to whole seconds.
    pub fn until(target: NaiveDateTime, from: NaiveDateTime) -> Self {
        let total = (target - from).num_seconds().max(0);
        Self {
            hours: total / 3600,
            minutes: (total % 3600) / 60,
            seconds: total % 60,
        }
    }

    pub fn total_seconds(&self) -> i64 {
        self.hours * 3600 + self.minutes * 60 + self.seconds
    }
}

impl fmt::Display for Countdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}:{:02}", self.hours, self.minutes, self.seconds)
    }
}

/// What the live countdown shows on each tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountdownFrame {
    pub prayer: Prayer,
    pub scheduled: NaiveTime,
    pub countdown: Countdown,
}

impl CountdownFrame {
    pub fn compute(times: &DailyPrayerTimes, from: NaiveDateTime) -> Self {
        let next = next_prayer(times, from);
        Self {
            prayer: next.prayer,
            scheduled: next.scheduled,
            countdown: Countdown::until(next.at, from),
        }
    }
}

/// The first of today's prayers at or after `from` (to the minute). Once
/// isya has passed, tomorrow's subuh at today's subuh time.
pub fn next_prayer(times: &DailyPrayerTimes, from: NaiveDateTime) -> NextPrayer {
    let base = truncate_to_minute(from);
    let today = base.date();

    if let Some(next) = times
        .iter()
        .map(|(prayer, scheduled)| NextPrayer {
            prayer,
            scheduled,
            at: today.and_time(scheduled),
        })
        .find(|candidate| candidate.at >= base)
    {
        return next;
    }

    // TODO: fetch tomorrow's schedule instead of reusing today's subuh time.
    let tomorrow = today + Duration::days(1);
    NextPrayer {
        prayer: Prayer::Subuh,
        scheduled: times.subuh,
        at: tomorrow.and_time(times.subuh),
    }
}
