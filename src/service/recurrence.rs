//! Next-occurrence resolution for weekly routine events.
//!
//! Every function here is pure: the reference instant is passed in, the
//! event list is only read, and malformed events simply never resolve.

use std::cmp::Ordering;

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, Timelike};

use crate::models::rutinan::RecurringEvent;

/// Three weekly cycles. Two consecutive holidays on the same slot are
/// skipped; a third gives up instead of searching forever.
pub const SEARCH_WINDOW_DAYS: i64 = 21;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedOccurrence<'a> {
    pub event: &'a RecurringEvent,
    pub occurs_at: NaiveDateTime,
}

/// One row of the routine list.
#[derive(Debug, Clone, PartialEq)]
pub struct TimelineEntry<'a> {
    pub event: &'a RecurringEvent,
    pub next: Option<NaiveDateTime>,
    pub is_today: bool,
    pub next_exception: Option<NaiveDate>,
}

/// Drops seconds and sub-second noise.
pub fn truncate_to_minute(at: NaiveDateTime) -> NaiveDateTime {
    at.with_second(0)
        .and_then(|t| t.with_nanosecond(0))
        .unwrap_or(at)
}

pub struct RecurrenceResolver;

impl RecurrenceResolver {
    /// First occurrence strictly after `from` (to the minute) that does not
    /// fall on one of the event's exception dates.
    pub fn next_occurrence(
        event: &RecurringEvent,
        from: NaiveDateTime,
    ) -> Option<ResolvedOccurrence<'_>> {
        let weekday = event.weekday()?;
        let from = truncate_to_minute(from);
        let start = from.date();

        (0..SEARCH_WINDOW_DAYS)
            .filter_map(|offset| start.checked_add_signed(Duration::days(offset)))
            .filter(|day| day.weekday() == weekday)
            .map(|day| day.and_time(event.time_of_day))
            .filter(|candidate| *candidate > from)
            .find(|candidate| !event.is_excepted(candidate.date()))
            .map(|occurs_at| ResolvedOccurrence { event, occurs_at })
    }

    /// Earliest resolvable occurrence across `events`. Ties go to the event
    /// seen first.
    pub fn nearest<'a, I>(events: I, from: NaiveDateTime) -> Option<ResolvedOccurrence<'a>>
    where
        I: IntoIterator<Item = &'a RecurringEvent>,
    {
        events
            .into_iter()
            .filter_map(|event| Self::next_occurrence(event, from))
            .fold(None, |best: Option<ResolvedOccurrence<'a>>, candidate| match best {
                Some(current) if current.occurs_at <= candidate.occurs_at => Some(current),
                _ => Some(candidate),
            })
    }

    /// Every event with its next occurrence, soonest first. Events that never
    /// resolve sort last; equal keys keep input order.
    pub fn timeline(events: &[RecurringEvent], from: NaiveDateTime) -> Vec<TimelineEntry<'_>> {
        let today = from.date();
        let mut entries: Vec<TimelineEntry<'_>> = events
            .iter()
            .map(|event| TimelineEntry {
                event,
                next: Self::next_occurrence(event, from).map(|o| o.occurs_at),
                is_today: event.weekday() == Some(today.weekday()),
                next_exception: event.exception_dates.range(today..).next().copied(),
            })
            .collect();
        entries.sort_by(|a, b| match (a.next, b.next) {
            (Some(x), Some(y)) => x.cmp(&y),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        });
        entries
    }
}
