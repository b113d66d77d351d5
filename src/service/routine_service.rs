use chrono::{NaiveDate, NaiveDateTime};
use tracing::info;

use crate::error::Result;
use crate::models::rutinan::{RecurringEvent, to_events};
use crate::service::content_service::ContentSource;
use crate::service::display::{
    format_full_date, format_hm, format_short_date, format_wib, hari_for_day_of_week,
};
use crate::service::recurrence::{RecurrenceResolver, ResolvedOccurrence, TimelineEntry};

/// Fetches the schedule. Resolvers only ever see the result of a
/// successful fetch.
pub async fn load_events<S: ContentSource + ?Sized>(source: &S) -> Result<Vec<RecurringEvent>> {
    let rutinan = source.rutinan_schedule().await?;
    info!(count = rutinan.len(), "loaded rutinan schedule");
    Ok(to_events(&rutinan))
}

/// The home screen's "nearest routine" card.
#[derive(Debug, Clone, PartialEq)]
pub struct RoutineCard {
    pub title: String,
    pub speaker: Option<String>,
    pub place: Option<String>,
    pub occurs_at: NaiveDateTime,
    pub date_text: String,
    pub time_text: String,
    pub is_today: bool,
}

impl RoutineCard {
    pub fn from_occurrence(occurrence: &ResolvedOccurrence<'_>, today: NaiveDate) -> Self {
        let event = occurrence.event;
        Self {
            title: event.title.clone(),
            speaker: event.speaker.clone(),
            place: event.place.clone(),
            occurs_at: occurrence.occurs_at,
            date_text: format_full_date(occurrence.occurs_at.date()),
            time_text: format_hm(occurrence.occurs_at.time()),
            is_today: occurrence.occurs_at.date() == today,
        }
    }
}

pub async fn nearest_routine<S: ContentSource + ?Sized>(
    source: &S,
    from: NaiveDateTime,
) -> Result<Option<RoutineCard>> {
    let events = load_events(source).await?;
    Ok(RecurrenceResolver::nearest(&events, from)
        .map(|occurrence| RoutineCard::from_occurrence(&occurrence, from.date())))
}

/// One line of the routine list.
#[derive(Debug, Clone, PartialEq)]
pub struct RoutineRow {
    pub id: i64,
    pub day: String,
    pub title: String,
    pub speaker: Option<String>,
    pub place: Option<String>,
    pub date_text: String,
    pub time_text: String,
    pub holiday: Option<String>,
    pub is_today: bool,
}

impl From<&TimelineEntry<'_>> for RoutineRow {
    fn from(entry: &TimelineEntry<'_>) -> Self {
        let event = entry.event;
        Self {
            id: event.id,
            day: hari_for_day_of_week(event.day_of_week)
                .unwrap_or_default()
                .to_string(),
            title: event.title.clone(),
            speaker: event.speaker.clone(),
            place: event.place.clone(),
            date_text: entry
                .next
                .map(|at| format_short_date(at.date()))
                .unwrap_or_else(|| "-".to_string()),
            time_text: if event.has_time {
                format_wib(event.time_of_day)
            } else {
                String::new()
            },
            holiday: entry
                .next_exception
                .map(|date| format!("Libur {}", date.format("%Y-%m-%d"))),
            is_today: entry.is_today,
        }
    }
}

pub fn routine_rows(events: &[RecurringEvent], from: NaiveDateTime) -> Vec<RoutineRow> {
    RecurrenceResolver::timeline(events, from)
        .iter()
        .map(RoutineRow::from)
        .collect()
}
