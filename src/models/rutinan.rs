use std::collections::BTreeSet;

use chrono::{NaiveDate, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct RutinanException {
    pub id: i64,
    pub rutinan_id: i64,
    // YYYY-MM-DD
    pub libur_date: String,
}

/// A weekly routine gathering as the site backend lists it.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Rutinan {
    pub id: i64,
    pub nama_acara: String,
    #[serde(default)]
    pub pengisi: Option<String>,
    #[serde(default)]
    pub kitab: Option<String>,
    #[serde(default)]
    pub isi: Option<String>,
    #[serde(default)]
    pub tempat: Option<String>,
    // HH:MM:SS
    #[serde(default)]
    pub waktu: Option<String>,
    // 1..=7, Senin..Ahad
    #[serde(default)]
    pub day_of_week: Option<i64>,
    #[serde(default)]
    pub exceptions: Vec<RutinanException>,
}

/// A weekly-recurring event in the shape the resolver works on.
#[derive(Debug, Clone, PartialEq)]
pub struct RecurringEvent {
    pub id: i64,
    pub title: String,
    /// ISO weekday, 1 = Monday .. 7 = Sunday. Anything else never occurs.
    pub day_of_week: Option<i64>,
    pub time_of_day: NaiveTime,
    /// False when the backend gave no `waktu`; `time_of_day` is then midnight
    /// for resolution only and is not shown.
    pub has_time: bool,
    pub exception_dates: BTreeSet<NaiveDate>,
    pub speaker: Option<String>,
    pub place: Option<String>,
    pub book: Option<String>,
}

impl RecurringEvent {
    pub fn new(id: i64, title: &str, day_of_week: Option<i64>, time_of_day: NaiveTime) -> Self {
        Self {
            id,
            title: title.to_string(),
            day_of_week,
            time_of_day,
            has_time: true,
            exception_dates: BTreeSet::new(),
            speaker: None,
            place: None,
            book: None,
        }
    }

    pub fn with_exceptions<I>(mut self, dates: I) -> Self
    where
        I: IntoIterator<Item = NaiveDate>,
    {
        self.exception_dates.extend(dates);
        self
    }

    pub fn weekday(&self) -> Option<Weekday> {
        match self.day_of_week? {
            day @ 1..=7 => Weekday::try_from((day - 1) as u8).ok(),
            _ => None,
        }
    }

    pub fn is_excepted(&self, date: NaiveDate) -> bool {
        self.exception_dates.contains(&date)
    }
}

impl From<&Rutinan> for RecurringEvent {
    fn from(rutinan: &Rutinan) -> Self {
        let waktu = rutinan.waktu.as_deref().filter(|w| !w.trim().is_empty());
        let time_of_day = waktu.map(parse_time_of_day).unwrap_or(NaiveTime::MIN);
        let exception_dates = rutinan
            .exceptions
            .iter()
            .filter_map(|ex| match NaiveDate::parse_from_str(ex.libur_date.trim(), "%Y-%m-%d") {
                Ok(date) => Some(date),
                Err(_) => {
                    debug!(rutinan = rutinan.id, libur_date = %ex.libur_date, "dropping unparseable exception date");
                    None
                }
            })
            .collect();
        Self {
            id: rutinan.id,
            title: rutinan.nama_acara.clone(),
            day_of_week: rutinan.day_of_week,
            time_of_day,
            has_time: waktu.is_some(),
            exception_dates,
            speaker: non_empty(&rutinan.pengisi),
            place: non_empty(&rutinan.tempat),
            book: non_empty(&rutinan.kitab),
        }
    }
}

pub fn to_events(rutinan: &[Rutinan]) -> Vec<RecurringEvent> {
    rutinan.iter().map(RecurringEvent::from).collect()
}

/// Lenient `HH[:MM[:SS]]` parse. Missing components count as zero; anything
/// that does not form a valid clock time falls back to midnight.
pub fn parse_time_of_day(raw: &str) -> NaiveTime {
    let mut parts = raw.trim().split(':');
    let mut next = || -> Option<u32> {
        match parts.next() {
            None => Some(0),
            Some(part) if part.trim().is_empty() => Some(0),
            Some(part) => part.trim().parse().ok(),
        }
    };
    let parsed = match (next(), next(), next()) {
        (Some(h), Some(m), Some(s)) => NaiveTime::from_hms_opt(h, m, s),
        _ => None,
    };
    parsed.unwrap_or_else(|| {
        debug!(waktu = raw, "unparseable time of day, using midnight");
        NaiveTime::MIN
    })
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
