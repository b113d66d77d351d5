use std::fmt;

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

/// One day of the MyQuran prayer schedule. Times are `HH:MM` strings.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SholatJadwal {
    pub tanggal: String,
    #[serde(default)]
    pub imsak: String,
    pub subuh: String,
    #[serde(default)]
    pub terbit: String,
    #[serde(default)]
    pub dhuha: String,
    pub dzuhur: String,
    pub ashar: String,
    pub maghrib: String,
    pub isya: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SholatLocation {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub lokasi: String,
    #[serde(default)]
    pub daerah: Option<String>,
    pub jadwal: SholatJadwal,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct City {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub lokasi: String,
}

/// The five daily prayers in their fixed order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Prayer {
    Subuh,
    Dzuhur,
    Ashar,
    Maghrib,
    Isya,
}

impl Prayer {
    pub const ALL: [Prayer; 5] = [
        Prayer::Subuh,
        Prayer::Dzuhur,
        Prayer::Ashar,
        Prayer::Maghrib,
        Prayer::Isya,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Prayer::Subuh => "Subuh",
            Prayer::Dzuhur => "Dzuhur",
            Prayer::Ashar => "Ashar",
            Prayer::Maghrib => "Maghrib",
            Prayer::Isya => "Isya",
        }
    }
}

impl fmt::Display for Prayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Today's five scheduled clock times.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DailyPrayerTimes {
    pub subuh: NaiveTime,
    pub dzuhur: NaiveTime,
    pub ashar: NaiveTime,
    pub maghrib: NaiveTime,
    pub isya: NaiveTime,
}

impl DailyPrayerTimes {
    pub fn time_of(&self, prayer: Prayer) -> NaiveTime {
        match prayer {
            Prayer::Subuh => self.subuh,
            Prayer::Dzuhur => self.dzuhur,
            Prayer::Ashar => self.ashar,
            Prayer::Maghrib => self.maghrib,
            Prayer::Isya => self.isya,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Prayer, NaiveTime)> + '_ {
        Prayer::ALL.into_iter().map(|p| (p, self.time_of(p)))
    }
}

impl TryFrom<&SholatJadwal> for DailyPrayerTimes {
    type Error = ApiError;

    fn try_from(jadwal: &SholatJadwal) -> Result<Self, Self::Error> {
        let parse = |prayer: Prayer, raw: &str| {
            parse_hm(raw).ok_or_else(|| {
                ApiError::malformed(
                    "Gagal mengambil jadwal sholat",
                    format!("{}: {:?}", prayer.label().to_lowercase(), raw),
                )
            })
        };
        Ok(Self {
            subuh: parse(Prayer::Subuh, &jadwal.subuh)?,
            dzuhur: parse(Prayer::Dzuhur, &jadwal.dzuhur)?,
            ashar: parse(Prayer::Ashar, &jadwal.ashar)?,
            maghrib: parse(Prayer::Maghrib, &jadwal.maghrib)?,
            isya: parse(Prayer::Isya, &jadwal.isya)?,
        })
    }
}

fn parse_hm(raw: &str) -> Option<NaiveTime> {
    let (h, m) = raw.trim().split_once(':')?;
    // "04:30" as well as an occasional "04:30:00"
    let m = m.split(':').next()?;
    NaiveTime::from_hms_opt(h.trim().parse().ok()?, m.trim().parse().ok()?, 0)
}

// MyQuran returns ids as strings in some endpoints and numbers in others.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(i64),
    }
    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(s) => s,
        Raw::Number(n) => n.to_string(),
    })
}
