use chrono::NaiveDateTime;
use tracing::warn;

use crate::error::{ApiError, Result};
use crate::models::article::Article;
use crate::models::doa::DoaItem;
use crate::models::prayer::DailyPrayerTimes;
use crate::service::article_service::headlines;
use crate::service::content_service::ContentSource;
use crate::service::display::{combined_date, format_date};
use crate::service::myquran_service::{DoaSource, PrayerSource};
use crate::service::prayer_selector::CountdownFrame;
use crate::service::routine_service::{RoutineCard, nearest_routine};

#[derive(Debug, Clone, PartialEq)]
pub struct PrayerCard {
    pub location: String,
    pub times: DailyPrayerTimes,
    pub next: CountdownFrame,
}

/// Each section stands on its own: one failed fetch leaves the rest intact.
#[derive(Debug)]
pub struct HomeSummary {
    pub date_text: String,
    pub prayer: Result<PrayerCard>,
    pub doa: Result<DoaItem>,
    pub nearest_routine: Result<Option<RoutineCard>>,
    pub headlines: Result<Vec<Article>>,
}

pub async fn load_prayer_card<P: PrayerSource + ?Sized>(
    prayer: &P,
    city_id: &str,
    from: NaiveDateTime,
) -> Result<PrayerCard> {
    let location = prayer.sholat_today(city_id, from.date()).await?;
    let times = DailyPrayerTimes::try_from(&location.jadwal)?;
    Ok(PrayerCard {
        location: location.lokasi,
        times,
        next: CountdownFrame::compute(&times, from),
    })
}

pub async fn build_home_summary(
    content: &dyn ContentSource,
    prayer: &dyn PrayerSource,
    doa: &dyn DoaSource,
    city_id: &str,
    hijri_adjustment: i32,
    from: NaiveDateTime,
) -> HomeSummary {
    let (prayer_card, hijri, doa_item, routine, articles) = tokio::join!(
        load_prayer_card(prayer, city_id, from),
        prayer.hijri_today(hijri_adjustment),
        doa.random_doa(),
        nearest_routine(content, from),
        headlines(content),
    );

    let masehi = format_date(from.date());
    let date_text = match &hijri {
        Ok(h) => combined_date(&masehi, h.hijri_text()),
        Err(err) => {
            warn!(error = %err, "hijri date unavailable");
            masehi
        }
    };

    for (section, err) in [
        ("sholat", prayer_card.as_ref().err()),
        ("doa", doa_item.as_ref().err()),
        ("rutinan", routine.as_ref().err()),
        ("artikel", articles.as_ref().err()),
    ] {
        if let Some(err) = err {
            warn!(section, error = %err, "home section failed");
        }
    }

    HomeSummary {
        date_text,
        prayer: prayer_card,
        doa: doa_item,
        nearest_routine: routine,
        headlines: articles,
    }
}

impl HomeSummary {
    pub fn errors(&self) -> Vec<&ApiError> {
        [
            self.prayer.as_ref().err(),
            self.doa.as_ref().err(),
            self.nearest_routine.as_ref().err(),
            self.headlines.as_ref().err(),
        ]
        .into_iter()
        .flatten()
        .collect()
    }
}
