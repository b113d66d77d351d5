use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use jadwalApp::models::prayer::{DailyPrayerTimes, Prayer, SholatJadwal};
use jadwalApp::service::prayer_selector::{Countdown, CountdownFrame, next_prayer};

fn schedule() -> DailyPrayerTimes {
    let jadwal = SholatJadwal {
        tanggal: "Senin, 19/10/2026".to_string(),
        imsak: "04:20".to_string(),
        subuh: "04:30".to_string(),
        terbit: "05:45".to_string(),
        dhuha: "06:15".to_string(),
        dzuhur: "12:00".to_string(),
        ashar: "15:15".to_string(),
        maghrib: "17:45".to_string(),
        isya: "19:00".to_string(),
    };
    DailyPrayerTimes::try_from(&jadwal).unwrap()
}

fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 10, 19)
        .unwrap()
        .and_hms_opt(h, m, s)
        .unwrap()
}

#[test]
fn four_pm_counts_down_to_maghrib() {
    let frame = CountdownFrame::compute(&schedule(), at(16, 0, 0));
    assert_eq!(frame.prayer, Prayer::Maghrib);
    assert_eq!(frame.scheduled, NaiveTime::from_hms_opt(17, 45, 0).unwrap());
    assert_eq!(frame.countdown, Countdown { hours: 1, minutes: 45, seconds: 0 });
}

#[test]
fn late_night_reuses_todays_subuh_for_tomorrow() {
    let next = next_prayer(&schedule(), at(23, 59, 0));
    assert_eq!(next.prayer, Prayer::Subuh);
    assert_eq!(next.scheduled, NaiveTime::from_hms_opt(4, 30, 0).unwrap());
    assert_eq!(next.at, at(4, 30, 0) + Duration::days(1));
}

#[test]
fn each_prayer_is_selected_in_its_own_window() {
    let cases = [
        (at(0, 0, 0), Prayer::Subuh),
        (at(4, 30, 0), Prayer::Subuh),
        (at(4, 31, 0), Prayer::Dzuhur),
        (at(12, 0, 59), Prayer::Dzuhur),
        (at(15, 0, 0), Prayer::Ashar),
        (at(17, 45, 0), Prayer::Maghrib),
        (at(18, 30, 0), Prayer::Isya),
        (at(19, 0, 1), Prayer::Isya),
        (at(19, 1, 0), Prayer::Subuh),
    ];
    for (from, expected) in cases {
        assert_eq!(next_prayer(&schedule(), from).prayer, expected, "at {from}");
    }
}

#[test]
fn countdown_ticks_down_one_second_at_a_time() {
    let start = at(17, 44, 57);
    let shown: Vec<String> = (0..4)
        .map(|s| CountdownFrame::compute(&schedule(), start + Duration::seconds(s)).countdown.to_string())
        .collect();
    assert_eq!(shown, vec!["00:00:03", "00:00:02", "00:00:01", "00:00:00"]);
}
