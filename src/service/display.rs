//! Indonesian display strings for dates, times and article bodies.

use chrono::{Datelike, NaiveDate, NaiveTime, Timelike};

// Sunday first, matching how calendar dates are read out.
const DAY_NAMES: [&str; 7] = ["Minggu", "Senin", "Selasa", "Rabu", "Kamis", "Jumat", "Sabtu"];

// Routine days use ISO order and call Sunday "Ahad".
const ROUTINE_DAY_NAMES: [&str; 7] = ["Senin", "Selasa", "Rabu", "Kamis", "Jumat", "Sabtu", "Ahad"];

const MONTH_NAMES: [&str; 12] = [
    "Januari",
    "Februari",
    "Maret",
    "April",
    "Mei",
    "Juni",
    "Juli",
    "Agustus",
    "September",
    "Oktober",
    "November",
    "Desember",
];

const MONTH_SHORT: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "Mei", "Jun", "Jul", "Agu", "Sep", "Okt", "Nov", "Des",
];

pub fn hari_for_day_of_week(day_of_week: Option<i64>) -> Option<&'static str> {
    match day_of_week {
        Some(day @ 1..=7) => Some(ROUTINE_DAY_NAMES[(day - 1) as usize]),
        _ => None,
    }
}

pub fn day_name(date: NaiveDate) -> &'static str {
    DAY_NAMES[date.weekday().num_days_from_sunday() as usize]
}

/// `Senin, 05 Januari 2026`
pub fn format_full_date(date: NaiveDate) -> String {
    format!("{}, {}", day_name(date), format_date(date))
}

/// `05 Januari 2026`
pub fn format_date(date: NaiveDate) -> String {
    format!(
        "{:02} {} {}",
        date.day(),
        MONTH_NAMES[date.month0() as usize],
        date.year()
    )
}

/// `05 Jan`
pub fn format_short_date(date: NaiveDate) -> String {
    format!("{:02} {}", date.day(), MONTH_SHORT[date.month0() as usize])
}

pub fn format_clock(time: NaiveTime) -> String {
    format!("{:02}:{:02}:{:02}", time.hour(), time.minute(), time.second())
}

pub fn format_hm(time: NaiveTime) -> String {
    format!("{:02}:{:02}", time.hour(), time.minute())
}

/// `19:30 WIB`
pub fn format_wib(time: NaiveTime) -> String {
    format!("{} WIB", format_hm(time))
}

pub fn combined_date(masehi: &str, hijri: Option<&str>) -> String {
    match hijri {
        Some(h) if !h.trim().is_empty() => format!("{} / {}", masehi, h.trim()),
        _ => masehi.to_string(),
    }
}

/// Plain text from the article HTML: tags dropped, line-breaking tags turned
/// into newlines, a handful of entities decoded, blank runs collapsed.
pub fn strip_html(html: &str) -> String {
    let mut text = String::with_capacity(html.len());
    let mut tag = String::new();
    let mut in_tag = false;

    for ch in html.chars() {
        match (in_tag, ch) {
            (false, '<') => {
                in_tag = true;
                tag.clear();
            }
            (true, '>') => {
                in_tag = false;
                let name = tag
                    .trim_start_matches('/')
                    .split(|c: char| c.is_whitespace() || c == '/')
                    .next()
                    .unwrap_or("")
                    .to_ascii_lowercase();
                if matches!(name.as_str(), "p" | "br" | "div" | "li" | "h1" | "h2" | "h3" | "h4" | "blockquote") {
                    text.push('\n');
                }
            }
            (true, c) => tag.push(c),
            (false, c) => text.push(c),
        }
    }

    let decoded = text
        .replace("&nbsp;", " ")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&");

    let mut out: Vec<&str> = Vec::new();
    for line in decoded.lines().map(str::trim) {
        if line.is_empty() && out.last().is_none_or(|prev| prev.is_empty()) {
            continue;
        }
        out.push(line);
    }
    while out.last().is_some_and(|l| l.is_empty()) {
        out.pop();
    }
    out.join("\n")
}
