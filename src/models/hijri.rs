use serde::{Deserialize, Serialize};

/// `date` is `[day name, "27 Syaban 1445 H", "08-03-2024"]`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct HijriDate {
    pub date: Vec<String>,
    #[serde(default)]
    pub num: Vec<i64>,
}

impl HijriDate {
    pub fn hijri_text(&self) -> Option<&str> {
        self.date.get(1).map(String::as_str).filter(|s| !s.trim().is_empty())
    }
}
