use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct DoaItem {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub nomor: Option<i64>,
    pub arab: String,
    pub indo: String,
    pub judul: String,
    pub source: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DoaCategory {
    pub key: String,
    pub title: String,
    pub count: usize,
}
