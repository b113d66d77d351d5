use futures::future::try_join_all;

use crate::error::Result;
use crate::models::doa::{DoaCategory, DoaItem};
use crate::service::myquran_service::DoaSource;

pub const DOA_CATEGORIES: [(&str, &str); 7] = [
    ("harian", "Doa Harian"),
    ("ibadah", "Doa Ibadah"),
    ("quran", "Doa dari Al-Qur'an"),
    ("hadits", "Doa dari Hadits"),
    ("pilihan", "Doa Pilihan"),
    ("haji", "Doa Haji & Umrah"),
    ("lainnya", "Doa Lainnya"),
];

pub fn title_for_source(source: &str) -> &str {
    DOA_CATEGORIES
        .iter()
        .find(|(key, _)| *key == source)
        .map(|(_, title)| *title)
        .unwrap_or(source)
}

/// Every category with its size. All lookups run at once; any failure fails
/// the whole listing.
pub async fn category_counts<S: DoaSource + ?Sized>(source: &S) -> Result<Vec<DoaCategory>> {
    let lists = try_join_all(
        DOA_CATEGORIES
            .iter()
            .map(|(key, _)| source.doa_by_source(key)),
    )
    .await?;
    Ok(DOA_CATEGORIES
        .iter()
        .zip(lists)
        .map(|((key, title), list)| DoaCategory {
            key: key.to_string(),
            title: title.to_string(),
            count: list.len(),
        })
        .collect())
}

pub fn filter_categories<'a>(categories: &'a [DoaCategory], query: &str) -> Vec<&'a DoaCategory> {
    let q = query.trim().to_lowercase();
    categories
        .iter()
        .filter(|c| q.is_empty() || c.title.to_lowercase().contains(&q))
        .collect()
}

/// Matches the lower-cased title or translation, or the Arabic text as is.
/// Returns each hit with its index in `list`.
pub fn search_doa<'a>(list: &'a [DoaItem], query: &str) -> Vec<(usize, &'a DoaItem)> {
    let q = query.trim().to_lowercase();
    list.iter()
        .enumerate()
        .filter(|(_, d)| {
            q.is_empty()
                || d.judul.to_lowercase().contains(&q)
                || d.indo.to_lowercase().contains(&q)
                || d.arab.contains(&q)
        })
        .collect()
}

/// Position inside one category's list for the detail view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DoaCursor {
    index: usize,
    total: usize,
}

impl DoaCursor {
    /// Clamps the requested index into the list.
    pub fn new(requested: i64, total: usize) -> Self {
        let max = total.saturating_sub(1) as i64;
        Self {
            index: requested.clamp(0, max) as usize,
            total,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn prev(&mut self) -> bool {
        if self.index > 0 {
            self.index -= 1;
            return true;
        }
        false
    }

    pub fn next(&mut self) -> bool {
        if self.index + 1 < self.total {
            self.index += 1;
            return true;
        }
        false
    }

    pub fn current<'a>(&self, list: &'a [DoaItem]) -> Option<&'a DoaItem> {
        list.get(self.index)
    }

    /// `3/12`, or empty when there is nothing to show.
    pub fn counter(&self) -> String {
        if self.total == 0 {
            return String::new();
        }
        format!("{}/{}", self.index + 1, self.total)
    }
}
