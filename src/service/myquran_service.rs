use async_trait::async_trait;
use chrono::NaiveDate;

use crate::clients::http::HttpFetcher;
use crate::clients::myquran_client;
use crate::error::{ApiError, Result};
use crate::models::doa::DoaItem;
use crate::models::hijri::HijriDate;
use crate::models::prayer::{City, SholatLocation};

#[async_trait]
pub trait PrayerSource: Send + Sync {
    async fn sholat_today(&self, city_id: &str, date: NaiveDate) -> Result<SholatLocation>;
    async fn hijri_today(&self, adj: i32) -> Result<HijriDate>;
    async fn search_city(&self, name: &str) -> Result<Vec<City>>;
}

#[async_trait]
pub trait DoaSource: Send + Sync {
    async fn random_doa(&self) -> Result<DoaItem>;
    async fn all_doa(&self) -> Result<Vec<DoaItem>>;
    async fn doa_sources(&self) -> Result<Vec<String>>;
    async fn doa_by_source(&self, source: &str) -> Result<Vec<DoaItem>>;
    async fn doa_by_id(&self, id: i64) -> Result<DoaItem>;
}

pub struct MyQuranService {
    http: HttpFetcher,
    base_url: String,
}

impl MyQuranService {
    pub fn new(http: HttpFetcher, base_url: &str) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

/// First city matching `name`, as the "update location" action picks it.
pub async fn resolve_city<S: PrayerSource + ?Sized>(source: &S, name: &str) -> Result<City> {
    source
        .search_city(name)
        .await?
        .into_iter()
        .find(|city| !city.id.trim().is_empty())
        .ok_or_else(|| ApiError::NotFound("Kota tidak ditemukan di MyQuran.".to_string()))
}

#[async_trait]
impl PrayerSource for MyQuranService {
    async fn sholat_today(&self, city_id: &str, date: NaiveDate) -> Result<SholatLocation> {
        myquran_client::fetch_sholat(&self.http, &self.base_url, city_id, date).await
    }

    async fn hijri_today(&self, adj: i32) -> Result<HijriDate> {
        myquran_client::fetch_hijri(&self.http, &self.base_url, adj).await
    }

    async fn search_city(&self, name: &str) -> Result<Vec<City>> {
        myquran_client::search_city(&self.http, &self.base_url, name).await
    }
}

#[async_trait]
impl DoaSource for MyQuranService {
    async fn random_doa(&self) -> Result<DoaItem> {
        myquran_client::fetch_random_doa(&self.http, &self.base_url).await
    }

    async fn all_doa(&self) -> Result<Vec<DoaItem>> {
        myquran_client::fetch_all_doa(&self.http, &self.base_url).await
    }

    async fn doa_sources(&self) -> Result<Vec<String>> {
        myquran_client::fetch_doa_sources(&self.http, &self.base_url).await
    }

    async fn doa_by_source(&self, source: &str) -> Result<Vec<DoaItem>> {
        myquran_client::fetch_doa_by_source(&self.http, &self.base_url, source).await
    }

    async fn doa_by_id(&self, id: i64) -> Result<DoaItem> {
        myquran_client::fetch_doa_by_id(&self.http, &self.base_url, id).await
    }
}
