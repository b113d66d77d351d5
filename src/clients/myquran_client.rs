use chrono::{Datelike, NaiveDate};
use crate::clients::http::{Envelope, HttpFetcher, endpoint_url};
use crate::error::Result;
use crate::models::doa::DoaItem;
use crate::models::hijri::HijriDate;
use crate::models::prayer::{City, SholatLocation};

async fn get_data<T: serde::de::DeserializeOwned>(
    http: &HttpFetcher,
    url: &str,
    context: &str,
) -> Result<T> {
    let envelope: Envelope<T> = http.get_json(url, context).await?;
    Ok(envelope.data)
}

const SHOLAT_CONTEXT: &str = "Gagal mengambil jadwal sholat";
const CITY_CONTEXT: &str = "Gagal mencari kota di MyQuran";
const DOA_SOURCE_CONTEXT: &str = "Gagal mengambil doa pada kategori";

pub fn sholat_url(base_url: &str, city_id: &str, date: NaiveDate) -> Result<String> {
    endpoint_url(
        base_url,
        &[
            "sholat",
            "jadwal",
            city_id.trim(),
            &date.year().to_string(),
            &format!("{:02}", date.month()),
            &format!("{:02}", date.day()),
        ],
        SHOLAT_CONTEXT,
    )
}

pub async fn fetch_sholat(
    http: &HttpFetcher,
    base_url: &str,
    city_id: &str,
    date: NaiveDate,
) -> Result<SholatLocation> {
    let url = sholat_url(base_url, city_id, date)?;
    get_data(http, &url, SHOLAT_CONTEXT).await
}

pub async fn fetch_hijri(http: &HttpFetcher, base_url: &str, adj: i32) -> Result<HijriDate> {
    get_data(
        http,
        &format!("{}/cal/hijr/?adj={}", base_url, adj),
        "Gagal mengambil tanggal hijriah",
    )
    .await
}

pub fn city_search_url(base_url: &str, name: &str) -> Result<String> {
    endpoint_url(base_url, &["sholat", "kota", "cari", name.trim()], CITY_CONTEXT)
}

pub async fn search_city(http: &HttpFetcher, base_url: &str, name: &str) -> Result<Vec<City>> {
    let url = city_search_url(base_url, name)?;
    get_data(http, &url, CITY_CONTEXT).await
}

pub async fn fetch_random_doa(http: &HttpFetcher, base_url: &str) -> Result<DoaItem> {
    get_data(http, &format!("{}/doa/acak", base_url), "Gagal mengambil doa").await
}

pub async fn fetch_all_doa(http: &HttpFetcher, base_url: &str) -> Result<Vec<DoaItem>> {
    get_data(http, &format!("{}/doa/all", base_url), "Gagal mengambil daftar doa").await
}

pub async fn fetch_doa_sources(http: &HttpFetcher, base_url: &str) -> Result<Vec<String>> {
    get_data(http, &format!("{}/doa/sumber", base_url), "Gagal mengambil sumber doa").await
}

pub async fn fetch_doa_by_source(
    http: &HttpFetcher,
    base_url: &str,
    source: &str,
) -> Result<Vec<DoaItem>> {
    let url = endpoint_url(base_url, &["doa", "sumber", source.trim()], DOA_SOURCE_CONTEXT)?;
    get_data(http, &url, DOA_SOURCE_CONTEXT).await
}

pub async fn fetch_doa_by_id(http: &HttpFetcher, base_url: &str, id: i64) -> Result<DoaItem> {
    get_data(http, &format!("{}/doa/{}", base_url, id), "Gagal mengambil detail doa").await
}
