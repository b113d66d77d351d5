use crate::clients::http::{HttpFetcher, endpoint_url};
use crate::error::Result;
use crate::models::article::{Article, ArticleDetail, ArticlePage};
use crate::models::rutinan::Rutinan;

const DETAIL_CONTEXT: &str = "Gagal mengambil detail artikel";

pub async fn fetch_rutinan(http: &HttpFetcher, base_url: &str) -> Result<Vec<Rutinan>> {
    http.get_json(&format!("{}/rutinan", base_url), "Gagal mengambil jadwal rutinan")
        .await
}

pub async fn fetch_articles(http: &HttpFetcher, base_url: &str, page: u32) -> Result<ArticlePage> {
    http.get_json(
        &format!("{}/articles?page={}", base_url, page.max(1)),
        "Gagal mengambil artikel",
    )
    .await
}

pub async fn fetch_article_detail(http: &HttpFetcher, base_url: &str, slug: &str) -> Result<Article> {
    let url = article_detail_url(base_url, slug)?;
    let detail: ArticleDetail = http.get_json(&url, DETAIL_CONTEXT).await?;
    Ok(detail.data)
}

pub fn article_detail_url(base_url: &str, slug: &str) -> Result<String> {
    endpoint_url(base_url, &["articles", slug.trim()], DETAIL_CONTEXT)
}
