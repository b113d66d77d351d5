use async_trait::async_trait;

use crate::clients::alanwar_client;
use crate::clients::http::HttpFetcher;
use crate::error::Result;
use crate::models::article::{Article, ArticlePage};
use crate::models::rutinan::Rutinan;

/// The site backend: routine schedule and articles.
#[async_trait]
pub trait ContentSource: Send + Sync {
    async fn rutinan_schedule(&self) -> Result<Vec<Rutinan>>;
    async fn articles(&self, page: u32) -> Result<ArticlePage>;
    async fn article_detail(&self, slug: &str) -> Result<Article>;
}

pub struct ContentService {
    http: HttpFetcher,
    base_url: String,
}

impl ContentService {
    pub fn new(http: HttpFetcher, base_url: &str) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl ContentSource for ContentService {
    async fn rutinan_schedule(&self) -> Result<Vec<Rutinan>> {
        alanwar_client::fetch_rutinan(&self.http, &self.base_url).await
    }

    async fn articles(&self, page: u32) -> Result<ArticlePage> {
        alanwar_client::fetch_articles(&self.http, &self.base_url, page).await
    }

    async fn article_detail(&self, slug: &str) -> Result<Article> {
        alanwar_client::fetch_article_detail(&self.http, &self.base_url, slug).await
    }
}
