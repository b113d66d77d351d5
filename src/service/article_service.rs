use tracing::debug;

use crate::error::Result;
use crate::models::article::{Article, ArticlePage, PaginatedMeta};
use crate::service::content_service::ContentSource;

pub const HEADLINE_COUNT: usize = 3;

/// Accumulates article pages the way an endless list loads them.
#[derive(Debug, Default, Clone)]
pub struct ArticleFeed {
    articles: Vec<Article>,
    meta: Option<PaginatedMeta>,
}

impl ArticleFeed {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn articles(&self) -> &[Article] {
        &self.articles
    }

    pub fn meta(&self) -> Option<&PaginatedMeta> {
        self.meta.as_ref()
    }

    pub fn current_page(&self) -> u32 {
        self.meta.as_ref().map(|m| m.current_page).unwrap_or(0)
    }

    pub fn has_more(&self) -> bool {
        self.meta
            .as_ref()
            .is_some_and(|m| m.current_page < m.last_page)
    }

    /// Page 1 replaces what was loaded; any later page appends.
    pub fn apply(&mut self, page: ArticlePage) {
        if page.meta.current_page <= 1 {
            self.articles = page.data;
        } else {
            self.articles.extend(page.data);
        }
        self.meta = Some(page.meta);
    }

    pub async fn refresh<S: ContentSource + ?Sized>(&mut self, source: &S) -> Result<()> {
        let page = source.articles(1).await?;
        self.apply(page);
        Ok(())
    }

    /// Loads the next page if there is one. Returns whether anything was fetched.
    pub async fn load_more<S: ContentSource + ?Sized>(&mut self, source: &S) -> Result<bool> {
        if self.meta.is_none() {
            self.refresh(source).await?;
            return Ok(true);
        }
        if !self.has_more() {
            debug!(page = self.current_page(), "no more article pages");
            return Ok(false);
        }
        let page = source.articles(self.current_page() + 1).await?;
        self.apply(page);
        Ok(true)
    }
}

pub async fn headlines<S: ContentSource + ?Sized>(source: &S) -> Result<Vec<Article>> {
    let page = source.articles(1).await?;
    Ok(page.data.into_iter().take(HEADLINE_COUNT).collect())
}
