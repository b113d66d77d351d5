use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Category {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Article {
    pub id: i64,
    pub title: String,
    pub slug: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub excerpt: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub category: Option<Category>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub views: Option<i64>,
}

impl Article {
    pub fn category_name(&self) -> &str {
        self.category.as_ref().map(|c| c.name.as_str()).unwrap_or("Tanpa Kategori")
    }

    pub fn date_text(&self) -> &str {
        self.date.as_deref().unwrap_or("-")
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct PaginatedMeta {
    pub current_page: u32,
    pub from: Option<u32>,
    pub last_page: u32,
    #[serde(default)]
    pub path: String,
    pub per_page: u32,
    pub to: Option<u32>,
    pub total: u32,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ArticlePage {
    pub data: Vec<Article>,
    pub meta: PaginatedMeta,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ArticleDetail {
    pub data: Article,
}
