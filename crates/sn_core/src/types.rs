use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Category every fetched article is filed under.
pub const DEFAULT_CATEGORY: &str = "sports";

pub const DEFAULT_LANGUAGE: &str = "en";

/// A persisted news article. Field names match the `articles` columns and the
/// JSON shape returned by the HTTP API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    pub id: i64,
    pub uuid: String,
    pub title: String,
    pub title_translated: Option<String>,
    pub description: Option<String>,
    pub description_translated: Option<String>,
    pub content: Option<String>,
    pub content_translated: Option<String>,
    pub url: String,
    pub image_url: Option<String>,
    pub source: String,
    pub language: String,
    pub category: String,
    pub published_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub translated_at: Option<DateTime<Utc>>,
    pub is_translated: bool,
}

impl Article {
    /// Builds the stored form of a freshly inserted row.
    pub fn from_new(id: i64, new: NewArticle) -> Self {
        Self {
            id,
            uuid: new.uuid,
            title: new.title,
            title_translated: None,
            description: new.description,
            description_translated: None,
            content: new.content,
            content_translated: None,
            url: new.url,
            image_url: new.image_url,
            source: new.source,
            language: new.language,
            category: new.category,
            published_at: new.published_at,
            created_at: new.created_at,
            translated_at: None,
            is_translated: false,
        }
    }

    /// Writes the translated fields and marks the article as translated.
    pub fn apply_translation(&mut self, fields: TranslatedFields, at: DateTime<Utc>) {
        self.title_translated = fields.title;
        self.description_translated = fields.description;
        self.content_translated = fields.content;
        self.translated_at = Some(at);
        self.is_translated = true;
    }
}

/// Insert shape for an article that has not been stored yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewArticle {
    pub uuid: String,
    pub title: String,
    pub description: Option<String>,
    pub content: Option<String>,
    pub url: String,
    pub image_url: Option<String>,
    pub source: String,
    pub language: String,
    pub category: String,
    pub published_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

/// An article as handed back by the news provider. The provider is loose about
/// which fields it fills in, so everything is optional here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawArticle {
    #[serde(default)]
    pub uuid: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub snippet: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub published_at: Option<String>,
    #[serde(default)]
    pub categories: Vec<String>,
}

/// Output of translating one article's text fields. A field is `None` when its
/// source field was empty and therefore not sent for translation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TranslatedFields {
    pub title: Option<String>,
    pub description: Option<String>,
    pub content: Option<String>,
}

#[derive(Debug, Clone)]
pub struct TranslationUpdate {
    pub id: i64,
    pub fields: TranslatedFields,
    pub translated_at: DateTime<Utc>,
}

/// Filter and window for listing articles.
#[derive(Debug, Clone, PartialEq)]
pub struct ArticleQuery {
    pub page: u32,
    pub per_page: u32,
    pub category: String,
    pub translated_only: bool,
}

impl ArticleQuery {
    pub fn offset(&self) -> u64 {
        u64::from(self.page.saturating_sub(1)) * u64::from(self.per_page)
    }
}

impl Default for ArticleQuery {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: 10,
            category: DEFAULT_CATEGORY.to_string(),
            translated_only: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: u32,
    pub per_page: u32,
    pub total: u64,
}

impl<T> Page<T> {
    pub fn total_pages(&self) -> u64 {
        if self.per_page == 0 {
            return 0;
        }
        self.total.div_ceil(u64::from(self.per_page))
    }

    pub fn has_next(&self) -> bool {
        u64::from(self.page) < self.total_pages()
    }

    pub fn has_prev(&self) -> bool {
        self.page > 1
    }
}

/// Result of storing a batch of fetched articles.
#[derive(Debug, Clone, Default)]
pub struct InsertOutcome {
    pub inserted: Vec<Article>,
    pub existing: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ArticleStats {
    pub total_articles: u64,
    pub translated_articles: u64,
    pub untranslated_articles: u64,
    pub recent_articles: u64,
    pub translation_percentage: f64,
}

impl ArticleStats {
    /// Derives the untranslated count and the one-decimal percentage.
    pub fn from_counts(total: u64, translated: u64, recent: u64) -> Self {
        let translation_percentage = if total == 0 {
            0.0
        } else {
            let pct = translated as f64 / total as f64 * 100.0;
            (pct * 10.0).round() / 10.0
        };
        Self {
            total_articles: total,
            translated_articles: translated,
            untranslated_articles: total.saturating_sub(translated),
            recent_articles: recent,
            translation_percentage,
        }
    }
}

/// Window used by the `recent_articles` statistic.
pub fn recent_window() -> Duration {
    Duration::days(7)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(total: u64, page: u32, per_page: u32) -> Page<()> {
        Page { items: vec![], page, per_page, total }
    }

    #[test]
    fn test_page_navigation() {
        let p = page(25, 1, 10);
        assert_eq!(p.total_pages(), 3);
        assert!(p.has_next());
        assert!(!p.has_prev());

        let p = page(25, 3, 10);
        assert!(!p.has_next());
        assert!(p.has_prev());

        let p = page(0, 1, 10);
        assert_eq!(p.total_pages(), 0);
        assert!(!p.has_next());
    }

    #[test]
    fn test_query_offset() {
        let query = ArticleQuery { page: 3, per_page: 20, ..Default::default() };
        assert_eq!(query.offset(), 40);
        assert_eq!(ArticleQuery::default().offset(), 0);
    }

    #[test]
    fn test_stats_percentage() {
        let empty = ArticleStats::from_counts(0, 0, 0);
        assert_eq!(empty.translation_percentage, 0.0);
        assert_eq!(empty.untranslated_articles, 0);

        let stats = ArticleStats::from_counts(3, 1, 3);
        assert_eq!(stats.translation_percentage, 33.3);
        assert_eq!(stats.untranslated_articles, 2);
    }

    #[test]
    fn test_raw_article_tolerates_missing_fields() {
        let raw: RawArticle = serde_json::from_str(r#"{"uuid": "abc", "title": "Derby day"}"#).unwrap();
        assert_eq!(raw.uuid.as_deref(), Some("abc"));
        assert!(raw.categories.is_empty());
        assert!(raw.published_at.is_none());
    }
}
