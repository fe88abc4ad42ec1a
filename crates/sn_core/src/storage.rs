use async_trait::async_trait;
use chrono::{DateTime, Utc};
use crate::types::{Article, ArticleQuery, InsertOutcome, NewArticle, Page, TranslationUpdate};
use crate::Result;

#[async_trait]
pub trait ArticleStore: Send + Sync {
    /// List articles matching the query, newest publication first
    async fn list_articles(&self, query: &ArticleQuery) -> Result<Page<Article>>;

    /// Get a single article by its surrogate id
    async fn get_article(&self, id: i64) -> Result<Option<Article>>;

    /// Insert every article whose uuid is not stored yet, in one transaction.
    /// Articles whose uuid already exists are counted, not inserted.
    async fn insert_new(&self, articles: Vec<NewArticle>) -> Result<InsertOutcome>;

    /// Untranslated articles, lowest id first
    async fn untranslated(&self, limit: u32) -> Result<Vec<Article>>;

    /// Persist translations in one transaction. Returns the articles that
    /// were updated; rows that fail or are already translated are logged and
    /// left out, so a stored translation is never replaced.
    async fn save_translations(&self, updates: Vec<TranslationUpdate>) -> Result<Vec<Article>>;

    async fn count_all(&self) -> Result<u64>;

    async fn count_translated(&self) -> Result<u64>;

    /// Count articles created at or after `since`
    async fn count_created_since(&self, since: DateTime<Utc>) -> Result<u64>;
}
