//! Article workflows shared by the HTTP handlers and the command line.

use chrono::{DateTime, Utc};
use sn_core::time::published_at_or;
use sn_core::{
    Article, ArticleQuery, ArticleStats, ArticleStore, Error, NewArticle, NewsProvider, Page,
    RawArticle, Result, TranslationUpdate, DEFAULT_CATEGORY, DEFAULT_LANGUAGE,
};
use sn_news::demo_articles;
use sn_translate::{Translator, DEFAULT_TARGET_LANGUAGE};
use std::sync::Arc;
use tracing::{info, warn};

pub const MAX_PER_PAGE: u32 = 50;
pub const DEFAULT_PER_PAGE: u32 = 10;
pub const MAX_FETCH_LIMIT: u32 = 20;
pub const DEFAULT_FETCH_LIMIT: u32 = 10;
pub const TRANSLATE_BATCH_SIZE: u32 = 10;

#[derive(Debug, Clone, PartialEq)]
pub struct FetchRequest {
    pub locale: String,
    pub language: String,
    pub limit: u32,
}

impl FetchRequest {
    pub fn new(locale: Option<String>, language: Option<String>, limit: Option<i64>) -> Self {
        let limit = limit
            .unwrap_or(i64::from(DEFAULT_FETCH_LIMIT))
            .clamp(1, i64::from(MAX_FETCH_LIMIT)) as u32;
        Self {
            locale: locale.unwrap_or_else(|| "us".to_string()),
            language: language.unwrap_or_else(|| DEFAULT_LANGUAGE.to_string()),
            limit,
        }
    }
}

impl Default for FetchRequest {
    fn default() -> Self {
        Self::new(None, None, None)
    }
}

#[derive(Debug, Clone)]
pub struct FetchOutcome {
    pub inserted: Vec<Article>,
    pub existing: usize,
}

#[derive(Debug, Clone)]
pub enum TranslateOutcome {
    AlreadyTranslated(Article),
    Translated(Article),
}

/// Clamp a requested page window into the allowed range.
pub fn article_query(
    page: Option<i64>,
    per_page: Option<i64>,
    category: Option<String>,
    translated_only: bool,
) -> ArticleQuery {
    let page = page.unwrap_or(1).clamp(1, i64::from(u32::MAX)) as u32;
    let per_page = per_page
        .unwrap_or(i64::from(DEFAULT_PER_PAGE))
        .clamp(1, i64::from(MAX_PER_PAGE)) as u32;
    ArticleQuery {
        page,
        per_page,
        category: category.unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
        translated_only,
    }
}

/// Turn a provider record into an insertable row. Records without a uuid
/// cannot be deduplicated and are dropped.
pub fn new_article_from_raw(raw: RawArticle, now: DateTime<Utc>) -> Option<NewArticle> {
    let Some(uuid) = raw.uuid.filter(|u| !u.trim().is_empty()) else {
        warn!(title = ?raw.title, "skipping article without uuid");
        return None;
    };

    Some(NewArticle {
        published_at: published_at_or(raw.published_at.as_deref(), now),
        uuid,
        title: raw.title.unwrap_or_default(),
        description: raw.description,
        content: raw.snippet,
        url: raw.url.unwrap_or_default(),
        image_url: raw.image_url,
        source: raw.source.unwrap_or_else(|| "unknown".to_string()),
        language: raw.language.unwrap_or_else(|| DEFAULT_LANGUAGE.to_string()),
        category: DEFAULT_CATEGORY.to_string(),
        created_at: now,
    })
}

#[derive(Clone)]
pub struct ArticleService {
    store: Arc<dyn ArticleStore>,
    news: Arc<dyn NewsProvider>,
    translator: Arc<Translator>,
}

impl ArticleService {
    pub fn new(store: Arc<dyn ArticleStore>, news: Arc<dyn NewsProvider>, translator: Arc<Translator>) -> Self {
        Self { store, news, translator }
    }

    pub fn translator(&self) -> &Translator {
        &self.translator
    }

    pub async fn list(&self, query: &ArticleQuery) -> Result<Page<Article>> {
        self.store.list_articles(query).await
    }

    pub async fn get(&self, id: i64) -> Result<Article> {
        self.store.get_article(id).await?.ok_or(Error::NotFound(id))
    }

    /// Pull headlines (or the demo set when the provider has nothing) and
    /// store the ones not seen before.
    pub async fn fetch_news(&self, request: &FetchRequest) -> Result<FetchOutcome> {
        let mut raw = self
            .news
            .headlines(&request.locale, &request.language, request.limit)
            .await;
        if raw.is_empty() {
            info!(provider = self.news.name(), "no live articles, using demo set");
            raw = demo_articles();
        }

        let now = Utc::now();
        let batch: Vec<NewArticle> = raw
            .into_iter()
            .filter_map(|article| new_article_from_raw(article, now))
            .collect();

        let outcome = self.store.insert_new(batch).await?;
        info!(new = outcome.inserted.len(), existing = outcome.existing, "fetched news");
        Ok(FetchOutcome { inserted: outcome.inserted, existing: outcome.existing })
    }

    pub async fn translate_article(&self, id: i64) -> Result<TranslateOutcome> {
        let article = self.get(id).await?;
        if article.is_translated {
            return Ok(TranslateOutcome::AlreadyTranslated(article));
        }

        let fields = self.translator.translate_article(&article, DEFAULT_TARGET_LANGUAGE).await;
        let update = TranslationUpdate { id, fields, translated_at: Utc::now() };
        let saved = self.store.save_translations(vec![update]).await?;
        if let Some(article) = saved.into_iter().next() {
            return Ok(TranslateOutcome::Translated(article));
        }

        // Nothing written: either another request translated it first, or
        // the update failed.
        match self.store.get_article(id).await? {
            Some(article) if article.is_translated => Ok(TranslateOutcome::AlreadyTranslated(article)),
            _ => Err(Error::Database(format!("Failed to save translation for article {}", id))),
        }
    }

    /// Translate the next batch of untranslated articles and return how many
    /// were saved.
    pub async fn translate_pending(&self) -> Result<usize> {
        let pending = self.store.untranslated(TRANSLATE_BATCH_SIZE).await?;
        let mut updates = Vec::with_capacity(pending.len());
        for article in &pending {
            let fields = self.translator.translate_article(article, DEFAULT_TARGET_LANGUAGE).await;
            updates.push(TranslationUpdate { id: article.id, fields, translated_at: Utc::now() });
        }

        let saved = self.store.save_translations(updates).await?;
        info!(translated = saved.len(), "translated pending articles");
        Ok(saved.len())
    }

    pub async fn stats(&self) -> Result<ArticleStats> {
        let total = self.store.count_all().await?;
        let translated = self.store.count_translated().await?;
        let recent = self
            .store
            .count_created_since(Utc::now() - sn_core::types::recent_window())
            .await?;
        Ok(ArticleStats::from_counts(total, translated, recent))
    }
}

impl std::fmt::Debug for ArticleService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArticleService")
            .field("news", &self.news.name())
            .field("translator", &self.translator)
            .finish()
    }
}
