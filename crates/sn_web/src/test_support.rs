use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sn_core::{
    Article, ArticleQuery, ArticleStore, InsertOutcome, NewArticle, NewsProvider, Page, RawArticle,
    Result, TranslatedFields, TranslationProvider, TranslationUpdate,
};
use sn_storage::MemoryStorage;
use sn_translate::Translator;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::service::ArticleService;

/// News provider returning a fixed list and remembering the last limit asked for.
#[derive(Clone, Default)]
pub struct FakeNews {
    articles: Vec<RawArticle>,
    last_limit: Arc<Mutex<Option<u32>>>,
}

impl FakeNews {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with(articles: Vec<RawArticle>) -> Self {
        Self { articles, ..Default::default() }
    }

    pub fn last_limit(&self) -> Option<u32> {
        *self.last_limit.lock().unwrap()
    }
}

#[async_trait]
impl NewsProvider for FakeNews {
    fn name(&self) -> &str {
        "fake"
    }

    async fn headlines(&self, _locale: &str, _language: &str, limit: u32) -> Vec<RawArticle> {
        *self.last_limit.lock().unwrap() = Some(limit);
        self.articles.clone()
    }

    async fn all_news(&self, _locale: &str, _language: &str, _limit: u32) -> Vec<RawArticle> {
        self.articles.clone()
    }
}

/// Translation provider that prefixes the target code and counts calls.
#[derive(Default)]
pub struct CountingProvider {
    calls: AtomicUsize,
}

impl CountingProvider {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TranslationProvider for CountingProvider {
    fn name(&self) -> &str {
        "counting"
    }

    async fn translate(&self, text: &str, target: &str, _source: &str) -> Result<Option<String>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(Some(format!("{}:{}", target, text)))
    }
}

/// Memory store whose translation saves never land. With `rival` set, a
/// competing translation with that title is stored first, the way a
/// concurrent request finishing earlier would.
#[derive(Default)]
pub struct LosingStore {
    inner: MemoryStorage,
    rival: Option<String>,
}

impl LosingStore {
    pub fn failing() -> Self {
        Self::default()
    }

    pub fn beaten_by(title: &str) -> Self {
        Self { rival: Some(title.to_string()), ..Default::default() }
    }
}

#[async_trait]
impl ArticleStore for LosingStore {
    async fn list_articles(&self, query: &ArticleQuery) -> Result<Page<Article>> {
        self.inner.list_articles(query).await
    }

    async fn get_article(&self, id: i64) -> Result<Option<Article>> {
        self.inner.get_article(id).await
    }

    async fn insert_new(&self, articles: Vec<NewArticle>) -> Result<InsertOutcome> {
        self.inner.insert_new(articles).await
    }

    async fn untranslated(&self, limit: u32) -> Result<Vec<Article>> {
        self.inner.untranslated(limit).await
    }

    async fn save_translations(&self, updates: Vec<TranslationUpdate>) -> Result<Vec<Article>> {
        let Some(title) = &self.rival else {
            return Ok(Vec::new());
        };
        let rivals = updates
            .iter()
            .map(|u| TranslationUpdate {
                id: u.id,
                fields: TranslatedFields { title: Some(title.clone()), ..Default::default() },
                translated_at: Utc::now(),
            })
            .collect();
        self.inner.save_translations(rivals).await?;
        self.inner.save_translations(updates).await
    }

    async fn count_all(&self) -> Result<u64> {
        self.inner.count_all().await
    }

    async fn count_translated(&self) -> Result<u64> {
        self.inner.count_translated().await
    }

    async fn count_created_since(&self, since: DateTime<Utc>) -> Result<u64> {
        self.inner.count_created_since(since).await
    }
}

pub fn service_with_store(
    store: Arc<dyn ArticleStore>,
    news: FakeNews,
) -> (ArticleService, Arc<CountingProvider>) {
    let provider = Arc::new(CountingProvider::default());
    let translator = Translator::new(vec![provider.clone()]);
    let service = ArticleService::new(store, Arc::new(news), Arc::new(translator));
    (service, provider)
}

pub fn service_with(news: FakeNews) -> (ArticleService, Arc<CountingProvider>) {
    service_with_store(Arc::new(MemoryStorage::new()), news)
}
