use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sn_core::{
    Article, ArticleQuery, ArticleStore, InsertOutcome, NewArticle, Page, Result, TranslationUpdate,
};
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Debug, Default)]
pub struct MemoryStore {
    articles: Vec<Article>,
    last_id: i64,
}

impl MemoryStore {
    fn contains_uuid(&self, uuid: &str) -> bool {
        self.articles.iter().any(|a| a.uuid == uuid)
    }

    fn insert_new(&mut self, articles: Vec<NewArticle>) -> InsertOutcome {
        let mut outcome = InsertOutcome::default();
        for new in articles {
            if self.contains_uuid(&new.uuid) {
                outcome.existing += 1;
                continue;
            }
            self.last_id += 1;
            let article = Article::from_new(self.last_id, new);
            self.articles.push(article.clone());
            outcome.inserted.push(article);
        }
        outcome
    }

    fn list(&self, query: &ArticleQuery) -> Page<Article> {
        let mut matching: Vec<&Article> = self
            .articles
            .iter()
            .filter(|a| a.category == query.category)
            .filter(|a| !query.translated_only || a.is_translated)
            .collect();
        matching.sort_by(|a, b| b.published_at.cmp(&a.published_at).then(b.id.cmp(&a.id)));

        let total = matching.len() as u64;
        let items = matching
            .into_iter()
            .skip(query.offset() as usize)
            .take(query.per_page as usize)
            .cloned()
            .collect();

        Page { items, page: query.page, per_page: query.per_page, total }
    }

    fn save_translations(&mut self, updates: Vec<TranslationUpdate>) -> Vec<Article> {
        let mut saved = Vec::with_capacity(updates.len());
        for update in updates {
            match self.articles.iter_mut().find(|a| a.id == update.id) {
                Some(article) if article.is_translated => {
                    tracing::warn!(id = update.id, "article already translated, keeping stored text")
                }
                Some(article) => {
                    article.apply_translation(update.fields, update.translated_at);
                    saved.push(article.clone());
                }
                None => tracing::warn!(id = update.id, "translated article vanished before save"),
            }
        }
        saved
    }
}

/// Process-local store, used for tests and `--storage memory`.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    store: Arc<RwLock<MemoryStore>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ArticleStore for MemoryStorage {
    async fn list_articles(&self, query: &ArticleQuery) -> Result<Page<Article>> {
        Ok(self.store.read().await.list(query))
    }

    async fn get_article(&self, id: i64) -> Result<Option<Article>> {
        let store = self.store.read().await;
        Ok(store.articles.iter().find(|a| a.id == id).cloned())
    }

    async fn insert_new(&self, articles: Vec<NewArticle>) -> Result<InsertOutcome> {
        Ok(self.store.write().await.insert_new(articles))
    }

    async fn untranslated(&self, limit: u32) -> Result<Vec<Article>> {
        let store = self.store.read().await;
        let mut pending: Vec<Article> = store.articles.iter().filter(|a| !a.is_translated).cloned().collect();
        pending.sort_by_key(|a| a.id);
        pending.truncate(limit as usize);
        Ok(pending)
    }

    async fn save_translations(&self, updates: Vec<TranslationUpdate>) -> Result<Vec<Article>> {
        Ok(self.store.write().await.save_translations(updates))
    }

    async fn count_all(&self) -> Result<u64> {
        Ok(self.store.read().await.articles.len() as u64)
    }

    async fn count_translated(&self) -> Result<u64> {
        let store = self.store.read().await;
        Ok(store.articles.iter().filter(|a| a.is_translated).count() as u64)
    }

    async fn count_created_since(&self, since: DateTime<Utc>) -> Result<u64> {
        let store = self.store.read().await;
        Ok(store.articles.iter().filter(|a| a.created_at >= since).count() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use sn_core::TranslatedFields;

    fn new_article(uuid: &str, published_at: DateTime<Utc>) -> NewArticle {
        NewArticle {
            uuid: uuid.to_string(),
            title: format!("Title {}", uuid),
            description: Some("A description".to_string()),
            content: None,
            url: format!("https://example.com/{}", uuid),
            image_url: None,
            source: "test".to_string(),
            language: "en".to_string(),
            category: "sports".to_string(),
            published_at,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_memory_storage_dedups_by_uuid() {
        let storage = MemoryStorage::new();
        let now = Utc::now();

        let first = storage.insert_new(vec![new_article("a", now), new_article("b", now)]).await.unwrap();
        assert_eq!(first.inserted.len(), 2);
        assert_eq!(first.existing, 0);

        let second = storage.insert_new(vec![new_article("a", now), new_article("c", now)]).await.unwrap();
        assert_eq!(second.inserted.len(), 1);
        assert_eq!(second.existing, 1);
        assert_eq!(storage.count_all().await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_memory_storage_lists_newest_first() {
        let storage = MemoryStorage::new();
        let now = Utc::now();
        storage
            .insert_new(vec![
                new_article("old", now - Duration::hours(5)),
                new_article("new", now),
                new_article("mid", now - Duration::hours(1)),
            ])
            .await
            .unwrap();

        let query = ArticleQuery { per_page: 2, translated_only: false, ..Default::default() };
        let page = storage.list_articles(&query).await.unwrap();
        assert_eq!(page.total, 3);
        let uuids: Vec<_> = page.items.iter().map(|a| a.uuid.as_str()).collect();
        assert_eq!(uuids, vec!["new", "mid"]);

        let translated = storage.list_articles(&ArticleQuery::default()).await.unwrap();
        assert_eq!(translated.total, 0);
    }

    #[tokio::test]
    async fn test_memory_storage_save_translations() {
        let storage = MemoryStorage::new();
        let outcome = storage.insert_new(vec![new_article("a", Utc::now())]).await.unwrap();
        let id = outcome.inserted[0].id;

        let saved = storage
            .save_translations(vec![
                TranslationUpdate {
                    id,
                    fields: TranslatedFields { title: Some("Naslov".to_string()), ..Default::default() },
                    translated_at: Utc::now(),
                },
                TranslationUpdate { id: 999, fields: TranslatedFields::default(), translated_at: Utc::now() },
            ])
            .await
            .unwrap();

        assert_eq!(saved.len(), 1);
        let article = storage.get_article(id).await.unwrap().unwrap();
        assert!(article.is_translated);
        assert!(article.translated_at.is_some());
        assert_eq!(article.title_translated.as_deref(), Some("Naslov"));
        assert!(storage.untranslated(10).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_memory_storage_keeps_first_translation() {
        let storage = MemoryStorage::new();
        let outcome = storage.insert_new(vec![new_article("a", Utc::now())]).await.unwrap();
        let id = outcome.inserted[0].id;
        let update = |title: &str| TranslationUpdate {
            id,
            fields: TranslatedFields { title: Some(title.to_string()), ..Default::default() },
            translated_at: Utc::now(),
        };

        assert_eq!(storage.save_translations(vec![update("prvi")]).await.unwrap().len(), 1);
        assert!(storage.save_translations(vec![update("drugi")]).await.unwrap().is_empty());

        let article = storage.get_article(id).await.unwrap().unwrap();
        assert_eq!(article.title_translated.as_deref(), Some("prvi"));
    }
}
