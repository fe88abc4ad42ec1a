use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use sn_core::{
    Article, ArticleQuery, ArticleStore, Error, InsertOutcome, NewArticle, Page, Result,
    TranslationUpdate,
};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions, SqliteRow};
use sqlx::Row;
use std::path::Path;
use tracing::{error, info, warn};

const MIGRATIONS: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS articles (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        uuid TEXT NOT NULL UNIQUE,
        title TEXT NOT NULL,
        title_translated TEXT,
        description TEXT,
        description_translated TEXT,
        content TEXT,
        content_translated TEXT,
        url TEXT NOT NULL,
        image_url TEXT,
        source TEXT NOT NULL,
        language TEXT NOT NULL DEFAULT 'en',
        category TEXT NOT NULL DEFAULT 'sports',
        published_at TEXT NOT NULL,
        created_at TEXT NOT NULL,
        translated_at TEXT,
        is_translated INTEGER NOT NULL DEFAULT 0
    )
    "#,
    r#"
    CREATE INDEX IF NOT EXISTS idx_articles_listing
        ON articles (category, is_translated, published_at)
    "#,
    r#"
    CREATE INDEX IF NOT EXISTS idx_articles_created_at ON articles (created_at)
    "#,
    // Add future migrations here
];

const ARTICLE_COLUMNS: &str = "id, uuid, title, title_translated, description, description_translated, \
     content, content_translated, url, image_url, source, language, category, \
     published_at, created_at, translated_at, is_translated";

pub struct SQLiteStorage {
    pool: SqlitePool,
}

impl SQLiteStorage {
    pub async fn new_with_path(db_path: impl AsRef<Path>) -> Result<Self> {
        let db_path = db_path.as_ref();
        if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let options = SqliteConnectOptions::new()
            .filename(db_path)
            .create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .connect_with(options)
            .await
            .map_err(db_error("Failed to connect to database"))?;

        for (i, migration) in MIGRATIONS.iter().enumerate() {
            sqlx::query(migration)
                .execute(&pool)
                .await
                .map_err(|e| Error::Database(format!("Failed to run migration {}: {}", i, e)))?;
        }

        info!(path = %db_path.display(), "opened SQLite database");
        Ok(Self { pool })
    }

    async fn count(&self, sql: &str, since: Option<String>) -> Result<u64> {
        let mut query = sqlx::query_scalar::<_, i64>(sql);
        if let Some(since) = since {
            query = query.bind(since);
        }
        let count = query
            .fetch_one(&self.pool)
            .await
            .map_err(db_error("Failed to count articles"))?;
        Ok(count.max(0) as u64)
    }
}

/// Fixed-width UTC form, so that string order in SQLite is time order.
fn encode_timestamp(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn decode_timestamp(value: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| Error::Database(format!("Failed to parse stored date {:?}: {}", value, e)))
}

fn db_error(context: &'static str) -> impl Fn(sqlx::Error) -> Error {
    move |e| Error::Database(format!("{}: {}", context, e))
}

fn article_from_row(row: &SqliteRow) -> Result<Article> {
    let get_err = db_error("Failed to read article row");
    let translated_at: Option<String> = row.try_get("translated_at").map_err(&get_err)?;

    Ok(Article {
        id: row.try_get("id").map_err(&get_err)?,
        uuid: row.try_get("uuid").map_err(&get_err)?,
        title: row.try_get("title").map_err(&get_err)?,
        title_translated: row.try_get("title_translated").map_err(&get_err)?,
        description: row.try_get("description").map_err(&get_err)?,
        description_translated: row.try_get("description_translated").map_err(&get_err)?,
        content: row.try_get("content").map_err(&get_err)?,
        content_translated: row.try_get("content_translated").map_err(&get_err)?,
        url: row.try_get("url").map_err(&get_err)?,
        image_url: row.try_get("image_url").map_err(&get_err)?,
        source: row.try_get("source").map_err(&get_err)?,
        language: row.try_get("language").map_err(&get_err)?,
        category: row.try_get("category").map_err(&get_err)?,
        published_at: decode_timestamp(&row.try_get::<String, _>("published_at").map_err(&get_err)?)?,
        created_at: decode_timestamp(&row.try_get::<String, _>("created_at").map_err(&get_err)?)?,
        translated_at: translated_at.as_deref().map(decode_timestamp).transpose()?,
        is_translated: row.try_get("is_translated").map_err(&get_err)?,
    })
}

#[async_trait]
impl ArticleStore for SQLiteStorage {
    async fn list_articles(&self, query: &ArticleQuery) -> Result<Page<Article>> {
        let total: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM articles
            WHERE category = ? AND (? = 0 OR is_translated = 1)
            "#,
        )
        .bind(&query.category)
        .bind(query.translated_only)
        .fetch_one(&self.pool)
        .await
        .map_err(db_error("Failed to count articles"))?;

        let sql = format!(
            r#"
            SELECT {} FROM articles
            WHERE category = ? AND (? = 0 OR is_translated = 1)
            ORDER BY published_at DESC, id DESC
            LIMIT ? OFFSET ?
            "#,
            ARTICLE_COLUMNS
        );
        let rows = sqlx::query(&sql)
            .bind(&query.category)
            .bind(query.translated_only)
            .bind(i64::from(query.per_page))
            .bind(query.offset() as i64)
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("Failed to list articles"))?;

        let items = rows.iter().map(article_from_row).collect::<Result<Vec<_>>>()?;
        Ok(Page { items, page: query.page, per_page: query.per_page, total: total.max(0) as u64 })
    }

    async fn get_article(&self, id: i64) -> Result<Option<Article>> {
        let sql = format!("SELECT {} FROM articles WHERE id = ?", ARTICLE_COLUMNS);
        let row = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("Failed to get article"))?;

        row.as_ref().map(article_from_row).transpose()
    }

    async fn insert_new(&self, articles: Vec<NewArticle>) -> Result<InsertOutcome> {
        let mut tx = self.pool.begin().await.map_err(db_error("Failed to open transaction"))?;
        let mut outcome = InsertOutcome::default();

        for new in articles {
            let exists = sqlx::query("SELECT 1 FROM articles WHERE uuid = ?")
                .bind(&new.uuid)
                .fetch_optional(&mut *tx)
                .await
                .map_err(db_error("Failed to look up article"))?
                .is_some();
            if exists {
                outcome.existing += 1;
                continue;
            }

            let inserted = sqlx::query(
                r#"
                INSERT INTO articles
                (uuid, title, description, content, url, image_url, source, language,
                 category, published_at, created_at, is_translated)
                VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, 0)
                "#,
            )
            .bind(&new.uuid)
            .bind(&new.title)
            .bind(new.description.as_deref())
            .bind(new.content.as_deref())
            .bind(&new.url)
            .bind(new.image_url.as_deref())
            .bind(&new.source)
            .bind(&new.language)
            .bind(&new.category)
            .bind(encode_timestamp(&new.published_at))
            .bind(encode_timestamp(&new.created_at))
            .execute(&mut *tx)
            .await;

            match inserted {
                Ok(result) => {
                    let id = result.last_insert_rowid();
                    outcome.inserted.push(Article::from_new(id, new));
                }
                Err(e) => error!(uuid = %new.uuid, error = %e, "Failed to insert article, skipping"),
            }
        }

        tx.commit().await.map_err(db_error("Failed to commit new articles"))?;
        Ok(outcome)
    }

    async fn untranslated(&self, limit: u32) -> Result<Vec<Article>> {
        let sql = format!(
            "SELECT {} FROM articles WHERE is_translated = 0 ORDER BY id ASC LIMIT ?",
            ARTICLE_COLUMNS
        );
        let rows = sqlx::query(&sql)
            .bind(i64::from(limit))
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("Failed to select untranslated articles"))?;

        rows.iter().map(article_from_row).collect()
    }

    async fn save_translations(&self, updates: Vec<TranslationUpdate>) -> Result<Vec<Article>> {
        let mut tx = self.pool.begin().await.map_err(db_error("Failed to open transaction"))?;
        let mut saved_ids = Vec::with_capacity(updates.len());

        for update in updates {
            let result = sqlx::query(
                r#"
                UPDATE articles
                SET title_translated = ?, description_translated = ?, content_translated = ?,
                    translated_at = ?, is_translated = 1
                WHERE id = ? AND is_translated = 0
                "#,
            )
            .bind(update.fields.title.as_deref())
            .bind(update.fields.description.as_deref())
            .bind(update.fields.content.as_deref())
            .bind(encode_timestamp(&update.translated_at))
            .bind(update.id)
            .execute(&mut *tx)
            .await;

            match result {
                Ok(done) if done.rows_affected() == 1 => saved_ids.push(update.id),
                Ok(_) => warn!(id = update.id, "article missing or already translated, not saved"),
                Err(e) => error!(id = update.id, error = %e, "Failed to save translation, skipping"),
            }
        }

        tx.commit().await.map_err(db_error("Failed to commit translations"))?;

        let mut saved = Vec::with_capacity(saved_ids.len());
        for id in saved_ids {
            if let Some(article) = self.get_article(id).await? {
                saved.push(article);
            }
        }
        Ok(saved)
    }

    async fn count_all(&self) -> Result<u64> {
        self.count("SELECT COUNT(*) FROM articles", None).await
    }

    async fn count_translated(&self) -> Result<u64> {
        self.count("SELECT COUNT(*) FROM articles WHERE is_translated = 1", None).await
    }

    async fn count_created_since(&self, since: DateTime<Utc>) -> Result<u64> {
        self.count(
            "SELECT COUNT(*) FROM articles WHERE created_at >= ?",
            Some(encode_timestamp(&since)),
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use sn_core::TranslatedFields;
    use tempfile::tempdir;

    fn new_article(uuid: &str, published_at: DateTime<Utc>) -> NewArticle {
        NewArticle {
            uuid: uuid.to_string(),
            title: format!("Title {}", uuid),
            description: Some("A description".to_string()),
            content: None,
            url: format!("https://example.com/{}", uuid),
            image_url: Some("https://example.com/img.jpg".to_string()),
            source: "test".to_string(),
            language: "en".to_string(),
            category: "sports".to_string(),
            published_at,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_sqlite_storage_round_trip() {
        let temp_dir = tempdir().unwrap();
        let storage = SQLiteStorage::new_with_path(temp_dir.path().join("test.db")).await.unwrap();

        let published = Utc::now() - Duration::hours(3);
        let outcome = storage.insert_new(vec![new_article("a", published)]).await.unwrap();
        assert_eq!(outcome.inserted.len(), 1);

        let stored = storage.get_article(outcome.inserted[0].id).await.unwrap().unwrap();
        assert_eq!(stored.uuid, "a");
        assert_eq!(stored.content, None);
        assert_eq!(stored.image_url.as_deref(), Some("https://example.com/img.jpg"));
        assert_eq!(stored.published_at.timestamp_micros(), published.timestamp_micros());
        assert!(!stored.is_translated);

        assert!(storage.get_article(4242).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_sqlite_storage_dedups_by_uuid() {
        let temp_dir = tempdir().unwrap();
        let storage = SQLiteStorage::new_with_path(temp_dir.path().join("test.db")).await.unwrap();
        let now = Utc::now();

        storage.insert_new(vec![new_article("a", now)]).await.unwrap();
        let second = storage
            .insert_new(vec![new_article("a", now), new_article("b", now), new_article("b", now)])
            .await
            .unwrap();

        assert_eq!(second.inserted.len(), 1);
        assert_eq!(second.existing, 2);
        assert_eq!(storage.count_all().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_sqlite_storage_pagination_and_filters() {
        let temp_dir = tempdir().unwrap();
        let storage = SQLiteStorage::new_with_path(temp_dir.path().join("test.db")).await.unwrap();
        let now = Utc::now();

        let batch = (0..5).map(|i| new_article(&format!("a{}", i), now - Duration::hours(i))).collect();
        let outcome = storage.insert_new(batch).await.unwrap();

        let query = ArticleQuery { page: 2, per_page: 2, translated_only: false, ..Default::default() };
        let page = storage.list_articles(&query).await.unwrap();
        assert_eq!(page.total, 5);
        assert_eq!(page.total_pages(), 3);
        let uuids: Vec<_> = page.items.iter().map(|a| a.uuid.as_str()).collect();
        assert_eq!(uuids, vec!["a2", "a3"]);

        let other = ArticleQuery { category: "politics".to_string(), translated_only: false, ..Default::default() };
        assert_eq!(storage.list_articles(&other).await.unwrap().total, 0);

        let id = outcome.inserted[4].id;
        storage
            .save_translations(vec![TranslationUpdate {
                id,
                fields: TranslatedFields {
                    title: Some("Naslov".to_string()),
                    description: Some("Opis".to_string()),
                    content: None,
                },
                translated_at: Utc::now(),
            }])
            .await
            .unwrap();

        let translated = storage.list_articles(&ArticleQuery::default()).await.unwrap();
        assert_eq!(translated.total, 1);
        let article = &translated.items[0];
        assert_eq!(article.uuid, "a4");
        assert!(article.translated_at.is_some());
        assert_eq!(article.content_translated, None);
        assert_eq!(storage.count_translated().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_sqlite_storage_untranslated_and_recent() {
        let temp_dir = tempdir().unwrap();
        let storage = SQLiteStorage::new_with_path(temp_dir.path().join("test.db")).await.unwrap();
        let now = Utc::now();

        let mut stale = new_article("stale", now);
        stale.created_at = now - Duration::days(30);
        storage.insert_new(vec![stale, new_article("fresh", now)]).await.unwrap();

        let pending = storage.untranslated(1).await.unwrap();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].uuid, "stale");

        let since = now - Duration::days(7);
        assert_eq!(storage.count_created_since(since).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_sqlite_storage_keeps_first_translation() {
        let temp_dir = tempdir().unwrap();
        let storage = SQLiteStorage::new_with_path(temp_dir.path().join("test.db")).await.unwrap();
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
        assert_eq!(storage.count_translated().await.unwrap(), 1);
    }
}
