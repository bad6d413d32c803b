//! SQLite row store for scraped articles.
//!
//! One row per [`ArticleRecord`]. Keywords are stored as a JSON array so
//! membership queries can use `json_each`. Inserts append. Nothing is
//! de-duplicated, so scraping the same URL twice yields two rows.
//!
//! Every query binds its parameters; user input is never spliced into SQL.

use crate::error::Result;
use crate::models::ArticleRecord;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions, SqliteRow};
use sqlx::Row;
use std::path::Path;
use tracing::{debug, info, instrument};

const MIGRATIONS: &[&str] = &[r#"
    CREATE TABLE IF NOT EXISTS articles (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        title TEXT NOT NULL,
        date TEXT NOT NULL,
        body TEXT NOT NULL,
        fonte TEXT NOT NULL,
        author TEXT NOT NULL,
        src TEXT,
        url TEXT NOT NULL,
        keywords TEXT NOT NULL DEFAULT '[]'
    )
    "#];

const SELECT_COLUMNS: &str =
    "SELECT title, date, body, fonte, author, src, url, keywords FROM articles";

/// Handle to the article table. Cloning shares the underlying pool.
#[derive(Debug, Clone)]
pub struct ArticleStore {
    pool: SqlitePool,
}

impl ArticleStore {
    /// Open (creating if needed) the database at `path` and run migrations.
    #[instrument(level = "info", skip_all, fields(path = %path.display()))]
    pub async fn connect(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true);
        let pool = SqlitePoolOptions::new().connect_with(options).await?;
        Self::with_pool(pool).await
    }

    /// Private in-memory database, used by tests.
    #[cfg(test)]
    pub async fn in_memory() -> Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await?;
        Self::with_pool(pool).await
    }

    async fn with_pool(pool: SqlitePool) -> Result<Self> {
        for (i, migration) in MIGRATIONS.iter().enumerate() {
            sqlx::query(migration).execute(&pool).await?;
            debug!(migration = i, "Applied migration");
        }
        Ok(Self { pool })
    }

    /// Append `records` in a single transaction.
    #[instrument(level = "info", skip_all, fields(count = records.len()))]
    pub async fn insert_rows(&self, records: &[ArticleRecord]) -> Result<()> {
        let mut tx = self.pool.begin().await?;
        for record in records {
            sqlx::query(
                r#"
                INSERT INTO articles (title, date, body, fonte, author, src, url, keywords)
                VALUES (?, ?, ?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(&record.title)
            .bind(&record.date)
            .bind(&record.body)
            .bind(&record.fonte)
            .bind(&record.author)
            .bind(record.src.as_deref())
            .bind(&record.url)
            .bind(serde_json::to_string(&record.keywords)?)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;
        info!("Inserted rows");
        Ok(())
    }

    /// Every stored row, oldest first.
    #[instrument(level = "info", skip(self))]
    pub async fn list_rows(&self) -> Result<Vec<ArticleRecord>> {
        let rows = sqlx::query(&format!("{SELECT_COLUMNS} ORDER BY id"))
            .fetch_all(&self.pool)
            .await?;
        rows.iter().map(record_from_row).collect()
    }

    #[instrument(level = "info", skip(self))]
    pub async fn find_by_url(&self, url: &str) -> Result<Vec<ArticleRecord>> {
        let rows = sqlx::query(&format!("{SELECT_COLUMNS} WHERE url = ? ORDER BY id"))
            .bind(url)
            .fetch_all(&self.pool)
            .await?;
        rows.iter().map(record_from_row).collect()
    }

    #[instrument(level = "info", skip(self))]
    pub async fn find_by_fonte(&self, fonte: &str) -> Result<Vec<ArticleRecord>> {
        let rows = sqlx::query(&format!("{SELECT_COLUMNS} WHERE fonte = ? ORDER BY id"))
            .bind(fonte)
            .fetch_all(&self.pool)
            .await?;
        rows.iter().map(record_from_row).collect()
    }

    /// Rows whose `Keywords` array contains `keyword` exactly.
    #[instrument(level = "info", skip(self))]
    pub async fn find_by_keyword(&self, keyword: &str) -> Result<Vec<ArticleRecord>> {
        let rows = sqlx::query(&format!(
            "{SELECT_COLUMNS} WHERE EXISTS \
             (SELECT 1 FROM json_each(articles.keywords) WHERE json_each.value = ?) \
             ORDER BY id"
        ))
        .bind(keyword)
        .fetch_all(&self.pool)
        .await?;
        rows.iter().map(record_from_row).collect()
    }
}

fn record_from_row(row: &SqliteRow) -> Result<ArticleRecord> {
    let keywords: String = row.try_get("keywords")?;
    Ok(ArticleRecord {
        title: row.try_get("title")?,
        date: row.try_get("date")?,
        body: row.try_get("body")?,
        fonte: row.try_get("fonte")?,
        author: row.try_get("author")?,
        src: row.try_get("src")?,
        url: row.try_get("url")?,
        keywords: serde_json::from_str(&keywords)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::sample_record;

    fn other_record() -> ArticleRecord {
        ArticleRecord {
            title: "Clima".to_string(),
            fonte: "Reuters".to_string(),
            src: None,
            url: "https://www.bbc.com/portuguese/articles/c9999".to_string(),
            keywords: vec!["Meio ambiente".to_string()],
            ..sample_record()
        }
    }

    #[tokio::test]
    async fn test_insert_and_list_in_order() {
        let store = ArticleStore::in_memory().await.unwrap();
        store
            .insert_rows(&[sample_record(), other_record()])
            .await
            .unwrap();

        let rows = store.list_rows().await.unwrap();
        assert_eq!(rows, vec![sample_record(), other_record()]);
    }

    #[tokio::test]
    async fn test_duplicates_are_kept() {
        let store = ArticleStore::in_memory().await.unwrap();
        store.insert_rows(&[sample_record()]).await.unwrap();
        store.insert_rows(&[sample_record()]).await.unwrap();

        let rows = store.find_by_url(&sample_record().url).await.unwrap();
        assert_eq!(rows.len(), 2);
    }

    #[tokio::test]
    async fn test_find_by_fonte() {
        let store = ArticleStore::in_memory().await.unwrap();
        store
            .insert_rows(&[sample_record(), other_record()])
            .await
            .unwrap();

        let rows = store.find_by_fonte("Reuters").await.unwrap();
        assert_eq!(rows, vec![other_record()]);
        assert!(store.find_by_fonte("reuters").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_find_by_keyword_is_exact_membership() {
        let store = ArticleStore::in_memory().await.unwrap();
        store
            .insert_rows(&[sample_record(), other_record()])
            .await
            .unwrap();

        let rows = store.find_by_keyword("Brasil").await.unwrap();
        assert_eq!(rows, vec![sample_record()]);
        assert!(store.find_by_keyword("Bras").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_quotes_in_input_are_data() {
        let store = ArticleStore::in_memory().await.unwrap();
        store.insert_rows(&[sample_record()]).await.unwrap();

        let rows = store
            .find_by_fonte("x' OR '1'='1")
            .await
            .unwrap();
        assert!(rows.is_empty());
        let rows = store.find_by_keyword("' OR 1=1 --").await.unwrap();
        assert!(rows.is_empty());
    }

    #[tokio::test]
    async fn test_connect_creates_database_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("articles.db");

        let store = ArticleStore::connect(&path).await.unwrap();
        store.insert_rows(&[other_record()]).await.unwrap();
        drop(store);

        let reopened = ArticleStore::connect(&path).await.unwrap();
        assert_eq!(reopened.list_rows().await.unwrap(), vec![other_record()]);
    }
}
