use async_trait::async_trait;
use fnd_core::{AnalyzedArticle, Error, LabelCount, Result, ResultStorage, RunInfo};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool};
use sqlx::Row;
use std::path::{Path, PathBuf};
use tracing::debug;

const MIGRATIONS: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS articles (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        run_id TEXT NOT NULL,
        keyword TEXT NOT NULL,
        article_index INTEGER NOT NULL,
        title TEXT NOT NULL,
        body TEXT NOT NULL,
        source TEXT NOT NULL,
        url TEXT,
        published_at TEXT NOT NULL,
        word_count INTEGER NOT NULL,
        clickbait_label TEXT NOT NULL,
        sentiment_label TEXT NOT NULL,
        sentiment_score REAL NOT NULL,
        combined_label TEXT NOT NULL,
        analyzed_at TEXT NOT NULL
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_articles_run_id ON articles (run_id)",
    // Add future migrations here
];

const CLICKBAIT_COUNTS_QUERY: &str = r#"
    SELECT clickbait_label, COUNT(*) AS count
    FROM articles
    GROUP BY clickbait_label
    ORDER BY clickbait_label
"#;

pub struct SqliteStorage {
    pool: SqlitePool,
    db_path: PathBuf,
}

impl SqliteStorage {
    pub async fn new_with_path(db_path: &Path) -> Result<Self> {
        // Ensure parent directory exists
        if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let options = SqliteConnectOptions::new()
            .filename(db_path)
            .create_if_missing(true);
        let pool = SqlitePool::connect_with(options)
            .await
            .map_err(|e| Error::Database(format!("Failed to open {}: {}", db_path.display(), e)))?;

        for (i, migration) in MIGRATIONS.iter().enumerate() {
            sqlx::query(migration)
                .execute(&pool)
                .await
                .map_err(|e| Error::Database(format!("Failed to run migration {}: {}", i, e)))?;
        }

        Ok(Self {
            pool,
            db_path: db_path.to_path_buf(),
        })
    }

    pub fn db_path(&self) -> &Path {
        &self.db_path
    }
}

#[async_trait]
impl ResultStorage for SqliteStorage {
    async fn append_results(&self, run: &RunInfo, rows: &[AnalyzedArticle]) -> Result<usize> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| Error::Database(format!("Failed to start transaction: {}", e)))?;

        for row in rows {
            sqlx::query(
                r#"
                INSERT INTO articles
                (run_id, keyword, article_index, title, body, source, url, published_at,
                 word_count, clickbait_label, sentiment_label, sentiment_score, combined_label, analyzed_at)
                VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(run.run_id.to_string())
            .bind(&run.keyword)
            .bind(row.index as i64)
            .bind(&row.article.title)
            .bind(&row.article.body)
            .bind(&row.article.source)
            .bind(row.article.url.as_deref())
            .bind(row.article.published_at.to_rfc3339())
            .bind(row.article.word_count as i64)
            .bind(row.clickbait.as_str())
            .bind(row.sentiment.label.as_str())
            .bind(row.sentiment.score)
            .bind(row.combined_label())
            .bind(run.analyzed_at.to_rfc3339())
            .execute(&mut *tx)
            .await
            .map_err(|e| Error::Database(format!("Failed to store article {}: {}", row.index, e)))?;
        }

        tx.commit()
            .await
            .map_err(|e| Error::Database(format!("Failed to commit run {}: {}", run.run_id, e)))?;
        debug!("Appended {} rows for run {}", rows.len(), run.run_id);
        Ok(rows.len())
    }

    async fn clickbait_counts(&self) -> Result<Vec<LabelCount>> {
        let rows = sqlx::query(CLICKBAIT_COUNTS_QUERY)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| Error::Database(format!("Failed to count clickbait labels: {}", e)))?;

        rows.into_iter()
            .map(|row| {
                let label: String = row
                    .try_get("clickbait_label")
                    .map_err(|e| Error::Database(e.to_string()))?;
                let count: i64 = row.try_get("count").map_err(|e| Error::Database(e.to_string()))?;
                Ok(LabelCount {
                    label,
                    count: count as usize,
                })
            })
            .collect()
    }

    async fn row_count(&self) -> Result<usize> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM articles")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| Error::Database(format!("Failed to count articles: {}", e)))?;
        Ok(count as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use fnd_core::{Article, ClickbaitLabel, Sentiment, SentimentLabel};
    use tempfile::tempdir;

    fn row(index: usize, clickbait: ClickbaitLabel, label: SentimentLabel) -> AnalyzedArticle {
        AnalyzedArticle {
            index,
            article: Article {
                title: format!("Test Article {}", index),
                body: "Test content about the iphone".to_string(),
                source: "test".to_string(),
                url: None,
                published_at: Utc::now(),
                keyword: "iphone".to_string(),
                word_count: 5,
                text: "test content about the iphone".to_string(),
            },
            clickbait,
            sentiment: Sentiment { label, score: 0.87 },
        }
    }

    #[tokio::test]
    async fn test_clickbait_counts_match_in_memory_tally() {
        // Create a temporary directory for the test database
        let temp_dir = tempdir().unwrap();
        let db_path = temp_dir.path().join("nested").join("test.db");

        let storage = SqliteStorage::new_with_path(&db_path).await.unwrap();
        assert!(db_path.exists());

        let rows = vec![
            row(1, ClickbaitLabel::Clickbait, SentimentLabel::Negative),
            row(2, ClickbaitLabel::NotClickbait, SentimentLabel::Positive),
            row(3, ClickbaitLabel::NotClickbait, SentimentLabel::Negative),
            row(4, ClickbaitLabel::Clickbait, SentimentLabel::Positive),
            row(5, ClickbaitLabel::NotClickbait, SentimentLabel::Neutral),
        ];
        let written = storage.append_results(&RunInfo::new("iphone"), &rows).await.unwrap();
        assert_eq!(written, 5);

        let counts = storage.clickbait_counts().await.unwrap();
        let expected: Vec<LabelCount> = ClickbaitLabel::ALL
            .iter()
            .map(|label| LabelCount {
                label: label.to_string(),
                count: rows.iter().filter(|r| r.clickbait == *label).count(),
            })
            .collect();
        assert_eq!(counts, expected);
    }

    #[tokio::test]
    async fn test_runs_are_appended_not_replaced() {
        let temp_dir = tempdir().unwrap();
        let db_path = temp_dir.path().join("test.db");

        let storage = SqliteStorage::new_with_path(&db_path).await.unwrap();
        let rows = vec![row(1, ClickbaitLabel::Clickbait, SentimentLabel::Positive)];
        storage.append_results(&RunInfo::new("iphone"), &rows).await.unwrap();
        storage.append_results(&RunInfo::new("iphone"), &rows).await.unwrap();
        assert_eq!(storage.row_count().await.unwrap(), 2);

        // Reopening keeps existing rows
        drop(storage);
        let reopened = SqliteStorage::new_with_path(&db_path).await.unwrap();
        assert_eq!(reopened.row_count().await.unwrap(), 2);
        assert_eq!(reopened.db_path(), db_path.as_path());
    }

    #[tokio::test]
    async fn test_empty_run_writes_nothing() {
        let temp_dir = tempdir().unwrap();
        let storage = SqliteStorage::new_with_path(&temp_dir.path().join("test.db")).await.unwrap();
        assert_eq!(storage.append_results(&RunInfo::new("x"), &[]).await.unwrap(), 0);
        assert!(storage.clickbait_counts().await.unwrap().is_empty());
    }
}
