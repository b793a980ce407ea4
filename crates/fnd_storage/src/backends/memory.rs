use async_trait::async_trait;
use fnd_core::{AnalyzedArticle, LabelCount, Result, ResultStorage, RunInfo};
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Debug, Clone)]
pub struct StoredRow {
    pub run: RunInfo,
    pub row: AnalyzedArticle,
}

/// Process-local result table with the same append-only contract as SQLite.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    rows: Arc<RwLock<Vec<StoredRow>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn rows(&self) -> Vec<StoredRow> {
        self.rows.read().await.clone()
    }
}

#[async_trait]
impl ResultStorage for MemoryStorage {
    async fn append_results(&self, run: &RunInfo, rows: &[AnalyzedArticle]) -> Result<usize> {
        let mut store = self.rows.write().await;
        store.extend(rows.iter().map(|row| StoredRow {
            run: run.clone(),
            row: row.clone(),
        }));
        Ok(rows.len())
    }

    async fn clickbait_counts(&self) -> Result<Vec<LabelCount>> {
        let store = self.rows.read().await;
        let mut counts: BTreeMap<String, usize> = BTreeMap::new();
        for stored in store.iter() {
            *counts.entry(stored.row.clickbait.to_string()).or_insert(0) += 1;
        }
        Ok(counts
            .into_iter()
            .map(|(label, count)| LabelCount { label, count })
            .collect())
    }

    async fn row_count(&self) -> Result<usize> {
        Ok(self.rows.read().await.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use fnd_core::{Article, ClickbaitLabel, Sentiment, SentimentLabel};

    fn row(index: usize, clickbait: ClickbaitLabel) -> AnalyzedArticle {
        AnalyzedArticle {
            index,
            article: Article {
                title: "Test Article".to_string(),
                body: "This is a test article about politics.".to_string(),
                source: "test".to_string(),
                url: Some("http://test.com".to_string()),
                published_at: Utc::now(),
                keyword: "politics".to_string(),
                word_count: 7,
                text: "test article this is a test article about politics".to_string(),
            },
            clickbait,
            sentiment: Sentiment {
                label: SentimentLabel::Neutral,
                score: 0.5,
            },
        }
    }

    #[tokio::test]
    async fn test_memory_storage_appends_across_runs() {
        let storage = MemoryStorage::new();
        let first = vec![row(1, ClickbaitLabel::Clickbait), row(2, ClickbaitLabel::NotClickbait)];
        let second = vec![row(1, ClickbaitLabel::NotClickbait)];

        assert_eq!(storage.append_results(&RunInfo::new("politics"), &first).await.unwrap(), 2);
        assert_eq!(storage.append_results(&RunInfo::new("politics"), &second).await.unwrap(), 1);
        assert_eq!(storage.row_count().await.unwrap(), 3);

        let counts = storage.clickbait_counts().await.unwrap();
        assert_eq!(
            counts,
            vec![
                LabelCount { label: "Clickbait".to_string(), count: 1 },
                LabelCount { label: "Not Clickbait".to_string(), count: 2 },
            ]
        );

        let rows = storage.rows().await;
        assert_ne!(rows[0].run.run_id, rows[2].run.run_id);
    }
}
