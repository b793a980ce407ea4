use crate::cleaner::{clean, DropCounts};
use crate::logging::Logger;
use fnd_core::{
    AnalyzedArticle, ArticleSource, Error, FetchQuery, LabelCount, Result, ResultStorage, RowFailure,
    RowFailureReason, RowOutcome, RunInfo,
};
use fnd_inference::{ClickbaitClassifier, SentimentScorer};
use fnd_stats::{descriptive, summarize, StatisticsSummary};
use rand::Rng;
use serde::Serialize;
use std::sync::Arc;

/// Pages picked at random when the caller does not ask for one.
pub const RANDOM_PAGES: std::ops::RangeInclusive<u32> = 1..=5;

/// Everything one pipeline run produced.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub run: RunInfo,
    pub source: String,
    pub page: u32,
    pub fetched: usize,
    pub dropped: DropCounts,
    pub rows: Vec<AnalyzedArticle>,
    pub failures: Vec<RowFailure>,
    pub model: String,
    pub statistics: StatisticsSummary,
}

impl AnalysisReport {
    pub fn keyword(&self) -> &str {
        &self.run.keyword
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn combined_label_counts(&self) -> Vec<LabelCount> {
        descriptive::combined_label_counts(&self.rows)
    }
}

/// Runs fetch, clean, classify, score and statistics for one keyword.
pub struct AnalysisManager {
    source: Arc<dyn ArticleSource>,
    scorer: SentimentScorer,
    classifier: ClickbaitClassifier,
    storage: Arc<dyn ResultStorage>,
    page_size: u32,
}

impl AnalysisManager {
    pub fn new(
        source: Arc<dyn ArticleSource>,
        scorer: SentimentScorer,
        classifier: ClickbaitClassifier,
        storage: Arc<dyn ResultStorage>,
        page_size: u32,
    ) -> Self {
        Self {
            source,
            scorer,
            classifier,
            storage,
            page_size,
        }
    }

    pub fn source_name(&self) -> &str {
        self.source.name()
    }

    pub fn storage(&self) -> Arc<dyn ResultStorage> {
        self.storage.clone()
    }

    pub async fn analyze(&self, keyword: &str, page: Option<u32>) -> Result<AnalysisReport> {
        let page = page.unwrap_or_else(|| rand::thread_rng().gen_range(RANDOM_PAGES));
        let query = FetchQuery::new(keyword, self.page_size, page)?;
        let logger = Logger::new().with_prefix(format!("[{}]", query.keyword));

        logger.info(&format!("🔍 Fetching page {} from {}", query.page, self.source.name()));
        let raw = self.source.fetch(&query).await?;
        let fetched = raw.len();

        let cleaned = clean(raw, &query.keyword);
        logger.info(&format!(
            "🧹 Kept {} of {} articles ({} empty, {} malformed, {} without keyword)",
            cleaned.articles.len(),
            fetched,
            cleaned.dropped.empty_body,
            cleaned.dropped.malformed,
            cleaned.dropped.keyword_missing
        ));

        let mut outcomes: Vec<RowOutcome> = Vec::with_capacity(cleaned.articles.len());
        for (i, article) in cleaned.articles.into_iter().enumerate() {
            let index = i + 1;
            let clickbait = self.classifier.classify(&article.title);
            match self.scorer.score(&article.text).await {
                Ok(sentiment) => {
                    logger.debug(&format!("#{} {} / {} ({:.2})", index, clickbait, sentiment.label, sentiment.score));
                    outcomes.push(Ok(AnalyzedArticle {
                        index,
                        article,
                        clickbait,
                        sentiment,
                    }));
                }
                Err(e) => {
                    logger.warn(&format!("⚠️ Skipping article #{} '{}': {}", index, article.title, e));
                    outcomes.push(Err(RowFailure {
                        index,
                        title: article.title,
                        reason: RowFailureReason::Sentiment(e.to_string()),
                    }));
                }
            }
        }

        let (rows, failures) = split_outcomes(outcomes);
        if rows.is_empty() {
            if let Some(first) = failures.first() {
                let message = format!(
                    "all {} articles failed sentiment scoring, first error: {}",
                    failures.len(),
                    first.reason
                );
                logger.error(&format!("❌ {}", message));
                return Err(Error::Inference(message));
            }
        }

        let statistics = summarize(&rows);
        logger.info(&format!("✅ Analyzed {} articles ({} failed)", rows.len(), failures.len()));

        Ok(AnalysisReport {
            run: RunInfo::new(&query.keyword),
            source: self.source.name().to_string(),
            page: query.page,
            fetched,
            dropped: cleaned.dropped,
            rows,
            failures,
            model: self.scorer.model_name().to_string(),
            statistics,
        })
    }

    /// Append the report's rows to storage, returning the number written.
    pub async fn persist(&self, report: &AnalysisReport) -> Result<usize> {
        let written = self.storage.append_results(&report.run, &report.rows).await?;
        tracing::info!("💾 Stored {} rows for run {}", written, report.run.run_id);
        Ok(written)
    }

    pub async fn clickbait_counts(&self) -> Result<Vec<LabelCount>> {
        self.storage.clickbait_counts().await
    }
}

fn split_outcomes(outcomes: Vec<RowOutcome>) -> (Vec<AnalyzedArticle>, Vec<RowFailure>) {
    let mut rows = Vec::new();
    let mut failures = Vec::new();
    for outcome in outcomes {
        match outcome {
            Ok(row) => rows.push(row),
            Err(failure) => failures.push(failure),
        }
    }
    // Surviving rows are numbered by their position in the result table.
    for (i, row) in rows.iter_mut().enumerate() {
        row.index = i + 1;
    }
    (rows, failures)
}
