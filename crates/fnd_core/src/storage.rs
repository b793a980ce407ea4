use async_trait::async_trait;
use crate::types::{AnalyzedArticle, LabelCount, RunInfo};
use crate::Result;

#[async_trait]
pub trait ResultStorage: Send + Sync {
    /// Append the rows of one run, returns the number of rows written
    async fn append_results(&self, run: &RunInfo, rows: &[AnalyzedArticle]) -> Result<usize>;

    /// Count of stored rows grouped by clickbait label
    async fn clickbait_counts(&self) -> Result<Vec<LabelCount>>;

    /// Total number of stored rows
    async fn row_count(&self) -> Result<usize>;
}
