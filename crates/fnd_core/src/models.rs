use async_trait::async_trait;
use std::fmt;
use crate::types::Sentiment;
use crate::Result;

#[async_trait]
pub trait SentimentModel: Send + Sync + fmt::Debug {
    fn name(&self) -> &str;

    /// Classify a single, already truncated, piece of text
    async fn classify(&self, text: &str) -> Result<Sentiment>;
}
