use std::sync::Arc;
use fnd_core::{Error, Result, Sentiment, SentimentModel};

/// Runs article text through a sentiment model within the model's input limit.
#[derive(Debug, Clone)]
pub struct SentimentScorer {
    model: Arc<dyn SentimentModel>,
    max_input_chars: usize,
}

impl SentimentScorer {
    pub fn new(model: Arc<dyn SentimentModel>, max_input_chars: usize) -> Self {
        Self {
            model,
            max_input_chars: max_input_chars.max(1),
        }
    }

    pub fn model_name(&self) -> &str {
        self.model.name()
    }

    /// Score one text. The score is checked to lie in [0, 1] and rounded to
    /// two decimals.
    pub async fn score(&self, text: &str) -> Result<Sentiment> {
        let input = truncate_chars(text, self.max_input_chars);
        let sentiment = self.model.classify(input).await?;
        if !sentiment.score.is_finite() || !(0.0..=1.0).contains(&sentiment.score) {
            return Err(Error::Inference(format!(
                "{} returned an out-of-range score: {}",
                self.model.name(),
                sentiment.score
            )));
        }
        Ok(Sentiment {
            label: sentiment.label,
            score: (sentiment.score * 100.0).round() / 100.0,
        })
    }
}

/// Longest prefix of `text` with at most `max_chars` chars.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
