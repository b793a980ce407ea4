use std::collections::HashSet;
use std::fmt;
use fnd_core::{Result, Sentiment, SentimentLabel, SentimentModel};

const POSITIVE_WORDS: &[&str] = &[
    "good", "great", "excellent", "positive", "success", "successful", "win", "wins", "gain",
    "gains", "growth", "improve", "improved", "improves", "record", "best", "happy", "hope",
    "hopeful", "breakthrough", "discover", "discovers", "boost", "boosts", "strong", "benefit",
    "benefits", "celebrate", "celebrates", "rally", "rallies", "surge", "surges", "love",
    "innovative", "innovation", "safe", "recovery", "praise", "praised", "cheer", "cheers",
];

const NEGATIVE_WORDS: &[&str] = &[
    "bad", "worse", "worst", "negative", "fail", "fails", "failure", "loss", "losses", "lose",
    "crisis", "crash", "crashes", "decline", "declines", "drop", "drops", "fear", "fears", "war",
    "attack", "attacks", "death", "dead", "kill", "killed", "scandal", "fraud", "lawsuit",
    "alarming", "concerning", "threat", "threats", "risk", "risks", "hate", "weak", "plunge",
    "plunges", "warning", "warns", "recall", "ban", "banned",
];

/// Offline word-list scorer. Counts positive and negative words and turns the
/// majority into a label with a Laplace-smoothed confidence.
pub struct LexiconModel {
    positive: HashSet<&'static str>,
    negative: HashSet<&'static str>,
}

impl fmt::Debug for LexiconModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LexiconModel")
            .field("positive_words", &self.positive.len())
            .field("negative_words", &self.negative.len())
            .finish()
    }
}

impl Default for LexiconModel {
    fn default() -> Self {
        Self::new()
    }
}

impl LexiconModel {
    pub fn new() -> Self {
        Self {
            positive: POSITIVE_WORDS.iter().copied().collect(),
            negative: NEGATIVE_WORDS.iter().copied().collect(),
        }
    }

    pub fn score_text(&self, text: &str) -> Sentiment {
        let (mut pos, mut neg) = (0usize, 0usize);
        for word in text
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| !w.is_empty())
            .map(str::to_lowercase)
        {
            if self.positive.contains(word.as_str()) {
                pos += 1;
            } else if self.negative.contains(word.as_str()) {
                neg += 1;
            }
        }

        let total = (pos + neg) as f64;
        if pos == neg {
            return Sentiment {
                label: SentimentLabel::Neutral,
                score: 0.5,
            };
        }
        let (label, hits) = if pos > neg {
            (SentimentLabel::Positive, pos as f64)
        } else {
            (SentimentLabel::Negative, neg as f64)
        };
        Sentiment {
            label,
            score: (hits + 1.0) / (total + 2.0),
        }
    }
}

#[async_trait::async_trait]
impl SentimentModel for LexiconModel {
    fn name(&self) -> &str {
        "lexicon"
    }

    async fn classify(&self, text: &str) -> Result<Sentiment> {
        Ok(self.score_text(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_lexicon_model() {
        let model = LexiconModel::new();

        let result = model.classify("Great news: record growth and a breakthrough").await.unwrap();
        assert_eq!(result.label, SentimentLabel::Positive);
        assert!(result.score > 0.5 && result.score <= 1.0);

        let result = model.classify("Market crash sparks fear of crisis").await.unwrap();
        assert_eq!(result.label, SentimentLabel::Negative);

        let result = model.classify("The committee met on Tuesday").await.unwrap();
        assert_eq!(result.label, SentimentLabel::Neutral);
        assert_eq!(result.score, 0.5);
    }

    #[test]
    fn test_confidence_grows_with_evidence() {
        let model = LexiconModel::new();
        let one = model.score_text("a good day");
        let three = model.score_text("a good great excellent day");
        assert!(three.score > one.score);
        assert!((one.score - 2.0 / 3.0).abs() < 1e-12);
    }
}
