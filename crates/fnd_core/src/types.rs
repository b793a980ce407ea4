use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// An article as handed over by a source, before any cleaning.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawArticle {
    pub title: Option<String>,
    pub description: Option<String>,
    pub content: Option<String>,
    pub url: Option<String>,
    pub source: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
}

/// A cleaned article row that contains the search keyword.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Article {
    pub title: String,
    pub body: String,
    pub source: String,
    pub url: Option<String>,
    pub published_at: DateTime<Utc>,
    pub keyword: String,
    pub word_count: usize,
    /// Normalized title and body, the input of the sentiment model.
    pub text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ClickbaitLabel {
    Clickbait,
    #[serde(rename = "Not Clickbait")]
    NotClickbait,
}

impl ClickbaitLabel {
    pub const ALL: [ClickbaitLabel; 2] = [ClickbaitLabel::Clickbait, ClickbaitLabel::NotClickbait];

    pub fn as_str(&self) -> &'static str {
        match self {
            ClickbaitLabel::Clickbait => "Clickbait",
            ClickbaitLabel::NotClickbait => "Not Clickbait",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|label| label.as_str().eq_ignore_ascii_case(s.trim()))
    }
}

impl fmt::Display for ClickbaitLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SentimentLabel {
    Positive,
    Negative,
    Neutral,
}

impl SentimentLabel {
    pub const ALL: [SentimentLabel; 3] = [
        SentimentLabel::Positive,
        SentimentLabel::Negative,
        SentimentLabel::Neutral,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SentimentLabel::Positive => "Positive",
            SentimentLabel::Negative => "Negative",
            SentimentLabel::Neutral => "Neutral",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|label| label.as_str().eq_ignore_ascii_case(s.trim()))
    }
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Model verdict for one text. `score` is the model confidence in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sentiment {
    pub label: SentimentLabel,
    pub score: f64,
}

/// A fully derived result row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzedArticle {
    /// 1-based position in the result table.
    pub index: usize,
    pub article: Article,
    pub clickbait: ClickbaitLabel,
    pub sentiment: Sentiment,
}

impl AnalyzedArticle {
    pub fn combined_label(&self) -> String {
        format!("{} + {}", self.clickbait, self.sentiment.label)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RowFailureReason {
    Sentiment(String),
}

impl fmt::Display for RowFailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowFailureReason::Sentiment(msg) => write!(f, "sentiment scoring failed: {}", msg),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RowFailure {
    pub index: usize,
    pub title: String,
    pub reason: RowFailureReason,
}

pub type RowOutcome = std::result::Result<AnalyzedArticle, RowFailure>;

/// Identifies one pipeline run in persisted rows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunInfo {
    pub run_id: Uuid,
    pub keyword: String,
    pub analyzed_at: DateTime<Utc>,
}

impl RunInfo {
    pub fn new(keyword: &str) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            keyword: keyword.to_string(),
            analyzed_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelCount {
    pub label: String,
    pub count: usize,
}
