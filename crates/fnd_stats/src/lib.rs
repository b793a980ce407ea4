//! Whole-table statistics for one analysis run.
//!
//! Every test returns an [`Outcome`]: either a computed result or the reason
//! the input was too degenerate to produce one.

use fnd_core::{AnalyzedArticle, ClickbaitLabel};
use serde::Serialize;

pub mod chi_square;
pub mod correlation;
pub mod descriptive;
pub mod ttest;

pub use chi_square::{chi_square, ChiSquare, ContingencyTable};
pub use correlation::{pearson, spearman, Correlation};
pub use ttest::{student_ttest, TTest};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "result", rename_all = "snake_case")]
pub enum Outcome<T> {
    Computed(T),
    InsufficientData(String),
}

impl<T> Outcome<T> {
    pub fn computed(&self) -> Option<&T> {
        match self {
            Outcome::Computed(value) => Some(value),
            Outcome::InsufficientData(_) => None,
        }
    }

    pub fn is_insufficient(&self) -> bool {
        matches!(self, Outcome::InsufficientData(_))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatisticsSummary {
    /// Number of (sentiment score, word count) pairs used for the correlations.
    pub pairs: usize,
    pub pearson: Outcome<Correlation>,
    pub spearman: Outcome<Correlation>,
    pub chi_square: Outcome<ChiSquare>,
    /// Word counts of clickbait vs. other articles.
    pub length_ttest: Outcome<TTest>,
}

pub fn summarize(rows: &[AnalyzedArticle]) -> StatisticsSummary {
    let scores: Vec<f64> = rows.iter().map(|r| r.sentiment.score).collect();
    let word_counts: Vec<f64> = rows.iter().map(|r| r.article.word_count as f64).collect();
    let labels: Vec<_> = rows.iter().map(|r| (r.clickbait, r.sentiment.label)).collect();

    let (clickbait, other): (Vec<&AnalyzedArticle>, Vec<&AnalyzedArticle>) =
        rows.iter().partition(|r| r.clickbait == ClickbaitLabel::Clickbait);
    let lengths = |group: &[&AnalyzedArticle]| -> Vec<f64> {
        group.iter().map(|r| r.article.word_count as f64).collect()
    };

    StatisticsSummary {
        pairs: rows.len(),
        pearson: pearson(&scores, &word_counts),
        spearman: spearman(&scores, &word_counts),
        chi_square: chi_square(&labels),
        length_ttest: student_ttest(&lengths(&clickbait), &lengths(&other)),
    }
}
