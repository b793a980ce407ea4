use std::collections::BTreeMap;
use fnd_core::{AnalyzedArticle, ClickbaitLabel, LabelCount, SentimentLabel};

/// Frequency of each "<clickbait> + <sentiment>" label, most frequent first.
pub fn combined_label_counts(rows: &[AnalyzedArticle]) -> Vec<LabelCount> {
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for row in rows {
        *counts.entry(row.combined_label()).or_insert(0) += 1;
    }
    let mut counts: Vec<LabelCount> = counts
        .into_iter()
        .map(|(label, count)| LabelCount { label, count })
        .collect();
    // stable sort keeps ties in label order
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts
}

/// Observed clickbait labels with their counts, in label order.
pub fn clickbait_counts(rows: &[AnalyzedArticle]) -> Vec<LabelCount> {
    ClickbaitLabel::ALL
        .into_iter()
        .map(|label| LabelCount {
            label: label.to_string(),
            count: rows.iter().filter(|r| r.clickbait == label).count(),
        })
        .filter(|c| c.count > 0)
        .collect()
}

/// Observed sentiment labels with their counts, in label order.
pub fn sentiment_counts(rows: &[AnalyzedArticle]) -> Vec<LabelCount> {
    SentimentLabel::ALL
        .into_iter()
        .map(|label| LabelCount {
            label: label.to_string(),
            count: rows.iter().filter(|r| r.sentiment.label == label).count(),
        })
        .filter(|c| c.count > 0)
        .collect()
}

pub fn mean_word_count(rows: &[AnalyzedArticle]) -> Option<f64> {
    if rows.is_empty() {
        return None;
    }
    Some(rows.iter().map(|r| r.article.word_count as f64).sum::<f64>() / rows.len() as f64)
}

/// Share of `count` in `total` as a percentage, 0 for an empty total.
pub fn percentage(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 * 100.0 / total as f64
    }
}
