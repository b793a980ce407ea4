//! CSV download of a result table.

use fnd_core::{AnalyzedArticle, Error, Result};
use serde::Serialize;
use std::io::Write;
use std::path::Path;
use tracing::info;

#[derive(Debug, Serialize)]
struct CsvRecord<'a> {
    #[serde(rename = "Article")]
    index: usize,
    #[serde(rename = "Title")]
    title: &'a str,
    #[serde(rename = "Source")]
    source: &'a str,
    #[serde(rename = "Published At")]
    published_at: String,
    #[serde(rename = "Clickbait")]
    clickbait: &'static str,
    #[serde(rename = "Sentiment")]
    sentiment: &'static str,
    #[serde(rename = "Sentiment Score")]
    sentiment_score: f64,
    #[serde(rename = "Combined Label")]
    combined_label: String,
    #[serde(rename = "Word Count")]
    word_count: usize,
}

impl<'a> From<&'a AnalyzedArticle> for CsvRecord<'a> {
    fn from(row: &'a AnalyzedArticle) -> Self {
        Self {
            index: row.index,
            title: &row.article.title,
            source: &row.article.source,
            published_at: row.article.published_at.to_rfc3339(),
            clickbait: row.clickbait.as_str(),
            sentiment: row.sentiment.label.as_str(),
            sentiment_score: row.sentiment.score,
            combined_label: row.combined_label(),
            word_count: row.article.word_count,
        }
    }
}

pub const CSV_HEADER: [&str; 9] = [
    "Article",
    "Title",
    "Source",
    "Published At",
    "Clickbait",
    "Sentiment",
    "Sentiment Score",
    "Combined Label",
    "Word Count",
];

pub fn write_records<W: Write>(writer: W, rows: &[AnalyzedArticle]) -> Result<()> {
    let mut csv = csv::Writer::from_writer(writer);
    if rows.is_empty() {
        // serde only emits the header together with the first record
        csv.write_record(CSV_HEADER)?;
    }
    for row in rows {
        csv.serialize(CsvRecord::from(row))?;
    }
    csv.flush()?;
    Ok(())
}

pub fn to_csv_string(rows: &[AnalyzedArticle]) -> Result<String> {
    let mut buf = Vec::new();
    write_records(&mut buf, rows)?;
    String::from_utf8(buf).map_err(|e| Error::InvalidInput(format!("CSV is not valid UTF-8: {}", e)))
}

pub fn write_csv(path: &Path, rows: &[AnalyzedArticle]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let file = std::fs::File::create(path)?;
    write_records(file, rows)?;
    info!("📄 Wrote {} rows to {}", rows.len(), path.display());
    Ok(())
}
