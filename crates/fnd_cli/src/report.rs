use crossterm::style::{Color, Stylize};
use fnd_core::highlight::highlight_with;
use fnd_core::{AnalyzedArticle, ClickbaitLabel, LabelCount, SentimentLabel};
use fnd_sources::AnalysisReport;
use fnd_stats::{descriptive, Outcome};
use std::io::{self, Write};

const BAR_WIDTH: usize = 30;

/// Writes ANSI colored text, or plain text when colors are off.
#[derive(Debug, Clone, Copy)]
pub struct Painter {
    colored: bool,
}

impl Painter {
    pub fn new(colored: bool) -> Self {
        Self { colored }
    }

    pub fn paint(&self, text: &str, color: Color) -> String {
        if self.colored {
            text.with(color).to_string()
        } else {
            text.to_string()
        }
    }

    pub fn bold(&self, text: &str) -> String {
        if self.colored {
            text.bold().to_string()
        } else {
            text.to_string()
        }
    }

    /// Keyword matches in reverse video, or `[..]` brackets without colors.
    pub fn highlight(&self, text: &str, keyword: &str) -> String {
        if self.colored {
            highlight_with(text, keyword, str::to_string, |m| m.black().on_yellow().to_string())
        } else {
            highlight_with(text, keyword, str::to_string, |m| format!("[{}]", m))
        }
    }

    fn clickbait(&self, label: ClickbaitLabel) -> String {
        match label {
            ClickbaitLabel::Clickbait => self.paint(label.as_str(), Color::Red),
            ClickbaitLabel::NotClickbait => self.paint(label.as_str(), Color::Green),
        }
    }

    fn sentiment(&self, label: SentimentLabel) -> String {
        let color = match label {
            SentimentLabel::Positive => Color::Green,
            SentimentLabel::Negative => Color::Red,
            SentimentLabel::Neutral => Color::Yellow,
        };
        self.paint(label.as_str(), color)
    }
}

pub fn render_report<W: Write>(out: &mut W, report: &AnalysisReport, painter: Painter) -> io::Result<()> {
    let keyword = report.keyword();
    writeln!(out, "{}", painter.paint("📰 Fake News Detector", Color::Cyan))?;
    writeln!(
        out,
        "Keyword: {} · source: {} · page {} · model: {}",
        painter.bold(keyword),
        report.source,
        report.page,
        report.model
    )?;
    writeln!(
        out,
        "Fetched {} · analyzed {} · dropped {} (empty {}, malformed {}, no keyword {}) · failed {}",
        report.fetched,
        report.rows.len(),
        report.dropped.total(),
        report.dropped.empty_body,
        report.dropped.malformed,
        report.dropped.keyword_missing,
        report.failures.len()
    )?;
    writeln!(out)?;

    if report.is_empty() {
        writeln!(out, "{}", painter.paint("No articles found.", Color::Yellow))?;
        return Ok(());
    }

    writeln!(out, "{}", painter.bold("Articles"))?;
    for row in &report.rows {
        writeln!(
            out,
            "{:>3}. {} ({}, {})",
            row.index,
            painter.highlight(&row.article.title, keyword),
            row.article.source,
            row.article.published_at.format("%Y-%m-%d")
        )?;
        writeln!(
            out,
            "     {} · {} ({:.2}) · {} words",
            painter.clickbait(row.clickbait),
            painter.sentiment(row.sentiment.label),
            row.sentiment.score,
            row.article.word_count
        )?;
    }
    writeln!(out)?;

    writeln!(out, "{}", painter.bold("Label distribution"))?;
    render_distribution(out, &report.combined_label_counts(), report.rows.len())?;
    writeln!(out)?;

    writeln!(out, "{}", painter.bold("Statistics"))?;
    let stats = &report.statistics;
    let correlation = |c: &fnd_stats::Correlation| format!("{:.3} (p = {:.4}, n = {})", c.coefficient, c.p_value, c.n);
    outcome_line(out, painter, "Pearson  (score vs. words)", &stats.pearson, correlation)?;
    outcome_line(out, painter, "Spearman (score vs. words)", &stats.spearman, correlation)?;
    outcome_line(out, painter, "Chi-square (clickbait x sentiment)", &stats.chi_square, |c| {
        format!("{:.3} (p = {:.4}, dof = {})", c.statistic, c.p_value, c.dof)
    })?;
    outcome_line(out, painter, "t-test (words, clickbait vs. other)", &stats.length_ttest, |t| {
        format!("{:.3} (p = {:.4}), means {:.1} vs. {:.1}", t.statistic, t.p_value, t.mean_a, t.mean_b)
    })?;
    if let Some(mean) = descriptive::mean_word_count(&report.rows) {
        writeln!(out, "  Mean word count: {:.1}", mean)?;
    }

    if !report.failures.is_empty() {
        writeln!(out)?;
        writeln!(out, "{}", painter.paint("Skipped articles", Color::Yellow))?;
        for failure in &report.failures {
            writeln!(out, "  #{} {}: {}", failure.index, failure.title, failure.reason)?;
        }
    }
    Ok(())
}

fn outcome_line<W: Write, T>(
    out: &mut W,
    painter: Painter,
    name: &str,
    outcome: &Outcome<T>,
    describe: impl Fn(&T) -> String,
) -> io::Result<()> {
    match outcome {
        Outcome::Computed(value) => writeln!(out, "  {}: {}", name, describe(value)),
        Outcome::InsufficientData(reason) => writeln!(
            out,
            "  {}: {}",
            name,
            painter.paint(&format!("insufficient data ({})", reason), Color::DarkGrey)
        ),
    }
}

/// Text pie: one bar per label, scaled to its share of `total`.
pub fn render_distribution<W: Write>(out: &mut W, counts: &[LabelCount], total: usize) -> io::Result<()> {
    let width = counts.iter().map(|c| c.label.chars().count()).max().unwrap_or(0);
    for count in counts {
        let pct = descriptive::percentage(count.count, total);
        let bar = "█".repeat((pct / 100.0 * BAR_WIDTH as f64).round() as usize);
        writeln!(out, "  {:<width$}  {:>3}  {:>5.1}%  {}", count.label, count.count, pct, bar, width = width)?;
    }
    Ok(())
}

pub fn render_counts<W: Write>(out: &mut W, counts: &[LabelCount], painter: Painter) -> io::Result<()> {
    writeln!(out, "{}", painter.bold("SELECT clickbait_label, COUNT(*) FROM articles GROUP BY clickbait_label"))?;
    if counts.is_empty() {
        writeln!(out, "  (no stored articles)")?;
    }
    for count in counts {
        writeln!(out, "  {:<14} {}", count.label, count.count)?;
    }
    Ok(())
}

pub fn render_article<W: Write>(out: &mut W, row: &AnalyzedArticle, keyword: &str, painter: Painter) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", painter.bold(&painter.highlight(&row.article.title, keyword)))?;
    writeln!(out, "{} · {}", row.article.source, row.article.published_at.to_rfc3339())?;
    if let Some(url) = &row.article.url {
        writeln!(out, "{}", url)?;
    }
    writeln!(out)?;
    writeln!(out, "{}", painter.highlight(&row.article.body, keyword))?;
    writeln!(out)?;
    writeln!(out, "Clickbait: {}", painter.clickbait(row.clickbait))?;
    writeln!(
        out,
        "Sentiment: {} ({:.2})",
        painter.sentiment(row.sentiment.label),
        row.sentiment.score
    )?;
    writeln!(out, "Word count: {}", row.article.word_count)?;
    Ok(())
}
