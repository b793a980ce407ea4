//! Server-side HTML for the dashboard page.

use fnd_core::highlight::highlight_with;
use fnd_core::{AnalyzedArticle, ClickbaitLabel, LabelCount, SentimentLabel};
use fnd_sources::AnalysisReport;
use fnd_stats::{descriptive, Outcome, StatisticsSummary};
use std::f64::consts::PI;
use std::fmt::Write;

const PIE_COLORS: [&str; 6] = ["#e4572e", "#29335c", "#f3a712", "#669bbc", "#a8c686", "#8d6a9f"];

#[derive(Debug, Default)]
pub struct DashboardView {
    pub keyword: String,
    pub page: Option<u32>,
    pub report: Option<AnalysisReport>,
    pub counts: Vec<LabelCount>,
    pub errors: Vec<String>,
}

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Escape `text` and wrap keyword occurrences in `<mark>`.
pub fn highlight_html(text: &str, keyword: &str) -> String {
    highlight_with(text, keyword, escape_html, |m| format!("<mark>{}</mark>", escape_html(m)))
}

pub fn dashboard(view: &DashboardView) -> String {
    let mut html = String::new();
    html.push_str(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Fake News Detector</title>
<style>
body { font-family: sans-serif; margin: 0; display: flex; }
aside { width: 16rem; padding: 1rem; background: #f0f2f6; min-height: 100vh; }
main { flex: 1; padding: 1rem 2rem; }
table { border-collapse: collapse; width: 100%; }
th, td { border-bottom: 1px solid #ddd; padding: 0.3rem 0.5rem; text-align: left; }
mark { background: #ffe066; }
.error { color: #b00020; }
.clickbait { color: #b00020; font-weight: bold; }
.insufficient { color: #777; }
</style>
</head>
<body>
"#,
    );

    let page = view.page.map(|p| p.to_string()).unwrap_or_default();
    let _ = write!(
        html,
        r#"<aside>
<h2>📰 Fake News Detector</h2>
<form method="get" action="/">
<label>Keyword<br><input name="keyword" value="{}" required></label><br><br>
<label>Page (optional)<br><input name="page" value="{}" inputmode="numeric"></label><br><br>
<button type="submit">Analyze</button>
</form>
</aside>
<main>
"#,
        escape_html(&view.keyword),
        escape_html(&page)
    );

    for error in &view.errors {
        let _ = writeln!(html, r#"<p class="error">⚠️ {}</p>"#, escape_html(error));
    }

    match &view.report {
        Some(report) if report.is_empty() => {
            let _ = writeln!(
                html,
                "<h1>No articles found for \"{}\"</h1><p>Fetched {} articles, none survived cleaning.</p>",
                escape_html(report.keyword()),
                report.fetched
            );
        }
        Some(report) => render_report(&mut html, report),
        None if view.errors.is_empty() => {
            html.push_str("<p>Enter a keyword to analyze recent news coverage.</p>\n");
        }
        None => {}
    }

    render_counts(&mut html, &view.counts);
    html.push_str("</main>\n</body>\n</html>\n");
    html
}

fn render_report(html: &mut String, report: &AnalysisReport) {
    let keyword = report.keyword();
    let _ = writeln!(
        html,
        "<h1>Results for \"{}\"</h1>\n<p>Page {} from {} · {} fetched · {} analyzed · {} dropped · {} failed · model <code>{}</code></p>",
        escape_html(keyword),
        report.page,
        escape_html(&report.source),
        report.fetched,
        report.rows.len(),
        report.dropped.total(),
        report.failures.len(),
        escape_html(&report.model)
    );
    html.push_str("<p><a href=\"/export.csv\">⬇️ Download CSV</a></p>\n");

    html.push_str(
        "<table>\n<tr><th>#</th><th>Title</th><th>Source</th><th>Published</th><th>Clickbait</th><th>Sentiment</th><th>Score</th><th>Words</th></tr>\n",
    );
    for row in &report.rows {
        let class = if row.clickbait == ClickbaitLabel::Clickbait { " class=\"clickbait\"" } else { "" };
        let _ = writeln!(
            html,
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td{}>{}</td><td>{}</td><td>{:.2}</td><td>{}</td></tr>",
            row.index,
            highlight_html(&row.article.title, keyword),
            escape_html(&row.article.source),
            row.article.published_at.format("%Y-%m-%d %H:%M"),
            class,
            row.clickbait,
            row.sentiment.label,
            row.sentiment.score,
            row.article.word_count
        );
    }
    html.push_str("</table>\n");

    html.push_str("<h2>Article details</h2>\n");
    for row in &report.rows {
        render_details(html, row, keyword);
    }

    if !report.failures.is_empty() {
        html.push_str("<h2>Skipped articles</h2>\n<ul>\n");
        for failure in &report.failures {
            let _ = writeln!(
                html,
                "<li>#{} {}: {}</li>",
                failure.index,
                escape_html(&failure.title),
                escape_html(&failure.reason.to_string())
            );
        }
        html.push_str("</ul>\n");
    }

    html.push_str("<h2>Label distribution</h2>\n");
    html.push_str(&pie_chart(&report.combined_label_counts()));
    render_statistics(html, &report.statistics, &report.rows);
}

fn render_details(html: &mut String, row: &AnalyzedArticle, keyword: &str) {
    let link = row
        .article
        .url
        .as_deref()
        .map(|url| format!(r#"<p><a href="{0}" rel="noopener">{0}</a></p>"#, escape_html(url)))
        .unwrap_or_default();
    let _ = writeln!(
        html,
        "<details>\n<summary>#{} {}</summary>\n<p>{}</p>\n<p>{} · {} ({:.2}) · {} words</p>\n{}</details>",
        row.index,
        highlight_html(&row.article.title, keyword),
        highlight_html(&row.article.body, keyword),
        row.clickbait,
        row.sentiment.label,
        row.sentiment.score,
        row.article.word_count,
        link
    );
}

fn outcome_line<T>(name: &str, outcome: &Outcome<T>, describe: impl Fn(&T) -> String) -> String {
    match outcome {
        Outcome::Computed(value) => format!("<li><strong>{}</strong>: {}</li>", name, describe(value)),
        Outcome::InsufficientData(reason) => format!(
            "<li class=\"insufficient\"><strong>{}</strong>: insufficient data ({})</li>",
            name,
            escape_html(reason)
        ),
    }
}

fn render_statistics(html: &mut String, stats: &StatisticsSummary, rows: &[AnalyzedArticle]) {
    html.push_str("<h2>Statistics</h2>\n<ul>\n");
    let correlation = |c: &fnd_stats::Correlation| format!("{:.3} (p = {:.4}, n = {})", c.coefficient, c.p_value, c.n);
    let lines = [
        outcome_line("Pearson (score vs. word count)", &stats.pearson, correlation),
        outcome_line("Spearman (score vs. word count)", &stats.spearman, correlation),
        outcome_line("Chi-square (clickbait vs. sentiment)", &stats.chi_square, |c| {
            format!(
                "χ² = {:.3} (p = {:.4}, dof = {}{})",
                c.statistic,
                c.p_value,
                c.dof,
                if c.yates { ", Yates corrected" } else { "" }
            )
        }),
        outcome_line("Word count t-test (clickbait vs. other)", &stats.length_ttest, |t| {
            format!(
                "t = {:.3} (p = {:.4}), means {:.1} vs. {:.1}",
                t.statistic, t.p_value, t.mean_a, t.mean_b
            )
        }),
    ];
    for line in lines {
        html.push_str(&line);
        html.push('\n');
    }
    if let Some(mean) = descriptive::mean_word_count(rows) {
        let _ = writeln!(html, "<li><strong>Mean word count</strong>: {:.1}</li>", mean);
    }
    for count in descriptive::sentiment_counts(rows) {
        let _ = writeln!(
            html,
            "<li>{}: {} ({:.0}%)</li>",
            count.label,
            count.count,
            descriptive::percentage(count.count, rows.len())
        );
    }
    html.push_str("</ul>\n");
}

fn render_counts(html: &mut String, counts: &[LabelCount]) {
    if counts.is_empty() {
        return;
    }
    html.push_str("<h2>Stored articles by clickbait label</h2>\n<pre>SELECT clickbait_label, COUNT(*) FROM articles GROUP BY clickbait_label</pre>\n<table>\n");
    for count in counts {
        let _ = writeln!(html, "<tr><td>{}</td><td>{}</td></tr>", escape_html(&count.label), count.count);
    }
    html.push_str("</table>\n");
}

/// Inline SVG pie chart with a legend, one slice per label.
pub fn pie_chart(counts: &[LabelCount]) -> String {
    let total: usize = counts.iter().map(|c| c.count).sum();
    if total == 0 {
        return String::from("<p>No data to chart.</p>\n");
    }

    let palette = combined_labels();
    let (cx, cy, r) = (110.0, 110.0, 100.0);
    let mut svg = String::from(r#"<svg xmlns="http://www.w3.org/2000/svg" width="460" height="220" viewBox="0 0 460 220">"#);
    let mut angle = -PI / 2.0;

    for (i, count) in counts.iter().filter(|c| c.count > 0).enumerate() {
        // known labels keep their color from run to run
        let slot = palette.iter().position(|l| *l == count.label).unwrap_or(i);
        let color = PIE_COLORS[slot % PIE_COLORS.len()];
        let fraction = count.count as f64 / total as f64;
        if count.count == total {
            let _ = write!(svg, r#"<circle cx="{}" cy="{}" r="{}" fill="{}"/>"#, cx, cy, r, color);
        } else {
            let end = angle + fraction * 2.0 * PI;
            let large_arc = if fraction > 0.5 { 1 } else { 0 };
            let _ = write!(
                svg,
                r#"<path d="M {cx} {cy} L {:.2} {:.2} A {r} {r} 0 {large_arc} 1 {:.2} {:.2} Z" fill="{color}"/>"#,
                cx + r * angle.cos(),
                cy + r * angle.sin(),
                cx + r * end.cos(),
                cy + r * end.sin(),
            );
            angle = end;
        }
        let y = 20 + i * 22;
        let _ = write!(
            svg,
            r#"<rect x="240" y="{}" width="14" height="14" fill="{}"/><text x="260" y="{}" font-size="12">{} ({:.1}%)</text>"#,
            y,
            color,
            y + 12,
            escape_html(&count.label),
            fraction * 100.0
        );
    }
    svg.push_str("</svg>\n");
    svg
}

/// Every combined label the pie chart can show, in display order.
pub fn combined_labels() -> Vec<String> {
    ClickbaitLabel::ALL
        .iter()
        .flat_map(|c| SentimentLabel::ALL.iter().map(move |s| format!("{} + {}", c, s)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count(label: &str, count: usize) -> LabelCount {
        LabelCount { label: label.to_string(), count }
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html(r#"<b>"Tom" & 'Jerry'</b>"#), "&lt;b&gt;&quot;Tom&quot; &amp; &#39;Jerry&#39;&lt;/b&gt;");
    }

    #[test]
    fn test_highlight_html_escapes_around_marks() {
        assert_eq!(
            highlight_html("<New> iPhone & IPHONE", "iphone"),
            "&lt;New&gt; <mark>iPhone</mark> &amp; <mark>IPHONE</mark>"
        );
        assert_eq!(highlight_html("a < b", ""), "a &lt; b");
    }

    #[test]
    fn test_pie_chart_slices() {
        let svg = pie_chart(&[count("Not Clickbait + Positive", 3), count("Clickbait + Negative", 1)]);
        assert_eq!(svg.matches("<path").count(), 2);
        assert!(svg.contains("(75.0%)"));
        assert!(svg.contains("(25.0%)"));

        let single = pie_chart(&[count("Clickbait + Neutral", 2)]);
        assert!(single.contains("<circle"));
        assert!(pie_chart(&[]).contains("No data"));
    }

    #[test]
    fn test_empty_dashboard_shows_form() {
        let html = dashboard(&DashboardView {
            keyword: "<script>".to_string(),
            ..DashboardView::default()
        });
        assert!(html.contains(r#"name="keyword" value="&lt;script&gt;""#));
        assert!(html.contains("Enter a keyword"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn test_combined_labels() {
        let labels = combined_labels();
        assert_eq!(labels.len(), 6);
        assert_eq!(labels[0], "Clickbait + Positive");
    }
}
