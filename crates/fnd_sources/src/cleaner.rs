use fnd_core::{Article, RawArticle};
use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;

/// NewsAPI replaces deleted articles with this placeholder.
const REMOVED_PLACEHOLDER: &str = "[Removed]";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DropCounts {
    pub empty_body: usize,
    pub malformed: usize,
    pub keyword_missing: usize,
}

impl DropCounts {
    pub fn total(&self) -> usize {
        self.empty_body + self.malformed + self.keyword_missing
    }
}

#[derive(Debug, Clone, Default)]
pub struct CleanOutcome {
    pub articles: Vec<Article>,
    pub dropped: DropCounts,
}

lazy_static! {
    static ref URL_REGEX: Regex = Regex::new(r"http\S+").unwrap();
    static ref PUNCTUATION_REGEX: Regex = Regex::new(r"[^\w\s]").unwrap();
    static ref WHITESPACE_REGEX: Regex = Regex::new(r"\s+").unwrap();
}

/// Lowercase, strip URLs and punctuation, and collapse whitespace runs to a
/// single space. Leading and trailing space is kept.
pub fn clean_text(text: &str) -> String {
    let text = URL_REGEX.replace_all(text, "");
    let text = PUNCTUATION_REGEX.replace_all(&text, "");
    WHITESPACE_REGEX.replace_all(&text, " ").to_lowercase()
}

/// Turn raw records into article rows that mention `keyword`.
pub fn clean(raw: Vec<RawArticle>, keyword: &str) -> CleanOutcome {
    let keyword = keyword.trim().to_lowercase();
    let mut outcome = CleanOutcome::default();

    for record in raw {
        let body = match non_blank(record.description).or_else(|| non_blank(record.content)) {
            Some(body) => body,
            None => {
                outcome.dropped.empty_body += 1;
                continue;
            }
        };

        let (Some(title), Some(source), Some(published_at)) =
            (non_blank(record.title), non_blank(record.source), record.published_at)
        else {
            outcome.dropped.malformed += 1;
            continue;
        };
        if title == REMOVED_PLACEHOLDER || body == REMOVED_PLACEHOLDER {
            outcome.dropped.malformed += 1;
            continue;
        }

        if !title.to_lowercase().contains(&keyword) && !body.to_lowercase().contains(&keyword) {
            outcome.dropped.keyword_missing += 1;
            continue;
        }

        let word_count = body.split_whitespace().count();
        let text = clean_text(&format!("{} {}", title, body)).trim().to_string();
        outcome.articles.push(Article {
            title,
            body,
            source,
            url: record.url,
            published_at,
            keyword: keyword.clone(),
            word_count,
            text,
        });
    }

    outcome
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn raw(title: &str, description: Option<&str>) -> RawArticle {
        RawArticle {
            title: Some(title.to_string()),
            description: description.map(str::to_string),
            content: None,
            url: Some("https://example.com".to_string()),
            source: Some("Example".to_string()),
            published_at: Some(Utc::now()),
        }
    }

    #[test]
    fn test_clean_text() {
        assert_eq!(
            clean_text("Check this out! https://example.com   Amazing stuff!!!"),
            "check this out amazing stuff"
        );
        assert_eq!(clean_text("You won't believe"), "you wont believe");
        assert_eq!(clean_text("   "), " ");
    }

    #[test]
    fn test_clean_text_drops_urls_inside_tokens() {
        assert_eq!(clean_text("Read more (https://example.com/a)"), "read more ");
        assert_eq!(clean_text("see:http://a.b now"), "see now");
        assert_eq!(clean_text("Source<https://x.io/y>"), "source");
        assert_eq!(clean_text("Café—naïve [link](http://t.co/x)"), "cafénaïve link");
    }

    #[test]
    fn test_word_count_matches_body_tokens() {
        let outcome = clean(vec![raw("iPhone news", Some("  The new  iphone\tships today "))], "iphone");
        let article = &outcome.articles[0];
        assert_eq!(article.body, "The new  iphone\tships today");
        assert_eq!(article.word_count, 5);
        assert_eq!(article.text, "iphone news the new iphone ships today");
    }

    #[test]
    fn test_empty_bodies_never_survive() {
        let records = vec![
            raw("iPhone one", None),
            raw("iPhone two", Some("   ")),
            RawArticle {
                content: Some("The iphone excerpt".to_string()),
                ..raw("iPhone three", None)
            },
        ];
        let outcome = clean(records, "iphone");
        assert_eq!(outcome.dropped.empty_body, 2);
        assert_eq!(outcome.articles.len(), 1);
        assert_eq!(outcome.articles[0].body, "The iphone excerpt");
        assert!(outcome.articles.iter().all(|a| a.word_count >= 1));
    }

    #[test]
    fn test_malformed_and_keyword_filters() {
        let records = vec![
            raw("[Removed]", Some("[Removed]")),
            RawArticle { source: None, ..raw("iPhone", Some("iphone body")) },
            RawArticle { published_at: None, ..raw("iPhone", Some("iphone body")) },
            raw("Android phones", Some("Nothing about apple here")),
            raw("Budget phones", Some("The IPHONE SE is cheap")),
        ];
        let outcome = clean(records, " iPhone ");
        assert_eq!(
            outcome.dropped,
            DropCounts { empty_body: 0, malformed: 3, keyword_missing: 1 }
        );
        assert_eq!(outcome.dropped.total(), 4);
        assert_eq!(outcome.articles.len(), 1);
        assert_eq!(outcome.articles[0].keyword, "iphone");
    }

    #[test]
    fn test_empty_input() {
        let outcome = clean(Vec::new(), "iphone");
        assert!(outcome.articles.is_empty());
        assert_eq!(outcome.dropped.total(), 0);
    }
}
