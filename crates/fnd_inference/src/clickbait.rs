use fnd_core::ClickbaitLabel;
use std::collections::HashSet;

/// Rule-based clickbait detection: a title is clickbait when it contains any
/// of the configured phrases.
#[derive(Debug, Clone)]
pub struct ClickbaitClassifier {
    phrases: Vec<String>,
}

impl ClickbaitClassifier {
    pub fn new<I, S>(phrases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = HashSet::new();
        let phrases = phrases
            .into_iter()
            .map(|p| normalize(p.as_ref().trim()))
            .filter(|p| !p.is_empty() && seen.insert(p.clone()))
            .collect();
        Self { phrases }
    }

    pub fn phrases(&self) -> &[String] {
        &self.phrases
    }

    pub fn classify(&self, title: &str) -> ClickbaitLabel {
        if self.matched_phrases(title).is_empty() {
            ClickbaitLabel::NotClickbait
        } else {
            ClickbaitLabel::Clickbait
        }
    }

    /// Configured phrases found in the title, in configuration order
    pub fn matched_phrases(&self, title: &str) -> Vec<&str> {
        let title = normalize(title);
        if title.is_empty() {
            return Vec::new();
        }
        self.phrases
            .iter()
            .filter(|phrase| title.contains(phrase.as_str()))
            .map(String::as_str)
            .collect()
    }
}

// Headlines often use typographic apostrophes ("won’t").
fn normalize(text: &str) -> String {
    text.to_lowercase().replace(['\u{2019}', '\u{2018}'], "'")
}

#[cfg(test)]
mod tests {
    use super::*;
    use fnd_core::config::DEFAULT_CLICKBAIT_PHRASES;

    fn classifier() -> ClickbaitClassifier {
        ClickbaitClassifier::new(DEFAULT_CLICKBAIT_PHRASES)
    }

    #[test]
    fn test_detects_configured_phrases() {
        let c = classifier();
        assert_eq!(c.classify("You Won't Believe What This Celebrity Did Next!"), ClickbaitLabel::Clickbait);
        assert_eq!(c.classify("The SECRET life of bees"), ClickbaitLabel::Clickbait);
        assert_eq!(c.classify("Federal Reserve Announces New Interest Rate Policy"), ClickbaitLabel::NotClickbait);
    }

    #[test]
    fn test_empty_title_is_not_clickbait() {
        assert_eq!(classifier().classify(""), ClickbaitLabel::NotClickbait);
    }

    #[test]
    fn test_typographic_apostrophes_match() {
        assert_eq!(classifier().classify("You won\u{2019}t believe this"), ClickbaitLabel::Clickbait);
    }

    #[test]
    fn test_label_iff_some_phrase_is_substring() {
        let c = classifier();
        let titles = [
            "Shocking results",
            "Results are in",
            "This will change how you cook",
            "Miracle cure exposed",
            "Quarterly earnings beat estimates",
        ];
        for title in titles {
            let lower = title.to_lowercase();
            let expected = DEFAULT_CLICKBAIT_PHRASES.iter().any(|p| lower.contains(p));
            assert_eq!(c.classify(title) == ClickbaitLabel::Clickbait, expected, "{}", title);
            // Same input, same label
            assert_eq!(c.classify(title), c.classify(title));
        }
    }

    #[test]
    fn test_matched_phrases_and_custom_list() {
        let c = ClickbaitClassifier::new(["  Wow ", "", "omg"]);
        assert_eq!(c.phrases(), &["wow".to_string(), "omg".to_string()]);
        assert_eq!(c.matched_phrases("OMG, wow!"), vec!["wow", "omg"]);
        assert!(c.matched_phrases("calm news").is_empty());
    }

    #[test]
    fn test_repeated_phrases_are_kept_once() {
        let c = ClickbaitClassifier::new(["wow", "omg", "WOW", " wow "]);
        assert_eq!(c.phrases(), &["wow".to_string(), "omg".to_string()]);
        assert_eq!(c.matched_phrases("wow"), vec!["wow"]);
    }
}
