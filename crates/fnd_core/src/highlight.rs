//! Case-insensitive keyword highlighting shared by the terminal and web views.

use regex::{Regex, RegexBuilder};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    Plain(&'a str),
    Match(&'a str),
}

/// Split `text` into plain runs and non-overlapping keyword matches, scanning
/// left to right. Matching ignores case, so the matched slice keeps the
/// original casing of `text`.
pub fn segments<'a>(text: &'a str, keyword: &str) -> Vec<Segment<'a>> {
    let pattern = match keyword_regex(keyword) {
        Some(pattern) => pattern,
        None => return if text.is_empty() { Vec::new() } else { vec![Segment::Plain(text)] },
    };

    let mut out = Vec::new();
    let mut plain_start = 0;
    for m in pattern.find_iter(text) {
        if plain_start < m.start() {
            out.push(Segment::Plain(&text[plain_start..m.start()]));
        }
        out.push(Segment::Match(m.as_str()));
        plain_start = m.end();
    }
    if plain_start < text.len() {
        out.push(Segment::Plain(&text[plain_start..]));
    }
    out
}

/// Render `text` with each segment passed through the matching formatter.
pub fn highlight_with<P, M>(text: &str, keyword: &str, plain: P, matched: M) -> String
where
    P: Fn(&str) -> String,
    M: Fn(&str) -> String,
{
    segments(text, keyword)
        .into_iter()
        .map(|segment| match segment {
            Segment::Plain(s) => plain(s),
            Segment::Match(s) => matched(s),
        })
        .collect()
}

/// Wrap every keyword occurrence in `open`/`close`, leaving other text untouched.
pub fn highlight(text: &str, keyword: &str, open: &str, close: &str) -> String {
    highlight_with(text, keyword, |s| s.to_string(), |s| format!("{}{}{}", open, s, close))
}

fn keyword_regex(keyword: &str) -> Option<Regex> {
    if keyword.is_empty() {
        return None;
    }
    RegexBuilder::new(&regex::escape(keyword))
        .case_insensitive(true)
        .build()
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wraps_every_case_insensitive_match() {
        let out = highlight("Apple iPhone news: IPHONE sales and iphones", "iphone", "[", "]");
        assert_eq!(out, "Apple [iPhone] news: [IPHONE] sales and [iphone]s");
    }

    #[test]
    fn test_leaves_text_without_matches_unchanged() {
        let text = "Nothing to see here.";
        assert_eq!(highlight(text, "iphone", "[", "]"), text);
        assert_eq!(highlight(text, "", "[", "]"), text);
        assert_eq!(highlight("", "iphone", "[", "]"), "");
    }

    #[test]
    fn test_matches_do_not_overlap() {
        assert_eq!(highlight("aaaa", "aa", "<", ">"), "<aa><aa>");
        assert_eq!(highlight("aaa", "aa", "<", ">"), "<aa>a");
    }

    #[test]
    fn test_handles_multibyte_text() {
        let out = highlight("Café CAFÉ café", "café", "*", "*");
        assert_eq!(out, "*Café* *CAFÉ* *café*");
    }

    #[test]
    fn test_stripping_markers_restores_original() {
        let text = "Bitcoin rallies; BITCOIN miners cheer. bitcoin!";
        let out = highlight(text, "bitcoin", "\u{1}", "\u{2}");
        assert_eq!(out.replace(['\u{1}', '\u{2}'], ""), text);
        assert_eq!(out.matches('\u{1}').count(), 3);
    }

    #[test]
    fn test_keyword_is_matched_literally() {
        assert_eq!(highlight("C++ and c++ (or C)", "c++", "[", "]"), "[C++] and [c++] (or C)");
        assert_eq!(highlight("price: $5.00 or $5x00", "$5.00", "[", "]"), "price: [$5.00] or $5x00");
    }

    #[test]
    fn test_segments_keep_original_casing() {
        let segs = segments("Read about RUST now", "rust");
        assert_eq!(
            segs,
            vec![Segment::Plain("Read about "), Segment::Match("RUST"), Segment::Plain(" now")]
        );
    }
}
