//! Glob-style URL activation matching
//!
//! Patterns use `*` as a wildcard; every other character is literal. A
//! pattern matches the full URL, not a substring, so `https://docs.google.com/*`
//! does not accidentally activate on a URL that merely embeds that string.

use regex::Regex;
use tracing::warn;

/// Compiled set of URL activation patterns
#[derive(Debug, Default)]
pub struct UrlMatcher {
    patterns: Vec<Regex>,
}

impl UrlMatcher {
    /// Compile glob-style patterns into anchored regexes
    ///
    /// Each pattern is regex-escaped and then has its `*` wildcards expanded
    /// to `.*`. Patterns that still fail to compile are skipped with a
    /// warning rather than disabling the whole set.
    pub fn new(patterns: &[String]) -> Self {
        let compiled = patterns
            .iter()
            .filter_map(|pattern| {
                let expanded = format!("^{}$", regex::escape(pattern).replace(r"\*", ".*"));
                match Regex::new(&expanded) {
                    Ok(re) => Some(re),
                    Err(err) => {
                        warn!(pattern, %err, "skipping unparseable URL pattern");
                        None
                    }
                }
            })
            .collect();
        Self { patterns: compiled }
    }

    /// Whether the URL matches at least one configured pattern
    ///
    /// An empty pattern set matches nothing: the assistant stays inactive
    /// until the user opts into at least one site.
    pub fn matches(&self, url: &str) -> bool {
        self.patterns.iter().any(|re| re.is_match(url))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matcher(patterns: &[&str]) -> UrlMatcher {
        let owned: Vec<String> = patterns.iter().map(|p| p.to_string()).collect();
        UrlMatcher::new(&owned)
    }

    #[test]
    fn wildcard_expands_across_path() {
        let m = matcher(&["https://docs.google.com/document/*"]);
        assert!(m.matches("https://docs.google.com/document/d/abc123/edit"));
        assert!(!m.matches("https://docs.google.com/spreadsheets/d/abc123"));
    }

    #[test]
    fn match_is_full_string() {
        let m = matcher(&["https://example.com"]);
        assert!(m.matches("https://example.com"));
        assert!(!m.matches("https://example.com/path"));
        assert!(!m.matches("https://evil.test/?https://example.com"));
    }

    #[test]
    fn literal_dots_are_not_wildcards() {
        let m = matcher(&["https://docs.google.com/*"]);
        assert!(!m.matches("https://docsXgoogleXcom/document"));
    }

    #[test]
    fn empty_pattern_set_matches_nothing() {
        let m = matcher(&[]);
        assert!(!m.matches("https://docs.google.com/document/d/abc/edit"));
    }

    #[test]
    fn bare_star_matches_everything() {
        let m = matcher(&["*"]);
        assert!(m.matches("https://anything.example/at/all"));
        assert!(m.matches(""));
    }

    #[test]
    fn regex_metacharacters_are_literal() {
        let m = matcher(&["https://example.com/doc?id=1"]);
        assert!(m.matches("https://example.com/doc?id=1"));
        assert!(!m.matches("https://example.com/doid=1"));
    }
}
