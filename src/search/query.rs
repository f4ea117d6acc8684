//! Search query: trimmed text plus the literal, case-insensitive pattern built from it.

use crate::error::{SearchError, SearchResult};
use regex::{Match, Regex, RegexBuilder};

/// Longest accepted query, in characters.
pub const MAX_QUERY_LENGTH: usize = 500;

/// A trimmed search query.
///
/// The pattern is built from the escaped query text, so regex metacharacters
/// in the query (`C++`, `a.b`) match literally.
#[derive(Debug, Clone)]
pub struct Query {
    text: String,
    pattern: Option<Regex>,
}

impl Query {
    /// Parse raw input. Whitespace-only input yields the empty query.
    pub fn parse(raw: &str) -> SearchResult<Self> {
        let text = raw.trim();
        if text.is_empty() {
            return Ok(Self::empty());
        }

        if text.chars().count() > MAX_QUERY_LENGTH {
            return Err(SearchError::InvalidQuery(format!(
                "Search query too long (max {} characters)",
                MAX_QUERY_LENGTH
            )));
        }

        let pattern = RegexBuilder::new(&regex::escape(text))
            .case_insensitive(true)
            .build()
            .map_err(|e| SearchError::InvalidQuery(e.to_string()))?;

        Ok(Self {
            text: text.to_string(),
            pattern: Some(pattern),
        })
    }

    /// The "no search" query.
    pub fn empty() -> Self {
        Self {
            text: String::new(),
            pattern: None,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.pattern.is_none()
    }

    /// First occurrence in `haystack`.
    pub fn find<'h>(&self, haystack: &'h str) -> Option<Match<'h>> {
        self.pattern.as_ref().and_then(|re| re.find(haystack))
    }

    /// All non-overlapping occurrences, left to right.
    pub fn find_iter<'a>(&'a self, haystack: &'a str) -> impl Iterator<Item = Match<'a>> + 'a {
        self.pattern
            .iter()
            .flat_map(move |re| re.find_iter(haystack))
    }

    pub fn is_match(&self, haystack: &str) -> bool {
        self.pattern
            .as_ref()
            .is_some_and(|re| re.is_match(haystack))
    }

    /// Number of non-overlapping occurrences in `haystack`.
    pub fn count_in(&self, haystack: &str) -> usize {
        self.find_iter(haystack).count()
    }
}

impl PartialEq for Query {
    fn eq(&self, other: &Self) -> bool {
        self.text == other.text
    }
}

impl Eq for Query {}

impl Default for Query {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_trims() {
        let query = Query::parse("  drone \t").unwrap();
        assert_eq!(query.as_str(), "drone");
        assert!(!query.is_empty());
    }

    #[test]
    fn test_whitespace_is_empty_query() {
        let query = Query::parse(" \n\t ").unwrap();
        assert!(query.is_empty());
        assert_eq!(query, Query::empty());
        assert_eq!(query.count_in("anything"), 0);
        assert!(query.find("anything").is_none());
    }

    #[test]
    fn test_metacharacters_are_literal() {
        let query = Query::parse("C++").unwrap();
        assert_eq!(query.count_in("c++ and C++ but not C"), 2);

        let query = Query::parse("a.b").unwrap();
        assert!(query.is_match("see a.b here"));
        assert!(!query.is_match("axb"));

        let query = Query::parse("(50-100m)").unwrap();
        assert!(query.is_match("altitude (50-100m) works"));

        let query = Query::parse("$^|[]{}\\").unwrap();
        assert_eq!(query.count_in("x $^|[]{}\\ y"), 1);
    }

    #[test]
    fn test_case_insensitive_non_overlapping() {
        let query = Query::parse("aa").unwrap();
        assert_eq!(query.count_in("aaaa"), 2);
        assert_eq!(query.count_in("AaAaA"), 2);

        let query = Query::parse("PENGUIN").unwrap();
        let found = query.find("Emperor penguin colony").unwrap();
        assert_eq!(found.as_str(), "penguin");
    }

    #[test]
    fn test_too_long_query_rejected() {
        let raw = "x".repeat(MAX_QUERY_LENGTH + 1);
        assert!(matches!(
            Query::parse(&raw),
            Err(SearchError::InvalidQuery(_))
        ));

        let raw = "x".repeat(MAX_QUERY_LENGTH);
        assert!(Query::parse(&raw).is_ok());
    }
}
