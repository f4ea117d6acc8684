//! Snippet generation around the first query occurrence.
//!
//! Lengths are counted in `char`s so a window never splits a code point.

use super::highlight::highlight;
use super::query::Query;
use std::ops::Range;

/// Characters of context on each side of the first match.
pub const DEFAULT_SNIPPET_RADIUS: usize = 60;

/// Marks a side of the snippet that was cut off.
pub const ELLIPSIS: &str = "…";

/// Byte range of `source` shown around the first occurrence of `query`.
///
/// Spans `radius` characters before the match start to `radius` characters
/// after the match end, clamped to the text. `None` when there is no match.
pub fn snippet_window(source: &str, query: &Query, radius: usize) -> Option<Range<usize>> {
    let found = query.find(source)?;
    Some(window_around(source, found.range(), radius))
}

/// Build the highlighted snippet for `source`.
///
/// Without a match (or with the empty query) this degrades to the first
/// `2 * radius` characters.
pub fn build_snippet(source: &str, query: &Query, radius: usize) -> String {
    match query.find(source) {
        Some(found) => snippet_at(source, found.range(), &[0..source.len()], query, radius),
        None => leading_excerpt(source, radius),
    }
}

/// Build a snippet centred on a known occurrence at `found`.
///
/// `segments` are the byte ranges of `source` highlighted independently of
/// each other; text between segments is copied verbatim, so no highlight can
/// cross a segment boundary.
pub fn snippet_at(
    source: &str,
    found: Range<usize>,
    segments: &[Range<usize>],
    query: &Query,
    radius: usize,
) -> String {
    let window = window_around(source, found, radius);

    let mut snippet = String::new();
    if window.start > 0 {
        snippet.push_str(ELLIPSIS);
    }

    let mut cursor = window.start;
    for segment in segments {
        let start = segment.start.max(window.start);
        let end = segment.end.min(window.end);
        if start >= end {
            continue;
        }
        if cursor < start {
            snippet.push_str(&source[cursor..start]);
        }
        snippet.push_str(&highlight(&source[start..end], query));
        cursor = end;
    }
    if cursor < window.end {
        snippet.push_str(&source[cursor..window.end]);
    }

    if window.end < source.len() {
        snippet.push_str(ELLIPSIS);
    }
    snippet
}

/// The first `2 * radius` characters, with an ellipsis when cut.
pub fn leading_excerpt(source: &str, radius: usize) -> String {
    let limit = radius.saturating_mul(2);
    match source.char_indices().nth(limit) {
        Some((cut, _)) => format!("{}{}", &source[..cut], ELLIPSIS),
        None => source.to_string(),
    }
}

fn window_around(source: &str, found: Range<usize>, radius: usize) -> Range<usize> {
    let start = chars_back(source, found.start, radius);
    let end = chars_forward(source, found.end, radius);
    start..end
}

/// Byte offset `n` characters before `from`, or 0.
fn chars_back(text: &str, from: usize, n: usize) -> usize {
    if n == 0 {
        return from;
    }
    text[..from]
        .char_indices()
        .rev()
        .nth(n - 1)
        .map(|(i, _)| i)
        .unwrap_or(0)
}

/// Byte offset `n` characters after `from`, or the end of the text.
fn chars_forward(text: &str, from: usize, n: usize) -> usize {
    text[from..]
        .char_indices()
        .nth(n)
        .map(|(i, _)| from + i)
        .unwrap_or(text.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::highlight::{MARK_CLOSE, MARK_OPEN};

    fn q(raw: &str) -> Query {
        Query::parse(raw).unwrap()
    }

    #[test]
    fn test_short_text_no_ellipsis() {
        assert_eq!(
            build_snippet("Penguin Drone Survey Protocol", &q("drone"), 60),
            "Penguin <mark>Drone</mark> Survey Protocol"
        );
    }

    #[test]
    fn test_window_centered_on_first_match() {
        let source = format!("{}needle{}", "a".repeat(100), "b".repeat(100));
        let snippet = build_snippet(&source, &q("needle"), 10);
        assert_eq!(
            snippet,
            format!("…{}<mark>needle</mark>{}…", "a".repeat(10), "b".repeat(10))
        );
    }

    #[test]
    fn test_ellipsis_only_on_truncated_side() {
        let source = format!("needle{}", "b".repeat(100));
        let snippet = build_snippet(&source, &q("needle"), 5);
        assert!(!snippet.starts_with(ELLIPSIS));
        assert!(snippet.ends_with(ELLIPSIS));

        let source = format!("{}needle", "a".repeat(100));
        let snippet = build_snippet(&source, &q("needle"), 5);
        assert!(snippet.starts_with(ELLIPSIS));
        assert!(!snippet.ends_with(ELLIPSIS));
    }

    #[test]
    fn test_window_exactly_fits() {
        let source = format!("{}needle{}", "a".repeat(5), "b".repeat(5));
        let window = snippet_window(&source, &q("needle"), 5).unwrap();
        assert_eq!(window, 0..source.len());
        assert!(!build_snippet(&source, &q("needle"), 5).contains(ELLIPSIS));
    }

    #[test]
    fn test_highlights_every_match_inside_window() {
        let source = "drone one, drone two, and far away ... drone three";
        let snippet = build_snippet(source, &q("drone"), 15);
        assert_eq!(snippet.matches(MARK_OPEN).count(), 2);
        assert_eq!(snippet, "<mark>drone</mark> one, <mark>drone</mark> two…");
    }

    #[test]
    fn test_empty_query_leading_excerpt() {
        let source = "x".repeat(130);
        assert_eq!(
            build_snippet(&source, &Query::empty(), 60),
            format!("{}…", "x".repeat(120))
        );

        let source = "x".repeat(120);
        assert_eq!(build_snippet(&source, &Query::empty(), 60), source);
    }

    #[test]
    fn test_missing_match_degrades_to_excerpt() {
        let source = "y".repeat(50);
        assert_eq!(
            build_snippet(&source, &q("absent"), 10),
            format!("{}…", "y".repeat(20))
        );
    }

    #[test]
    fn test_segments_highlight_independently() {
        let source = "ends alpha\nbeta then\nliteral alpha\nbeta here";
        let segments = [0..10, 11..20, 21..source.len()];
        let found = 29..39;
        assert_eq!(&source[found.clone()], "alpha\nbeta");

        assert_eq!(
            snippet_at(source, found, &segments, &q("alpha\nbeta"), 60),
            "ends alpha\nbeta then\nliteral <mark>alpha\nbeta</mark> here"
        );
    }

    #[test]
    fn test_radius_counts_characters() {
        let source = "ééééé needle ééééé";
        let window = snippet_window(source, &q("needle"), 3).unwrap();
        assert_eq!(&source[window], "éé needle éé");
    }

    #[test]
    fn test_window_bounds_hold() {
        let source = "The protocol requires permits from CONAF. You'll need to submit a detailed research proposal, flight plan, and demonstrate minimal impact.";
        for radius in [0, 1, 7, 30, 200] {
            let query = q("proposal");
            let window = snippet_window(source, &query, radius).unwrap();
            let span = source[window.clone()].chars().count();
            assert!(span <= 2 * radius + "proposal".len());

            let snippet = build_snippet(source, &query, radius);
            assert_eq!(snippet.starts_with(ELLIPSIS), window.start > 0);
            assert_eq!(snippet.ends_with(ELLIPSIS), window.end < source.len());

            let plain = snippet
                .trim_start_matches(ELLIPSIS)
                .trim_end_matches(ELLIPSIS)
                .replace(MARK_OPEN, "")
                .replace(MARK_CLOSE, "");
            assert_eq!(plain, &source[window]);
        }
    }
}
