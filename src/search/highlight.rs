//! Full-text highlighting of query occurrences.

use super::query::Query;

/// Opening emphasis marker.
pub const MARK_OPEN: &str = "<mark>";

/// Closing emphasis marker.
pub const MARK_CLOSE: &str = "</mark>";

/// Wrap every occurrence of `query` in `text` with emphasis markers.
///
/// Matched spans keep their original casing. The empty query returns `text`
/// unchanged. No other characters are added or escaped.
pub fn highlight(text: &str, query: &Query) -> String {
    if query.is_empty() {
        return text.to_string();
    }

    let mut out = String::with_capacity(text.len() + 16);
    let mut last = 0;
    for found in query.find_iter(text) {
        out.push_str(&text[last..found.start()]);
        out.push_str(MARK_OPEN);
        out.push_str(found.as_str());
        out.push_str(MARK_CLOSE);
        last = found.end();
    }
    out.push_str(&text[last..]);
    out
}
