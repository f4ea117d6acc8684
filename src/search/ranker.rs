//! Result ranking by match count.

use super::matcher::MatchResult;

/// Order results by descending match count.
///
/// `sort_by` is stable, so equal counts keep the order they were matched in
/// (corpus order).
pub fn rank(mut results: Vec<MatchResult>) -> Vec<MatchResult> {
    results.sort_by(|a, b| b.match_count.cmp(&a.match_count));
    results
}
