//! Conversation search: matching, ranking, snippets and highlighting.
//!
//! Every query is evaluated from scratch against the immutable corpus:
//! parse → match → rank. Snippets are built while matching; the full-text
//! highlighter is applied separately to each message of an opened
//! conversation.

pub mod browse;
pub mod highlight;
pub mod matcher;
pub mod query;
pub mod ranker;
pub mod snippet;

pub use browse::{browse, ConversationSummary};
pub use highlight::{highlight, MARK_CLOSE, MARK_OPEN};
pub use matcher::{joined_bodies, match_conversation, match_corpus, MatchResult, MESSAGE_SEPARATOR};
pub use query::{Query, MAX_QUERY_LENGTH};
pub use ranker::rank;
pub use snippet::{
    build_snippet, leading_excerpt, snippet_at, snippet_window, DEFAULT_SNIPPET_RADIUS, ELLIPSIS,
};

use crate::error::SearchResult;
use crate::models::Corpus;

/// Run a parsed query against `corpus` and return ranked results.
pub fn search_corpus(corpus: &Corpus, query: &Query, radius: usize) -> Vec<MatchResult> {
    let results = rank(match_corpus(corpus, query, radius));
    tracing::debug!(
        corpus = %corpus.name,
        query = %query.as_str(),
        result_count = results.len(),
        "Search evaluated"
    );
    results
}

/// Parse `raw` and search `corpus`.
///
/// Whitespace-only input is "no search" and yields no results.
pub fn search(corpus: &Corpus, raw: &str, radius: usize) -> SearchResult<Vec<MatchResult>> {
    let query = Query::parse(raw)?;
    Ok(search_corpus(corpus, &query, radius))
}
