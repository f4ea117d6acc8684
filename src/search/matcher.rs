//! Matching conversations against a query.
//!
//! A conversation matches when its title or any of its messages contains the
//! query, case-insensitively. Every match carries its occurrence count and a
//! highlighted snippet.

use super::query::Query;
use super::snippet::{build_snippet, leading_excerpt, snippet_at};
use crate::models::{Conversation, Corpus};
use serde::Serialize;

/// Delimiter placed between message bodies when they are shown as one text.
pub const MESSAGE_SEPARATOR: &str = "\n";

/// A conversation that matched the current query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchResult {
    pub conversation_id: String,

    pub title: String,

    /// Highlighted excerpt from the title, or from the message bodies when
    /// the title does not match
    pub snippet_markup: String,

    /// Occurrences in the title plus occurrences in all message bodies
    pub match_count: usize,
}

/// All message bodies joined in chronological order.
pub fn joined_bodies(conversation: &Conversation) -> String {
    conversation
        .messages
        .iter()
        .map(|m| m.content.as_str())
        .collect::<Vec<_>>()
        .join(MESSAGE_SEPARATOR)
}

/// Match one conversation, returning `None` when the query does not occur.
pub fn match_conversation(
    conversation: &Conversation,
    query: &Query,
    radius: usize,
) -> Option<MatchResult> {
    if query.is_empty() {
        return None;
    }

    let title_count = query.count_in(&conversation.title);

    // Counted per message so no occurrence can span two messages.
    let body_count: usize = conversation
        .messages
        .iter()
        .map(|m| query.count_in(&m.content))
        .sum();

    let match_count = title_count + body_count;
    if match_count == 0 {
        return None;
    }

    let snippet_markup = if title_count > 0 {
        build_snippet(&conversation.title, query, radius)
    } else {
        body_snippet(conversation, query, radius)
    };

    Some(MatchResult {
        conversation_id: conversation.id.clone(),
        title: conversation.title.clone(),
        snippet_markup,
        match_count,
    })
}

/// Snippet over the joined bodies, centred on the first occurrence found
/// inside a single message.
fn body_snippet(conversation: &Conversation, query: &Query, radius: usize) -> String {
    let joined = joined_bodies(conversation);

    let mut segments = Vec::with_capacity(conversation.messages.len());
    let mut offset = 0;
    for message in &conversation.messages {
        segments.push(offset..offset + message.content.len());
        offset += message.content.len() + MESSAGE_SEPARATOR.len();
    }

    let first = conversation
        .messages
        .iter()
        .zip(&segments)
        .find_map(|(message, segment)| {
            query
                .find(&message.content)
                .map(|found| segment.start + found.start()..segment.start + found.end())
        });

    match first {
        Some(found) => snippet_at(&joined, found, &segments, query, radius),
        None => leading_excerpt(&joined, radius),
    }
}

/// Match every conversation of `corpus`, in corpus order.
///
/// The empty query short-circuits to no results.
pub fn match_corpus(corpus: &Corpus, query: &Query, radius: usize) -> Vec<MatchResult> {
    if query.is_empty() {
        return Vec::new();
    }

    corpus
        .conversations
        .iter()
        .filter_map(|c| match_conversation(c, query, radius))
        .collect()
}
