//! "Browse all conversations" listing with its title/content filter.

use crate::models::{Conversation, Corpus};
use serde::Serialize;

/// One row of the browse listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConversationSummary {
    pub id: String,
    pub title: String,
    pub date: String,
    pub message_count: usize,
}

impl From<&Conversation> for ConversationSummary {
    fn from(conversation: &Conversation) -> Self {
        Self {
            id: conversation.id.clone(),
            title: conversation.title.clone(),
            date: conversation.display_date().to_string(),
            message_count: conversation.message_count(),
        }
    }
}

/// List conversations whose title or any message contains `filter`.
///
/// Corpus order, no ranking; an empty filter lists everything.
pub fn browse(corpus: &Corpus, filter: &str) -> Vec<ConversationSummary> {
    let filter = filter.trim().to_lowercase();

    corpus
        .conversations
        .iter()
        .filter(|c| {
            filter.is_empty()
                || c.title.to_lowercase().contains(&filter)
                || c.messages
                    .iter()
                    .any(|m| m.content.to_lowercase().contains(&filter))
        })
        .map(ConversationSummary::from)
        .collect()
}
