//! Conversation model: the demo corpus, its conversations and their messages.

use crate::error::{CorpusError, CorpusResult};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Shown instead of a date for conversations that have none.
pub const UNDATED_LABEL: &str = "Demo conversation";

/// Who wrote a message.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    /// Label shown above a message in the conversation viewer.
    pub fn display_label(&self) -> &'static str {
        match self {
            Self::User => "You",
            Self::Assistant => "ChatGPT",
        }
    }
}

/// A single chat message.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }
}

/// A titled, ordered sequence of messages.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Conversation {
    /// Unique within its corpus
    pub id: String,

    pub title: String,

    /// Chronological order
    pub messages: Vec<Message>,

    /// Calendar date as written in the dataset (usually `YYYY-MM-DD`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

impl Conversation {
    /// Create an undated conversation.
    pub fn new(id: impl Into<String>, title: impl Into<String>, messages: Vec<Message>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            messages,
            date: None,
        }
    }

    /// Set the conversation date.
    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = Some(date.into());
        self
    }

    /// The date parsed as an ISO calendar date, if it is one.
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        self.date
            .as_deref()
            .and_then(|d| NaiveDate::parse_from_str(d.trim(), "%Y-%m-%d").ok())
    }

    /// Date for display, falling back to [`UNDATED_LABEL`].
    pub fn display_date(&self) -> &str {
        self.date.as_deref().unwrap_or(UNDATED_LABEL)
    }

    pub fn message_count(&self) -> usize {
        self.messages.len()
    }
}

/// One persona's dataset. Immutable once loaded.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Corpus {
    #[serde(rename = "dataset_name")]
    pub name: String,

    pub conversations: Vec<Conversation>,
}

impl Corpus {
    /// Build a corpus, rejecting duplicate conversation ids and dates that
    /// are not `YYYY-MM-DD`.
    pub fn new(name: impl Into<String>, conversations: Vec<Conversation>) -> CorpusResult<Self> {
        let corpus = Self {
            name: name.into(),
            conversations,
        };
        corpus.validate()?;
        Ok(corpus)
    }

    /// Parse a dataset file (`{"dataset_name": ..., "conversations": [...]}`).
    pub fn from_json(json: &str) -> CorpusResult<Self> {
        let corpus: Corpus = serde_json::from_str(json)?;
        corpus.validate()?;
        Ok(corpus)
    }

    fn validate(&self) -> CorpusResult<()> {
        let mut seen = HashSet::new();
        for conversation in &self.conversations {
            if !seen.insert(conversation.id.as_str()) {
                return Err(CorpusError::DuplicateConversationId {
                    dataset: self.name.clone(),
                    id: conversation.id.clone(),
                });
            }
            if let Some(date) = &conversation.date {
                if conversation.parsed_date().is_none() {
                    return Err(CorpusError::InvalidDate {
                        dataset: self.name.clone(),
                        id: conversation.id.clone(),
                        date: date.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Look up a conversation by id.
    pub fn conversation(&self, id: &str) -> Option<&Conversation> {
        self.conversations.iter().find(|c| c.id == id)
    }

    pub fn len(&self) -> usize {
        self.conversations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.conversations.is_empty()
    }
}
