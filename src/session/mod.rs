//! Search session state machine.
//!
//! A session owns the active corpus and moves between three phases:
//!
//! - **Idle**: no query.
//! - **Searching**: a non-empty query with its ranked results, possibly none.
//!   The viewer pane previews one result without opening it.
//! - **Viewing**: a result's full conversation is open with every message
//!   highlighted.
//!
//! Results are recomputed synchronously on each query change, so the last
//! query submitted is always the one reflected in the results.

use crate::error::{SessionError, SessionResult};
use crate::models::{Corpus, Role};
use crate::search::{highlight, search_corpus, MatchResult, Query};
use serde::Serialize;
use std::sync::Arc;

/// Observable phase of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionPhase {
    Idle,
    Searching,
    Viewing,
}

#[derive(Debug, Clone)]
enum State {
    Idle,
    Searching {
        query: Query,
        results: Vec<MatchResult>,
        preview: Option<String>,
    },
    Viewing {
        query: Query,
        results: Vec<MatchResult>,
        active: String,
    },
}

/// A message rendered for the conversation viewer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HighlightedMessage {
    pub role: Role,
    pub label: &'static str,
    pub markup: String,
}

/// An opened conversation with the current query highlighted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConversationView {
    pub id: String,
    pub title: String,
    pub date: String,
    pub message_count: usize,
    pub messages: Vec<HighlightedMessage>,
}

/// One visitor's search over one corpus at a time.
#[derive(Debug, Clone)]
pub struct SearchSession {
    corpus: Arc<Corpus>,
    radius: usize,
    state: State,
}

impl SearchSession {
    /// Start an idle session over `corpus`.
    pub fn new(corpus: Arc<Corpus>, radius: usize) -> Self {
        Self {
            corpus,
            radius,
            state: State::Idle,
        }
    }

    pub fn corpus(&self) -> &Arc<Corpus> {
        &self.corpus
    }

    pub fn phase(&self) -> SessionPhase {
        match self.state {
            State::Idle => SessionPhase::Idle,
            State::Searching { .. } => SessionPhase::Searching,
            State::Viewing { .. } => SessionPhase::Viewing,
        }
    }

    /// Current query text, empty when idle.
    pub fn query(&self) -> &str {
        match &self.state {
            State::Idle => "",
            State::Searching { query, .. } | State::Viewing { query, .. } => query.as_str(),
        }
    }

    /// Ranked results of the current query.
    pub fn results(&self) -> &[MatchResult] {
        match &self.state {
            State::Idle => &[],
            State::Searching { results, .. } | State::Viewing { results, .. } => results,
        }
    }

    /// Conversation shown in the viewer pane: the opened one, or the preview.
    pub fn active_id(&self) -> Option<&str> {
        match &self.state {
            State::Idle => None,
            State::Searching { preview, .. } => preview.as_deref(),
            State::Viewing { active, .. } => Some(active),
        }
    }

    /// Submit a new query.
    ///
    /// Whitespace-only input returns to `Idle`. Otherwise results are
    /// recomputed and the session is `Searching`, unless a conversation is
    /// open and still among the new results, in which case it stays open.
    /// A rejected query also returns to `Idle`, so the previous results are
    /// never left on display.
    pub fn submit_query(&mut self, raw: &str) -> SessionResult<SessionPhase> {
        let query = match Query::parse(raw) {
            Ok(query) => query,
            Err(e) => {
                self.clear_query();
                return Err(e.into());
            }
        };
        if query.is_empty() {
            self.clear_query();
            return Ok(self.phase());
        }

        let results = search_corpus(&self.corpus, &query, self.radius);
        let contains = |id: &str| results.iter().any(|r| r.conversation_id == id);

        // (id, still open)
        let retained = match &self.state {
            State::Viewing { active, .. } if contains(active.as_str()) => {
                Some((active.clone(), true))
            }
            State::Searching {
                preview: Some(preview),
                ..
            } if contains(preview.as_str()) => Some((preview.clone(), false)),
            _ => None,
        };

        self.state = match retained {
            Some((active, true)) => State::Viewing {
                query,
                results,
                active,
            },
            Some((preview, false)) => State::Searching {
                query,
                results,
                preview: Some(preview),
            },
            None => {
                let preview = results.first().map(|r| r.conversation_id.clone());
                State::Searching {
                    query,
                    results,
                    preview,
                }
            }
        };

        Ok(self.phase())
    }

    /// Open a result's conversation: `Searching → Viewing`.
    pub fn select(&mut self, conversation_id: &str) -> SessionResult<ConversationView> {
        let previous = std::mem::replace(&mut self.state, State::Idle);
        let (query, results) = match previous {
            State::Idle => return Err(SessionError::NoActiveSearch),
            State::Searching { query, results, .. } | State::Viewing { query, results, .. } => {
                (query, results)
            }
        };

        if !results.iter().any(|r| r.conversation_id == conversation_id) {
            let preview = results.first().map(|r| r.conversation_id.clone());
            self.state = State::Searching {
                query,
                results,
                preview,
            };
            return Err(SessionError::NotInResults(conversation_id.to_string()));
        }

        self.state = State::Viewing {
            query,
            results,
            active: conversation_id.to_string(),
        };
        self.view().ok_or_else(|| SessionError::NotInResults(conversation_id.to_string()))
    }

    /// Close the open conversation: `Viewing → Searching`. No-op otherwise.
    pub fn collapse(&mut self) -> SessionPhase {
        let previous = std::mem::replace(&mut self.state, State::Idle);
        self.state = match previous {
            State::Viewing {
                query,
                results,
                active,
            } => State::Searching {
                query,
                results,
                preview: Some(active),
            },
            other => other,
        };
        self.phase()
    }

    /// Clear the query: any phase → `Idle`.
    pub fn clear_query(&mut self) {
        self.state = State::Idle;
    }

    /// Replace the corpus and reset to `Idle`, dropping any selection.
    pub fn swap_corpus(&mut self, corpus: Arc<Corpus>) {
        tracing::debug!(from = %self.corpus.name, to = %corpus.name, "Swapping corpus");
        self.corpus = corpus;
        self.state = State::Idle;
    }

    /// The open conversation with every message highlighted, when `Viewing`.
    pub fn view(&self) -> Option<ConversationView> {
        let State::Viewing { query, active, .. } = &self.state else {
            return None;
        };
        let conversation = self.corpus.conversation(active)?;

        Some(ConversationView {
            id: conversation.id.clone(),
            title: conversation.title.clone(),
            date: conversation.display_date().to_string(),
            message_count: conversation.message_count(),
            messages: conversation
                .messages
                .iter()
                .map(|m| HighlightedMessage {
                    role: m.role,
                    label: m.role.display_label(),
                    markup: highlight(&m.content, query),
                })
                .collect(),
        })
    }
}
