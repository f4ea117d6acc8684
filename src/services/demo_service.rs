//! Demo service layer.
//!
//! Persona selection and search-session orchestration.

use crate::domain::{Persona, PersonaMeta};
use crate::error::{SessionError, SessionResult};
use crate::metrics::Metrics;
use crate::repositories::CorpusRepository;
use crate::search::{browse, ConversationSummary, MatchResult};
use crate::session::{ConversationView, SearchSession, SessionPhase};
use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Everything the demo page shows at one moment.
#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    pub persona: Persona,
    pub dataset_name: String,
    pub phase: SessionPhase,
    pub query: String,
    pub results: Vec<MatchResult>,
    /// Conversation in the viewer pane (opened or previewed)
    pub active_conversation_id: Option<String>,
    /// Fully highlighted conversation, only while `Viewing`
    pub conversation: Option<ConversationView>,
}

impl SessionSnapshot {
    fn capture(persona: Persona, session: &SearchSession) -> Self {
        Self {
            persona,
            dataset_name: session.corpus().name.clone(),
            phase: session.phase(),
            query: session.query().to_string(),
            results: session.results().to_vec(),
            active_conversation_id: session.active_id().map(str::to_string),
            conversation: session.view(),
        }
    }
}

/// Demo service trait for the search page.
#[async_trait]
pub trait DemoService: Send + Sync {
    /// Personas available on the picker, in picker order.
    fn list_personas(&self) -> Vec<PersonaMeta>;

    /// Load a persona's corpus and reset the session to idle.
    async fn select_persona(&self, persona: Persona) -> SessionResult<SessionSnapshot>;

    /// Submit the current query text.
    async fn search(&self, query: &str) -> SessionResult<SessionSnapshot>;

    /// Open a result's full conversation.
    async fn open_conversation(&self, conversation_id: &str) -> SessionResult<ConversationView>;

    /// Close the open conversation.
    async fn collapse_conversation(&self) -> SessionResult<SessionSnapshot>;

    /// List conversations of the active corpus matching a browse filter.
    async fn browse(&self, filter: &str) -> SessionResult<Vec<ConversationSummary>>;

    /// Current session state.
    async fn snapshot(&self) -> SessionResult<SessionSnapshot>;
}

struct ActiveSession {
    persona: Persona,
    session: SearchSession,
}

/// Default implementation of DemoService.
pub struct DemoServiceImpl {
    repository: Arc<dyn CorpusRepository>,
    state: RwLock<Option<ActiveSession>>,
    snippet_radius: usize,
    metrics: Metrics,
}

impl DemoServiceImpl {
    /// Create a new demo service with no persona selected.
    pub fn new(repository: Arc<dyn CorpusRepository>, snippet_radius: usize) -> Self {
        Self {
            repository,
            state: RwLock::new(None),
            snippet_radius,
            metrics: Metrics::new(),
        }
    }

    /// Record into a shared metrics collector.
    pub fn with_metrics(mut self, metrics: Metrics) -> Self {
        self.metrics = metrics;
        self
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }
}

#[async_trait]
impl DemoService for DemoServiceImpl {
    fn list_personas(&self) -> Vec<PersonaMeta> {
        Persona::ALL.iter().map(Persona::meta).collect()
    }

    async fn select_persona(&self, persona: Persona) -> SessionResult<SessionSnapshot> {
        let corpus = self.repository.load(persona).await?;
        self.metrics.record_corpus_load();
        tracing::info!(
            persona = %persona,
            dataset = %corpus.name,
            conversations = corpus.len(),
            "Persona selected"
        );

        let mut state = self.state.write().await;
        match state.as_mut() {
            Some(active) => {
                active.persona = persona;
                active.session.swap_corpus(corpus);
            }
            None => {
                *state = Some(ActiveSession {
                    persona,
                    session: SearchSession::new(corpus, self.snippet_radius),
                });
            }
        }

        let active = state.as_ref().ok_or(SessionError::NoPersonaSelected)?;
        Ok(SessionSnapshot::capture(active.persona, &active.session))
    }

    async fn search(&self, query: &str) -> SessionResult<SessionSnapshot> {
        let mut state = self.state.write().await;
        let active = state.as_mut().ok_or(SessionError::NoPersonaSelected)?;

        active.session.submit_query(query)?;
        self.metrics.record_search_query();

        Ok(SessionSnapshot::capture(active.persona, &active.session))
    }

    async fn open_conversation(&self, conversation_id: &str) -> SessionResult<ConversationView> {
        let mut state = self.state.write().await;
        let active = state.as_mut().ok_or(SessionError::NoPersonaSelected)?;
        active.session.select(conversation_id)
    }

    async fn collapse_conversation(&self) -> SessionResult<SessionSnapshot> {
        let mut state = self.state.write().await;
        let active = state.as_mut().ok_or(SessionError::NoPersonaSelected)?;
        active.session.collapse();
        Ok(SessionSnapshot::capture(active.persona, &active.session))
    }

    async fn browse(&self, filter: &str) -> SessionResult<Vec<ConversationSummary>> {
        let state = self.state.read().await;
        let active = state.as_ref().ok_or(SessionError::NoPersonaSelected)?;
        Ok(browse(active.session.corpus(), filter))
    }

    async fn snapshot(&self) -> SessionResult<SessionSnapshot> {
        let state = self.state.read().await;
        let active = state.as_ref().ok_or(SessionError::NoPersonaSelected)?;
        Ok(SessionSnapshot::capture(active.persona, &active.session))
    }
}
