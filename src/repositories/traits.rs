use crate::domain::Persona;
use crate::error::CorpusResult;
use crate::models::Corpus;
use async_trait::async_trait;
use std::sync::Arc;

/// Source of persona corpora.
///
/// Provides abstraction over where demo datasets come from,
/// enabling different implementations (embedded, directory, mock).
#[async_trait]
pub trait CorpusRepository: Send + Sync {
    /// Load the corpus for a persona.
    async fn load(&self, persona: Persona) -> CorpusResult<Arc<Corpus>>;
}
