use crate::domain::Persona;
use crate::error::{CorpusError, CorpusResult};
use crate::models::Corpus;
use crate::repositories::traits::CorpusRepository;
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::Arc;

/// Corpus repository reading `dataset_<persona>.json` files from a directory.
///
/// Files are read on every load, so edits show up on the next persona
/// selection.
pub struct JsonCorpusRepository {
    dir: PathBuf,
}

impl JsonCorpusRepository {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Path of the dataset file for `persona`.
    pub fn dataset_path(&self, persona: Persona) -> PathBuf {
        self.dir.join(persona.dataset_file())
    }
}

#[async_trait]
impl CorpusRepository for JsonCorpusRepository {
    async fn load(&self, persona: Persona) -> CorpusResult<Arc<Corpus>> {
        let path = self.dataset_path(persona);
        let path_display = path.display().to_string();

        let json = tokio::fs::read_to_string(&path)
            .await
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound => CorpusError::NotFound(path_display.clone()),
                _ => CorpusError::Io {
                    path: path_display.clone(),
                    source: e,
                },
            })?;

        let corpus = Corpus::from_json(&json)?;
        tracing::info!(
            path = %path_display,
            conversations = corpus.len(),
            "Loaded dataset from disk"
        );
        Ok(Arc::new(corpus))
    }
}
