use async_trait::async_trait;
use chatsherlock_demo::domain::Persona;
use chatsherlock_demo::error::{CorpusError, CorpusResult};
use chatsherlock_demo::models::Corpus;
use chatsherlock_demo::repositories::CorpusRepository;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Mock corpus repository for testing.
#[allow(dead_code)]
#[derive(Clone, Default)]
pub struct MockCorpusRepository {
    corpora: Arc<Mutex<HashMap<Persona, Arc<Corpus>>>>,
    load_count: Arc<Mutex<usize>>,
}

#[allow(dead_code)]
impl MockCorpusRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_corpus(&self, persona: Persona, corpus: Corpus) {
        let mut corpora = self.corpora.lock().unwrap();
        corpora.insert(persona, Arc::new(corpus));
    }

    pub fn load_count(&self) -> usize {
        *self.load_count.lock().unwrap()
    }
}

#[async_trait]
impl CorpusRepository for MockCorpusRepository {
    async fn load(&self, persona: Persona) -> CorpusResult<Arc<Corpus>> {
        *self.load_count.lock().unwrap() += 1;

        let corpora = self.corpora.lock().unwrap();
        corpora
            .get(&persona)
            .cloned()
            .ok_or_else(|| CorpusError::NotFound(persona.dataset_file()))
    }
}
