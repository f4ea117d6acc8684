use crate::domain::Persona;
use crate::error::CorpusResult;
use crate::models::Corpus;
use crate::repositories::traits::CorpusRepository;
use async_trait::async_trait;
use once_cell::sync::OnceCell;
use std::sync::Arc;

const RESEARCHER_JSON: &str = include_str!("../../datasets/dataset_researcher.json");
const CONSULTANT_JSON: &str = include_str!("../../datasets/dataset_consultant.json");
const CREATOR_JSON: &str = include_str!("../../datasets/dataset_creator.json");

/// Corpus repository serving the datasets compiled into the binary.
///
/// Each dataset is parsed on first use and shared afterwards.
#[derive(Default)]
pub struct DemoCorpusRepository {
    researcher: OnceCell<Arc<Corpus>>,
    consultant: OnceCell<Arc<Corpus>>,
    creator: OnceCell<Arc<Corpus>>,
}

impl DemoCorpusRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load synchronously; the embedded data needs no I/O.
    pub fn corpus(&self, persona: Persona) -> CorpusResult<Arc<Corpus>> {
        let (cell, json) = match persona {
            Persona::Researcher => (&self.researcher, RESEARCHER_JSON),
            Persona::Consultant => (&self.consultant, CONSULTANT_JSON),
            Persona::Creator => (&self.creator, CREATOR_JSON),
        };

        cell.get_or_try_init(|| {
            tracing::debug!(persona = %persona, "Parsing embedded dataset");
            Corpus::from_json(json).map(Arc::new)
        })
        .cloned()
    }
}

#[async_trait]
impl CorpusRepository for DemoCorpusRepository {
    async fn load(&self, persona: Persona) -> CorpusResult<Arc<Corpus>> {
        self.corpus(persona)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::search;

    #[test]
    fn test_all_embedded_datasets_parse() {
        let repo = DemoCorpusRepository::new();
        for persona in Persona::ALL {
            let corpus = repo.corpus(persona).unwrap();
            assert_eq!(corpus.len(), 3, "{} should have 3 conversations", persona);
        }
        assert_eq!(repo.corpus(Persona::Researcher).unwrap().name, "Researcher Dataset");
        assert_eq!(repo.corpus(Persona::Consultant).unwrap().name, "Consultant Dataset");
        assert_eq!(repo.corpus(Persona::Creator).unwrap().name, "Creator Dataset");
    }

    #[test]
    fn test_corpus_is_shared_after_first_load() {
        let repo = DemoCorpusRepository::new();
        let first = repo.corpus(Persona::Creator).unwrap();
        let second = repo.corpus(Persona::Creator).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_helper_hints_find_results() {
        let repo = DemoCorpusRepository::new();
        let hints = [
            (Persona::Researcher, "drone"),
            (Persona::Consultant, "subsidiary"),
            (Persona::Consultant, "EOR"),
            (Persona::Creator, "reef"),
            (Persona::Creator, "crocodile"),
        ];
        for (persona, hint) in hints {
            let corpus = repo.corpus(persona).unwrap();
            let results = search(&corpus, hint, 60).unwrap();
            assert!(!results.is_empty(), "'{}' should match in {}", hint, persona);
        }
    }
}
