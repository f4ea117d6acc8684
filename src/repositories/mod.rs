mod demo_corpus_repository;
mod json_corpus_repository;
mod traits;

pub use demo_corpus_repository::DemoCorpusRepository;
pub use json_corpus_repository::JsonCorpusRepository;
pub use traits::CorpusRepository;
