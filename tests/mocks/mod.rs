mod mock_corpus_repository;
mod mock_mailing_list_client;

#[allow(unused_imports)]
pub use mock_corpus_repository::MockCorpusRepository;
#[allow(unused_imports)]
pub use mock_mailing_list_client::MockMailingListClient;
