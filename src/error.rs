//! Error types for the ChatSherlock demo server.
//!
//! This module defines custom error types using `thiserror` for precise error handling.

use thiserror::Error;

/// Errors that can occur when talking to the mailing-list API.
#[derive(Error, Debug)]
pub enum MailingListError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    HttpError(String),

    /// API returned a status code that is neither success nor "already subscribed"
    #[error("API error (status {status}): {message}")]
    ApiError { status: u16, message: String },

    /// Failed to serialize the request body
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Network timeout
    #[error("Request timeout")]
    Timeout,

    /// Authentication failed
    #[error("Authentication failed")]
    Unauthorized,

    /// No mailing-list credentials were configured
    #[error("Mailing list is not configured")]
    NotConfigured,

    /// Invalid signup request
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

/// Errors that can occur during configuration loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Required environment variable is missing
    #[error("Missing required environment variable: {0}")]
    MissingVar(String),

    /// Environment variable has invalid value
    #[error("Invalid value for {var}: {reason}")]
    InvalidValue { var: String, reason: String },
}

/// Errors that can occur while loading a persona's corpus.
#[derive(Error, Debug)]
pub enum CorpusError {
    /// No dataset exists for the persona
    #[error("Dataset not found: {0}")]
    NotFound(String),

    /// Reading the dataset failed
    #[error("Failed to read dataset {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Dataset is not valid JSON or has the wrong shape
    #[error("Invalid dataset JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Two conversations share an id
    #[error("Duplicate conversation id '{id}' in dataset '{dataset}'")]
    DuplicateConversationId { dataset: String, id: String },

    /// A conversation date is not a `YYYY-MM-DD` calendar date
    #[error("Invalid date '{date}' for conversation '{id}' in dataset '{dataset}'")]
    InvalidDate {
        dataset: String,
        id: String,
        date: String,
    },
}

/// Errors that can occur during search operations.
#[derive(Error, Debug)]
pub enum SearchError {
    /// Query rejected before matching
    #[error("Invalid search query: {0}")]
    InvalidQuery(String),
}

/// Errors raised by the search session state machine and the demo service.
#[derive(Error, Debug)]
pub enum SessionError {
    /// A persona must be selected before searching
    #[error("No persona selected")]
    NoPersonaSelected,

    /// Selecting a result requires a non-empty query
    #[error("No active search")]
    NoActiveSearch,

    /// The conversation is not among the current results
    #[error("Conversation '{0}' is not among the current results")]
    NotInResults(String),

    #[error(transparent)]
    Corpus(#[from] CorpusError),

    #[error(transparent)]
    Search(#[from] SearchError),
}

/// Convenience type alias for Results with MailingListError
pub type MailingListResult<T> = Result<T, MailingListError>;

/// Convenience type alias for Results with ConfigError
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Convenience type alias for Results with CorpusError
pub type CorpusResult<T> = Result<T, CorpusError>;

/// Convenience type alias for Results with SearchError
pub type SearchResult<T> = Result<T, SearchError>;

/// Convenience type alias for Results with SessionError
pub type SessionResult<T> = Result<T, SessionError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = MailingListError::NotConfigured;
        assert_eq!(err.to_string(), "Mailing list is not configured");

        let err = ConfigError::MissingVar("MAILCHIMP_LIST_ID".to_string());
        assert_eq!(
            err.to_string(),
            "Missing required environment variable: MAILCHIMP_LIST_ID"
        );

        let err = CorpusError::NotFound("dataset_creator.json".to_string());
        assert_eq!(err.to_string(), "Dataset not found: dataset_creator.json");

        let err = CorpusError::InvalidDate {
            dataset: "Creator".to_string(),
            id: "4".to_string(),
            date: "soon".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid date 'soon' for conversation '4' in dataset 'Creator'"
        );

        let err = SessionError::NotInResults("7".to_string());
        assert_eq!(
            err.to_string(),
            "Conversation '7' is not among the current results"
        );
    }

    #[test]
    fn test_api_error_variants() {
        let err = MailingListError::ApiError {
            status: 503,
            message: "Service Unavailable".to_string(),
        };
        assert!(err.to_string().contains("503"));
        assert!(err.to_string().contains("Service Unavailable"));
    }

    #[test]
    fn test_session_error_wraps_search_error() {
        let err: SessionError = SearchError::InvalidQuery("too long".to_string()).into();
        assert_eq!(err.to_string(), "Invalid search query: too long");
    }
}
