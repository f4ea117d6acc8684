//! HTTP client for the third-party mailing-list API.
//!
//! This module provides a synchronous HTTP client that can be used from async contexts
//! via `tokio::task::spawn_blocking`. It sends a single POST per signup with basic-auth
//! credentials. HTTP 200 means subscribed and HTTP 400 means the address is already on
//! the list; every other status or transport error is a failure.

mod async_wrapper;
pub use async_wrapper::{AsyncMailingListClient, AsyncMailingListClientImpl};

use crate::config::{MailingListConfig, DEFAULT_USER_AGENT};
use crate::domain::EmailAddress;
use crate::error::{MailingListError, MailingListResult};
use crate::metrics::{HttpTimer, Metrics};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;

/// Request body for adding a list member.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct MemberRequest {
    pub email_address: String,
    pub status: String,
    pub tags: Vec<String>,
    pub merge_fields: MergeFields,
}

/// Merge fields stored with the member.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct MergeFields {
    #[serde(rename = "SOURCE")]
    pub source: String,
}

impl MemberRequest {
    /// A "subscribed" member tagged with the signup source.
    pub fn subscribe(email: &EmailAddress, source: &str) -> Self {
        Self {
            email_address: email.as_str().to_string(),
            status: "subscribed".to_string(),
            tags: vec![source.to_string()],
            merge_fields: MergeFields {
                source: source.to_string(),
            },
        }
    }
}

/// Successful signup outcomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubscriptionStatus {
    /// HTTP 200
    Subscribed,
    /// HTTP 400, treated as success
    AlreadySubscribed,
}

/// HTTP client for the mailing-list API.
///
/// This client uses `ureq` for synchronous HTTP requests and can be called
/// from async contexts using `tokio::task::spawn_blocking`.
#[derive(Clone)]
pub struct MailingListClient {
    /// Base URL for the API
    base_url: String,

    /// Audience (list) id
    list_id: String,

    /// Precomputed `Basic ...` header value
    authorization: String,

    user_agent: String,

    /// HTTP client agent
    agent: Arc<ureq::Agent>,

    /// Metrics collector
    metrics: Metrics,
}

impl MailingListClient {
    /// Create a new client from configuration.
    pub fn new(config: &MailingListConfig, request_timeout_secs: u64) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(request_timeout_secs))
            .build();

        Self {
            base_url: config.api_base_url.clone(),
            list_id: config.list_id.clone(),
            authorization: basic_auth(&config.api_key),
            user_agent: config.user_agent.clone(),
            agent: Arc::new(agent),
            metrics: Metrics::new(),
        }
    }

    /// Create a client with a custom base URL (useful for testing).
    #[doc(hidden)]
    pub fn with_base_url(base_url: String, list_id: String, api_key: String) -> Self {
        let config = MailingListConfig {
            api_base_url: base_url,
            api_key,
            list_id,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        };
        Self::new(&config, 10)
    }

    /// Record into a shared metrics collector.
    pub fn with_metrics(mut self, metrics: Metrics) -> Self {
        self.metrics = metrics;
        self
    }

    /// Get a reference to the metrics collector.
    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// Build a full URL from a path.
    fn build_url(&self, path: &str) -> String {
        let base = self.base_url.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{}/{}", base, path)
    }

    fn members_path(&self) -> String {
        format!("/3.0/lists/{}/members", urlencoding::encode(&self.list_id))
    }

    /// Add `email` to the list, tagged with `source`.
    pub fn subscribe(
        &self,
        email: &EmailAddress,
        source: &str,
    ) -> MailingListResult<SubscriptionStatus> {
        let body = serde_json::to_value(MemberRequest::subscribe(email, source))?;
        let url = self.build_url(&self.members_path());
        let timer = HttpTimer::new(self.metrics.clone());

        tracing::debug!("POST {}", url);

        let result = self
            .agent
            .post(&url)
            .set("Authorization", &self.authorization)
            .set("Content-Type", "application/json")
            .set("User-Agent", &self.user_agent)
            .send_json(&body);

        match result {
            Ok(response) if response.status() == 200 => {
                timer.complete();
                tracing::debug!("POST {} - Subscribed", url);
                Ok(SubscriptionStatus::Subscribed)
            }
            Ok(response) => {
                timer.complete_with_error();
                let status = response.status();
                let message = response
                    .into_string()
                    .unwrap_or_else(|_| "Unknown error".to_string());
                tracing::error!("POST {} - Unexpected status {}", url, status);
                Err(MailingListError::ApiError { status, message })
            }
            Err(ureq::Error::Status(400, response)) => {
                timer.complete();
                tracing::debug!(
                    "POST {} - Rejected with 400, treating as already subscribed: {}",
                    url,
                    response.into_string().unwrap_or_default()
                );
                Ok(SubscriptionStatus::AlreadySubscribed)
            }
            Err(e) => {
                timer.complete_with_error();
                let error = self.map_error(e);
                tracing::error!("POST {} - Error: {:?}", url, error);
                Err(error)
            }
        }
    }

    /// Map a ureq error to a MailingListError.
    fn map_error(&self, error: ureq::Error) -> MailingListError {
        match error {
            ureq::Error::Status(code, response) => {
                let message = response
                    .into_string()
                    .unwrap_or_else(|_| "Unknown error".to_string());

                match code {
                    401 | 403 => MailingListError::Unauthorized,
                    _ => MailingListError::ApiError {
                        status: code,
                        message,
                    },
                }
            }
            ureq::Error::Transport(transport) => {
                if transport.kind() == ureq::ErrorKind::ConnectionFailed {
                    MailingListError::HttpError("Connection failed".to_string())
                } else if transport.kind() == ureq::ErrorKind::Io {
                    MailingListError::Timeout
                } else {
                    MailingListError::HttpError(transport.to_string())
                }
            }
        }
    }
}

/// `Authorization` value for the API key; the user name is ignored by the API.
fn basic_auth(api_key: &str) -> String {
    format!("Basic {}", STANDARD.encode(format!("anystring:{}", api_key)))
}
