//! Signup service layer.
//!
//! Validates a mailing-list signup and hands it to the mailing-list client.

use crate::client::{AsyncMailingListClient, SubscriptionStatus};
use crate::domain::{EmailAddress, ValidationError};
use crate::error::{MailingListError, MailingListResult};
use crate::metrics::Metrics;
use async_trait::async_trait;
use std::sync::Arc;

/// Signup service trait.
#[async_trait]
pub trait SignupService: Send + Sync {
    /// Subscribe `email` to the mailing list, tagged with `source`.
    ///
    /// Invalid input is reported as `MailingListError::InvalidRequest`
    /// before any network call is made.
    async fn subscribe(&self, email: &str, source: &str) -> MailingListResult<SubscriptionStatus>;
}

/// Default implementation of SignupService.
pub struct SignupServiceImpl {
    client: Arc<dyn AsyncMailingListClient>,
    metrics: Metrics,
}

impl SignupServiceImpl {
    /// Create a new signup service.
    pub fn new(client: Arc<dyn AsyncMailingListClient>) -> Self {
        Self {
            client,
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

    /// Validate the signup source.
    fn validate_source(source: &str) -> Result<&str, ValidationError> {
        let source = source.trim();
        if source.is_empty() {
            return Err(ValidationError::EmptySource);
        }
        Ok(source)
    }
}

#[async_trait]
impl SignupService for SignupServiceImpl {
    async fn subscribe(&self, email: &str, source: &str) -> MailingListResult<SubscriptionStatus> {
        let email = EmailAddress::new(email)
            .map_err(|e| MailingListError::InvalidRequest(e.to_string()))?;
        let source = Self::validate_source(source)
            .map_err(|e| MailingListError::InvalidRequest(e.to_string()))?;

        match self.client.subscribe(&email, source).await {
            Ok(status) => {
                self.metrics.record_signup(true);
                tracing::info!(
                    domain = %email.domain(),
                    source = %source,
                    status = ?status,
                    "Mailing list signup"
                );
                Ok(status)
            }
            Err(e) => {
                self.metrics.record_signup(false);
                tracing::warn!(domain = %email.domain(), source = %source, "Signup failed: {}", e);
                Err(e)
            }
        }
    }
}
