//! Async wrapper around the synchronous MailingListClient.
//!
//! This module provides an async interface to the synchronous MailingListClient by using
//! `tokio::task::spawn_blocking` to run HTTP operations on a dedicated thread pool,
//! preventing blocking of the async runtime.

use crate::client::{MailingListClient, SubscriptionStatus};
use crate::domain::EmailAddress;
use crate::error::{MailingListError, MailingListResult};
use async_trait::async_trait;
use std::sync::Arc;

/// Async wrapper trait for mailing-list operations.
#[async_trait]
pub trait AsyncMailingListClient: Send + Sync {
    async fn subscribe(
        &self,
        email: &EmailAddress,
        source: &str,
    ) -> MailingListResult<SubscriptionStatus>;
}

/// Async wrapper around the synchronous MailingListClient.
///
/// Uses `tokio::task::spawn_blocking` to run the HTTP call on a dedicated
/// thread pool.
#[derive(Clone)]
pub struct AsyncMailingListClientImpl {
    client: Arc<MailingListClient>,
}

impl AsyncMailingListClientImpl {
    pub fn new(client: MailingListClient) -> Self {
        Self {
            client: Arc::new(client),
        }
    }
}

#[async_trait]
impl AsyncMailingListClient for AsyncMailingListClientImpl {
    async fn subscribe(
        &self,
        email: &EmailAddress,
        source: &str,
    ) -> MailingListResult<SubscriptionStatus> {
        let client = self.client.clone();
        let email = email.clone();
        let source = source.to_string();

        tokio::task::spawn_blocking(move || client.subscribe(&email, &source))
            .await
            .map_err(|e| MailingListError::HttpError(format!("Task join error: {}", e)))?
    }
}
