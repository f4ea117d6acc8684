use async_trait::async_trait;
use chatsherlock_demo::client::{AsyncMailingListClient, SubscriptionStatus};
use chatsherlock_demo::domain::EmailAddress;
use chatsherlock_demo::error::{MailingListError, MailingListResult};
use std::sync::{Arc, Mutex};

/// Mock mailing-list client that records every signup it receives.
#[allow(dead_code)]
#[derive(Clone)]
pub struct MockMailingListClient {
    calls: Arc<Mutex<Vec<(String, String)>>>,
    // HTTP status the fake API answers with
    status: u16,
}

#[allow(dead_code)]
impl MockMailingListClient {
    pub fn with_status(status: u16) -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
            status,
        }
    }

    pub fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl AsyncMailingListClient for MockMailingListClient {
    async fn subscribe(
        &self,
        email: &EmailAddress,
        source: &str,
    ) -> MailingListResult<SubscriptionStatus> {
        self.calls
            .lock()
            .unwrap()
            .push((email.as_str().to_string(), source.to_string()));

        match self.status {
            200 => Ok(SubscriptionStatus::Subscribed),
            400 => Ok(SubscriptionStatus::AlreadySubscribed),
            status => Err(MailingListError::ApiError {
                status,
                message: "mock failure".to_string(),
            }),
        }
    }
}
