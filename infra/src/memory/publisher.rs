//! Publisher that keeps messages in memory instead of sending them

use async_trait::async_trait;
use std::sync::Mutex;

use af_core::domain::entities::notification::{EmailLinkMessage, NotificationQueue};
use af_core::errors::DomainError;
use af_core::services::notification::NotificationPublisher;
use af_shared::utils::email::mask_email;

#[derive(Default)]
pub struct InMemoryPublisher {
    messages: Mutex<Vec<(NotificationQueue, EmailLinkMessage)>>,
}

impl InMemoryPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything published so far, oldest first
    pub fn messages(&self) -> Vec<(NotificationQueue, EmailLinkMessage)> {
        self.messages
            .lock()
            .map(|messages| messages.clone())
            .unwrap_or_default()
    }

    /// The most recent message sent to `email`
    pub fn last_for(&self, email: &str) -> Option<(NotificationQueue, EmailLinkMessage)> {
        self.messages()
            .into_iter()
            .rev()
            .find(|(_, message)| message.email == email)
    }
}

#[async_trait]
impl NotificationPublisher for InMemoryPublisher {
    async fn publish(
        &self,
        queue: NotificationQueue,
        message: &EmailLinkMessage,
    ) -> Result<(), DomainError> {
        tracing::debug!(queue = %queue, email = %mask_email(&message.email), "Message kept in memory");
        self.messages
            .lock()
            .map_err(|_| DomainError::broker("in-memory publisher lock poisoned"))?
            .push((queue, message.clone()));
        Ok(())
    }
}
