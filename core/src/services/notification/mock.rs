//! Recording publisher for testing

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::domain::entities::notification::{EmailLinkMessage, NotificationQueue};
use crate::errors::DomainError;

use super::traits::NotificationPublisher;

#[derive(Default)]
pub struct RecordingPublisher {
    published: Arc<Mutex<Vec<(NotificationQueue, EmailLinkMessage)>>>,
    unavailable: AtomicBool,
}

impl RecordingPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    pub async fn published(&self) -> Vec<(NotificationQueue, EmailLinkMessage)> {
        self.published.lock().await.clone()
    }

    pub async fn last(&self) -> Option<(NotificationQueue, EmailLinkMessage)> {
        self.published.lock().await.last().cloned()
    }
}

#[async_trait]
impl NotificationPublisher for RecordingPublisher {
    async fn publish(
        &self,
        queue: NotificationQueue,
        message: &EmailLinkMessage,
    ) -> Result<(), DomainError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(DomainError::broker("mock broker unavailable"));
        }
        self.published.lock().await.push((queue, message.clone()));
        Ok(())
    }
}
