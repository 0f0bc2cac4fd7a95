//! Trait for message broker integration

use async_trait::async_trait;

use crate::domain::entities::notification::{EmailLinkMessage, NotificationQueue};
use crate::errors::DomainError;

/// Publishes notifications for asynchronous delivery
///
/// Delivery is at-least-once; consumers must tolerate duplicates.
#[async_trait]
pub trait NotificationPublisher: Send + Sync {
    async fn publish(
        &self,
        queue: NotificationQueue,
        message: &EmailLinkMessage,
    ) -> Result<(), DomainError>;
}
