//! Publisher side of the notification queues

use async_trait::async_trait;

use af_core::domain::entities::notification::{EmailLinkMessage, NotificationQueue};
use af_core::errors::DomainError;
use af_core::services::notification::NotificationPublisher;
use af_shared::config::broker::BrokerConfig;
use af_shared::utils::email::mask_email;

use crate::cache::RedisClient;
use crate::InfrastructureError;

/// Pushes JSON-encoded messages onto per-queue Redis lists
#[derive(Clone)]
pub struct RedisQueuePublisher {
    client: RedisClient,
    config: BrokerConfig,
}

impl RedisQueuePublisher {
    pub fn new(client: RedisClient, config: BrokerConfig) -> Self {
        Self { client, config }
    }

    async fn push(
        &self,
        queue: NotificationQueue,
        message: &EmailLinkMessage,
    ) -> Result<(), InfrastructureError> {
        let payload = serde_json::to_string(message)?;
        let key = self.config.queue_key(queue.as_str());

        let depth = self
            .client
            .lpush(&key, &payload)
            .await
            .map_err(|e| InfrastructureError::Broker(e.to_string()))?;

        tracing::debug!(
            queue = %queue,
            email = %mask_email(&message.email),
            depth = depth,
            "Message pushed"
        );
        Ok(())
    }
}

#[async_trait]
impl NotificationPublisher for RedisQueuePublisher {
    async fn publish(
        &self,
        queue: NotificationQueue,
        message: &EmailLinkMessage,
    ) -> Result<(), DomainError> {
        Ok(self.push(queue, message).await?)
    }
}
