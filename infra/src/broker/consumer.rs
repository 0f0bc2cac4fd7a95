//! Consumer side of the notification queues

use redis::aio::MultiplexedConnection;

use af_core::domain::entities::notification::NotificationQueue;
use af_shared::config::broker::BrokerConfig;

use crate::cache::RedisClient;
use crate::InfrastructureError;

/// A message taken off a queue and awaiting acknowledgement
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delivery {
    pub queue: NotificationQueue,
    pub payload: String,
}

/// Reads one queue over a dedicated connection
///
/// `BLMOVE` blocks the connection it runs on, so each consumer owns its own
/// instead of sharing the client's multiplexed connection.
pub struct QueueConsumer {
    client: RedisClient,
    blocking: MultiplexedConnection,
    config: BrokerConfig,
    queue: NotificationQueue,
}

impl QueueConsumer {
    pub async fn new(
        client: RedisClient,
        config: BrokerConfig,
        queue: NotificationQueue,
    ) -> Result<Self, InfrastructureError> {
        let blocking = client.dedicated_connection().await?;
        Ok(Self {
            client,
            blocking,
            config,
            queue,
        })
    }

    pub fn queue(&self) -> NotificationQueue {
        self.queue
    }

    fn queue_key(&self) -> String {
        self.config.queue_key(self.queue.as_str())
    }

    fn processing_key(&self) -> String {
        self.config.processing_key(self.queue.as_str())
    }

    /// Move messages left unacknowledged by an earlier run back onto the
    /// queue, returning how many were moved
    pub async fn requeue_unacked(&self) -> Result<u64, InfrastructureError> {
        let processing = self.processing_key();
        let queue = self.queue_key();
        let mut moved = 0;

        while self
            .client
            .lmove_head_to_tail(&processing, &queue)
            .await?
            .is_some()
        {
            moved += 1;
        }

        if moved > 0 {
            tracing::warn!(queue = %self.queue, count = moved, "Re-queued unacknowledged messages");
        }
        Ok(moved)
    }

    /// Wait up to the poll timeout for the next message
    pub async fn next(&mut self) -> Result<Option<Delivery>, InfrastructureError> {
        let payload: Option<String> = redis::cmd("BLMOVE")
            .arg(self.queue_key())
            .arg(self.processing_key())
            .arg("RIGHT")
            .arg("LEFT")
            .arg(self.config.poll_timeout)
            .query_async(&mut self.blocking)
            .await?;

        Ok(payload.map(|payload| Delivery {
            queue: self.queue,
            payload,
        }))
    }

    /// Remove a handled message from the processing list
    pub async fn ack(&self, delivery: &Delivery) -> Result<(), InfrastructureError> {
        self.client
            .lrem(&self.processing_key(), &delivery.payload)
            .await?;
        Ok(())
    }

    /// Put a message that could not be handled back on the queue, behind
    /// everything already waiting
    pub async fn nack(&self, delivery: &Delivery) -> Result<(), InfrastructureError> {
        self.client.lpush(&self.queue_key(), &delivery.payload).await?;
        self.ack(delivery).await
    }
}
