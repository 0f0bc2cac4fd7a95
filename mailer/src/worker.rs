//! Queue consumption loop

use std::future::Future;
use std::time::Duration;

use tokio::task::JoinSet;

use af_core::domain::entities::notification::{EmailLinkMessage, NotificationQueue};
use af_infra::broker::{Delivery, QueueConsumer};
use af_infra::InfrastructureError;
use af_shared::utils::email::mask_email;

use crate::error::MailerError;
use crate::mailer::Mailer;
use crate::templates::{render, MailKind};

/// Pause before retrying after a transient failure
const RETRY_DELAY: Duration = Duration::from_secs(5);

/// Decode one delivery and send the e-mail it asks for
pub async fn handle_delivery<M: Mailer + ?Sized>(
    mailer: &M,
    delivery: &Delivery,
) -> Result<(), MailerError> {
    let message: EmailLinkMessage = serde_json::from_str(&delivery.payload)?;
    let mail = render(MailKind::from(delivery.queue), &message);

    tracing::info!(
        queue = %delivery.queue,
        email = %mask_email(&message.email),
        "Sending link e-mail"
    );
    mailer.send(&message.email, &mail.subject, &mail.body).await
}

/// Consume one queue until the task is cancelled
///
/// Messages left in the processing list by an earlier run are re-queued
/// first. Permanent failures are logged and dropped; transient ones put the
/// message back on the queue after a pause.
pub async fn run_queue<M: Mailer + ?Sized>(
    mailer: &M,
    mut consumer: QueueConsumer,
) -> Result<(), MailerError> {
    let queue = consumer.queue();
    consumer.requeue_unacked().await?;
    tracing::info!(queue = %queue, "Consumer started");

    loop {
        let delivery = match consumer.next().await {
            Ok(Some(delivery)) => delivery,
            Ok(None) => continue,
            Err(e) => {
                tracing::error!(queue = %queue, error = %e, "Failed to read from queue");
                tokio::time::sleep(RETRY_DELAY).await;
                continue;
            }
        };

        match handle_delivery(mailer, &delivery).await {
            Ok(()) => settle(queue, "ack", RETRY_DELAY, || consumer.ack(&delivery)).await,
            Err(e) if e.is_permanent() => {
                tracing::error!(queue = %queue, error = %e, "Dropping undeliverable message");
                settle(queue, "ack", RETRY_DELAY, || consumer.ack(&delivery)).await;
            }
            Err(e) => {
                tracing::warn!(queue = %queue, error = %e, "Delivery failed, re-queueing");
                tokio::time::sleep(RETRY_DELAY).await;
                settle(queue, "nack", RETRY_DELAY, || consumer.nack(&delivery)).await;
            }
        }
    }
}

/// Repeat an ack or nack until the broker accepts it
async fn settle<F, Fut>(queue: NotificationQueue, action: &str, delay: Duration, mut op: F)
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<(), InfrastructureError>>,
{
    while let Err(e) = op().await {
        tracing::error!(queue = %queue, action, error = %e, "Failed to settle message, retrying");
        tokio::time::sleep(delay).await;
    }
}

/// Wait until shutdown is requested or a consumer stops
///
/// Consumers only return on failure, so any of them finishing is an error.
pub async fn supervise<S>(
    workers: &mut JoinSet<(NotificationQueue, Result<(), MailerError>)>,
    shutdown: S,
) -> Result<(), MailerError>
where
    S: Future<Output = ()>,
{
    tokio::select! {
        _ = shutdown => {
            tracing::info!("Shutdown requested");
            Ok(())
        }
        Some(joined) = workers.join_next() => {
            let err = match joined {
                Ok((queue, Err(e))) => MailerError::ConsumerExited { queue, reason: e.to_string() },
                Ok((queue, Ok(()))) => MailerError::ConsumerExited { queue, reason: "returned".to_string() },
                Err(e) => MailerError::ConsumerPanicked(e.to_string()),
            };
            tracing::error!(error = %err, "Consumer stopped");
            Err(err)
        }
    }
}
