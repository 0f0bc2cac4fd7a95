//! Mailer error types

use af_core::domain::entities::notification::NotificationQueue;
use af_infra::InfrastructureError;

#[derive(Debug, thiserror::Error)]
pub enum MailerError {
    /// SMTP transport could not be set up or the server refused the message
    #[error("SMTP error: {0}")]
    Transport(String),

    /// Sender or recipient is not a valid mailbox
    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    /// Message could not be assembled
    #[error("Failed to build message: {0}")]
    Build(String),

    /// Queue payload is not a link message
    #[error("Malformed payload: {0}")]
    Payload(#[from] serde_json::Error),

    /// Queue access failed
    #[error(transparent)]
    Queue(#[from] InfrastructureError),

    /// A queue consumer stopped while the worker was meant to be running
    #[error("Consumer for {queue} exited: {reason}")]
    ConsumerExited {
        queue: NotificationQueue,
        reason: String,
    },

    /// A consumer task panicked or was cancelled
    #[error("Consumer task failed: {0}")]
    ConsumerPanicked(String),
}

impl MailerError {
    /// Whether retrying the same message can never succeed
    pub fn is_permanent(&self) -> bool {
        matches!(self, MailerError::Payload(_) | MailerError::InvalidAddress(_))
    }
}
