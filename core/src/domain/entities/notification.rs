//! Messages handed to the mail service through the broker.

use serde::{Deserialize, Serialize};

/// Queue a notification is published on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationQueue {
    SendVerifyToken,
    ResendVerifyToken,
    SendResetPasswordToken,
}

impl NotificationQueue {
    pub const ALL: [NotificationQueue; 3] = [
        NotificationQueue::SendVerifyToken,
        NotificationQueue::ResendVerifyToken,
        NotificationQueue::SendResetPasswordToken,
    ];

    /// Wire name of the queue
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationQueue::SendVerifyToken => "send_verify_token",
            NotificationQueue::ResendVerifyToken => "resend_verify_token",
            NotificationQueue::SendResetPasswordToken => "send_reset_password_token",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|q| q.as_str() == name)
    }
}

impl std::fmt::Display for NotificationQueue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payload of every notification: who gets the mail and which link it carries
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailLinkMessage {
    pub email: String,
    pub link: String,
}

impl EmailLinkMessage {
    pub fn new(email: impl Into<String>, link: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            link: link.into(),
        }
    }
}
