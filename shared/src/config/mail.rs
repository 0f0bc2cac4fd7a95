//! Outgoing SMTP configuration

use serde::{Deserialize, Serialize};

use super::env_or;

/// SMTP relay configuration for the mail worker
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MailConfig {
    /// SMTP host
    pub host: String,

    /// SMTP port
    pub port: u16,

    /// SMTP user name
    pub username: String,

    /// SMTP password
    #[serde(skip_serializing, default)]
    pub password: String,

    /// Sender mailbox; the user name is used when empty
    pub from: String,

    /// Implicit TLS (`true`) or STARTTLS (`false`)
    pub use_ssl: bool,
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            host: String::from("localhost"),
            port: 465,
            username: String::new(),
            password: String::new(),
            from: String::new(),
            use_ssl: true,
        }
    }
}

impl MailConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            host: std::env::var("EMAIL_HOST").unwrap_or(defaults.host),
            port: env_or("EMAIL_PORT", defaults.port),
            username: std::env::var("EMAIL_HOST_USER").unwrap_or_default(),
            password: std::env::var("EMAIL_HOST_PASSWORD").unwrap_or_default(),
            from: std::env::var("EMAIL_FROM").unwrap_or_default(),
            use_ssl: env_or("EMAIL_USE_SSL", defaults.use_ssl),
        }
    }

    /// Mailbox the messages are sent from
    pub fn sender(&self) -> &str {
        if self.from.is_empty() {
            &self.username
        } else {
            &self.from
        }
    }
}
