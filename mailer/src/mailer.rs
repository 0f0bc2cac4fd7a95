//! SMTP delivery

use async_trait::async_trait;
use lettre::{
    message::{header::ContentType, Mailbox},
    transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};

use af_shared::config::mail::MailConfig;
use af_shared::utils::email::mask_email;

use crate::error::MailerError;

/// Sends a single HTML e-mail
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, to: &str, subject: &str, html_body: &str) -> Result<(), MailerError>;
}

/// Mailer over an authenticated SMTP relay
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpMailer {
    /// Build the transport; implicit TLS when `use_ssl`, STARTTLS otherwise
    pub fn new(config: &MailConfig) -> Result<Self, MailerError> {
        let builder = if config.use_ssl {
            AsyncSmtpTransport::<Tokio1Executor>::relay(&config.host)
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)
        }
        .map_err(|e| MailerError::Transport(format!("Failed to create SMTP relay: {}", e)))?;

        let mut builder = builder.port(config.port);
        if !config.username.is_empty() {
            builder = builder.credentials(Credentials::new(
                config.username.clone(),
                config.password.clone(),
            ));
        }

        let from: Mailbox = config
            .sender()
            .parse()
            .map_err(|e| MailerError::InvalidAddress(format!("sender: {}", e)))?;

        Ok(Self {
            transport: builder.build(),
            from,
        })
    }

    /// Open and close a connection to the relay
    pub async fn test_connection(&self) -> Result<bool, MailerError> {
        self.transport
            .test_connection()
            .await
            .map_err(|e| MailerError::Transport(e.to_string()))
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, to: &str, subject: &str, html_body: &str) -> Result<(), MailerError> {
        let to_mailbox: Mailbox = to
            .parse()
            .map_err(|e| MailerError::InvalidAddress(format!("recipient: {}", e)))?;

        let message = Message::builder()
            .from(self.from.clone())
            .to(to_mailbox)
            .subject(subject)
            .header(ContentType::TEXT_HTML)
            .body(html_body.to_string())
            .map_err(|e| MailerError::Build(e.to_string()))?;

        self.transport
            .send(message)
            .await
            .map_err(|e| MailerError::Transport(e.to_string()))?;

        tracing::info!(to = %mask_email(to), subject = %subject, "Email sent");
        Ok(())
    }
}
