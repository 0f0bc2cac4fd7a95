//! # AuthFlow Mailer
//!
//! Consumes the notification queues filled by the auth service and sends the
//! verification and password-reset link e-mails over SMTP.

pub mod error;
pub mod mailer;
pub mod templates;
pub mod worker;

pub use error::MailerError;
pub use mailer::{Mailer, SmtpMailer};
pub use templates::{render, MailKind, RenderedMail};
pub use worker::{handle_delivery, run_queue, supervise};
