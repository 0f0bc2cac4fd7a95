//! Subjects and bodies of the link e-mails

use af_core::domain::entities::notification::{EmailLinkMessage, NotificationQueue};

/// Which e-mail a queue asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MailKind {
    Verify,
    Reset,
}

impl From<NotificationQueue> for MailKind {
    fn from(queue: NotificationQueue) -> Self {
        match queue {
            NotificationQueue::SendVerifyToken | NotificationQueue::ResendVerifyToken => {
                MailKind::Verify
            }
            NotificationQueue::SendResetPasswordToken => MailKind::Reset,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedMail {
    pub subject: String,
    pub body: String,
}

pub fn render(kind: MailKind, message: &EmailLinkMessage) -> RenderedMail {
    let email = escape(&message.email);
    let link = escape(&message.link);

    match kind {
        MailKind::Verify => RenderedMail {
            subject: "Confirm your e-mail address".to_string(),
            body: format!(
                "<p>Hello,</p>\
                 <p>Someone started registration for <b>{email}</b>. \
                 Follow the link below to confirm the address and choose your username and password.</p>\
                 <p><a href=\"{link}\">{link}</a></p>\
                 <p>If this wasn't you, ignore this message.</p>"
            ),
        },
        MailKind::Reset => RenderedMail {
            subject: "Reset your password".to_string(),
            body: format!(
                "<p>Hello,</p>\
                 <p>A password reset was requested for <b>{email}</b>. \
                 Follow the link below to set a new password.</p>\
                 <p><a href=\"{link}\">{link}</a></p>\
                 <p>If this wasn't you, ignore this message; your password stays unchanged.</p>"
            ),
        },
    }
}

fn escape(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
