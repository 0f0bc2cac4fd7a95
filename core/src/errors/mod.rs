//! Domain-specific error types and error handling.

mod types;

pub use types::{AuthError, TokenError, ValidationError};

use thiserror::Error;

/// Error taxonomy every failure of the workflow falls into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    NotFoundOrExpired,
    Conflict,
    Unauthorized,
    UpstreamFailure,
}

/// Core domain errors
#[derive(Error, Debug)]
pub enum DomainError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Token(#[from] TokenError),

    /// A uniqueness constraint of the user store was hit
    #[error("Duplicate value for field: {field}")]
    UniqueViolation { field: String },

    /// Cache, database or broker failure
    #[error("{service} unavailable: {message}")]
    Upstream { service: &'static str, message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl DomainError {
    pub fn cache(message: impl Into<String>) -> Self {
        Self::Upstream {
            service: "cache",
            message: message.into(),
        }
    }

    pub fn database(message: impl Into<String>) -> Self {
        Self::Upstream {
            service: "database",
            message: message.into(),
        }
    }

    pub fn broker(message: impl Into<String>) -> Self {
        Self::Upstream {
            service: "broker",
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Classify the error into the workflow taxonomy
    pub fn kind(&self) -> ErrorKind {
        match self {
            DomainError::Validation(_) => ErrorKind::Validation,
            DomainError::Auth(err) => match err {
                AuthError::TokenExpiredOrNotRequested
                | AuthError::RegistrationRestartRequired
                | AuthError::UserNotFound => ErrorKind::NotFoundOrExpired,
                AuthError::EmailAlreadyVerified
                | AuthError::ResendCooldown { .. }
                | AuthError::TokenAlreadySent
                | AuthError::UsernameTaken
                | AuthError::EmailNotVerified => ErrorKind::Conflict,
                AuthError::InvalidCredentials
                | AuthError::AccountBlocked
                | AuthError::IncorrectPassword => ErrorKind::Unauthorized,
            },
            DomainError::Token(TokenError::TokenGenerationFailed) => ErrorKind::UpstreamFailure,
            DomainError::Token(_) => ErrorKind::Unauthorized,
            DomainError::UniqueViolation { .. } => ErrorKind::Conflict,
            DomainError::Upstream { .. } | DomainError::Internal { .. } => {
                ErrorKind::UpstreamFailure
            }
        }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_classification() {
        assert_eq!(
            DomainError::from(AuthError::TokenExpiredOrNotRequested).kind(),
            ErrorKind::NotFoundOrExpired
        );
        assert_eq!(
            DomainError::from(AuthError::ResendCooldown { seconds: 5 }).kind(),
            ErrorKind::Conflict
        );
        assert_eq!(
            DomainError::from(AuthError::AccountBlocked).kind(),
            ErrorKind::Unauthorized
        );
        assert_eq!(
            DomainError::from(TokenError::TokenRevoked).kind(),
            ErrorKind::Unauthorized
        );
        assert_eq!(DomainError::cache("timeout").kind(), ErrorKind::UpstreamFailure);
        assert_eq!(
            DomainError::from(ValidationError::InvalidEmail).kind(),
            ErrorKind::Validation
        );
    }

    #[test]
    fn test_messages_do_not_leak_upstream_detail_through_auth() {
        let err = DomainError::from(AuthError::InvalidCredentials);
        assert_eq!(err.to_string(), "Invalid credentials");

        let err = DomainError::database("connection refused");
        assert_eq!(err.to_string(), "database unavailable: connection refused");
    }

    #[test]
    fn test_cooldown_message_carries_seconds() {
        let err = AuthError::ResendCooldown { seconds: 42 };
        assert!(err.to_string().contains("42 seconds"));
    }
}
