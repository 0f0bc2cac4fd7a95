//! Domain-specific error types for the credential workflow and token handling

use thiserror::Error;

/// Outcomes of the credential workflow that the caller must be told about
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Email already confirmed")]
    EmailAlreadyVerified,

    #[error("Please wait {seconds} seconds before requesting another email")]
    ResendCooldown { seconds: u64 },

    #[error("A link has already been sent to this email")]
    TokenAlreadySent,

    #[error("Token expired or was never requested")]
    TokenExpiredOrNotRequested,

    #[error("Token not found or expired. Please register again")]
    RegistrationRestartRequired,

    #[error("User not found")]
    UserNotFound,

    #[error("Username already taken")]
    UsernameTaken,

    #[error("Email not verified")]
    EmailNotVerified,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Account blocked")]
    AccountBlocked,

    #[error("Old password is incorrect")]
    IncorrectPassword,
}

/// JWT-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Token missing")]
    TokenMissing,

    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token format")]
    InvalidTokenFormat,

    #[error("Token signature verification failed")]
    InvalidSignature,

    #[error("Token not yet valid")]
    TokenNotYetValid,

    #[error("Invalid token claims")]
    InvalidClaims,

    #[error("Token not valid")]
    TokenRevoked,

    #[error("Wrong token type: expected {expected}")]
    WrongTokenType { expected: String },

    #[error("Token generation failed")]
    TokenGenerationFailed,
}

/// Input validation errors detected below the HTTP boundary
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid email format")]
    InvalidEmail,

    #[error("Invalid length for field: {field} (min: {min}, max: {max})")]
    InvalidLength { field: String, min: u64, max: u64 },

    #[error("Field required: {field}")]
    RequiredField { field: String },
}
