//! Credential workflow module
//!
//! This module ties together the user repository, the one-time token store,
//! the resend cooldown, the JWT service and the notification publisher:
//! - e-mail pre-registration and verification
//! - login with access and refresh tokens
//! - password change, forgot and reset
//! - logout through refresh token revocation, and access token refresh

mod config;
mod service;

#[cfg(test)]
mod tests;

pub use config::CredentialServiceConfig;
pub use service::CredentialService;
