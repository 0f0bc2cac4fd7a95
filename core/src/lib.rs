//! # AuthFlow Core
//!
//! Domain layer of the AuthFlow services: user and token entities, the
//! credential workflow, one-time token storage with its resend cooldown,
//! and the traits infrastructure adapters implement.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use repositories::*;
pub use services::{
    CacheStore, CooldownPolicy, CooldownStatus, CredentialService, CredentialServiceConfig,
    NotificationPublisher, OneTimeTokenStore, PasswordHasher, RevocationList, TokenService,
    TokenServiceConfig,
};
