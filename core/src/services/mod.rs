//! Business services containing the credential workflow and its building blocks.

pub mod cache;
pub mod credential;
pub mod notification;
pub mod password;
pub mod token;
pub mod token_store;

// Re-export commonly used types
pub use cache::CacheStore;
pub use credential::{CredentialService, CredentialServiceConfig};
pub use notification::NotificationPublisher;
pub use password::PasswordHasher;
pub use token::{generate_token, RevocationList, TokenService, TokenServiceConfig};
pub use token_store::{CooldownPolicy, CooldownStatus, OneTimeTokenStore};
