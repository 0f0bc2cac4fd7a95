//! Shared utilities and common types for AuthFlow services
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types
//! - Error response structures
//! - Utility functions (e-mail masking, validation helpers)
//! - Health check response types

pub mod config;
pub mod errors;
pub mod types;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, AuthConfig, BrokerConfig, CacheConfig, CookieConfig, DatabaseConfig, Environment,
    JwtConfig, MailConfig, ServerConfig, TokenLifetimeConfig,
};
pub use errors::{error_codes, ErrorResponse};
pub use types::{HealthResponse, HealthStatus, ServiceHealth, StatusResponse};
pub use utils::{email, validation};
