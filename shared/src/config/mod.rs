//! Configuration module with business-specific sub-modules
//!
//! This module organizes configuration into logical business areas:
//! - `auth` - JWT signing and session cookie configuration
//! - `broker` - Notification queue configuration
//! - `cache` - Redis connection configuration
//! - `database` - Database connection and pool configuration
//! - `environment` - Environment detection
//! - `mail` - Outgoing SMTP configuration
//! - `server` - HTTP server configuration
//! - `tokens` - One-time token lifetimes and resend cooldown

pub mod auth;
pub mod broker;
pub mod cache;
pub mod database;
pub mod environment;
pub mod mail;
pub mod server;
pub mod tokens;

use serde::{Deserialize, Serialize};

// Re-export commonly used types
pub use auth::{AuthConfig, CookieConfig, JwtConfig};
pub use broker::BrokerConfig;
pub use cache::CacheConfig;
pub use database::DatabaseConfig;
pub use environment::Environment;
pub use mail::MailConfig;
pub use server::ServerConfig;
pub use tokens::TokenLifetimeConfig;

/// Read an environment variable and parse it, falling back to `default`
/// when the variable is missing or malformed.
pub(crate) fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(default)
}

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// Server configuration
    pub server: ServerConfig,

    /// Database configuration
    pub database: DatabaseConfig,

    /// Cache configuration
    pub cache: CacheConfig,

    /// Authentication configuration
    pub auth: AuthConfig,

    /// One-time token configuration
    pub tokens: TokenLifetimeConfig,

    /// Notification broker configuration
    pub broker: BrokerConfig,

    /// Outgoing mail configuration
    #[serde(default)]
    pub mail: MailConfig,
}

impl AppConfig {
    /// Load configuration from environment
    pub fn from_env() -> Self {
        Self {
            environment: Environment::from_env(),
            server: ServerConfig::from_env(),
            database: DatabaseConfig::from_env(),
            cache: CacheConfig::from_env(),
            auth: AuthConfig::from_env(),
            tokens: TokenLifetimeConfig::from_env(),
            broker: BrokerConfig::from_env(),
            mail: MailConfig::from_env(),
        }
    }

    /// Configuration problems that must stop a production start-up
    pub fn production_issues(&self) -> Vec<String> {
        let mut issues = Vec::new();
        if !self.environment.is_production() {
            return issues;
        }
        if self.auth.jwt.is_using_default_secret() {
            issues.push("JWT_SECRET must be set in production".to_string());
        }
        if !self.auth.cookies.secure {
            issues.push("COOKIE_SECURE must be enabled in production".to_string());
        }
        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_or_falls_back_on_garbage() {
        std::env::set_var("AF_TEST_ENV_OR_GARBAGE", "not-a-number");
        assert_eq!(env_or("AF_TEST_ENV_OR_GARBAGE", 42u64), 42);
        assert_eq!(env_or("AF_TEST_ENV_OR_MISSING", 7u64), 7);
        std::env::remove_var("AF_TEST_ENV_OR_GARBAGE");
    }

    #[test]
    fn test_development_has_no_production_issues() {
        let config = AppConfig::default();
        assert!(config.production_issues().is_empty());
    }

    #[test]
    fn test_production_flags_default_secret() {
        let config = AppConfig {
            environment: Environment::Production,
            ..Default::default()
        };
        let issues = config.production_issues();
        assert_eq!(issues.len(), 2);
        assert!(issues[0].contains("JWT_SECRET"));
    }
}
