//! # Infrastructure Layer
//!
//! Concrete adapters behind the traits defined in `af_core`:
//! - **Database**: MySQL user store using SQLx
//! - **Cache**: Redis client backing one-time tokens and the revocation list
//! - **Broker**: notification queues on Redis lists
//! - **Memory**: in-process adapters for development and tests
//!
//! ## Features
//!
//! - `mysql`: Enable MySQL database support (default)
//! - `redis-cache`: Enable Redis caching support (default)

use af_core::errors::DomainError;
use af_shared::AppConfig;

// Re-export core types for convenience
pub use af_core::errors::*;

/// Database module - MySQL implementations using SQLx
#[cfg(feature = "mysql")]
pub mod database;

/// Cache module - Redis client and cache adapter
pub mod cache;

/// Broker module - notification queues
pub mod broker;

/// In-memory adapters
pub mod memory;

/// Load the application configuration from the environment
///
/// A `.env` file in the working directory is read first when present.
pub fn load_config() -> Result<AppConfig, InfrastructureError> {
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env();
    let issues = config.production_issues();
    if !issues.is_empty() {
        return Err(InfrastructureError::Config(issues.join("; ")));
    }

    tracing::debug!(environment = %config.environment, "Configuration loaded");
    Ok(config)
}

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Redis cache error
    #[error("Cache error: {0}")]
    Cache(#[from] redis::RedisError),

    /// Message broker error
    #[error("Broker error: {0}")]
    Broker(String),

    /// Message payload could not be encoded or decoded
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// General infrastructure error
    #[error("Infrastructure error: {0}")]
    General(String),
}

impl From<InfrastructureError> for DomainError {
    fn from(err: InfrastructureError) -> Self {
        match err {
            InfrastructureError::Database(e) => DomainError::database(e.to_string()),
            InfrastructureError::Cache(e) => DomainError::cache(e.to_string()),
            InfrastructureError::Broker(message) => DomainError::broker(message),
            InfrastructureError::Serialization(e) => DomainError::internal(e.to_string()),
            InfrastructureError::Config(message) | InfrastructureError::General(message) => {
                DomainError::internal(message)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_infrastructure_errors_map_to_upstream() {
        let cache: DomainError =
            InfrastructureError::Cache(redis::RedisError::from((redis::ErrorKind::IoError, "down")))
                .into();
        assert_eq!(cache.kind(), ErrorKind::UpstreamFailure);

        let broker: DomainError = InfrastructureError::Broker("queue full".into()).into();
        assert_eq!(broker.kind(), ErrorKind::UpstreamFailure);

        let config: DomainError = InfrastructureError::Config("bad".into()).into();
        assert!(matches!(config, DomainError::Internal { .. }));
    }
}
