//! Trait for cache integration

use async_trait::async_trait;

use crate::errors::DomainError;

/// Key-value cache with per-key expiry
///
/// Failures are reported as `DomainError::Upstream` so the workflow can
/// surface them without knowing the backing store.
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Store a value that expires after `ttl_seconds`
    async fn set_ex(&self, key: &str, value: &str, ttl_seconds: u64) -> Result<(), DomainError>;

    /// Store a value that expires at the absolute unix timestamp `expire_at`
    async fn set_ex_at(&self, key: &str, value: &str, expire_at: i64) -> Result<(), DomainError>;

    /// Get a value, `None` when missing or expired
    async fn get(&self, key: &str) -> Result<Option<String>, DomainError>;

    /// Remaining time-to-live in seconds, `None` when the key is missing
    async fn ttl(&self, key: &str) -> Result<Option<i64>, DomainError>;

    /// Delete keys, returning how many existed
    async fn delete(&self, keys: &[String]) -> Result<u64, DomainError>;

    /// Check if a key exists
    async fn exists(&self, key: &str) -> Result<bool, DomainError>;
}
