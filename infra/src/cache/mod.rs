//! Cache module for Redis-based caching
//!
//! Provides the Redis client with retry logic and the `CacheStore` adapter
//! used for one-time tokens and the refresh token revocation list.

pub mod redis_cache;
pub mod redis_client;

#[cfg(test)]
mod tests;

pub use redis_cache::RedisCache;
pub use redis_client::RedisClient;

// Re-export commonly used types
pub use af_shared::config::cache::CacheConfig;
