//! Redis-backed implementation of the core cache trait

use async_trait::async_trait;

use af_core::errors::DomainError;
use af_core::services::cache::CacheStore;

use super::redis_client::RedisClient;

/// `CacheStore` over a shared [`RedisClient`]
#[derive(Clone)]
pub struct RedisCache {
    client: RedisClient,
}

impl RedisCache {
    pub fn new(client: RedisClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &RedisClient {
        &self.client
    }
}

#[async_trait]
impl CacheStore for RedisCache {
    async fn set_ex(&self, key: &str, value: &str, ttl_seconds: u64) -> Result<(), DomainError> {
        Ok(self.client.set_with_expiry(key, value, ttl_seconds).await?)
    }

    async fn set_ex_at(&self, key: &str, value: &str, expire_at: i64) -> Result<(), DomainError> {
        Ok(self.client.set_with_expiry_at(key, value, expire_at).await?)
    }

    async fn get(&self, key: &str) -> Result<Option<String>, DomainError> {
        Ok(self.client.get(key).await?)
    }

    async fn ttl(&self, key: &str) -> Result<Option<i64>, DomainError> {
        Ok(self.client.ttl(key).await?)
    }

    async fn delete(&self, keys: &[String]) -> Result<u64, DomainError> {
        Ok(self.client.delete(keys).await?)
    }

    async fn exists(&self, key: &str) -> Result<bool, DomainError> {
        Ok(self.client.exists(key).await?)
    }
}
