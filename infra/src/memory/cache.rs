//! Cache with per-key absolute expiry on the wall clock

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use af_core::errors::DomainError;
use af_core::services::cache::CacheStore;

#[derive(Default)]
pub struct InMemoryCache {
    /// key -> (value, unix expiry)
    entries: Mutex<HashMap<String, (String, i64)>>,
}

impl InMemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys that have not expired
    pub fn len(&self) -> usize {
        let now = Utc::now().timestamp();
        self.lock()
            .map(|entries| entries.values().filter(|(_, exp)| *exp > now).count())
            .unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<String, (String, i64)>>, DomainError> {
        self.entries
            .lock()
            .map_err(|_| DomainError::cache("in-memory cache lock poisoned"))
    }

    fn live(&self, key: &str) -> Result<Option<(String, i64)>, DomainError> {
        let now = Utc::now().timestamp();
        let mut entries = self.lock()?;
        if matches!(entries.get(key), Some((_, exp)) if *exp <= now) {
            entries.remove(key);
            return Ok(None);
        }
        Ok(entries.get(key).cloned())
    }
}

#[async_trait]
impl CacheStore for InMemoryCache {
    async fn set_ex(&self, key: &str, value: &str, ttl_seconds: u64) -> Result<(), DomainError> {
        let expire_at = Utc::now().timestamp() + ttl_seconds as i64;
        self.set_ex_at(key, value, expire_at).await
    }

    async fn set_ex_at(&self, key: &str, value: &str, expire_at: i64) -> Result<(), DomainError> {
        let now = Utc::now().timestamp();
        let mut entries = self.lock()?;
        // keys nobody reads again, such as blacklist entries, go here
        entries.retain(|_, (_, exp)| *exp > now);
        entries.insert(key.to_string(), (value.to_string(), expire_at));
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<String>, DomainError> {
        Ok(self.live(key)?.map(|(value, _)| value))
    }

    async fn ttl(&self, key: &str) -> Result<Option<i64>, DomainError> {
        let now = Utc::now().timestamp();
        Ok(self.live(key)?.map(|(_, exp)| exp - now))
    }

    async fn delete(&self, keys: &[String]) -> Result<u64, DomainError> {
        let mut entries = self.lock()?;
        Ok(keys.iter().filter(|k| entries.remove(*k).is_some()).count() as u64)
    }

    async fn exists(&self, key: &str) -> Result<bool, DomainError> {
        Ok(self.live(key)?.is_some())
    }
}
