//! Mock implementation of CacheStore for testing
//!
//! Keeps entries in memory with absolute expiry timestamps taken from a
//! frozen clock that tests move forward explicitly.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicI64, AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::errors::DomainError;

use super::traits::CacheStore;

pub struct MockCache {
    entries: Arc<Mutex<HashMap<String, (String, i64)>>>,
    started_at: i64,
    clock_offset: AtomicI64,
    unavailable: AtomicBool,
    /// Number of successful writes allowed before writes start failing
    writes_before_failure: AtomicUsize,
}

impl MockCache {
    pub fn new() -> Self {
        Self {
            entries: Arc::new(Mutex::new(HashMap::new())),
            started_at: Utc::now().timestamp(),
            clock_offset: AtomicI64::new(0),
            unavailable: AtomicBool::new(false),
            writes_before_failure: AtomicUsize::new(usize::MAX),
        }
    }

    /// Current time as seen by the cache; only moves through `advance`
    pub fn now(&self) -> i64 {
        self.started_at + self.clock_offset.load(Ordering::SeqCst)
    }

    /// Move the cache clock forward
    pub fn advance(&self, seconds: i64) {
        self.clock_offset.fetch_add(seconds, Ordering::SeqCst);
    }

    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Let `count` more writes succeed, then fail every write
    pub fn fail_writes_after(&self, count: usize) {
        self.writes_before_failure.store(count, Ordering::SeqCst);
    }

    /// Raw read ignoring expiry, for assertions
    pub async fn raw(&self, key: &str) -> Option<(String, i64)> {
        self.entries.lock().await.get(key).cloned()
    }

    pub async fn live_keys(&self) -> Vec<String> {
        let now = self.now();
        let mut keys: Vec<String> = self
            .entries
            .lock()
            .await
            .iter()
            .filter(|(_, (_, exp))| *exp > now)
            .map(|(k, _)| k.clone())
            .collect();
        keys.sort();
        keys
    }

    fn check_available(&self) -> Result<(), DomainError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(DomainError::cache("mock cache unavailable"));
        }
        Ok(())
    }

    fn check_write(&self) -> Result<(), DomainError> {
        self.check_available()?;
        let remaining = self.writes_before_failure.load(Ordering::SeqCst);
        if remaining == 0 {
            return Err(DomainError::cache("mock cache write failure"));
        }
        if remaining != usize::MAX {
            self.writes_before_failure.store(remaining - 1, Ordering::SeqCst);
        }
        Ok(())
    }

    async fn live_entry(&self, key: &str) -> Option<(String, i64)> {
        let now = self.now();
        let mut entries = self.entries.lock().await;
        let expired = matches!(entries.get(key), Some((_, exp)) if *exp <= now);
        if expired {
            entries.remove(key);
            return None;
        }
        entries.get(key).cloned()
    }
}

impl Default for MockCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CacheStore for MockCache {
    async fn set_ex(&self, key: &str, value: &str, ttl_seconds: u64) -> Result<(), DomainError> {
        self.check_write()?;
        let expires_at = self.now() + ttl_seconds as i64;
        self.entries
            .lock()
            .await
            .insert(key.to_string(), (value.to_string(), expires_at));
        Ok(())
    }

    async fn set_ex_at(&self, key: &str, value: &str, expire_at: i64) -> Result<(), DomainError> {
        self.check_write()?;
        self.entries
            .lock()
            .await
            .insert(key.to_string(), (value.to_string(), expire_at));
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<String>, DomainError> {
        self.check_available()?;
        Ok(self.live_entry(key).await.map(|(v, _)| v))
    }

    async fn ttl(&self, key: &str) -> Result<Option<i64>, DomainError> {
        self.check_available()?;
        let now = self.now();
        Ok(self.live_entry(key).await.map(|(_, exp)| exp - now))
    }

    async fn delete(&self, keys: &[String]) -> Result<u64, DomainError> {
        self.check_available()?;
        let mut entries = self.entries.lock().await;
        Ok(keys.iter().filter(|k| entries.remove(*k).is_some()).count() as u64)
    }

    async fn exists(&self, key: &str) -> Result<bool, DomainError> {
        self.check_available()?;
        Ok(self.live_entry(key).await.is_some())
    }
}
