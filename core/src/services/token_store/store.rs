//! Cache-backed store of one-time tokens

use std::sync::Arc;

use crate::domain::entities::one_time_token::TokenPurpose;
use crate::errors::DomainError;
use crate::services::cache::CacheStore;
use crate::services::token::generate_token;

/// Bidirectional token <-> e-mail mapping for one purpose
///
/// Two keys are written per token so that both directions resolve in one
/// lookup. The writes are not atomic: if the second write fails the first
/// key is left behind and disappears when its TTL runs out. A dangling
/// `<purpose>:email:<token>` still resolves, which is acceptable because the
/// token was never mailed.
pub struct OneTimeTokenStore<C: CacheStore> {
    cache: Arc<C>,
    purpose: TokenPurpose,
}

impl<C: CacheStore> OneTimeTokenStore<C> {
    pub fn new(cache: Arc<C>, purpose: TokenPurpose) -> Self {
        Self { cache, purpose }
    }

    pub fn purpose(&self) -> TokenPurpose {
        self.purpose
    }

    /// Store both directions of the mapping with the same expiry
    pub async fn put(&self, token: &str, subject: &str, ttl_seconds: u64) -> Result<(), DomainError> {
        self.cache
            .set_ex(&self.purpose.token_key(token), subject, ttl_seconds)
            .await?;
        self.cache
            .set_ex(&self.purpose.subject_key(subject), token, ttl_seconds)
            .await
            .map_err(|e| {
                tracing::warn!(
                    purpose = %self.purpose,
                    error = %e,
                    event = "token_pair_partial_write",
                    "Second key of token pair failed to write"
                );
                e
            })
    }

    /// Subject the token was issued for, `None` if unknown or expired
    pub async fn resolve(&self, token: &str) -> Result<Option<String>, DomainError> {
        self.cache.get(&self.purpose.token_key(token)).await
    }

    /// Token currently issued to the subject
    pub async fn current_token(&self, subject: &str) -> Result<Option<String>, DomainError> {
        self.cache.get(&self.purpose.subject_key(subject)).await
    }

    /// Seconds left on the subject's current token, `None` if there is none
    pub async fn remaining_ttl(&self, subject: &str) -> Result<Option<i64>, DomainError> {
        self.cache.ttl(&self.purpose.subject_key(subject)).await
    }

    pub async fn has_active_token(&self, subject: &str) -> Result<bool, DomainError> {
        self.cache.exists(&self.purpose.subject_key(subject)).await
    }

    /// Remove both directions of the mapping
    pub async fn invalidate(&self, token: &str, subject: &str) -> Result<(), DomainError> {
        self.cache
            .delete(&[
                self.purpose.token_key(token),
                self.purpose.subject_key(subject),
            ])
            .await?;
        Ok(())
    }

    /// Generate and store a new token for the subject
    pub async fn issue(&self, subject: &str, ttl_seconds: u64) -> Result<String, DomainError> {
        let token = generate_token();
        self.put(&token, subject, ttl_seconds).await?;
        Ok(token)
    }

    /// Replace the subject's current token, if any, with a fresh one
    pub async fn rotate(&self, subject: &str, ttl_seconds: u64) -> Result<String, DomainError> {
        let mut stale = vec![self.purpose.subject_key(subject)];
        if let Some(old) = self.current_token(subject).await? {
            stale.push(self.purpose.token_key(&old));
        }
        self.cache.delete(&stale).await?;

        self.issue(subject, ttl_seconds).await
    }
}

impl<C: CacheStore> Clone for OneTimeTokenStore<C> {
    fn clone(&self) -> Self {
        Self {
            cache: Arc::clone(&self.cache),
            purpose: self.purpose,
        }
    }
}
