//! Refresh token revocation list

use chrono::Utc;
use std::sync::Arc;

use crate::domain::entities::one_time_token::blacklist_key;
use crate::errors::DomainError;
use crate::services::cache::CacheStore;

/// Blacklist of refresh token IDs
///
/// Each entry expires exactly when the token it names would have expired,
/// so the list never outgrows the set of still-valid refresh tokens.
pub struct RevocationList<C: CacheStore> {
    cache: Arc<C>,
}

impl<C: CacheStore> RevocationList<C> {
    pub fn new(cache: Arc<C>) -> Self {
        Self { cache }
    }

    /// Revoke `jti` until the absolute unix timestamp `expires_at`
    ///
    /// Tokens already past their expiry are rejected by signature
    /// validation anyway and are not recorded.
    pub async fn revoke(&self, jti: &str, expires_at: i64) -> Result<(), DomainError> {
        if expires_at <= Utc::now().timestamp() {
            tracing::debug!(jti = jti, "Skipping revocation of already expired token");
            return Ok(());
        }

        self.cache
            .set_ex_at(&blacklist_key(jti), "1", expires_at)
            .await?;

        tracing::info!(
            jti = jti,
            expires_at = expires_at,
            event = "refresh_token_revoked",
            "Refresh token added to revocation list"
        );
        Ok(())
    }

    pub async fn is_revoked(&self, jti: &str) -> Result<bool, DomainError> {
        self.cache.exists(&blacklist_key(jti)).await
    }
}

impl<C: CacheStore> Clone for RevocationList<C> {
    fn clone(&self) -> Self {
        Self {
            cache: Arc::clone(&self.cache),
        }
    }
}
