//! Resend cooldown derived from the remaining TTL of the current token

use crate::errors::DomainError;
use crate::services::cache::CacheStore;

use super::store::OneTimeTokenStore;

/// Outcome of a cooldown check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CooldownStatus {
    /// A token exists and enough time has passed to send another
    Allowed,
    /// A token was sent too recently; retry after this many seconds
    Blocked(u64),
    /// No token is outstanding for the subject
    NoActiveToken,
}

/// Lifetime of a token and the minimum spacing between two sends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CooldownPolicy {
    pub token_lifetime: u64,
    pub min_resend_interval: u64,
}

impl CooldownPolicy {
    pub fn new(token_lifetime: u64, min_resend_interval: u64) -> Self {
        Self {
            token_lifetime,
            min_resend_interval,
        }
    }

    /// Decide from the remaining TTL of the current token
    ///
    /// Time since issue is `lifetime - ttl`. Sending is allowed once it
    /// reaches `min_resend_interval`, inclusive.
    pub fn evaluate(&self, remaining_ttl: Option<i64>) -> CooldownStatus {
        let ttl = match remaining_ttl {
            Some(ttl) if ttl > 0 => ttl,
            _ => return CooldownStatus::NoActiveToken,
        };

        let elapsed = self.token_lifetime as i64 - ttl;
        let remaining = self.min_resend_interval as i64 - elapsed;

        if remaining > 0 {
            CooldownStatus::Blocked(remaining as u64)
        } else {
            CooldownStatus::Allowed
        }
    }

    /// Look up the subject's token and evaluate the cooldown
    pub async fn check<C: CacheStore>(
        &self,
        store: &OneTimeTokenStore<C>,
        subject: &str,
    ) -> Result<CooldownStatus, DomainError> {
        let ttl = store.remaining_ttl(subject).await?;
        let status = self.evaluate(ttl);

        if let CooldownStatus::Blocked(seconds) = status {
            tracing::warn!(
                purpose = %store.purpose(),
                retry_after = seconds,
                event = "rate_limit_exceeded",
                "Token resend requested inside cooldown"
            );
        }
        Ok(status)
    }
}
