//! One-time token lifetimes and resend cooldown configuration

use serde::{Deserialize, Serialize};

use super::env_or;

/// Lifetimes of the e-mailed one-time tokens
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TokenLifetimeConfig {
    /// Verification token lifetime in seconds
    pub verify_token_lifetime: u64,

    /// Minimum interval between two verification mails in seconds
    pub min_resend_interval: u64,

    /// Password reset token lifetime in seconds
    pub reset_token_lifetime: u64,
}

impl Default for TokenLifetimeConfig {
    fn default() -> Self {
        Self {
            verify_token_lifetime: 3600, // 1 hour
            min_resend_interval: 60,
            reset_token_lifetime: 900, // 15 minutes
        }
    }
}

impl TokenLifetimeConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            verify_token_lifetime: env_or("VERIFY_TOKEN_LIFETIME", defaults.verify_token_lifetime),
            min_resend_interval: env_or(
                "MIN_RESEND_TOKEN_LIFETIME",
                defaults.min_resend_interval,
            ),
            reset_token_lifetime: env_or("RESET_TOKEN_LIFETIME", defaults.reset_token_lifetime),
        }
    }

    /// Check that the cooldown fits inside the token lifetime
    pub fn is_consistent(&self) -> bool {
        self.min_resend_interval < self.verify_token_lifetime
    }
}
