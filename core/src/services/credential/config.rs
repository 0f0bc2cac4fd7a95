//! Configuration for the credential workflow

use af_shared::config::{ServerConfig, TokenLifetimeConfig};

use crate::domain::entities::one_time_token::TokenPurpose;
use crate::services::token_store::CooldownPolicy;

/// Configuration for the credential workflow
#[derive(Debug, Clone)]
pub struct CredentialServiceConfig {
    /// Verification token lifetime and resend spacing
    pub verify_policy: CooldownPolicy,
    /// Reset token lifetime in seconds
    pub reset_token_lifetime: u64,
    /// Front-end base URL the mailed links point to
    pub base_url: String,
}

impl Default for CredentialServiceConfig {
    fn default() -> Self {
        Self::from_config(&TokenLifetimeConfig::default(), &ServerConfig::default())
    }
}

impl CredentialServiceConfig {
    pub fn from_config(tokens: &TokenLifetimeConfig, server: &ServerConfig) -> Self {
        Self {
            verify_policy: CooldownPolicy::new(
                tokens.verify_token_lifetime,
                tokens.min_resend_interval,
            ),
            reset_token_lifetime: tokens.reset_token_lifetime,
            base_url: server.base_url.clone(),
        }
    }

    /// Link mailed for a token, e.g. `<base>verify?token=<t>`
    pub fn link(&self, purpose: TokenPurpose, token: &str) -> String {
        let separator = if self.base_url.ends_with('/') { "" } else { "/" };
        format!(
            "{}{}{}?token={}",
            self.base_url,
            separator,
            purpose.link_path(),
            token
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_link_with_trailing_slash() {
        let config = CredentialServiceConfig {
            base_url: "https://app.example.com/".into(),
            ..Default::default()
        };
        assert_eq!(
            config.link(TokenPurpose::Verify, "abc"),
            "https://app.example.com/verify?token=abc"
        );
    }

    #[test]
    fn test_link_without_trailing_slash() {
        let config = CredentialServiceConfig {
            base_url: "https://app.example.com".into(),
            ..Default::default()
        };
        assert_eq!(
            config.link(TokenPurpose::Reset, "xyz"),
            "https://app.example.com/reset?token=xyz"
        );
    }

    #[test]
    fn test_defaults_follow_token_config() {
        let config = CredentialServiceConfig::default();
        assert_eq!(config.verify_policy, CooldownPolicy::new(3600, 60));
        assert_eq!(config.reset_token_lifetime, 900);
    }
}
