//! One-time tokens mailed to users, and the cache keys they live under.

use serde::{Deserialize, Serialize};

/// Namespace of a one-time token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenPurpose {
    /// E-mail verification after pre-registration
    Verify,
    /// Password reset
    Reset,
}

impl TokenPurpose {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenPurpose::Verify => "verify",
            TokenPurpose::Reset => "reset",
        }
    }

    /// `<purpose>:email:<token>` resolves a token to its e-mail
    pub fn token_key(&self, token: &str) -> String {
        format!("{}:email:{}", self.as_str(), token)
    }

    /// `<purpose>:token:<email>` resolves an e-mail to its current token
    pub fn subject_key(&self, subject: &str) -> String {
        format!("{}:token:{}", self.as_str(), subject)
    }

    /// Front-end path the mailed link points to
    pub fn link_path(&self) -> &'static str {
        self.as_str()
    }
}

impl std::fmt::Display for TokenPurpose {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Key of a revoked refresh token
pub fn blacklist_key(jti: &str) -> String {
    format!("blacklist:{}", jti)
}
