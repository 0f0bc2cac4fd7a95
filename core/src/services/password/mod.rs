//! Password hashing with bcrypt
//!
//! bcrypt is deliberately slow, so hashing and verification run on the
//! blocking thread pool instead of the async workers. It also ignores input
//! past 72 bytes, so longer passwords are refused rather than truncated.

use std::sync::Arc;

use af_shared::utils::validation::limits;
use tokio::sync::OnceCell;

use crate::errors::{DomainError, ValidationError};

/// Salted password hasher
#[derive(Debug, Clone)]
pub struct PasswordHasher {
    cost: u32,
    /// Hash of a throwaway password at `cost`, built on first use
    decoy: Arc<OnceCell<String>>,
}

impl PasswordHasher {
    pub fn new(cost: u32) -> Self {
        Self {
            cost: cost.clamp(4, 31),
            decoy: Arc::new(OnceCell::new()),
        }
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }

    /// Hash a password with a fresh salt
    pub async fn hash(&self, password: &str) -> Result<String, DomainError> {
        if password.len() > limits::PASSWORD_MAX_BYTES {
            return Err(ValidationError::InvalidLength {
                field: "password".to_string(),
                min: limits::PASSWORD_MIN,
                max: limits::PASSWORD_MAX,
            }
            .into());
        }

        let password = password.to_owned();
        let cost = self.cost;

        tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
            .await
            .map_err(|e| DomainError::internal(format!("hashing task failed: {}", e)))?
            .map_err(|e| DomainError::internal(format!("password hashing failed: {}", e)))
    }

    /// Check a password against a stored hash
    ///
    /// A malformed stored hash counts as a mismatch. Input past the bcrypt
    /// limit never matches, though the full comparison still runs.
    pub async fn verify(&self, password: &str, hash: &str) -> Result<bool, DomainError> {
        let fits = password.len() <= limits::PASSWORD_MAX_BYTES;
        let password = password.to_owned();
        let hash = hash.to_owned();

        let outcome = tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
            .await
            .map_err(|e| DomainError::internal(format!("hashing task failed: {}", e)))?;

        match outcome {
            Ok(matches) => Ok(fits && matches),
            Err(e) => {
                tracing::warn!(error = %e, "Stored password hash could not be parsed");
                Ok(false)
            }
        }
    }

    /// Spend the cost of one `verify` when there is no hash to check against
    ///
    /// Always answers `false`.
    pub async fn verify_nothing(&self, password: &str) -> Result<bool, DomainError> {
        let cost = self.cost;
        let decoy = self
            .decoy
            .get_or_try_init(|| async move {
                tokio::task::spawn_blocking(move || bcrypt::hash("decoy-password", cost))
                    .await
                    .map_err(|e| DomainError::internal(format!("hashing task failed: {}", e)))?
                    .map_err(|e| DomainError::internal(format!("password hashing failed: {}", e)))
            })
            .await?;

        self.verify(password, decoy).await?;
        Ok(false)
    }

    #[cfg(test)]
    pub(crate) fn has_decoy(&self) -> bool {
        self.decoy.initialized()
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new(bcrypt::DEFAULT_COST)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_hash_and_verify() {
        let hasher = PasswordHasher::new(4);
        let hash = hasher.hash("correct horse").await.unwrap();

        assert_ne!(hash, "correct horse");
        assert!(hasher.verify("correct horse", &hash).await.unwrap());
        assert!(!hasher.verify("wrong horse", &hash).await.unwrap());
    }

    #[tokio::test]
    async fn test_same_password_gets_different_salts() {
        let hasher = PasswordHasher::new(4);
        let a = hasher.hash("password123").await.unwrap();
        let b = hasher.hash("password123").await.unwrap();
        assert_ne!(a, b);
    }

    #[tokio::test]
    async fn test_malformed_hash_is_mismatch() {
        let hasher = PasswordHasher::new(4);
        assert!(!hasher.verify("password123", "not-a-hash").await.unwrap());
    }

    #[tokio::test]
    async fn test_long_password_is_refused() {
        let hasher = PasswordHasher::new(4);
        let prefix = "a".repeat(72);

        assert!(hasher.hash(&prefix).await.is_ok());
        let err = hasher.hash(&format!("{prefix}-suffix")).await.unwrap_err();
        assert!(matches!(
            err,
            DomainError::Validation(ValidationError::InvalidLength { .. })
        ));
    }

    #[tokio::test]
    async fn test_shared_prefix_does_not_verify() {
        let hasher = PasswordHasher::new(4);
        let prefix = "a".repeat(72);
        let hash = hasher.hash(&prefix).await.unwrap();

        assert!(hasher.verify(&prefix, &hash).await.unwrap());
        assert!(!hasher
            .verify(&format!("{prefix}-attacker-guess"), &hash)
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn test_verify_nothing_never_matches() {
        let hasher = PasswordHasher::new(4);
        assert!(!hasher.verify_nothing("decoy-password").await.unwrap());
        assert!(!hasher.verify_nothing("anything").await.unwrap());
        assert!(hasher.has_decoy());
    }

    #[test]
    fn test_cost_is_clamped() {
        assert_eq!(PasswordHasher::new(1).cost(), 4);
        assert_eq!(PasswordHasher::new(40).cost(), 31);
    }
}
