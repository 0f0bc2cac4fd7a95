//! Tests for the refresh token revocation list

use chrono::Utc;
use std::sync::Arc;

use crate::services::cache::MockCache;
use crate::services::token::RevocationList;

#[tokio::test]
async fn test_revoke_pins_expiry_to_token_exp() {
    let cache = Arc::new(MockCache::new());
    let list = RevocationList::new(cache.clone());
    let exp = Utc::now().timestamp() + 3600;

    list.revoke("jti-1", exp).await.unwrap();

    assert!(list.is_revoked("jti-1").await.unwrap());
    assert!(!list.is_revoked("jti-2").await.unwrap());
    assert_eq!(
        cache.raw("blacklist:jti-1").await,
        Some(("1".to_string(), exp))
    );
}

#[tokio::test]
async fn test_entry_disappears_after_token_exp() {
    let cache = Arc::new(MockCache::new());
    let list = RevocationList::new(cache.clone());
    let exp = Utc::now().timestamp() + 100;

    list.revoke("jti-1", exp).await.unwrap();
    cache.advance(101);

    assert!(!list.is_revoked("jti-1").await.unwrap());
}

#[tokio::test]
async fn test_already_expired_token_is_not_recorded() {
    let cache = Arc::new(MockCache::new());
    let list = RevocationList::new(cache.clone());

    list.revoke("old", Utc::now().timestamp() - 5).await.unwrap();

    assert!(cache.raw("blacklist:old").await.is_none());
}

#[tokio::test]
async fn test_cache_failure_propagates() {
    let cache = Arc::new(MockCache::new());
    let list = RevocationList::new(cache.clone());
    cache.set_unavailable(true);

    assert!(list.is_revoked("jti").await.is_err());
    assert!(list
        .revoke("jti", Utc::now().timestamp() + 60)
        .await
        .is_err());
}
