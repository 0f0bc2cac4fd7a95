//! Tests for the one-time token store

use std::sync::Arc;

use crate::domain::entities::one_time_token::TokenPurpose;
use crate::services::cache::MockCache;
use crate::services::token_store::OneTimeTokenStore;

const EMAIL: &str = "user@example.com";

fn create_store(purpose: TokenPurpose) -> (Arc<MockCache>, OneTimeTokenStore<MockCache>) {
    let cache = Arc::new(MockCache::new());
    let store = OneTimeTokenStore::new(cache.clone(), purpose);
    (cache, store)
}

#[tokio::test]
async fn test_put_then_resolve_both_directions() {
    let (_, store) = create_store(TokenPurpose::Verify);

    store.put("tok", EMAIL, 3600).await.unwrap();

    assert_eq!(store.resolve("tok").await.unwrap().as_deref(), Some(EMAIL));
    assert_eq!(store.current_token(EMAIL).await.unwrap().as_deref(), Some("tok"));
    assert_eq!(store.remaining_ttl(EMAIL).await.unwrap(), Some(3600));
}

#[tokio::test]
async fn test_both_keys_share_expiry() {
    let (cache, store) = create_store(TokenPurpose::Verify);

    store.put("tok", EMAIL, 120).await.unwrap();

    let (_, by_token) = cache.raw("verify:email:tok").await.unwrap();
    let (_, by_subject) = cache.raw("verify:token:user@example.com").await.unwrap();
    assert_eq!(by_token, by_subject);
}

#[tokio::test]
async fn test_invalidate_removes_both_keys() {
    let (cache, store) = create_store(TokenPurpose::Reset);

    store.put("tok", EMAIL, 900).await.unwrap();
    store.invalidate("tok", EMAIL).await.unwrap();

    assert!(store.resolve("tok").await.unwrap().is_none());
    assert!(store.current_token(EMAIL).await.unwrap().is_none());
    assert!(cache.live_keys().await.is_empty());
}

#[tokio::test]
async fn test_tokens_expire_with_ttl() {
    let (cache, store) = create_store(TokenPurpose::Verify);

    store.put("tok", EMAIL, 60).await.unwrap();
    cache.advance(60);

    assert!(store.resolve("tok").await.unwrap().is_none());
    assert!(!store.has_active_token(EMAIL).await.unwrap());
    assert_eq!(store.remaining_ttl(EMAIL).await.unwrap(), None);
}

#[tokio::test]
async fn test_purposes_do_not_collide() {
    let cache = Arc::new(MockCache::new());
    let verify = OneTimeTokenStore::new(cache.clone(), TokenPurpose::Verify);
    let reset = OneTimeTokenStore::new(cache.clone(), TokenPurpose::Reset);

    verify.put("tok", EMAIL, 60).await.unwrap();

    assert!(reset.resolve("tok").await.unwrap().is_none());
    assert!(!reset.has_active_token(EMAIL).await.unwrap());
}

#[tokio::test]
async fn test_rotate_retires_previous_token() {
    let (cache, store) = create_store(TokenPurpose::Verify);

    let first = store.issue(EMAIL, 3600).await.unwrap();
    let second = store.rotate(EMAIL, 3600).await.unwrap();

    assert_ne!(first, second);
    assert!(store.resolve(&first).await.unwrap().is_none());
    assert_eq!(store.resolve(&second).await.unwrap().as_deref(), Some(EMAIL));
    assert_eq!(cache.live_keys().await.len(), 2);
}

#[tokio::test]
async fn test_partial_write_leaves_only_token_key() {
    let (cache, store) = create_store(TokenPurpose::Verify);
    cache.fail_writes_after(1);

    let result = store.put("tok", EMAIL, 60).await;

    assert!(result.is_err());
    assert_eq!(cache.live_keys().await, vec!["verify:email:tok".to_string()]);

    cache.advance(60);
    assert!(cache.live_keys().await.is_empty());
}
