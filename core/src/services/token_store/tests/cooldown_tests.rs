//! Tests for the TTL-derived resend cooldown

use std::sync::Arc;

use crate::domain::entities::one_time_token::TokenPurpose;
use crate::services::cache::MockCache;
use crate::services::token_store::{CooldownPolicy, CooldownStatus, OneTimeTokenStore};

const EMAIL: &str = "user@example.com";

fn policy() -> CooldownPolicy {
    CooldownPolicy::new(3600, 60)
}

#[test]
fn test_fresh_token_is_blocked_for_full_interval() {
    assert_eq!(policy().evaluate(Some(3600)), CooldownStatus::Blocked(60));
}

#[test]
fn test_one_second_before_boundary_is_blocked() {
    // 59 seconds elapsed
    assert_eq!(policy().evaluate(Some(3541)), CooldownStatus::Blocked(1));
}

#[test]
fn test_boundary_is_allowed() {
    // exactly 60 seconds elapsed
    assert_eq!(policy().evaluate(Some(3540)), CooldownStatus::Allowed);
}

#[test]
fn test_old_token_is_allowed() {
    assert_eq!(policy().evaluate(Some(10)), CooldownStatus::Allowed);
}

#[test]
fn test_missing_or_expired_token() {
    assert_eq!(policy().evaluate(None), CooldownStatus::NoActiveToken);
    assert_eq!(policy().evaluate(Some(0)), CooldownStatus::NoActiveToken);
    assert_eq!(policy().evaluate(Some(-2)), CooldownStatus::NoActiveToken);
}

#[test]
fn test_interval_equal_to_lifetime_blocks_until_expiry() {
    let policy = CooldownPolicy::new(900, 900);
    assert_eq!(policy.evaluate(Some(30)), CooldownStatus::Blocked(30));
}

#[tokio::test]
async fn test_check_against_store_over_time() {
    let cache = Arc::new(MockCache::new());
    let store = OneTimeTokenStore::new(cache.clone(), TokenPurpose::Verify);
    let policy = policy();

    assert_eq!(
        policy.check(&store, EMAIL).await.unwrap(),
        CooldownStatus::NoActiveToken
    );

    store.issue(EMAIL, 3600).await.unwrap();
    cache.advance(59);
    assert_eq!(
        policy.check(&store, EMAIL).await.unwrap(),
        CooldownStatus::Blocked(1)
    );

    cache.advance(1);
    assert_eq!(
        policy.check(&store, EMAIL).await.unwrap(),
        CooldownStatus::Allowed
    );

    cache.advance(3540);
    assert_eq!(
        policy.check(&store, EMAIL).await.unwrap(),
        CooldownStatus::NoActiveToken
    );
}
