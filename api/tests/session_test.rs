//! Login, refresh, logout and /me over HTTP

mod common;

use actix_web::cookie::{time::Duration, SameSite};
use actix_web::test;
use serde_json::{json, Value};

use af_core::domain::entities::user::{UserChanges, UserLookup};
use af_core::repositories::UserRepository;

use common::{cookie_named, cookies_of, TestContext, EMAIL, PASSWORD, USERNAME};

#[actix_web::test]
async fn test_login_sets_http_only_lax_cookies() {
    let ctx = TestContext::new();
    ctx.verified_user().await;
    let app = test::init_service(ctx.app()).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/login")
        .set_json(json!({ "username": USERNAME, "password": PASSWORD }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 200);
    let cookies = cookies_of(&resp);
    for name in ["access_token", "refresh_token"] {
        let cookie = cookie_named(&cookies, name);
        assert!(!cookie.value().is_empty());
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Lax));
    }
    assert_eq!(
        cookie_named(&cookies, "access_token").max_age(),
        Some(Duration::seconds(600))
    );
}

#[actix_web::test]
async fn test_login_failures_share_one_answer() {
    let ctx = TestContext::new();
    ctx.verified_user().await;
    let app = test::init_service(ctx.app()).await;

    let mut bodies = Vec::new();
    for (username, password) in [(USERNAME, "wrong-password"), ("nobody", PASSWORD)] {
        let req = test::TestRequest::post()
            .uri("/api/v1/login")
            .set_json(json!({ "username": username, "password": password }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 401);
        assert!(cookies_of(&resp).is_empty());

        let body: Value = test::read_body_json(resp).await;
        bodies.push((body["error"].clone(), body["message"].clone()));
    }

    assert_eq!(bodies[0], bodies[1]);
}

#[actix_web::test]
async fn test_blocked_account_is_forbidden() {
    let ctx = TestContext::new();
    ctx.verified_user().await;
    ctx.users
        .update(
            &UserLookup::Email(EMAIL.to_string()),
            UserChanges {
                is_active: Some(false),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    let app = test::init_service(ctx.app()).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/login")
        .set_json(json!({ "username": USERNAME, "password": PASSWORD }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 403);
}

#[actix_web::test]
async fn test_session_lifecycle() {
    let ctx = TestContext::new();
    ctx.verified_user().await;
    let app = test::init_service(ctx.app()).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/login")
        .set_json(json!({ "username": USERNAME, "password": PASSWORD }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let cookies = cookies_of(&resp);
    let access = cookie_named(&cookies, "access_token");
    let refresh = cookie_named(&cookies, "refresh_token");

    // me
    let req = test::TestRequest::get()
        .uri("/api/v1/me")
        .cookie(access.clone())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
    let profile: Value = test::read_body_json(resp).await;
    assert_eq!(profile["email"], EMAIL);
    assert_eq!(profile["username"], USERNAME);
    assert!(profile.get("password_hash").is_none());

    // refresh issues a new access cookie only
    let req = test::TestRequest::post()
        .uri("/api/v1/refresh")
        .cookie(refresh.clone())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
    let refreshed = cookies_of(&resp);
    assert_eq!(refreshed.len(), 1);
    assert_eq!(refreshed[0].name(), "access_token");

    // logout clears both cookies
    let req = test::TestRequest::post()
        .uri("/api/v1/logout")
        .cookie(access.clone())
        .cookie(refresh.clone())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
    let cleared = cookies_of(&resp);
    for name in ["access_token", "refresh_token"] {
        let cookie = cookie_named(&cleared, name);
        assert_eq!(cookie.value(), "");
        assert_eq!(cookie.max_age(), Some(Duration::ZERO));
    }

    // the revoked refresh token no longer works
    let req = test::TestRequest::post()
        .uri("/api/v1/refresh")
        .cookie(refresh)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 401);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "TOKEN_REVOKED");
}

#[actix_web::test]
async fn test_logout_requires_both_cookies() {
    let ctx = TestContext::new();
    ctx.verified_user().await;
    let pair = ctx
        .state
        .credentials
        .login(USERNAME, PASSWORD)
        .await
        .unwrap();
    let app = test::init_service(ctx.app()).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/logout")
        .cookie(actix_web::cookie::Cookie::new("access_token", pair.access_token))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 401);
}

#[actix_web::test]
async fn test_me_without_cookie() {
    let ctx = TestContext::new();
    let app = test::init_service(ctx.app()).await;

    let req = test::TestRequest::get().uri("/api/v1/me").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 401);
}

#[actix_web::test]
async fn test_refresh_with_garbage_cookie() {
    let ctx = TestContext::new();
    let app = test::init_service(ctx.app()).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/refresh")
        .cookie(actix_web::cookie::Cookie::new("refresh_token", "garbage"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 401);
}
