//! Login, logout, access-token refresh and the current user

use actix_web::{web, HttpResponse};
use validator::Validate;

use af_core::repositories::UserRepository;
use af_core::services::{CacheStore, NotificationPublisher};
use af_shared::types::StatusResponse;

use crate::dto::auth::LoginRequest;
use crate::handlers::error::ApiError;
use crate::middleware::auth::{AuthContext, RefreshCookie};
use crate::middleware::cookies::{removal_cookie, session_cookie};

use super::AppState;

/// Handler for POST /api/v1/login
///
/// Issues an access and a refresh token as http-only cookies.
///
/// ## Errors
/// - 401 Unauthorized: Unknown user or wrong password, indistinguishable
/// - 403 Forbidden: Account blocked
pub async fn login<U, C, P>(
    state: web::Data<AppState<U, C, P>>,
    request: web::Json<LoginRequest>,
) -> Result<HttpResponse, ApiError>
where
    U: UserRepository + 'static,
    C: CacheStore + 'static,
    P: NotificationPublisher + 'static,
{
    request.validate()?;

    let pair = state
        .credentials
        .login(&request.username, &request.password)
        .await?;

    let cookies = &state.cookies;
    Ok(HttpResponse::Ok()
        .cookie(session_cookie(
            cookies,
            &cookies.access_cookie_name,
            pair.access_token,
            pair.access_expires_in,
        ))
        .cookie(session_cookie(
            cookies,
            &cookies.refresh_cookie_name,
            pair.refresh_token,
            pair.refresh_expires_in,
        ))
        .json(StatusResponse::ok()))
}

/// Handler for POST /api/v1/logout
///
/// Requires both cookies. The refresh token is revoked until it would
/// have expired and both cookies are cleared.
pub async fn logout<U, C, P>(
    state: web::Data<AppState<U, C, P>>,
    auth: AuthContext,
    refresh: RefreshCookie,
) -> Result<HttpResponse, ApiError>
where
    U: UserRepository + 'static,
    C: CacheStore + 'static,
    P: NotificationPublisher + 'static,
{
    state.credentials.logout(auth.user_id, &refresh.0).await?;

    let cookies = &state.cookies;
    Ok(HttpResponse::Ok()
        .cookie(removal_cookie(cookies, &cookies.refresh_cookie_name))
        .cookie(removal_cookie(cookies, &cookies.access_cookie_name))
        .json(StatusResponse::ok()))
}

/// Handler for POST /api/v1/refresh
///
/// Sets a fresh access cookie. The refresh token itself is not rotated.
pub async fn refresh<U, C, P>(
    state: web::Data<AppState<U, C, P>>,
    refresh: RefreshCookie,
) -> Result<HttpResponse, ApiError>
where
    U: UserRepository + 'static,
    C: CacheStore + 'static,
    P: NotificationPublisher + 'static,
{
    let access = state.credentials.refresh(&refresh.0).await?;

    let cookies = &state.cookies;
    Ok(HttpResponse::Ok()
        .cookie(session_cookie(
            cookies,
            &cookies.access_cookie_name,
            access.token,
            access.expires_in,
        ))
        .json(StatusResponse::ok()))
}

/// Handler for GET /api/v1/me
pub async fn me<U, C, P>(
    state: web::Data<AppState<U, C, P>>,
    auth: AuthContext,
) -> Result<HttpResponse, ApiError>
where
    U: UserRepository + 'static,
    C: CacheStore + 'static,
    P: NotificationPublisher + 'static,
{
    let profile = state.credentials.me(auth.user_id).await?;
    Ok(HttpResponse::Ok().json(profile))
}
