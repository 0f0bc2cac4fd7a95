//! Registration by e-mail and e-mail verification

use actix_web::{web, HttpResponse};
use validator::Validate;

use af_core::repositories::UserRepository;
use af_core::services::{CacheStore, NotificationPublisher};
use af_shared::types::StatusResponse;

use crate::dto::auth::{EmailRequest, TokenQuery, VerifyEmailRequest};
use crate::handlers::error::ApiError;

use super::AppState;

/// Handler for POST /api/v1/pre_register
///
/// Creates the pending account on first use and mails a verification link.
///
/// # Request Body
///
/// ```json
/// { "email": "user@example.com" }
/// ```
///
/// ## Errors
/// - 409 Conflict: E-mail already confirmed
/// - 429 Too Many Requests: Link sent too recently, `details.retry_after` holds the wait
/// - 503 Service Unavailable: Cache, database or broker down
pub async fn pre_register<U, C, P>(
    state: web::Data<AppState<U, C, P>>,
    request: web::Json<EmailRequest>,
) -> Result<HttpResponse, ApiError>
where
    U: UserRepository + 'static,
    C: CacheStore + 'static,
    P: NotificationPublisher + 'static,
{
    request.validate()?;

    state.credentials.pre_register(&request.email).await?;

    Ok(HttpResponse::Ok().json(StatusResponse::ok()))
}

/// Handler for POST /api/v1/resend_verification
///
/// ## Errors
/// - 404 Not Found: No pending verification, registration must restart
/// - 409 Conflict: E-mail already confirmed
/// - 429 Too Many Requests: Cooldown still running
pub async fn resend_verification<U, C, P>(
    state: web::Data<AppState<U, C, P>>,
    request: web::Json<EmailRequest>,
) -> Result<HttpResponse, ApiError>
where
    U: UserRepository + 'static,
    C: CacheStore + 'static,
    P: NotificationPublisher + 'static,
{
    request.validate()?;

    state.credentials.resend_verification(&request.email).await?;

    Ok(HttpResponse::Ok().json(StatusResponse::ok()))
}

/// Handler for POST /api/v1/verify_email?token=
///
/// Completes registration: sets username and password and marks the
/// e-mail verified.
///
/// # Request Body
///
/// ```json
/// { "username": "alice", "password": "s3cret-password" }
/// ```
pub async fn verify_email<U, C, P>(
    state: web::Data<AppState<U, C, P>>,
    query: web::Query<TokenQuery>,
    request: web::Json<VerifyEmailRequest>,
) -> Result<HttpResponse, ApiError>
where
    U: UserRepository + 'static,
    C: CacheStore + 'static,
    P: NotificationPublisher + 'static,
{
    query.validate()?;
    request.validate()?;

    state
        .credentials
        .verify_email(&query.token, &request.username, &request.password)
        .await?;

    Ok(HttpResponse::Ok().json(StatusResponse::ok()))
}
