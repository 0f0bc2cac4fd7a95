//! Password change, forgot and reset

use actix_web::{web, HttpResponse};
use validator::Validate;

use af_core::repositories::UserRepository;
use af_core::services::{CacheStore, NotificationPublisher};
use af_shared::types::StatusResponse;

use crate::dto::auth::{ChangePasswordRequest, EmailRequest, ResetPasswordRequest, TokenQuery};
use crate::handlers::error::ApiError;
use crate::middleware::auth::AuthContext;

use super::AppState;

/// Handler for POST /api/v1/change_password
///
/// Requires the access cookie. A wrong old password answers 400.
pub async fn change_password<U, C, P>(
    state: web::Data<AppState<U, C, P>>,
    auth: AuthContext,
    request: web::Json<ChangePasswordRequest>,
) -> Result<HttpResponse, ApiError>
where
    U: UserRepository + 'static,
    C: CacheStore + 'static,
    P: NotificationPublisher + 'static,
{
    request.validate()?;

    state
        .credentials
        .change_password(auth.user_id, &request.old_password, &request.new_password)
        .await?;

    Ok(HttpResponse::Ok().json(StatusResponse::ok()))
}

/// Handler for POST /api/v1/forgot_password
///
/// ## Errors
/// - 400 Bad Request: E-mail not verified
/// - 404 Not Found: No account for the e-mail
/// - 429 Too Many Requests: A reset link is still outstanding
pub async fn forgot_password<U, C, P>(
    state: web::Data<AppState<U, C, P>>,
    request: web::Json<EmailRequest>,
) -> Result<HttpResponse, ApiError>
where
    U: UserRepository + 'static,
    C: CacheStore + 'static,
    P: NotificationPublisher + 'static,
{
    request.validate()?;

    state.credentials.forgot_password(&request.email).await?;

    Ok(HttpResponse::Ok().json(StatusResponse::ok()))
}

/// Handler for POST /api/v1/reset_password?token=
pub async fn reset_password<U, C, P>(
    state: web::Data<AppState<U, C, P>>,
    query: web::Query<TokenQuery>,
    request: web::Json<ResetPasswordRequest>,
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
        .reset_password(&query.token, &request.new_password)
        .await?;

    Ok(HttpResponse::Ok().json(StatusResponse::ok()))
}
