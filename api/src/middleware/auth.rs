//! Cookie-based session extractors
//!
//! The access and refresh tokens travel in http-only cookies. [`AuthContext`]
//! decodes the access cookie for handlers that need a logged-in user;
//! [`RefreshCookie`] hands the raw refresh cookie to the handlers that
//! revoke or exchange it.

use std::future::{ready, Ready};
use std::sync::Arc;

use actix_web::{web, FromRequest, HttpRequest};
use uuid::Uuid;

use af_core::domain::entities::token::{Claims, TokenType};
use af_core::errors::{DomainError, TokenError};
use af_core::services::TokenService;
use af_shared::config::CookieConfig;

use crate::handlers::error::ApiError;

/// What the extractors need to read and check the session cookies
pub struct SessionGuard {
    tokens: Arc<TokenService>,
    cookies: CookieConfig,
}

impl SessionGuard {
    pub fn new(tokens: Arc<TokenService>, cookies: CookieConfig) -> Self {
        Self { tokens, cookies }
    }

    pub fn cookies(&self) -> &CookieConfig {
        &self.cookies
    }

    fn registered(req: &HttpRequest) -> Result<&web::Data<SessionGuard>, ApiError> {
        req.app_data::<web::Data<SessionGuard>>()
            .ok_or_else(|| DomainError::internal("session guard is not registered").into())
    }
}

/// User authentication context taken from the access cookie
#[derive(Debug, Clone)]
pub struct AuthContext {
    /// User ID extracted from JWT claims
    pub user_id: Uuid,
    /// JWT ID of the access token
    pub jti: String,
}

impl AuthContext {
    pub fn from_claims(claims: Claims) -> Result<Self, DomainError> {
        let user_id = claims
            .user_id()
            .map_err(|_| DomainError::Token(TokenError::InvalidTokenFormat))?;
        Ok(Self {
            user_id,
            jti: claims.jti,
        })
    }

    fn extract(req: &HttpRequest) -> Result<Self, ApiError> {
        let guard = SessionGuard::registered(req)?;
        let cookie = req
            .cookie(&guard.cookies.access_cookie_name)
            .ok_or(TokenError::TokenMissing)?;

        let claims = guard.tokens.decode(cookie.value(), TokenType::Access)?;
        Ok(Self::from_claims(claims)?)
    }
}

impl FromRequest for AuthContext {
    type Error = ApiError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        ready(Self::extract(req))
    }
}

/// Raw value of the refresh cookie
///
/// Only presence is checked here; the credential service decodes it.
#[derive(Debug, Clone)]
pub struct RefreshCookie(pub String);

impl FromRequest for RefreshCookie {
    type Error = ApiError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        let result = SessionGuard::registered(req).and_then(|guard| {
            req.cookie(&guard.cookies.refresh_cookie_name)
                .map(|cookie| RefreshCookie(cookie.value().to_string()))
                .ok_or_else(|| TokenError::TokenMissing.into())
        });
        ready(result)
    }
}
