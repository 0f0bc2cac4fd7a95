//! Conversion of domain failures into HTTP responses
//!
//! Every [`DomainError`] maps to one fixed status code and an
//! [`ErrorResponse`] body. Cache, database and broker failures are logged
//! here and answered with a generic body so no upstream detail leaks.

use actix_web::{
    error::{JsonPayloadError, QueryPayloadError},
    http::{header, StatusCode},
    HttpRequest, HttpResponse, ResponseError,
};
use validator::ValidationErrors;

use af_core::errors::{AuthError, DomainError, TokenError};
use af_shared::errors::{error_codes, ErrorResponse};

/// Error returned by handlers and extractors
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Request body or query failed field validation
    #[error("Validation failed")]
    Validation(#[from] ValidationErrors),

    /// Request body or query could not be parsed at all
    #[error("{0}")]
    Malformed(String),
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        ApiError::Domain(err.into())
    }
}

impl From<TokenError> for ApiError {
    fn from(err: TokenError) -> Self {
        ApiError::Domain(err.into())
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Domain(err) => domain_status(err).0,
            ApiError::Validation(_) | ApiError::Malformed(_) => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            ApiError::Domain(err) => handle_domain_error(err),
            ApiError::Validation(errors) => validation_response(errors),
            ApiError::Malformed(message) => HttpResponse::UnprocessableEntity().json(
                ErrorResponse::new(error_codes::VALIDATION_ERROR, message.clone()),
            ),
        }
    }
}

/// Status code and error code for a domain error
fn domain_status(error: &DomainError) -> (StatusCode, &'static str) {
    match error {
        DomainError::Validation(_) => {
            (StatusCode::UNPROCESSABLE_ENTITY, error_codes::VALIDATION_ERROR)
        }
        DomainError::Auth(auth_error) => match auth_error {
            AuthError::TokenExpiredOrNotRequested => {
                (StatusCode::BAD_REQUEST, error_codes::TOKEN_NOT_FOUND)
            }
            AuthError::RegistrationRestartRequired => {
                (StatusCode::NOT_FOUND, error_codes::TOKEN_NOT_FOUND)
            }
            AuthError::UserNotFound => (StatusCode::NOT_FOUND, error_codes::USER_NOT_FOUND),
            AuthError::EmailAlreadyVerified => {
                (StatusCode::CONFLICT, error_codes::ALREADY_VERIFIED)
            }
            AuthError::UsernameTaken => (StatusCode::CONFLICT, error_codes::USERNAME_TAKEN),
            AuthError::ResendCooldown { .. } | AuthError::TokenAlreadySent => {
                (StatusCode::TOO_MANY_REQUESTS, error_codes::RATE_LIMIT_EXCEEDED)
            }
            AuthError::EmailNotVerified => {
                (StatusCode::BAD_REQUEST, error_codes::EMAIL_NOT_VERIFIED)
            }
            AuthError::IncorrectPassword => (StatusCode::BAD_REQUEST, error_codes::BAD_REQUEST),
            AuthError::InvalidCredentials => {
                (StatusCode::UNAUTHORIZED, error_codes::INVALID_CREDENTIALS)
            }
            AuthError::AccountBlocked => (StatusCode::FORBIDDEN, error_codes::ACCOUNT_BLOCKED),
        },
        DomainError::Token(token_error) => match token_error {
            TokenError::TokenGenerationFailed => {
                (StatusCode::INTERNAL_SERVER_ERROR, error_codes::INTERNAL_ERROR)
            }
            TokenError::TokenMissing => (StatusCode::UNAUTHORIZED, error_codes::UNAUTHORIZED),
            TokenError::TokenExpired => (StatusCode::UNAUTHORIZED, error_codes::TOKEN_EXPIRED),
            TokenError::TokenRevoked => (StatusCode::UNAUTHORIZED, error_codes::TOKEN_REVOKED),
            _ => (StatusCode::UNAUTHORIZED, error_codes::TOKEN_INVALID),
        },
        DomainError::UniqueViolation { .. } => (StatusCode::CONFLICT, error_codes::CONFLICT),
        DomainError::Upstream { .. } => {
            (StatusCode::SERVICE_UNAVAILABLE, error_codes::SERVICE_UNAVAILABLE)
        }
        DomainError::Internal { .. } => {
            (StatusCode::INTERNAL_SERVER_ERROR, error_codes::INTERNAL_ERROR)
        }
    }
}

/// Handle domain errors and convert them to appropriate HTTP responses
pub fn handle_domain_error(error: &DomainError) -> HttpResponse {
    let (status, code) = domain_status(error);

    let body = match error {
        DomainError::Upstream { service, message } => {
            tracing::error!(service = %service, error = %message, "Upstream service failure");
            ErrorResponse::new(code, "Service temporarily unavailable")
        }
        DomainError::Internal { .. } | DomainError::Token(TokenError::TokenGenerationFailed) => {
            tracing::error!(error = %error, "Internal error");
            ErrorResponse::new(code, "An internal error occurred")
        }
        DomainError::Auth(AuthError::ResendCooldown { seconds }) => {
            ErrorResponse::new(code, error.to_string()).add_detail("retry_after", seconds)
        }
        DomainError::UniqueViolation { field } => {
            ErrorResponse::new(code, error.to_string()).add_detail("field", field)
        }
        _ => {
            tracing::debug!(status = status.as_u16(), error = %error, "Request rejected");
            ErrorResponse::new(code, error.to_string())
        }
    };

    let mut response = HttpResponse::build(status);
    if let DomainError::Auth(AuthError::ResendCooldown { seconds }) = error {
        response.insert_header((header::RETRY_AFTER, seconds.to_string()));
    }
    response.json(body)
}

/// 422 response listing the messages of every failed field
pub fn validation_response(errors: &ValidationErrors) -> HttpResponse {
    let mut body = ErrorResponse::new(error_codes::VALIDATION_ERROR, "Validation failed");

    for (field, field_errors) in errors.field_errors() {
        let messages: Vec<String> = field_errors
            .iter()
            .map(|e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| e.code.to_string())
            })
            .collect();
        body = body.add_detail(field, messages);
    }

    HttpResponse::UnprocessableEntity().json(body)
}

/// Malformed JSON bodies are answered like failed validation
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    ApiError::Malformed(err.to_string()).into()
}

/// Missing or malformed query strings are answered like failed validation
pub fn query_error_handler(err: QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    ApiError::Malformed(err.to_string()).into()
}
