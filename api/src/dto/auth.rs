use serde::{Deserialize, Serialize};
use validator::Validate;

/// Body of `pre_register`, `resend_verification` and `forgot_password`
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct EmailRequest {
    #[validate(email(message = "Enter a valid email address"))]
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct VerifyEmailRequest {
    #[validate(length(min = 3, max = 16, message = "Username must be 3 to 16 characters"))]
    pub username: String,

    #[validate(length(min = 8, max = 72, message = "Password must be 8 to 72 characters"))]
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ChangePasswordRequest {
    #[validate(length(min = 8, max = 72, message = "Password must be 8 to 72 characters"))]
    pub old_password: String,

    #[validate(length(min = 8, max = 72, message = "Password must be 8 to 72 characters"))]
    pub new_password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ResetPasswordRequest {
    #[validate(length(min = 8, max = 72, message = "Password must be 8 to 72 characters"))]
    pub new_password: String,
}

/// `?token=` query of the mailed links
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct TokenQuery {
    #[validate(length(min = 1, message = "Token is required"))]
    pub token: String,
}
