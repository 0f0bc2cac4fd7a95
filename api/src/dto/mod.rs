pub mod auth;

pub use auth::{
    ChangePasswordRequest, EmailRequest, LoginRequest, ResetPasswordRequest, TokenQuery,
    VerifyEmailRequest,
};
