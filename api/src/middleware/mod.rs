pub mod auth;
pub mod cookies;

pub use auth::{AuthContext, RefreshCookie, SessionGuard};
