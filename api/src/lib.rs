//! # AuthFlow HTTP API
//!
//! Actix-web boundary of the credential workflow: request validation,
//! session cookies and the mapping of domain errors to status codes.

pub mod app;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;

pub use app::create_app;
pub use handlers::{HealthCheck, HealthProbes};
pub use middleware::SessionGuard;
pub use routes::auth::AppState;
