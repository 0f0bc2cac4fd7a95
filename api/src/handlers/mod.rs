pub mod error;
pub mod health;

pub use error::{handle_domain_error, ApiError};
pub use health::{HealthCheck, HealthProbes};
