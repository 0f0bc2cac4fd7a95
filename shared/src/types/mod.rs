//! Type definitions shared by the HTTP services
//!
//! - `response` - status bodies and health checks

pub mod response;

pub use response::{HealthResponse, HealthStatus, ServiceHealth, StatusResponse};
