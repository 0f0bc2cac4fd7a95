//! Token module
//!
//! - one-time token generation for e-mailed links
//! - JWT access and refresh token issuing and verification
//! - refresh token revocation backed by the cache

mod config;
mod generator;
mod revocation;
mod service;

#[cfg(test)]
mod tests;

pub use config::TokenServiceConfig;
pub use generator::{generate_token, TOKEN_BYTES};
pub use revocation::RevocationList;
pub use service::TokenService;
