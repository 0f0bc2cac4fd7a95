//! In-process adapters
//!
//! Used by the API when started without Redis or MySQL (development) and by
//! the HTTP-level tests. State lives only as long as the value.

mod cache;
mod publisher;
mod user_repository;

pub use cache::InMemoryCache;
pub use publisher::InMemoryPublisher;
pub use user_repository::InMemoryUserRepository;
