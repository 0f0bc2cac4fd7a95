//! Key-value cache abstraction used for one-time tokens and the revocation list

mod traits;

#[cfg(test)]
pub mod mock;

pub use traits::CacheStore;

#[cfg(test)]
pub use mock::MockCache;
