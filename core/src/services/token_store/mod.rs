//! One-time token storage and resend rate limiting
//!
//! Tokens mailed for e-mail verification and password reset live only in the
//! cache, keyed both by token and by e-mail. The resend cooldown needs no
//! state of its own: it is computed from the TTL left on the current token.

mod cooldown;
mod store;

#[cfg(test)]
mod tests;

pub use cooldown::{CooldownPolicy, CooldownStatus};
pub use store::OneTimeTokenStore;
