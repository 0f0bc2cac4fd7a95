//! Opaque one-time token generation

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use rand::{rngs::OsRng, RngCore};

/// Number of random bytes behind every one-time token
pub const TOKEN_BYTES: usize = 32;

/// Generate a URL-safe one-time token from the OS CSPRNG
///
/// 32 random bytes encode to 43 characters of unpadded URL-safe base64.
pub fn generate_token() -> String {
    let mut bytes = [0u8; TOKEN_BYTES];
    OsRng.fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}
