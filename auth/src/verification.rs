use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::rand_core::RngCore;
use base64::engine::general_purpose::URL_SAFE;
use base64::Engine;

const TOKEN_BYTES: usize = 12;

/// Generate an opaque, URL-safe verification token from 12 random bytes.
pub fn generate_token() -> String {
    let mut bytes = [0u8; TOKEN_BYTES];
    OsRng.fill_bytes(&mut bytes);
    URL_SAFE.encode(bytes)
}
