//! Session token formatting and hashing.
//!
//! Tokens look like `vt_<48 hex chars>`. The plaintext token is handed to
//! the client once; the database only ever sees its SHA-256 digest.

use rand::{RngCore, rngs::OsRng};
use sha2::{Digest, Sha256};

/// Session token identifier prefix.
pub const SESSION_TOKEN_PREFIX: &str = "vt";

/// Number of secret bytes encoded in a token.
pub const SESSION_TOKEN_SECRET_BYTES: usize = 24;

/// Generate a fresh random session token.
#[must_use]
pub fn generate_token() -> String {
    let mut secret = [0u8; SESSION_TOKEN_SECRET_BYTES];
    OsRng.fill_bytes(&mut secret);

    format!("{SESSION_TOKEN_PREFIX}_{}", to_hex(&secret))
}

/// Hash a plaintext token for storage or lookup.
#[must_use]
pub fn hash_token(token: &str) -> String {
    let digest = Sha256::digest(token.as_bytes());

    to_hex(&digest)
}

/// Whether a presented token is plausibly one of ours.
///
/// This is a cheap shape check before hitting the database, not a
/// validity check.
#[must_use]
pub fn has_token_shape(token: &str) -> bool {
    match token.strip_prefix(SESSION_TOKEN_PREFIX) {
        Some(rest) => match rest.strip_prefix('_') {
            Some(secret) => {
                secret.len() == SESSION_TOKEN_SECRET_BYTES * 2
                    && secret.bytes().all(|b| b.is_ascii_hexdigit())
            }
            None => false,
        },
        None => false,
    }
}

fn to_hex(bytes: &[u8]) -> String {
    use std::fmt::Write;

    bytes.iter().fold(
        String::with_capacity(bytes.len() * 2),
        |mut out, byte| {
            let _ = write!(out, "{byte:02x}");
            out
        },
    )
}
