//! Verification tokens for out-of-band access confirmation.
//!
//! A token is minted when a student asks for an unlock link, handed to the
//! client inside a short link, and redeemed once to issue an access grant.
//! Only the SHA-256 digest is ever stored server-side.

use rand::Rng;
use sha2::{Digest, Sha256};

/// Length of a generated verification token (alphanumeric characters).
pub const TOKEN_LENGTH: usize = 24;

/// Default time a verification link stays redeemable.
pub const DEFAULT_REQUEST_TTL_MINS: i64 = 30;

/// Path segment that prefixes every short link.
const VERIFY_PATH: &str = "verify";

/// A freshly minted verification token.
pub struct GeneratedToken {
    /// The plaintext token (returned to the client once, never stored).
    pub plaintext: String,
    /// The SHA-256 hex digest of the plaintext (stored in the database).
    pub hash: String,
}

/// Generate a new random verification token.
pub fn generate_token() -> GeneratedToken {
    let plaintext: String = rand::rng()
        .sample_iter(&rand::distr::Alphanumeric)
        .take(TOKEN_LENGTH)
        .map(char::from)
        .collect();
    let hash = hash_token(&plaintext);
    GeneratedToken { plaintext, hash }
}

/// Hex SHA-256 of a presented token. Refresh tokens are stored the same way.
pub fn hash_token(token: &str) -> String {
    format!("{:x}", Sha256::digest(token.as_bytes()))
}

/// Build the short link a client can open to complete verification.
///
/// Trailing slashes on `base_url` are ignored.
pub fn short_link(base_url: &str, token: &str) -> String {
    format!("{}/{VERIFY_PATH}/{token}", base_url.trim_end_matches('/'))
}

/// Reject obviously malformed tokens before touching the database.
pub fn validate_token_format(token: &str) -> Result<(), String> {
    if token.len() != TOKEN_LENGTH || !token.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err("Verification token is malformed".to_string());
    }
    Ok(())
}
