//! Content hashing.

use sha2::{Digest, Sha256};

/// Number of hex characters of a hash quoted in audit details.
pub const SHORT_HASH_LEN: usize = 12;

/// Lowercase hex SHA-256 of `content`.
pub fn content_hash(content: &str) -> String {
    hex::encode(Sha256::digest(content.as_bytes()))
}

/// The prefix of `hash` quoted in audit details.
pub fn short_hash(hash: &str) -> &str {
    hash.get(..SHORT_HASH_LEN).unwrap_or(hash)
}
