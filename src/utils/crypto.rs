//! Cryptographic utilities

use sha2::{Digest, Sha256};

/// Hash a string using SHA-256, hex encoded
pub fn hash_string(input: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(input.as_bytes());
    let result = hasher.finalize();
    hex::encode(result)
}

/// Whether a value looks like a `hash_string` digest
pub fn is_sha256_hex(value: &str) -> bool {
    value.len() == 64 && value.chars().all(|c| c.is_ascii_hexdigit())
}
