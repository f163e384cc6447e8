//! Content digests recorded alongside reports for reproducibility.

use sha2::{Digest, Sha256};

/// Hex-encoded SHA-256 of `contents`.
pub fn sha256_hex(contents: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(contents);
    hex::encode(hasher.finalize())
}
