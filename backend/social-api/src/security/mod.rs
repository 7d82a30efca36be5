//! Credential and token hygiene helpers

pub mod password;

pub use password::{hash_password, verify_password};

use sha2::{Digest, Sha256};

/// SHA-256 a session token for storage.
///
/// The registry only ever sees token hashes; a leaked sessions table does
/// not leak usable bearer tokens.
pub fn hash_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    hex::encode(hasher.finalize())
}
