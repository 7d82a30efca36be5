//! Password hashing and verification using Argon2id

use crate::error::{AppError, Result};
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

/// Hash a password using Argon2id
///
/// A random 16-byte salt is generated per call, so the same plaintext
/// produces a different digest every time.
///
/// Returns a PHC-formatted hash string safe for database storage.
pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    let password_hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AppError::Internal(format!("Password hashing failed: {}", e)))?
        .to_string();

    Ok(password_hash)
}

/// Verify a password against its stored digest
///
/// Total over its inputs: a malformed or truncated digest yields `false`,
/// never an error to the caller. Comparison is delegated to Argon2's
/// constant-time verifier.
pub fn verify_password(password: &str, password_hash: &str) -> bool {
    let parsed_hash = match PasswordHash::new(password_hash) {
        Ok(h) => h,
        Err(e) => {
            tracing::warn!("Rejecting malformed password digest: {}", e);
            return false;
        }
    };

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_and_verify_round_trip() {
        let hash = hash_password("secret123").expect("should hash");
        assert!(verify_password("secret123", &hash));
    }

    #[test]
    fn wrong_password_is_rejected() {
        let hash = hash_password("secret123").expect("should hash");
        assert!(!verify_password("wrong", &hash));
    }

    #[test]
    fn same_password_hashes_differently() {
        let h1 = hash_password("secret123").expect("should hash");
        let h2 = hash_password("secret123").expect("should hash");
        // Different salts should produce different digests
        assert_ne!(h1, h2);
    }

    #[test]
    fn malformed_digest_verifies_false_without_panicking() {
        assert!(!verify_password("secret123", ""));
        assert!(!verify_password("secret123", "not-a-phc-string"));
        assert!(!verify_password("secret123", "$argon2id$v=19$truncated"));
    }
}
