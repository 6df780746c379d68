//! Credential hashing shared across Warden crates
//!
//! Passwords are stored as argon2id PHC strings
//! (`$argon2id$v=19$...`) with a random per-password salt.

use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use rand_core::OsRng;

/// Credential hashing failure
#[derive(Debug, thiserror::Error)]
#[error("Credential hashing failed: {0}")]
pub struct CredentialError(String);

/// Hash a plaintext password into a PHC string suitable for storage.
pub fn hash_password(password: &str) -> Result<String, CredentialError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| CredentialError(e.to_string()))?;
    Ok(hash.to_string())
}

/// Verify a candidate password against a stored PHC string.
///
/// A stored value that does not parse counts as a mismatch.
pub fn verify_password(candidate: &str, stored_hash: &str) -> bool {
    let parsed = match PasswordHash::new(stored_hash) {
        Ok(parsed) => parsed,
        Err(e) => {
            tracing::warn!(error = %e, "Stored password hash is not a valid PHC string");
            return false;
        }
    };

    Argon2::default()
        .verify_password(candidate.as_bytes(), &parsed)
        .is_ok()
}
