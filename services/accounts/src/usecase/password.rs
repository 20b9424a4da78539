//! Credential material: Argon2id password hashing and single-use token
//! generation.

use argon2::{Argon2, PasswordHasher, PasswordVerifier};
use argon2::password_hash::SaltString;
use argon2::password_hash::rand_core::OsRng;
use rand::RngExt;

use crate::domain::types::SINGLE_USE_TOKEN_LEN;
use crate::error::AccountsServiceError;

/// Charset for single-use tokens (URL-safe alphanumeric).
const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Generate an opaque random token for verification/reset links.
pub fn generate_single_use_token() -> String {
    let mut rng = rand::rng();
    (0..SINGLE_USE_TOKEN_LEN)
        .map(|_| CHARSET[rng.random_range(0..CHARSET.len())] as char)
        .collect()
}

/// Hash a plaintext password with Argon2id and a fresh random salt,
/// returning the PHC-format hash string.
pub fn hash_password(password: &str) -> Result<String, AccountsServiceError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AccountsServiceError::Internal(anyhow::anyhow!("hash password: {e}")))
}

/// Verify a plaintext password against a stored PHC-format hash.
///
/// Returns `Ok(true)` on match, `Ok(false)` on mismatch, or `Internal` if the
/// stored hash is malformed.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, AccountsServiceError> {
    let parsed_hash = argon2::PasswordHash::new(hash)
        .map_err(|e| AccountsServiceError::Internal(anyhow::anyhow!("invalid hash format: {e}")))?;

    match Argon2::default().verify_password(password.as_bytes(), &parsed_hash) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(AccountsServiceError::Internal(anyhow::anyhow!(
            "verify password: {e}"
        ))),
    }
}
