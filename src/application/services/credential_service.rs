//! Password hashing and user id derivation.
//!
//! Passwords are hashed with Argon2id using the library's default work factor
//! and a random salt per hash; the PHC string embeds both. User ids are a fast
//! SHA-256 digest of the username: a stable key, not a secret.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use serde_json::json;
use sha2::{Digest, Sha256};
use tracing::{error, warn};

use crate::error::AppError;

/// Hashes a password into an Argon2 PHC string.
///
/// This is deliberately slow. Async callers should run it on a blocking
/// thread (see [`crate::application::services::AuthService`]).
///
/// # Errors
///
/// Returns [`AppError::Internal`] if the hasher fails (e.g. allocation failure).
pub fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| {
            error!(error = %e, "argon2 hash_password error");
            AppError::internal("Failed to hash password", json!({}))
        })
}

/// Checks a password against a stored PHC string.
///
/// Never fails: a malformed hash is logged and treated as a mismatch.
pub fn verify_password(password: &str, hash: &str) -> bool {
    let parsed = match PasswordHash::new(hash) {
        Ok(parsed) => parsed,
        Err(e) => {
            warn!(error = %e, "stored password hash is malformed");
            return false;
        }
    };

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

/// Derives the stable user id for a username.
///
/// Returns 64 lowercase hex characters.
pub fn derive_user_id(username: &str) -> String {
    hex::encode(Sha256::digest(username.as_bytes()))
}
