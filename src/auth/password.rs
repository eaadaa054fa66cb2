//! Password hashing and verification.
//!
//! bcrypt is CPU-bound, so both operations run on tokio's blocking pool.

use crate::error::FieldError;
use crate::{AppError, Result};

/// Cost used when the configuration does not set one.
pub const DEFAULT_COST: u32 = 10;
/// Lowest cost bcrypt accepts.
pub const MIN_COST: u32 = 4;
/// Highest cost bcrypt accepts.
pub const MAX_COST: u32 = 31;
/// bcrypt ignores input past this many bytes.
pub const MAX_PASSWORD_BYTES: usize = 72;

/// Hash a plaintext password with a fresh random salt.
pub async fn hash_password(plain: &str, cost: u32) -> Result<String> {
    if plain.len() > MAX_PASSWORD_BYTES {
        return Err(AppError::ValidationError(vec![FieldError::new(
            "password",
            format!("Password should be at most {} bytes long", MAX_PASSWORD_BYTES),
        )]));
    }
    let plain = plain.to_owned();
    let hash = tokio::task::spawn_blocking(move || bcrypt::hash(plain, cost)).await??;
    Ok(hash)
}

/// Check a plaintext password against a stored bcrypt hash.
///
/// A hash that cannot be parsed is an error, not a mismatch. Input longer
/// than bcrypt reads never matches.
pub async fn verify_password(plain: &str, hash: &str) -> Result<bool> {
    if plain.len() > MAX_PASSWORD_BYTES {
        return Ok(false);
    }
    let plain = plain.to_owned();
    let hash = hash.to_owned();
    let matches = tokio::task::spawn_blocking(move || bcrypt::verify(plain, &hash)).await??;
    Ok(matches)
}
