//! PBKDF2-HMAC-SHA256 password hashing.
//!
//! Hashes are stored as PHC strings, e.g.
//! `$pbkdf2-sha256$i=100000,l=32$<salt b64>$<hash b64>`.

use pbkdf2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use pbkdf2::{Params, Pbkdf2};
use rand::Rng;

use blockdesk_common::error::AppError;

const DEFAULT_ROUNDS: u32 = 100_000;
const SALT_LEN: usize = 16;
const HASH_LEN: usize = 32;

pub fn hash_password(password: &str) -> Result<String, AppError> {
    hash_with_rounds(password, DEFAULT_ROUNDS)
}

fn hash_with_rounds(password: &str, rounds: u32) -> Result<String, AppError> {
    let mut bytes = [0u8; SALT_LEN];
    rand::thread_rng().fill(&mut bytes);
    let salt = SaltString::encode_b64(&bytes)
        .map_err(|e| AppError::Internal(format!("Failed to encode salt: {}", e)))?;

    let params = Params {
        rounds,
        output_length: HASH_LEN,
    };
    let hash = Pbkdf2
        .hash_password_customized(password.as_bytes(), None, None, params, &salt)
        .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))?;

    Ok(hash.to_string())
}

/// Check `password` against a stored hash. Malformed hashes never verify.
pub fn verify_password(password: &str, stored: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(stored) else {
        return false;
    };
    Pbkdf2.verify_password(password.as_bytes(), &parsed).is_ok()
}
