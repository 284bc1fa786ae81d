//! Argon2id password hashing and verification.
//!
//! Hashes use a random salt from [`OsRng`] and are stored in PHC string
//! format, so parameters and salt travel with the hash.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use std::sync::OnceLock;

static DUMMY_HASH: OnceLock<String> = OnceLock::new();

/// Hash a plaintext password, returning the PHC-formatted string.
pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default().hash_password(password.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

/// Verify a plaintext password against a stored PHC hash.
///
/// `Ok(false)` on mismatch; `Err` only if the stored hash is unreadable.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, argon2::password_hash::Error> {
    let parsed_hash = PasswordHash::new(hash)?;
    match Argon2::default().verify_password(password.as_bytes(), &parsed_hash) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(e),
    }
}

/// Hash checked when no account matches a login, so an unknown email
/// costs the same argon2 work as a wrong password.
fn dummy_hash() -> &'static str {
    DUMMY_HASH.get_or_init(|| hash_password("no-such-account").unwrap_or_default())
}

/// Run a verification whose outcome is discarded, for the unknown-email
/// branch of login.
pub fn verify_against_dummy(password: &str) {
    let _ = verify_password(password, dummy_hash());
}
