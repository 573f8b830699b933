//! Password digests in PHC string format.
//!
//! Passwords are hashed with Argon2id and a random salt. The stored string
//! (`$argon2id$v=19$m=...,t=...,p=...$salt$hash`) carries the parameters and
//! salt needed to verify it.
use argon2::{
    password_hash::{PasswordHash, PasswordHasher as _, PasswordVerifier as _, SaltString},
    Argon2,
};

/// Digest a raw password with a fresh random salt.
///
/// # Errors
/// Errors if the password cannot be hashed.
pub fn make_password(raw: &str) -> anyhow::Result<String> {
    let salt = SaltString::encode_b64(uuid::Uuid::new_v4().as_bytes())?;
    make_password_with_salt(raw, &salt)
}

/// Digest a raw password with the given salt.
///
/// # Errors
/// Errors if the password cannot be hashed.
pub fn make_password_with_salt(raw: &str, salt: &SaltString) -> anyhow::Result<String> {
    let hash = Argon2::default().hash_password(raw.as_bytes(), salt)?;
    Ok(hash.to_string())
}

/// Whether `raw` matches a stored digest. Comparison is constant-time.
#[must_use]
pub fn check_password(raw: &str, stored: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(stored) else {
        tracing::warn!("Stored password is not a PHC string");
        return false;
    };
    Argon2::default()
        .verify_password(raw.as_bytes(), &parsed)
        .is_ok()
}
