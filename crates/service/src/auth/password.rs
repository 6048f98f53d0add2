use argon2::{
    password_hash::{PasswordHasher, PasswordVerifier, SaltString},
    Argon2, PasswordHash,
};
use rand::rngs::OsRng;
use tracing::warn;

use models::validate::PASSWORD_MAX;

use super::errors::AuthError;

/// Hash a plaintext password with a fresh random salt.
///
/// Two calls on the same input produce different PHC strings; the salt is
/// embedded in the output for later verification.
pub fn hash_password(plaintext: &str) -> Result<String, AuthError> {
    if plaintext.is_empty() {
        return Err(AuthError::Validation("password must not be empty".into()));
    }
    if plaintext.len() > PASSWORD_MAX {
        return Err(AuthError::Validation(format!(
            "password must not exceed {} characters",
            PASSWORD_MAX
        )));
    }
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(plaintext.as_bytes(), &salt)
        .map_err(|e| AuthError::Hash(e.to_string()))?
        .to_string();
    Ok(hash)
}

/// Verify a plaintext password against a stored PHC-format credential.
///
/// Fails closed: a malformed stored hash logs a warning and returns false
/// rather than surfacing an error the caller might mistake for success.
/// The underlying comparison is constant-time (argon2 crate).
pub fn verify_password(plaintext: &str, stored: &str) -> bool {
    let parsed = match PasswordHash::new(stored) {
        Ok(p) => p,
        Err(e) => {
            warn!(error = %e, "malformed stored password hash");
            return false;
        }
    };
    Argon2::default()
        .verify_password(plaintext.as_bytes(), &parsed)
        .is_ok()
}
