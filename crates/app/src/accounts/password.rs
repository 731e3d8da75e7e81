//! Password hashing with Argon2id.

use argon2::{
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
    password_hash::{SaltString, rand_core::OsRng},
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PasswordHashError {
    #[error("failed to hash password")]
    Hash(#[source] argon2::password_hash::Error),

    #[error("stored password hash is malformed")]
    Malformed(#[source] argon2::password_hash::Error),
}

/// Hash a plaintext password into a PHC string for storage.
pub(crate) fn hash_password(password: &str) -> Result<String, PasswordHashError> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(PasswordHashError::Hash)
}

/// Verify a plaintext password against a stored PHC string.
///
/// A mismatch returns `Ok(false)`; only an unparseable stored hash is an
/// error.
pub(crate) fn verify_password(password: &str, stored: &str) -> Result<bool, PasswordHashError> {
    let parsed = PasswordHash::new(stored).map_err(PasswordHashError::Malformed)?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn hash_then_verify_accepts_original_password() -> TestResult {
        let hash = hash_password("hunter2")?;

        assert!(verify_password("hunter2", &hash)?);

        Ok(())
    }

    #[test]
    fn verify_rejects_wrong_password() -> TestResult {
        let hash = hash_password("hunter2")?;

        assert!(!verify_password("hunter3", &hash)?);

        Ok(())
    }

    #[test]
    fn verify_rejects_malformed_stored_hash() {
        let result = verify_password("hunter2", "not-a-phc-string");

        assert!(matches!(result, Err(PasswordHashError::Malformed(_))));
    }
}
