//! Password hashing and verification with Argon2id.
//!
//! Hashes are PHC strings, so parameters and salt travel with the hash and
//! can be tightened later without a migration.

use argon2::Argon2;
use argon2::password_hash::{
    PasswordHash as PhcHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng,
};

use crate::domain::user::PasswordHash;

/// Failure while hashing or verifying a password.
///
/// Only the message is kept; the underlying error types carry nothing a
/// caller can act on.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("password hashing failed: {message}")]
pub struct PasswordHashError {
    message: String,
}

impl PasswordHashError {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Hash a plain-text password into a PHC string with a fresh random salt.
pub fn hash_password(password: &str) -> Result<PasswordHash, PasswordHashError> {
    let salt = SaltString::generate(&mut OsRng);
    let phc = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|err| PasswordHashError::new(err.to_string()))?;
    Ok(PasswordHash::new(phc.to_string()))
}

/// Check a plain-text password against a stored hash.
///
/// A mismatch is `Ok(false)`; an undecodable stored hash is an error
/// because it means the store holds corrupt data.
pub fn verify_password(password: &str, hash: &PasswordHash) -> Result<bool, PasswordHashError> {
    let parsed =
        PhcHash::new(hash.as_str()).map_err(|err| PasswordHashError::new(err.to_string()))?;
    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(err) => Err(PasswordHashError::new(err.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn verifies_matching_password() {
        let hash = hash_password("correct horse").expect("hashing succeeds");
        assert_eq!(verify_password("correct horse", &hash), Ok(true));
    }

    #[rstest]
    fn rejects_wrong_password() {
        let hash = hash_password("correct horse").expect("hashing succeeds");
        assert_eq!(verify_password("battery staple", &hash), Ok(false));
    }

    #[rstest]
    fn fresh_salts_produce_distinct_hashes() {
        let first = hash_password("pw").expect("hashing succeeds");
        let second = hash_password("pw").expect("hashing succeeds");
        assert_ne!(first.as_str(), second.as_str());
    }

    #[rstest]
    fn corrupt_stored_hash_is_an_error() {
        let hash = PasswordHash::new("not-a-phc-string".to_owned());
        assert!(verify_password("pw", &hash).is_err());
    }
}
