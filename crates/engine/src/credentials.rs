//! Credential hashing.
//!
//! Secrets are stored as Argon2id PHC strings (algorithm, params and a
//! random per-user salt are embedded in the string). Verification never
//! compares plaintext.

use argon2::{
    Argon2,
    password_hash::{
        PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng,
    },
};

use crate::{EngineError, ResultEngine};

pub(crate) fn hash_secret(secret: &str) -> ResultEngine<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(secret.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|err| EngineError::PasswordHash(err.to_string()))
}

/// Returns `Ok(false)` on a mismatch; a malformed stored hash is an error.
pub(crate) fn verify_secret(secret: &str, stored: &str) -> ResultEngine<bool> {
    let parsed =
        PasswordHash::new(stored).map_err(|err| EngineError::PasswordHash(err.to_string()))?;
    match Argon2::default().verify_password(secret.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(err) => Err(EngineError::PasswordHash(err.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_is_salted_and_not_plaintext() {
        let a = hash_secret("secret").unwrap();
        let b = hash_secret("secret").unwrap();
        assert_ne!(a, "secret");
        assert_ne!(a, b);
        assert!(a.starts_with("$argon2id$"));
    }

    #[test]
    fn verify_is_case_sensitive() {
        let stored = hash_secret("Secret").unwrap();
        assert!(verify_secret("Secret", &stored).unwrap());
        assert!(!verify_secret("secret", &stored).unwrap());
    }

    #[test]
    fn malformed_hash_is_an_error() {
        let err = verify_secret("secret", "secret").unwrap_err();
        assert!(matches!(err, EngineError::PasswordHash(_)));
    }
}
