//! Password hashing and verification utilities
//!
//! Argon2id hashing for stored credentials, plus a dummy-verification path
//! so login timing does not reveal whether an email exists.

use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use rand::rngs::OsRng;
use std::sync::OnceLock;
use tracing::{debug, error};

/// Error types for password operations
#[derive(Debug, thiserror::Error)]
pub enum PasswordError {
    #[error("Failed to hash password: {0}")]
    HashingFailed(String),
    #[error("Failed to verify password: {0}")]
    VerificationFailed(String),
    #[error("Invalid password hash format")]
    InvalidHashFormat,
}

pub trait PasswordUtils {
    /// Hashes the given password using the Argon2id algorithm
    fn hash_password(password: &str) -> Result<String, PasswordError>;

    /// Verifies the given password against the stored hash
    fn verify_password(password: &str, hash: &str) -> Result<bool, PasswordError>;
}

pub struct PasswordUtilsImpl;

impl PasswordUtils for PasswordUtilsImpl {
    fn hash_password(password: &str) -> Result<String, PasswordError> {
        let salt = SaltString::generate(OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| {
                error!("password hashing failed: {e}");
                PasswordError::HashingFailed(e.to_string())
            })
    }

    fn verify_password(password: &str, hash: &str) -> Result<bool, PasswordError> {
        let parsed = PasswordHash::new(hash).map_err(|e| {
            debug!("stored hash unparsable: {e}");
            PasswordError::InvalidHashFormat
        })?;

        match Argon2::default().verify_password(password.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(e) => Err(PasswordError::VerificationFailed(e.to_string())),
        }
    }
}

impl PasswordUtilsImpl {
    /// Verify against a throwaway hash. Called on login when the email is
    /// unknown so both branches pay the Argon2 cost.
    pub fn verify_dummy(password: &str) {
        static DUMMY_HASH: OnceLock<String> = OnceLock::new();
        let hash = DUMMY_HASH.get_or_init(|| {
            PasswordUtilsImpl::hash_password("dummy-timing-equalizer")
                .unwrap_or_else(|_| String::new())
        });
        if !hash.is_empty() {
            let _ = PasswordUtilsImpl::verify_password(password, hash);
        }
    }
}
