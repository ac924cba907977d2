//! Verification of decoded Basic credentials against the configured identity.
//!
//! Passwords are stored as Argon2id PHC strings, so the salt and parameters
//! travel with the hash.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use subtle::ConstantTimeEq;

use crate::auth::basic::BasicAuthConfig;

/// Decides whether a username/password pair identifies a known principal.
pub trait CredentialVerifier: Send + Sync {
    fn verify(&self, username: &str, password: &str) -> bool;
}

/// A single configured identity.
#[derive(Clone)]
pub struct StaticCredentials {
    username: String,
    password_hash: String,
}

impl StaticCredentials {
    pub fn new(username: impl Into<String>, password_hash: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password_hash: password_hash.into(),
        }
    }

    pub fn from_config(config: &BasicAuthConfig) -> Self {
        Self::new(config.username.clone(), config.password_hash.clone())
    }
}

impl CredentialVerifier for StaticCredentials {
    fn verify(&self, username: &str, password: &str) -> bool {
        let username_ok: bool = username.as_bytes().ct_eq(self.username.as_bytes()).into();

        // Run the hash check even on a username miss so timing does not leak
        // which half was wrong.
        let password_ok = match verify_password(password, &self.password_hash) {
            Ok(matched) => matched,
            Err(e) => {
                tracing::error!(error = %e, "Configured password hash is not a valid PHC string");
                false
            }
        };

        username_ok && password_ok
    }
}

/// Hash a plaintext password with Argon2id and a random salt, returning the
/// PHC string.
pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    Ok(Argon2::default()
        .hash_password(password.as_bytes(), &salt)?
        .to_string())
}

/// Check a plaintext password against a PHC string.
///
/// `Ok(false)` on mismatch; `Err` only when the stored hash cannot be parsed.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, argon2::password_hash::Error> {
    let parsed = PasswordHash::new(hash)?;
    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(e),
    }
}
