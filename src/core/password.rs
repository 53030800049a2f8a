//! Password hashing seam.
//!
//! User operations receive a [`PasswordHasher`] instead of hashing directly so
//! tests can swap in a cheap implementation. Production code uses
//! [`Argon2Hasher`], which stores Argon2id hashes in PHC string format.

use crate::errors::{Error, Result};
use argon2::{
    Argon2,
    password_hash::{
        PasswordHash, PasswordHasher as _, PasswordVerifier as _, SaltString, rand_core::OsRng,
    },
};

/// Turns plaintext passwords into opaque stored hashes.
pub trait PasswordHasher: Send + Sync {
    /// Hashes `plaintext` with a fresh salt.
    fn hash_password(&self, plaintext: &str) -> Result<String>;

    /// Checks `plaintext` against a hash produced by [`Self::hash_password`].
    fn verify_password(&self, plaintext: &str, hash: &str) -> Result<bool>;
}

/// Argon2id hasher with the crate's default parameters.
#[derive(Debug, Default, Clone, Copy)]
pub struct Argon2Hasher;

impl Argon2Hasher {
    /// Creates a hasher with default Argon2id parameters.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl PasswordHasher for Argon2Hasher {
    fn hash_password(&self, plaintext: &str) -> Result<String> {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(plaintext.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| Error::PasswordHash {
                message: e.to_string(),
            })
    }

    fn verify_password(&self, plaintext: &str, hash: &str) -> Result<bool> {
        let parsed = PasswordHash::new(hash).map_err(|e| Error::PasswordHash {
            message: e.to_string(),
        })?;
        Ok(Argon2::default()
            .verify_password(plaintext.as_bytes(), &parsed)
            .is_ok())
    }
}
