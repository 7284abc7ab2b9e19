//! Password value object - Domain layer password handling.
//!
//! Both principal kinds (clients and staff users) share this value object,
//! so there is exactly one hashing scheme: Argon2id with a random salt per
//! hash, stored as a PHC string.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use once_cell::sync::Lazy;

use crate::errors::{AppError, AppResult};

/// Hash checked when the login does not exist, so that unknown logins
/// cost the same as wrong passwords.
static DUMMY_HASH: Lazy<String> =
    Lazy::new(|| Password::hash("dummy-password-for-timing").unwrap_or_default());

/// Password value object that handles hashing and verification.
#[derive(Clone)]
pub struct Password {
    hash: String,
}

// Don't expose hash in debug output
impl std::fmt::Debug for Password {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Password")
            .field("hash", &"[REDACTED]")
            .finish()
    }
}

impl Password {
    /// Create a new password by hashing the plain text.
    ///
    /// # Errors
    /// Returns validation error if the password is empty or whitespace.
    pub fn new(plain_text: &str) -> AppResult<Self> {
        if plain_text.trim().is_empty() {
            return Err(AppError::validation("Password is required"));
        }

        let hash = Self::hash(plain_text)?;
        Ok(Self { hash })
    }

    /// Create a Password from an existing hash (from database).
    pub fn from_hash(hash: String) -> Self {
        Self { hash }
    }

    /// Get the hash string for storage.
    pub fn as_str(&self) -> &str {
        &self.hash
    }

    /// Consume and return the hash string.
    pub fn into_string(self) -> String {
        self.hash
    }

    /// Verify a plain text password against this hash.
    ///
    /// An empty candidate never verifies.
    pub fn verify(&self, plain_text: &str) -> bool {
        if plain_text.is_empty() {
            return false;
        }
        Self::verify_hash(plain_text, &self.hash).unwrap_or(false)
    }

    /// Verify against the stored hash when present, otherwise burn the same
    /// amount of work on a dummy hash and fail.
    pub fn verify_optional(stored: Option<&str>, plain_text: &str) -> bool {
        match stored {
            Some(hash) => Self::from_hash(hash.to_string()).verify(plain_text),
            None => {
                let _ = Self::verify_hash(plain_text, &DUMMY_HASH);
                false
            }
        }
    }

    fn hash(plain_text: &str) -> AppResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Self::argon2()
            .hash_password(plain_text.as_bytes(), &salt)
            .map_err(|e| AppError::internal(format!("Password hash failed: {}", e)))?;
        Ok(hash.to_string())
    }

    fn verify_hash(plain_text: &str, hash: &str) -> AppResult<bool> {
        let parsed = PasswordHash::new(hash)
            .map_err(|e| AppError::internal(format!("Invalid hash format: {}", e)))?;
        Ok(Self::argon2()
            .verify_password(plain_text.as_bytes(), &parsed)
            .is_ok())
    }

    #[inline]
    fn argon2() -> Argon2<'static> {
        Argon2::default()
    }
}

impl From<Password> for String {
    fn from(password: Password) -> Self {
        password.hash
    }
}

impl PartialEq for Password {
    fn eq(&self, other: &Self) -> bool {
        self.hash == other.hash
    }
}

impl Eq for Password {}
