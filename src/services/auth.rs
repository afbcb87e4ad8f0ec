//! Administrator authentication service

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use crate::{
    config::AuthConfig,
    error::{AppError, AppResult},
};

/// Verifies administrator logins against the shared secret.
///
/// The configured plaintext is hashed once at construction; every login is
/// then checked with argon2's constant-time verification.
#[derive(Clone)]
pub struct AuthService {
    admin_hash: String,
}

impl AuthService {
    pub fn new(config: &AuthConfig) -> AppResult<Self> {
        let salt = SaltString::generate(&mut OsRng);
        let admin_hash = Argon2::default()
            .hash_password(config.admin_password.as_bytes(), &salt)
            .map_err(|e| AppError::Internal(format!("Failed to hash administrator password: {}", e)))?
            .to_string();
        Ok(Self { admin_hash })
    }

    /// Check a submitted password against the administrator secret.
    pub fn verify_password(&self, password: &str) -> AppResult<bool> {
        let parsed_hash = PasswordHash::new(&self.admin_hash)
            .map_err(|_| AppError::Internal("Invalid administrator password hash".to_string()))?;
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }
}
