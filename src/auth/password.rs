//! Password hashing.
//!
//! Argon2 is CPU-bound, so both operations run on the blocking pool rather
//! than on the async runtime.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher as _, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, Version,
};
use async_trait::async_trait;
use thiserror::Error;
use tokio::task;

use crate::config::SecurityConfig;

#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("Invalid Argon2 parameters: {0}")]
    InvalidParams(String),

    #[error("Password hashing failed: {0}")]
    Hashing(String),

    #[error("Stored password hash is malformed: {0}")]
    MalformedHash(String),

    #[error("Password task failed: {0}")]
    Task(#[from] task::JoinError),
}

#[async_trait]
pub trait PasswordHasher: Send + Sync {
    /// One-way hash in PHC string format.
    async fn hash(&self, password: &str) -> Result<String, PasswordError>;

    /// Constant-time check of `password` against a stored hash.
    async fn verify(&self, password: &str, hash: &str) -> Result<bool, PasswordError>;
}

/// Argon2id hasher with configurable cost.
#[derive(Clone)]
pub struct Argon2PasswordHasher {
    params: Params,
}

impl Argon2PasswordHasher {
    pub fn new(memory_kib: u32, iterations: u32, parallelism: u32) -> Result<Self, PasswordError> {
        let params = Params::new(memory_kib, iterations, parallelism, None)
            .map_err(|e| PasswordError::InvalidParams(e.to_string()))?;

        Ok(Self { params })
    }

    pub fn from_config(config: &SecurityConfig) -> Result<Self, PasswordError> {
        Self::new(config.argon2_memory_kib, config.argon2_iterations, config.argon2_parallelism)
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }
}

#[async_trait]
impl PasswordHasher for Argon2PasswordHasher {
    async fn hash(&self, password: &str) -> Result<String, PasswordError> {
        let argon2 = self.argon2();
        let password = password.to_string();

        task::spawn_blocking(move || {
            let salt = SaltString::generate(&mut OsRng);
            argon2
                .hash_password(password.as_bytes(), &salt)
                .map(|hash| hash.to_string())
                .map_err(|e| PasswordError::Hashing(e.to_string()))
        })
        .await?
    }

    async fn verify(&self, password: &str, hash: &str) -> Result<bool, PasswordError> {
        let argon2 = self.argon2();
        let password = password.to_string();
        let hash = hash.to_string();

        task::spawn_blocking(move || {
            // Cost parameters are read from the PHC string, not from `argon2`.
            let parsed = PasswordHash::new(&hash).map_err(|e| PasswordError::MalformedHash(e.to_string()))?;
            Ok(argon2.verify_password(password.as_bytes(), &parsed).is_ok())
        })
        .await?
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hasher() -> Argon2PasswordHasher {
        Argon2PasswordHasher::new(1024, 1, 1).unwrap()
    }

    #[tokio::test]
    async fn verifies_matching_password_only() {
        let hasher = hasher();
        let hash = hasher.hash("correct horse").await.unwrap();

        assert!(hash.starts_with("$argon2id$"));
        assert!(hasher.verify("correct horse", &hash).await.unwrap());
        assert!(!hasher.verify("wrong horse", &hash).await.unwrap());
    }

    #[tokio::test]
    async fn same_password_hashes_differently() {
        let hasher = hasher();
        let first = hasher.hash("password123").await.unwrap();
        let second = hasher.hash("password123").await.unwrap();
        assert_ne!(first, second);
    }

    #[tokio::test]
    async fn malformed_hash_is_an_error() {
        let err = hasher().verify("password123", "not-a-hash").await.unwrap_err();
        assert!(matches!(err, PasswordError::MalformedHash(_)));
    }

    #[test]
    fn rejects_impossible_params() {
        assert!(Argon2PasswordHasher::new(1, 1, 1).is_err());
    }
}
