use chrono::{TimeDelta, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::config::SecurityConfig;

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: Uuid,
    pub exp: i64,
    pub iat: i64,
}

impl Claims {
    pub fn new(user_id: Uuid, expiry_hours: u64) -> Result<Self, JwtError> {
        let now = Utc::now();
        let exp = i64::try_from(expiry_hours)
            .ok()
            .and_then(TimeDelta::try_hours)
            .and_then(|lifetime| now.checked_add_signed(lifetime))
            .ok_or_else(|| {
                JwtError::TokenGeneration(format!("expiry of {expiry_hours} hours is out of range"))
            })?;

        Ok(Self {
            sub: user_id,
            exp: exp.timestamp(),
            iat: now.timestamp(),
        })
    }
}

#[derive(Debug, Error)]
pub enum JwtError {
    #[error("JWT generation error: {0}")]
    TokenGeneration(String),

    #[error("Invalid JWT secret")]
    InvalidSecret,

    #[error("Invalid JWT expiry: {0} hours")]
    InvalidExpiry(u64),

    #[error("Invalid JWT token: {0}")]
    InvalidToken(String),
}

/// Signs and verifies HS256 session tokens.
#[derive(Clone)]
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    expiry_hours: u64,
    expires_in: u64,
}

impl std::fmt::Debug for TokenIssuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenIssuer")
            .field("expiry_hours", &self.expiry_hours)
            .finish_non_exhaustive()
    }
}

impl TokenIssuer {
    pub fn new(secret: &str, expiry_hours: u64) -> Result<Self, JwtError> {
        if secret.is_empty() {
            return Err(JwtError::InvalidSecret);
        }
        let expires_in = expiry_hours
            .checked_mul(3600)
            .filter(|secs| *secs > 0)
            .ok_or(JwtError::InvalidExpiry(expiry_hours))?;

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            expiry_hours,
            expires_in,
        })
    }

    pub fn from_config(config: &SecurityConfig) -> Result<Self, JwtError> {
        Self::new(&config.jwt_secret, config.jwt_expiry_hours)
    }

    /// Token lifetime in seconds, as reported to clients.
    pub fn expires_in(&self) -> u64 {
        self.expires_in
    }

    pub fn issue(&self, user_id: Uuid) -> Result<String, JwtError> {
        self.encode(&Claims::new(user_id, self.expiry_hours)?)
    }

    pub fn encode(&self, claims: &Claims) -> Result<String, JwtError> {
        encode(&Header::default(), claims, &self.encoding_key)
            .map_err(|e| JwtError::TokenGeneration(e.to_string()))
    }

    /// Checks the signature and expiry and returns the claims.
    pub fn verify(&self, token: &str) -> Result<Claims, JwtError> {
        let token_data = decode::<Claims>(token, &self.decoding_key, &Validation::default())
            .map_err(|e| JwtError::InvalidToken(e.to_string()))?;

        Ok(token_data.claims)
    }
}
