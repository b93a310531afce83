use thiserror::Error;

use crate::auth::{JwtError, PasswordError};
use crate::database::DatabaseError;
use crate::filter::FilterError;

/// Returned when the store rejects a write on a schema constraint.
pub const CONSTRAINT_MESSAGE: &str = "Request violates a data constraint.";

/// Outcome of a failed orchestration step. Every variant except `Internal`
/// carries the exact message the client sees.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ServiceError {
    pub fn unauthorized(message: impl Into<String>) -> Self {
        ServiceError::Unauthorized(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ServiceError::NotFound(message.into())
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        ServiceError::Conflict(message.into())
    }
}

impl From<DatabaseError> for ServiceError {
    fn from(err: DatabaseError) -> Self {
        match err {
            DatabaseError::Constraint(constraint) => {
                tracing::debug!(%constraint, "write rejected by constraint");
                ServiceError::Forbidden(CONSTRAINT_MESSAGE.to_string())
            }
            other => ServiceError::Internal(other.to_string()),
        }
    }
}

impl From<FilterError> for ServiceError {
    fn from(err: FilterError) -> Self {
        ServiceError::BadRequest(err.to_string())
    }
}

impl From<PasswordError> for ServiceError {
    fn from(err: PasswordError) -> Self {
        ServiceError::Internal(err.to_string())
    }
}

impl From<JwtError> for ServiceError {
    fn from(err: JwtError) -> Self {
        ServiceError::Internal(err.to_string())
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;
