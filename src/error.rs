// HTTP API error types
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::services::ServiceError;

const INTERNAL_MESSAGE: &str = "Internal server error";

/// Transport-level failure. The message is written to the client verbatim as
/// a plain-text body.
#[derive(Debug)]
pub enum ApiError {
    // 400 Bad Request
    BadRequest(String),

    // 401 Unauthorized
    Unauthorized(String),

    // 403 Forbidden
    Forbidden(String),

    // 404 Not Found
    NotFound(String),

    // 409 Conflict
    Conflict(String),

    // 500 Internal Server Error; the detail is logged, never sent
    InternalServerError(String),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Client-safe message
    pub fn message(&self) -> &str {
        match self {
            ApiError::BadRequest(msg)
            | ApiError::Unauthorized(msg)
            | ApiError::Forbidden(msg)
            | ApiError::NotFound(msg)
            | ApiError::Conflict(msg) => msg,
            ApiError::InternalServerError(_) => INTERNAL_MESSAGE,
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        ApiError::Unauthorized(message.into())
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::BadRequest(msg) => ApiError::BadRequest(msg),
            ServiceError::Unauthorized(msg) => ApiError::Unauthorized(msg),
            ServiceError::Forbidden(msg) => ApiError::Forbidden(msg),
            ServiceError::NotFound(msg) => ApiError::NotFound(msg),
            ServiceError::Conflict(msg) => ApiError::Conflict(msg),
            ServiceError::Internal(detail) => ApiError::InternalServerError(detail),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::InternalServerError(detail) = &self {
            tracing::error!(error = %detail, "request failed");
        }
        (self.status_code(), self.message().to_string()).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_errors_map_to_statuses() {
        let cases = [
            (ServiceError::BadRequest("b".into()), StatusCode::BAD_REQUEST),
            (ServiceError::unauthorized("u"), StatusCode::UNAUTHORIZED),
            (ServiceError::Forbidden("f".into()), StatusCode::FORBIDDEN),
            (ServiceError::not_found("n"), StatusCode::NOT_FOUND),
            (ServiceError::conflict("c"), StatusCode::CONFLICT),
            (ServiceError::Internal("boom".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, status) in cases {
            assert_eq!(ApiError::from(err).status_code(), status);
        }
    }

    #[test]
    fn internal_detail_is_not_exposed() {
        let err = ApiError::from(ServiceError::Internal("connection refused at 10.0.0.3".into()));
        assert_eq!(err.message(), "Internal server error");
    }

    #[test]
    fn messages_pass_through_verbatim() {
        let err = ApiError::from(ServiceError::not_found("There is no user with such ID"));
        assert_eq!(err.to_string(), "There is no user with such ID");
    }
}
