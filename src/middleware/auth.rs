use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::auth::{Claims, TokenIssuer};
use crate::error::ApiError;

/// Authenticated caller, injected as a request extension.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AuthUser {
    pub user_id: Uuid,
}

impl From<Claims> for AuthUser {
    fn from(claims: Claims) -> Self {
        Self { user_id: claims.sub }
    }
}

/// Rejects requests without a valid bearer token and injects [`AuthUser`].
pub async fn jwt_auth_middleware(
    State(tokens): State<TokenIssuer>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_jwt_from_headers(&headers).map_err(ApiError::unauthorized)?;

    let claims = tokens.verify(token).map_err(|e| {
        tracing::debug!(error = %e, "rejected bearer token");
        ApiError::unauthorized("Invalid or expired token")
    })?;

    request.extensions_mut().insert(AuthUser::from(claims));

    Ok(next.run(request).await)
}

fn extract_jwt_from_headers(headers: &HeaderMap) -> Result<&str, &'static str> {
    let auth_str = headers
        .get(header::AUTHORIZATION)
        .ok_or("Missing Authorization header")?
        .to_str()
        .map_err(|_| "Invalid Authorization header format")?;

    let token = auth_str
        .strip_prefix("Bearer ")
        .ok_or("Authorization header must use Bearer token format")?
        .trim();

    if token.is_empty() {
        return Err("Empty JWT token");
    }
    Ok(token)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn extracts_bearer_token() {
        assert_eq!(extract_jwt_from_headers(&headers("Bearer abc.def")), Ok("abc.def"));
    }

    #[test]
    fn rejects_missing_or_malformed_headers() {
        assert_eq!(extract_jwt_from_headers(&HeaderMap::new()), Err("Missing Authorization header"));
        assert!(extract_jwt_from_headers(&headers("Basic dXNlcjpwYXNz")).is_err());
        assert_eq!(extract_jwt_from_headers(&headers("Bearer   ")), Err("Empty JWT token"));
    }
}
