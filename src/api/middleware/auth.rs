//! Caller identification for staff-account operations.
//!
//! A signed bearer token from `POST /users/login` wins; without one the
//! role asserted in `X-User-Role` is taken as is.

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
};

use crate::api::AppState;
use crate::config::{Config, BEARER_TOKEN_PREFIX, USER_ROLE_HEADER};
use crate::domain::StaffRole;
use crate::errors::{AppError, AppResult};
use crate::services::verify_token;

/// Role of the caller, `None` when absent or unrecognized.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CallerRole(pub Option<StaffRole>);

#[async_trait]
impl FromRequestParts<AppState> for CallerRole {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        resolve_role(&parts.headers, &state.config).map(CallerRole)
    }
}

/// Resolve the caller's role from request headers.
///
/// A present but invalid bearer token is an error rather than a fallback
/// to the asserted header.
pub fn resolve_role(headers: &HeaderMap, config: &Config) -> AppResult<Option<StaffRole>> {
    if let Some(auth_header) = headers.get(AUTHORIZATION) {
        let token = auth_header
            .to_str()
            .ok()
            .and_then(|h| h.strip_prefix(BEARER_TOKEN_PREFIX))
            .ok_or(AppError::Unauthorized)?;

        let claims = verify_token(token, config)?;
        tracing::debug!(user_id = claims.sub, role = %claims.role, "Caller from token");
        return Ok(claims.staff_role());
    }

    Ok(headers
        .get(USER_ROLE_HEADER)
        .and_then(|h| h.to_str().ok())
        .and_then(|role| role.parse().ok()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;
    use jsonwebtoken::{encode, EncodingKey, Header};

    use crate::services::Claims;

    fn config() -> Config {
        Config::new(None, "test-secret-key-that-is-long-enough!!").unwrap()
    }

    fn token(role: &str, config: &Config) -> String {
        let now = chrono::Utc::now().timestamp();
        let claims = Claims {
            sub: 1,
            role: role.to_string(),
            exp: now + 60,
            iat: now,
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(config.jwt_secret_bytes()),
        )
        .unwrap()
    }

    #[test]
    fn test_header_role() {
        let mut headers = HeaderMap::new();
        headers.insert(USER_ROLE_HEADER, HeaderValue::from_static("super_admin"));
        assert_eq!(
            resolve_role(&headers, &config()).unwrap(),
            Some(StaffRole::SuperAdmin)
        );
    }

    #[test]
    fn test_unknown_or_missing_role_is_none() {
        let mut headers = HeaderMap::new();
        assert_eq!(resolve_role(&headers, &config()).unwrap(), None);

        headers.insert(USER_ROLE_HEADER, HeaderValue::from_static("root"));
        assert_eq!(resolve_role(&headers, &config()).unwrap(), None);
    }

    #[test]
    fn test_token_overrides_header() {
        let config = config();
        let mut headers = HeaderMap::new();
        headers.insert(USER_ROLE_HEADER, HeaderValue::from_static("super_admin"));
        let bearer = format!("Bearer {}", token("operator", &config));
        headers.insert(AUTHORIZATION, HeaderValue::from_str(&bearer).unwrap());

        assert_eq!(
            resolve_role(&headers, &config).unwrap(),
            Some(StaffRole::Operator)
        );
    }

    #[test]
    fn test_bad_token_is_rejected() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer nope"));
        assert!(matches!(resolve_role(&headers, &config()), Err(AppError::Jwt(_))));

        headers.insert(AUTHORIZATION, HeaderValue::from_static("Basic abc"));
        assert!(matches!(
            resolve_role(&headers, &config()),
            Err(AppError::Unauthorized)
        ));
    }
}
