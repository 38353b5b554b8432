//! Authentication middleware

use axum::{
    body::Body,
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
    middleware::Next,
    response::Response,
};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::{
    constants::roles,
    error::{AppError, AppResult},
    services::AuthService,
    state::AppState,
    utils::cookie::read_cookie,
};

/// Identity resolved from a live session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    pub id: Uuid,
    pub role: String,
    pub session_id: String,
}

impl AuthenticatedUser {
    pub fn is_admin(&self) -> bool {
        self.role == roles::ADMIN
    }
}

impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or(AppError::Unauthorized)
    }
}

/// Session token from the session cookie, falling back to a Bearer header
pub fn extract_token(headers: &HeaderMap, cookie_name: &str) -> Option<String> {
    read_cookie(headers, cookie_name).or_else(|| {
        headers
            .get(AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .and_then(|h| h.strip_prefix("Bearer "))
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
    })
}

/// Verify a token and check its session has not been revoked
pub async fn resolve_session(state: &AppState, token: &str) -> AppResult<AuthenticatedUser> {
    let claims = AuthService::verify_token(token, &state.config().session.secret)?;

    let user_id = Uuid::parse_str(&claims.sub).map_err(|_| AppError::InvalidToken)?;

    if !state.sessions().is_active(&claims.jti).await? {
        debug!(user_id = %user_id, "Session revoked or expired");
        return Err(AppError::Unauthorized);
    }

    Ok(AuthenticatedUser {
        id: user_id,
        role: claims.role,
        session_id: claims.jti,
    })
}

/// Authentication middleware
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let path = request.uri().path().to_string();

    let Some(token) = extract_token(request.headers(), &state.config().session.cookie_name) else {
        debug!(path = %path, "Auth failed: no session cookie or Authorization header");
        return Err(AppError::Unauthorized);
    };

    let user = resolve_session(&state, &token).await.map_err(|e| {
        debug!(path = %path, error = ?e, "Auth failed: session could not be resolved");
        e
    })?;

    debug!(path = %path, user_id = %user.id, role = %user.role, "User authenticated");

    request.extensions_mut().insert(user.clone());
    let mut response = next.run(request).await;
    // Surfaced to the request logger
    response.extensions_mut().insert(user);
    Ok(response)
}

/// Reject non-admin sessions
pub fn require_admin(auth_user: &AuthenticatedUser) -> AppResult<()> {
    if !auth_user.is_admin() {
        return Err(AppError::Forbidden("Admin access required".to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{header::COOKIE, HeaderValue};

    #[test]
    fn test_extract_token_prefers_cookie() {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_static("auth=from-cookie"));
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer from-header"));

        assert_eq!(extract_token(&headers, "auth").as_deref(), Some("from-cookie"));
    }

    #[test]
    fn test_extract_token_from_bearer() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer abc"));
        assert_eq!(extract_token(&headers, "auth").as_deref(), Some("abc"));

        headers.insert(AUTHORIZATION, HeaderValue::from_static("Basic abc"));
        assert_eq!(extract_token(&headers, "auth"), None);
    }

    #[test]
    fn test_require_admin() {
        let mut user = AuthenticatedUser {
            id: Uuid::new_v4(),
            role: roles::MEMBER.to_string(),
            session_id: "s".to_string(),
        };
        assert!(matches!(require_admin(&user), Err(AppError::Forbidden(_))));

        user.role = roles::ADMIN.to_string();
        assert!(require_admin(&user).is_ok());
    }
}
