//! Authentication middleware for Axum
//!
//! Guards protected routes: extract the bearer token, validate it
//! cryptographically, then check the session registry. The checks run in
//! that order, so an expired token reports as expired even while its
//! registry entry still exists.

use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::auth::jwt::TokenError;
use crate::state::AppState;

/// Authenticated identity inserted into request extensions by `require_auth`
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub username: String,
}

/// Why a request failed authentication. Externally these all collapse into
/// one 401 so responses cannot be used to probe accounts or session state;
/// the variant is what gets logged.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("missing bearer token")]
    MissingToken,
    #[error(transparent)]
    Token(#[from] TokenError),
    #[error("token does not match an active session")]
    SessionInvalid,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = StatusCode::UNAUTHORIZED;
        let body = Json(json!({
            "error": "Could not validate credentials",
            "code": status.as_u16(),
        }));

        (status, body).into_response()
    }
}

/// Extract bearer token from the Authorization header
fn extract_bearer_token(request: &Request) -> Option<String> {
    request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|header| header.strip_prefix("Bearer "))
        .map(String::from)
}

/// Resolve a presented token to the identity it authenticates.
///
/// The registry is consulted under the token's own subject, so a token can
/// only ever match the session of the identity it was issued to. A token
/// that fails cryptographic validation never reaches the registry; a valid
/// token whose session was superseded or closed fails the second check.
pub async fn resolve_identity(state: &AppState, token: &str) -> Result<String, AuthError> {
    let claims = state.tokens.validate(token)?;

    if !state.sessions.validate_session(&claims.sub, token).await {
        return Err(AuthError::SessionInvalid);
    }

    Ok(claims.sub)
}

/// Middleware that requires an authenticated, currently-active session
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let path = request.uri().path().to_string();

    let Some(token) = extract_bearer_token(&request) else {
        tracing::warn!(path = %path, "request rejected: no bearer token");
        return AuthError::MissingToken.into_response();
    };

    match resolve_identity(&state, &token).await {
        Ok(username) => {
            tracing::debug!(path = %path, user = %username, "request authenticated");
            request.extensions_mut().insert(AuthUser { username });
            next.run(request).await
        }
        Err(err) => {
            tracing::warn!(path = %path, error = %err, "request rejected: authentication failed");
            err.into_response()
        }
    }
}
