//! Authentication endpoints

use axum::{extract::State, Extension, Json};
use serde::{Deserialize, Serialize};

use crate::{
    auth::{verify_password, AuthUser},
    error::{ApiError, ApiResult},
    security::sanitize,
    state::AppState,
};

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
}

#[derive(Debug, Serialize)]
pub struct LogoutResponse {
    pub success: bool,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct VerifyResponse {
    pub valid: bool,
    pub username: String,
}

/// POST /auth/login
///
/// Unknown username and wrong password both come back as the same generic
/// 401; the specific cause is only logged. On success the issued token
/// becomes the identity's one active session, superseding any previous one.
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> ApiResult<Json<TokenResponse>> {
    let username = sanitize(&request.username);
    let password = sanitize(&request.password);

    if username.is_empty() || password.is_empty() {
        return Err(ApiError::Validation(
            "username and password are required".to_string(),
        ));
    }

    let Some(account) = state.accounts.get(&username).await else {
        tracing::warn!(user = %username, "login failed: unknown username");
        return Err(ApiError::AuthenticationFailed);
    };

    if !verify_password(&password, &account.password_hash) {
        tracing::warn!(user = %username, "login failed: wrong password");
        return Err(ApiError::AuthenticationFailed);
    }

    let token = state.tokens.issue(&username).map_err(|e| {
        tracing::error!(user = %username, error = %e, "token signing failed");
        ApiError::Internal(e.to_string())
    })?;
    state.sessions.add_session(&username, token.clone()).await;

    tracing::info!(user = %username, "login successful");
    Ok(Json(TokenResponse {
        access_token: token,
        token_type: "bearer".to_string(),
    }))
}

/// POST /auth/logout
pub async fn logout(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Json<LogoutResponse> {
    state.sessions.remove_session(&user.username).await;
    tracing::info!(user = %user.username, "logged out");

    Json(LogoutResponse {
        success: true,
        message: "Successfully logged out".to_string(),
    })
}

/// GET /auth/verify
///
/// Reachable only through the bearer guard, so arriving here already means
/// the token is valid and matches the active session.
pub async fn verify(Extension(user): Extension<AuthUser>) -> Json<VerifyResponse> {
    Json(VerifyResponse {
        valid: true,
        username: user.username,
    })
}
