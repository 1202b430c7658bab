//! Account management endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use switchdesk_shared::DEFAULT_ACCESS_LEVEL;

use crate::{
    auth::{hash_password, validate_password_strength, AuthUser},
    error::{ApiError, ApiResult},
    security::sanitize,
    state::AppState,
};

/// Usernames are capped at the account column width
const MAX_USERNAME_LEN: usize = 32;

#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub username: String,
    pub password: String,
    #[serde(default = "default_access_level")]
    pub access_level: i32,
}

fn default_access_level() -> i32 {
    DEFAULT_ACCESS_LEVEL
}

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub username: String,
    pub access_level: i32,
    pub online: bool,
}

#[derive(Debug, Deserialize)]
pub struct UpdatePasswordRequest {
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub success: bool,
    pub message: String,
}

fn clean_username(raw: &str) -> ApiResult<String> {
    let username = sanitize(raw);
    if username.is_empty() {
        return Err(ApiError::Validation("username is required".to_string()));
    }
    if username.chars().count() > MAX_USERNAME_LEN {
        return Err(ApiError::Validation(format!(
            "username must be at most {MAX_USERNAME_LEN} characters"
        )));
    }
    Ok(username)
}

/// Sanitize, run the strength policy, hash. The policy sees the sanitized
/// password, which is exactly what gets hashed and what a later login will
/// present.
fn hash_new_password(raw: &str) -> ApiResult<String> {
    let password = sanitize(raw);
    validate_password_strength(&password)
        .map_err(|violation| ApiError::Validation(violation.to_string()))?;

    hash_password(&password).map_err(|e| {
        tracing::error!(error = %e, "password hashing failed");
        ApiError::Internal(e.to_string())
    })
}

/// POST /users/add
pub async fn create_user(
    State(state): State<AppState>,
    Extension(creator): Extension<AuthUser>,
    Json(request): Json<CreateUserRequest>,
) -> ApiResult<(StatusCode, Json<UserResponse>)> {
    let username = clean_username(&request.username)?;
    let password_hash = hash_new_password(&request.password)?;

    let record = state
        .accounts
        .create(&username, password_hash, request.access_level)
        .await?;

    tracing::info!(user = %record.username, created_by = %creator.username, "account created");
    Ok((
        StatusCode::CREATED,
        Json(UserResponse {
            username: record.username,
            access_level: record.access_level,
            online: false,
        }),
    ))
}

/// GET /users/info
pub async fn user_info(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> ApiResult<Json<UserResponse>> {
    let record = state
        .accounts
        .get(&user.username)
        .await
        .ok_or_else(|| ApiError::NotFound("user not found".to_string()))?;

    let online = state.sessions.is_active(&record.username).await;
    Ok(Json(UserResponse {
        username: record.username,
        access_level: record.access_level,
        online,
    }))
}

/// PUT /users/update
///
/// Changes the caller's own password, then closes their session so the
/// change forces a fresh login.
pub async fn update_password(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(request): Json<UpdatePasswordRequest>,
) -> ApiResult<Json<StatusResponse>> {
    let password_hash = hash_new_password(&request.password)?;

    state
        .accounts
        .update_password(&user.username, password_hash)
        .await?;
    state.sessions.remove_session(&user.username).await;

    tracing::info!(user = %user.username, "password updated, session closed");
    Ok(Json(StatusResponse {
        success: true,
        message: "Password updated successfully; please log in again".to_string(),
    }))
}

/// DELETE /users/{username}
///
/// Also closes the deleted account's session: authenticated-request
/// validation never re-reads the account store, so dropping the session
/// here is what makes the deletion take effect immediately.
pub async fn remove_user(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthUser>,
    Path(username): Path<String>,
) -> ApiResult<Json<StatusResponse>> {
    let username = clean_username(&username)?;

    if !state.accounts.remove(&username).await {
        return Err(ApiError::NotFound("user not found".to_string()));
    }
    state.sessions.remove_session(&username).await;

    tracing::info!(user = %username, deleted_by = %caller.username, "account deleted");
    Ok(Json(StatusResponse {
        success: true,
        message: "Account deleted".to_string(),
    }))
}
