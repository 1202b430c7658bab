//! Health check endpoints

use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /health
pub async fn health_check() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// GET /health/store
///
/// Reads through the account-store and session-registry locks, so an "ok"
/// here means both are actually serving reads, not just that the process
/// is up.
pub async fn store_health(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "accounts": state.accounts.count().await,
        "active_sessions": state.sessions.active_count().await,
    }))
}
