//! API route definitions

pub mod auth;
pub mod health;
pub mod users;


use axum::{
    middleware,
    routing::{delete, get, post, put},
    Json, Router,
};
use serde_json::{json, Value};

use crate::{auth::require_auth, security::reject_script_payloads, state::AppState};

/// GET /
///
/// Service index for anyone probing the bare origin.
async fn root() -> Json<Value> {
    Json(json!({
        "message": "Welcome to the Switchdesk API",
        "endpoints": {
            "auth": ["/auth/login", "/auth/logout", "/auth/verify"],
            "users": ["/users/add", "/users/update", "/users/info", "/users/{username}"],
            "health": ["/health", "/health/store"],
        }
    }))
}

/// Build the complete application router.
///
/// The script screen wraps every route, public ones included; the bearer
/// guard wraps only the protected tier.
pub fn create_router(state: AppState) -> Router {
    let public = Router::new()
        .route("/", get(root))
        .route("/health", get(health::health_check))
        .route("/health/store", get(health::store_health))
        .route("/auth/login", post(auth::login));

    let protected = Router::new()
        .route("/auth/logout", post(auth::logout))
        .route("/auth/verify", get(auth::verify))
        .route("/users/add", post(users::create_user))
        .route("/users/update", put(users::update_password))
        .route("/users/info", get(users::user_info))
        .route("/users/{username}", delete(users::remove_user))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));

    public
        .merge(protected)
        .layer(middleware::from_fn(reject_script_payloads))
        .with_state(state)
}
