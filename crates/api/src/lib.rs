// Test code patterns:
#![cfg_attr(test, allow(clippy::expect_used))]
#![cfg_attr(test, allow(clippy::unwrap_used))]

//! Switchdesk API Library
//!
//! Authentication and session control for the Switchdesk operator console:
//! password login, signed bearer tokens, a single-session-per-operator
//! registry, and the account management endpoints around them.

pub mod auth;
pub mod config;
pub mod error;
pub mod routes;
pub mod security;
pub mod state;

pub use config::Config;
pub use error::{ApiError, ApiResult};
pub use state::AppState;
