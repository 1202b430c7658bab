//! Active-session registry
//!
//! At most one session per identity. A new login replaces whatever session
//! the identity had; the replaced token still verifies cryptographically
//! until it expires, but it no longer matches here, and that is what ends
//! it. Entries are never aged out by the registry itself: expiry is the
//! token layer's job and runs before any registry lookup.

use std::collections::HashMap;
use std::sync::Arc;

use subtle::ConstantTimeEq;
use time::OffsetDateTime;
use tokio::sync::RwLock;

/// The one token currently honored for an identity
#[derive(Debug, Clone)]
pub struct Session {
    pub token: String,
    pub created_at: OffsetDateTime,
}

/// Process-wide registry of active sessions, keyed by username.
///
/// All access goes through one map lock, so concurrent logins for the same
/// identity serialize and exactly one token survives.
#[derive(Clone, Default)]
pub struct SessionRegistry {
    sessions: Arc<RwLock<HashMap<String, Session>>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `token` as the active session for `username`, unconditionally
    /// replacing any previous one.
    pub async fn add_session(&self, username: &str, token: String) {
        let mut sessions = self.sessions.write().await;
        let replaced = sessions.insert(
            username.to_string(),
            Session {
                token,
                created_at: OffsetDateTime::now_utc(),
            },
        );
        drop(sessions);

        if replaced.is_some() {
            tracing::info!(user = %username, "previous session superseded by new login");
        } else {
            tracing::debug!(user = %username, "session opened");
        }
    }

    /// True only if `username` has a session and its stored token matches
    /// `presented` by value. The comparison is constant-time.
    pub async fn validate_session(&self, username: &str, presented: &str) -> bool {
        let sessions = self.sessions.read().await;
        match sessions.get(username) {
            Some(session) => session.token.as_bytes().ct_eq(presented.as_bytes()).into(),
            None => false,
        }
    }

    /// Drop the session for `username`, if any. Idempotent; returns whether
    /// one existed.
    pub async fn remove_session(&self, username: &str) -> bool {
        let removed = self.sessions.write().await.remove(username).is_some();
        if removed {
            tracing::debug!(user = %username, "session closed");
        }
        removed
    }

    /// Whether `username` currently has an active session
    pub async fn is_active(&self, username: &str) -> bool {
        self.sessions.read().await.contains_key(username)
    }

    pub async fn active_count(&self) -> usize {
        self.sessions.read().await.len()
    }
}
