//! Operator account records and the store that owns them.
//!
//! Keyed by username, the account primary key. All methods take `&self`
//! and lock internally, so a cloned handle can be shared across tasks.

use std::collections::HashMap;
use std::sync::Arc;

use time::OffsetDateTime;
use tokio::sync::RwLock;

/// Access level assigned to accounts created without an explicit one.
pub const DEFAULT_ACCESS_LEVEL: i32 = 1;

/// A single operator account.
#[derive(Debug, Clone)]
pub struct AccountRecord {
    pub username: String,
    /// PHC-format password hash. Never the cleartext password.
    pub password_hash: String,
    /// Carried for the console UI; the auth layer does not interpret it.
    pub access_level: i32,
    pub created_at: OffsetDateTime,
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("account already exists: {0}")]
    DuplicateUsername(String),
    #[error("account not found: {0}")]
    NotFound(String),
}

/// Shared, clonable account store.
#[derive(Clone, Default)]
pub struct AccountStore {
    inner: Arc<RwLock<HashMap<String, AccountRecord>>>,
}

impl AccountStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a new account. Usernames are unique; inserting an existing
    /// one fails rather than overwriting.
    pub async fn create(
        &self,
        username: &str,
        password_hash: String,
        access_level: i32,
    ) -> Result<AccountRecord, StoreError> {
        let mut accounts = self.inner.write().await;
        if accounts.contains_key(username) {
            return Err(StoreError::DuplicateUsername(username.to_string()));
        }
        let record = AccountRecord {
            username: username.to_string(),
            password_hash,
            access_level,
            created_at: OffsetDateTime::now_utc(),
        };
        accounts.insert(username.to_string(), record.clone());
        tracing::debug!(user = %username, "account created");
        Ok(record)
    }

    pub async fn get(&self, username: &str) -> Option<AccountRecord> {
        self.inner.read().await.get(username).cloned()
    }

    /// Replace the stored password hash for an existing account.
    pub async fn update_password(
        &self,
        username: &str,
        password_hash: String,
    ) -> Result<(), StoreError> {
        let mut accounts = self.inner.write().await;
        match accounts.get_mut(username) {
            Some(record) => {
                record.password_hash = password_hash;
                Ok(())
            }
            None => Err(StoreError::NotFound(username.to_string())),
        }
    }

    /// Delete an account. Returns whether it existed.
    pub async fn remove(&self, username: &str) -> bool {
        self.inner.write().await.remove(username).is_some()
    }

    pub async fn count(&self) -> usize {
        self.inner.read().await.len()
    }
}
