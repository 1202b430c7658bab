//! Application state

use switchdesk_shared::{AccountStore, DEFAULT_ACCESS_LEVEL};

use crate::{
    auth::{hash_password, SessionRegistry, TokenService},
    config::Config,
};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub tokens: TokenService,
    pub sessions: SessionRegistry,
    pub accounts: AccountStore,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let tokens = TokenService::new(
            &config.jwt_secret,
            config.jwt_algorithm,
            config.token_ttl_minutes,
        );
        tracing::info!(
            algorithm = ?config.jwt_algorithm,
            ttl_minutes = config.token_ttl_minutes,
            "Token service initialized"
        );

        let sessions = SessionRegistry::new();
        tracing::info!("Session registry initialized");

        let accounts = AccountStore::new();
        tracing::info!("Account store initialized");

        Self {
            config,
            tokens,
            sessions,
            accounts,
        }
    }

    /// Create the bootstrap account when one is configured.
    ///
    /// The seed path hashes and stores whatever it is given without running
    /// the interactive password policy; it exists so a fresh deployment has
    /// an operator to log in with.
    pub async fn seed_accounts(&self) -> anyhow::Result<()> {
        let (Some(username), Some(password)) = (
            self.config.seed_username.as_deref(),
            self.config.seed_password.as_deref(),
        ) else {
            tracing::info!("No seed account configured");
            return Ok(());
        };

        let password_hash =
            hash_password(password).map_err(|e| anyhow::anyhow!("seeding failed: {e}"))?;
        self.accounts
            .create(username, password_hash, DEFAULT_ACCESS_LEVEL)
            .await?;
        tracing::info!(user = %username, "Seed account created");

        Ok(())
    }
}
