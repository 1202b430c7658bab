//! Configuration management
//!
//! Everything comes from environment variables, loaded once at startup.
//! There is no runtime reconfiguration.

use anyhow::Context;
use jsonwebtoken::Algorithm;

/// Secrets shorter than this trigger a startup warning.
const MIN_SECRET_LENGTH: usize = 32;

/// Default bearer-token lifetime, in minutes.
const DEFAULT_TOKEN_TTL_MINUTES: i64 = 30;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// Address the HTTP server binds to
    pub bind_address: String,
    /// Secret for signing bearer tokens. Required; startup fails without it.
    pub jwt_secret: String,
    /// HMAC variant used for token signatures
    pub jwt_algorithm: Algorithm,
    /// Token lifetime in minutes
    pub token_ttl_minutes: i64,
    /// Optional bootstrap account created at startup
    pub seed_username: Option<String>,
    pub seed_password: Option<String>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        let bind_address =
            std::env::var("BIND_ADDRESS").unwrap_or_else(|_| "0.0.0.0:8000".to_string());

        let jwt_secret = std::env::var("JWT_SECRET")
            .context("JWT_SECRET must be set (token signing cannot start without it)")?;
        if jwt_secret.len() < MIN_SECRET_LENGTH {
            tracing::warn!(
                "JWT_SECRET is shorter than {} bytes; use a longer random value in production",
                MIN_SECRET_LENGTH
            );
        }

        let jwt_algorithm = match std::env::var("JWT_ALGORITHM") {
            Ok(value) => parse_hmac_algorithm(&value)?,
            Err(_) => Algorithm::HS256,
        };

        let token_ttl_minutes = match std::env::var("TOKEN_TTL_MINUTES") {
            Ok(value) => value
                .parse::<i64>()
                .context("TOKEN_TTL_MINUTES must be an integer number of minutes")?,
            Err(_) => DEFAULT_TOKEN_TTL_MINUTES,
        };
        if token_ttl_minutes <= 0 {
            anyhow::bail!("TOKEN_TTL_MINUTES must be positive, got {token_ttl_minutes}");
        }

        let seed_username = std::env::var("SEED_USERNAME").ok();
        let seed_password = std::env::var("SEED_PASSWORD").ok();
        if seed_username.is_some() != seed_password.is_some() {
            tracing::warn!("SEED_USERNAME and SEED_PASSWORD must both be set; seeding skipped");
        }

        Ok(Self {
            bind_address,
            jwt_secret,
            jwt_algorithm,
            token_ttl_minutes,
            seed_username,
            seed_password,
        })
    }
}

/// Only the HMAC family is accepted; the signing secret is symmetric.
fn parse_hmac_algorithm(value: &str) -> anyhow::Result<Algorithm> {
    match value {
        "HS256" => Ok(Algorithm::HS256),
        "HS384" => Ok(Algorithm::HS384),
        "HS512" => Ok(Algorithm::HS512),
        other => {
            anyhow::bail!("unsupported JWT_ALGORITHM: {other} (expected HS256, HS384 or HS512)")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hmac_algorithms_parse() {
        assert_eq!(parse_hmac_algorithm("HS256").unwrap(), Algorithm::HS256);
        assert_eq!(parse_hmac_algorithm("HS384").unwrap(), Algorithm::HS384);
        assert_eq!(parse_hmac_algorithm("HS512").unwrap(), Algorithm::HS512);
    }

    #[test]
    fn asymmetric_algorithms_are_rejected() {
        assert!(parse_hmac_algorithm("RS256").is_err());
        assert!(parse_hmac_algorithm("ES256").is_err());
        assert!(parse_hmac_algorithm("none").is_err());
    }
}
