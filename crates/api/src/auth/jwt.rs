//! Access-token issuance and validation
//!
//! Tokens are self-contained HMAC-signed claims; the service holds the keys
//! and TTL but no per-token state. Whether a token is still the *active* one
//! for its subject is the session registry's question, not this module's.

use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

/// Claims carried by every access token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Username the token was issued to
    pub sub: String,
    /// Issued-at, seconds since the epoch
    pub iat: i64,
    /// Expiry, seconds since the epoch
    pub exp: i64,
    /// Unique token id, so back-to-back logins never produce equal tokens
    pub jti: String,
}

/// Why a token was rejected (or could not be signed)
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    #[error("token signature is invalid")]
    InvalidSignature,
    #[error("token has expired")]
    Expired,
    #[error("token is malformed")]
    Malformed,
    #[error("token signing failed: {0}")]
    Signing(String),
}

/// Issues and validates bearer tokens with a process-wide symmetric secret
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    header: Header,
    validation: Validation,
    ttl_minutes: i64,
}

impl TokenService {
    pub fn new(secret: &str, algorithm: Algorithm, ttl_minutes: i64) -> Self {
        let mut validation = Validation::new(algorithm);
        // Expiry is exact; the default 60s leeway would keep dead tokens alive
        validation.leeway = 0;

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            header: Header::new(algorithm),
            validation,
            ttl_minutes,
        }
    }

    /// Sign a fresh token for `username`, valid for the configured TTL
    pub fn issue(&self, username: &str) -> Result<String, TokenError> {
        let now = OffsetDateTime::now_utc().unix_timestamp();
        let claims = Claims {
            sub: username.to_string(),
            iat: now,
            exp: now + self.ttl_minutes * 60,
            jti: Uuid::new_v4().to_string(),
        };

        encode(&self.header, &claims, &self.encoding_key)
            .map_err(|e| TokenError::Signing(e.to_string()))
    }

    /// Decode and verify a token, returning its claims.
    ///
    /// Signature and expiry failures come back as distinct kinds; anything
    /// else wrong with the token (shape, encoding, algorithm, missing
    /// claims) is reported as `Malformed`.
    pub fn validate(&self, token: &str) -> Result<Claims, TokenError> {
        match decode::<Claims>(token, &self.decoding_key, &self.validation) {
            Ok(data) => Ok(data.claims),
            Err(err) => Err(match err.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                ErrorKind::InvalidSignature => TokenError::InvalidSignature,
                _ => TokenError::Malformed,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "unit-test-signing-secret-0123456789";

    fn service() -> TokenService {
        TokenService::new(SECRET, Algorithm::HS256, 30)
    }

    fn encode_raw(claims: &Claims) -> String {
        encode(
            &Header::new(Algorithm::HS256),
            claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap()
    }

    #[test]
    fn issue_then_validate_returns_subject_and_ttl() {
        let tokens = service();
        let token = tokens.issue("alice").unwrap();

        let claims = tokens.validate(&token).unwrap();
        assert_eq!(claims.sub, "alice");
        assert_eq!(claims.exp - claims.iat, 30 * 60);
    }

    #[test]
    fn back_to_back_issues_are_distinct_tokens() {
        let tokens = service();
        let first = tokens.issue("alice").unwrap();
        let second = tokens.issue("alice").unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn wrong_secret_reports_invalid_signature() {
        let other = TokenService::new("a-completely-different-secret-value", Algorithm::HS256, 30);
        let token = other.issue("alice").unwrap();

        assert_eq!(
            service().validate(&token).unwrap_err(),
            TokenError::InvalidSignature
        );
    }

    #[test]
    fn expired_token_reports_expired() {
        let now = OffsetDateTime::now_utc().unix_timestamp();
        let token = encode_raw(&Claims {
            sub: "alice".to_string(),
            iat: now - 120,
            exp: now - 60,
            jti: "0".to_string(),
        });

        assert_eq!(service().validate(&token).unwrap_err(), TokenError::Expired);
    }

    #[test]
    fn garbage_reports_malformed() {
        let tokens = service();
        assert_eq!(
            tokens.validate("not-a-token").unwrap_err(),
            TokenError::Malformed
        );
        assert_eq!(
            tokens.validate("a.b.c").unwrap_err(),
            TokenError::Malformed
        );
        assert_eq!(tokens.validate("").unwrap_err(), TokenError::Malformed);
    }

    #[test]
    fn unexpected_algorithm_reports_malformed() {
        let hs384 = TokenService::new(SECRET, Algorithm::HS384, 30);
        let token = hs384.issue("alice").unwrap();

        assert_eq!(
            service().validate(&token).unwrap_err(),
            TokenError::Malformed
        );
    }

    #[tokio::test]
    async fn token_dies_once_wall_clock_passes_expiry() {
        // Zero TTL puts the expiry at the issue second itself
        let tokens = TokenService::new(SECRET, Algorithm::HS256, 0);
        let token = tokens.issue("alice").unwrap();

        tokio::time::sleep(std::time::Duration::from_millis(2100)).await;
        assert_eq!(tokens.validate(&token).unwrap_err(), TokenError::Expired);
    }
}
