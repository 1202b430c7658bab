//! Password hashing and strength policy
//!
//! Hashing uses Argon2id with a per-password random salt. The strength
//! policy runs on account creation and password change; rules are checked
//! in a fixed order and the first violation is the one reported.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

/// Password length bounds, inclusive
const MIN_PASSWORD_LEN: usize = 8;
const MAX_PASSWORD_LEN: usize = 20;

/// Characters that satisfy the special-character rule
const SPECIAL_CHARS: &str = "!@#$%^&*(),.?\":{}|<>-_";

/// Substrings that make a password trivially guessable, matched
/// case-insensitively anywhere in the password
const WEAK_PATTERNS: &[&str] = &["password", "qwerty", "123456", "admin"];

/// Longest permitted run of consecutive digit characters
const MAX_DIGIT_RUN: usize = 2;

/// A password the strength policy rejected. The reason is safe to show to
/// the caller.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{reason}")]
pub struct PolicyViolation {
    reason: &'static str,
}

impl PolicyViolation {
    pub fn reason(&self) -> &'static str {
        self.reason
    }
}

fn violation(reason: &'static str) -> Result<(), PolicyViolation> {
    Err(PolicyViolation { reason })
}

/// Check a candidate password against the strength policy.
///
/// Total over arbitrary input; an empty or wildly malformed string is just
/// a violation, never a panic.
pub fn validate_password_strength(password: &str) -> Result<(), PolicyViolation> {
    let length = password.chars().count();
    if length < MIN_PASSWORD_LEN {
        return violation("password must be at least 8 characters");
    }
    if length > MAX_PASSWORD_LEN {
        return violation("password must be at most 20 characters");
    }
    if password.contains(' ') {
        return violation("password must not contain spaces");
    }
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        return violation("password must contain an uppercase letter");
    }
    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        return violation("password must contain a lowercase letter");
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        return violation("password must contain a digit");
    }
    if !password.chars().any(|c| SPECIAL_CHARS.contains(c)) {
        return violation("password must contain a special character");
    }
    if has_digit_run_over(password, MAX_DIGIT_RUN) {
        return violation("password must not contain 3 or more consecutive digits");
    }
    let lowered = password.to_lowercase();
    if WEAK_PATTERNS.iter().any(|pattern| lowered.contains(pattern)) {
        return violation("password must not contain common words or sequences");
    }
    Ok(())
}

fn has_digit_run_over(password: &str, max_run: usize) -> bool {
    let mut run = 0;
    for c in password.chars() {
        if c.is_ascii_digit() {
            run += 1;
            if run > max_run {
                return true;
            }
        } else {
            run = 0;
        }
    }
    false
}

/// Errors from the hashing primitive itself, not from a bad password.
/// The calling operation must abort when it sees one.
#[derive(Debug, thiserror::Error)]
#[error("password hashing failed: {0}")]
pub struct HashError(String);

/// Hash a password with Argon2id and a fresh random salt, returning the
/// PHC-format string to store.
pub fn hash_password(password: &str) -> Result<String, HashError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| HashError(e.to_string()))
}

/// Check a password against a stored hash.
///
/// Returns false for both a mismatch and an unparseable stored hash; the
/// latter is logged because it means the stored record is corrupt.
pub fn verify_password(password: &str, stored_hash: &str) -> bool {
    let parsed = match PasswordHash::new(stored_hash) {
        Ok(parsed) => parsed,
        Err(err) => {
            tracing::warn!(error = %err, "stored password hash is unparseable; rejecting login");
            return false;
        }
    };

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}
