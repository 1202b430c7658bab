//! Authentication module for Switchdesk

pub mod jwt;
pub mod middleware;
pub mod password;
pub mod sessions;

pub use jwt::{Claims, TokenError, TokenService};
pub use middleware::{require_auth, resolve_identity, AuthError, AuthUser};
pub use password::{
    hash_password, validate_password_strength, verify_password, HashError, PolicyViolation,
};
pub use sessions::{Session, SessionRegistry};
