//! Request sanitization and response hardening
//!
//! `sanitize` cleans identity fields before they reach any credential
//! handling. `reject_script_payloads` screens JSON request bodies for
//! embedded script tags before a handler ever sees them.

use axum::{
    body::{to_bytes, Body},
    extract::Request,
    http::{header, HeaderValue, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{json, Value};
use unicode_normalization::UnicodeNormalization;

/// Characters stripped from identity fields. Markup and quoting characters
/// have no place in usernames or passwords here.
const STRIPPED_CHARS: [char; 5] = ['<', '>', '\'', '"', ';'];

/// Largest request body the screen will buffer
const MAX_SCANNED_BODY_BYTES: usize = 1024 * 1024;

#[allow(clippy::expect_used)] // literal pattern, covered by tests
static SCRIPT_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)<script.*?>.*?</script>").expect("script pattern compiles")
});

/// Normalize and strip an identity field before credential handling.
///
/// NFKC-normalizes first (so full-width and compatibility variants collapse
/// to their plain forms and cannot smuggle stripped characters through),
/// then drops NUL and the stripped set, then trims surrounding whitespace.
pub fn sanitize(value: &str) -> String {
    let normalized: String = value.nfkc().collect();
    let cleaned: String = normalized
        .chars()
        .filter(|c| *c != '\0' && !STRIPPED_CHARS.contains(c))
        .collect();

    cleaned.trim().to_string()
}

/// Does any string value anywhere in this JSON carry a script tag?
fn contains_script(value: &Value) -> bool {
    match value {
        Value::String(s) => SCRIPT_PATTERN.is_match(s),
        Value::Array(items) => items.iter().any(contains_script),
        Value::Object(map) => map.values().any(contains_script),
        _ => false,
    }
}

/// Screen JSON request bodies for embedded `<script>` payloads.
///
/// The body is buffered and, when it parses as JSON, every string value in
/// it (nested ones included) is matched case-insensitively; a hit rejects
/// the whole request. A body that does not parse as JSON is forwarded
/// untouched: this middleware screens, it does not enforce content types.
pub async fn reject_script_payloads(request: Request, next: Next) -> Response {
    let (parts, body) = request.into_parts();

    let bytes = match to_bytes(body, MAX_SCANNED_BODY_BYTES).await {
        Ok(bytes) => bytes,
        Err(_) => {
            let status = StatusCode::PAYLOAD_TOO_LARGE;
            let body = Json(json!({
                "error": "Request body too large",
                "code": status.as_u16(),
            }));
            return (status, body).into_response();
        }
    };

    if let Ok(payload) = serde_json::from_slice::<Value>(&bytes) {
        if contains_script(&payload) {
            tracing::warn!(path = %parts.uri.path(), "request rejected: script payload in JSON body");
            let status = StatusCode::BAD_REQUEST;
            let body = Json(json!({
                "error": "Malicious input detected",
                "code": status.as_u16(),
            }));
            return (status, body).into_response();
        }
    }

    let request = Request::from_parts(parts, Body::from(bytes));
    next.run(request).await
}

/// Attach baseline security headers to every response
pub async fn security_headers_middleware(request: Request, next: Next) -> Response {
    let mut response = next.run(request).await;

    let headers = response.headers_mut();
    headers.insert(
        header::X_CONTENT_TYPE_OPTIONS,
        HeaderValue::from_static("nosniff"),
    );
    headers.insert(header::X_FRAME_OPTIONS, HeaderValue::from_static("DENY"));
    headers.insert(header::CACHE_CONTROL, HeaderValue::from_static("no-store"));

    response
}
