//! HTTP cache control module
//!
//! Provides `ETag` generation and conditional request handling for the
//! static image mirrors.

use std::time::{SystemTime, UNIX_EPOCH};

/// Generate an `ETag` from file size and modification time
///
/// Media files can be gigabytes, so content is never hashed.
///
/// # Returns
/// Weak `ETag` string, e.g., `W/"3e8-18c2f1a9b40"`
pub fn generate_etag(len: u64, modified: Option<SystemTime>) -> String {
    let millis = modified
        .and_then(|t| t.duration_since(UNIX_EPOCH).ok())
        .map_or(0, |d| d.as_millis());
    format!("W/\"{len:x}-{millis:x}\"")
}

/// Check if client's `If-None-Match` header matches the server's `ETag`
///
/// Supports:
/// - Single `ETag`: `"abc123"`
/// - Multiple `ETags`: `"abc123", "def456"`
/// - Wildcard: `*`
///
/// Comparison is weak, so `W/"x"` and `"x"` match.
///
/// # Returns
/// Returns true if matched (should return 304), false otherwise
pub fn check_etag_match(if_none_match: Option<&str>, etag: &str) -> bool {
    let ours = strip_weak(etag);
    if_none_match.is_some_and(|client_etag| {
        client_etag
            .split(',')
            .map(str::trim)
            .any(|e| e == "*" || strip_weak(e) == ours)
    })
}

fn strip_weak(etag: &str) -> &str {
    etag.strip_prefix("W/").unwrap_or(etag)
}

/// Format a modification time as an HTTP date (`Last-Modified`)
pub fn http_date(time: SystemTime) -> String {
    let utc: chrono::DateTime<chrono::Utc> = time.into();
    utc.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}

/// Cache control policy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CachePolicy {
    /// Public cache with specified max-age (seconds)
    Public(u32),
    /// No cache
    NoCache,
}

impl CachePolicy {
    /// Policy for the poster and background mirrors
    pub const IMAGES: Self = Self::Public(86_400);

    /// Convert to Cache-Control header value
    pub fn to_header_value(self) -> String {
        match self {
            Self::Public(max_age) => format!("public, max-age={max_age}"),
            Self::NoCache => "no-cache".to_string(),
        }
    }
}
