//! Cross-origin policy
//!
//! One configured origin may call the server from a browser. Requests that
//! carry no `Origin` header are same-origin or non-browser and pass as-is.

use hyper::header::{HeaderMap, HeaderValue, ORIGIN};

use crate::config::CorsConfig;

/// Headers a page script may read off a media response
const EXPOSED_HEADERS: &str = "Content-Range, Accept-Ranges, Content-Length";
const ALLOWED_REQUEST_HEADERS: &str = "Range, Content-Type";

/// Outcome of checking a request's `Origin`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OriginCheck {
    /// No `Origin` header
    SameOrigin,
    /// `Origin` equals the configured origin
    Allowed,
    /// Any other origin, carried for logging
    Rejected(String),
}

/// Cross-origin policy built from configuration
#[derive(Debug, Clone)]
pub struct CorsPolicy {
    origin: String,
    methods: String,
    allow_credentials: bool,
    max_age: u32,
}

impl CorsPolicy {
    pub fn from_config(config: &CorsConfig) -> Self {
        Self {
            origin: config.allowed_origin.trim_end_matches('/').to_string(),
            methods: config
                .allowed_methods
                .iter()
                .map(|m| m.trim().to_ascii_uppercase())
                .collect::<Vec<_>>()
                .join(", "),
            allow_credentials: config.allow_credentials,
            max_age: config.max_age,
        }
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// Classify the request's `Origin` header
    pub fn check(&self, headers: &HeaderMap) -> OriginCheck {
        match headers.get(ORIGIN) {
            None => OriginCheck::SameOrigin,
            Some(value) => {
                let origin = value.to_str().unwrap_or_default();
                if origin == self.origin {
                    OriginCheck::Allowed
                } else {
                    OriginCheck::Rejected(origin.to_string())
                }
            }
        }
    }

    /// Add the headers every response to the permitted origin carries
    pub fn apply(&self, headers: &mut HeaderMap) {
        if let Ok(origin) = HeaderValue::from_str(&self.origin) {
            headers.insert("Access-Control-Allow-Origin", origin);
        }
        headers.append("Vary", HeaderValue::from_static("Origin"));
        if self.allow_credentials {
            headers.insert(
                "Access-Control-Allow-Credentials",
                HeaderValue::from_static("true"),
            );
        }
        headers.insert(
            "Access-Control-Expose-Headers",
            HeaderValue::from_static(EXPOSED_HEADERS),
        );
    }

    /// Add the preflight-only headers
    pub fn apply_preflight(&self, headers: &mut HeaderMap) {
        self.apply(headers);
        if let Ok(methods) = HeaderValue::from_str(&self.methods) {
            headers.insert("Access-Control-Allow-Methods", methods);
        }
        headers.insert(
            "Access-Control-Allow-Headers",
            HeaderValue::from_static(ALLOWED_REQUEST_HEADERS),
        );
        headers.insert("Access-Control-Max-Age", HeaderValue::from(self.max_age));
    }
}
