//! Error taxonomy for media serving
//!
//! Every failure a request can hit maps onto one HTTP status; see
//! [`MediaError::status`].

use hyper::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MediaError {
    /// File absent, not a regular file, or outside its root
    #[error("file not found: {name}")]
    NotFound { name: String },

    /// Requested byte window does not fit inside the file
    #[error("range not satisfiable for file of {file_size} bytes")]
    RangeNotSatisfiable { file_size: u64 },

    /// Request carried an `Origin` other than the configured one
    #[error("origin not allowed: {origin}")]
    Forbidden { origin: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl MediaError {
    pub fn not_found(name: impl Into<String>) -> Self {
        Self::NotFound { name: name.into() }
    }

    pub const fn status(&self) -> StatusCode {
        match self {
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::RangeNotSatisfiable { .. } => StatusCode::RANGE_NOT_SATISFIABLE,
            Self::Forbidden { .. } => StatusCode::FORBIDDEN,
            Self::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

pub type Result<T> = std::result::Result<T, MediaError>;
