//! Request handler module
//!
//! Routing plus one submodule per endpoint family.

pub mod library;
pub mod playback;
pub mod router;
pub mod static_files;

// Re-export main entry point
pub use router::handle_request;

use hyper::Response;

use crate::error::MediaError;
use crate::http::{self, ResponseBody};
use crate::logger;

/// Map a failed request onto its HTTP response
fn error_response(error: &MediaError) -> Response<ResponseBody> {
    match error {
        MediaError::NotFound { name } => {
            logger::log_debug(&format!("Not found: {name}"));
            http::build_404_response()
        }
        MediaError::RangeNotSatisfiable { file_size } => http::build_416_response(*file_size),
        MediaError::Forbidden { origin } => {
            logger::log_warning(&format!("Rejected request from origin '{origin}'"));
            http::build_403_response()
        }
        MediaError::Io(e) => {
            logger::log_error(&format!("I/O error while serving request: {e}"));
            http::build_500_response("Internal server error")
        }
    }
}
