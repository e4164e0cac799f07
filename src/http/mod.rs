//! HTTP protocol layer module
//!
//! Range parsing, content types, CORS, caching validators, and response
//! builders. Nothing here touches the filesystem.

pub mod body;
pub mod cache;
pub mod cors;
pub mod mime;
pub mod range;
pub mod response;

// Re-export commonly used types
pub use body::ResponseBody;
pub use range::{parse_range_header, ByteRange, RangeError, RangeSpec};
pub use response::{
    build_403_response, build_404_response, build_405_response, build_416_response,
    build_500_response, build_health_response, build_options_response,
};
