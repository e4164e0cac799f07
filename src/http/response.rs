//! HTTP response building module
//!
//! Provides builders for the status codes the media server produces.

use hyper::{Response, StatusCode};
use serde::Serialize;

use super::body::{self, ResponseBody};
use super::range::ByteRange;

/// Build 404 Not Found response
pub fn build_404_response() -> Response<ResponseBody> {
    Response::builder()
        .status(StatusCode::NOT_FOUND)
        .header("Content-Type", "text/plain; charset=utf-8")
        .body(body::full("404 Not Found"))
        .unwrap_or_else(|e| {
            log_build_error("404", &e);
            Response::new(body::full("404 Not Found"))
        })
}

/// Build 403 Forbidden response
pub fn build_403_response() -> Response<ResponseBody> {
    Response::builder()
        .status(StatusCode::FORBIDDEN)
        .header("Content-Type", "text/plain; charset=utf-8")
        .body(body::full("403 Forbidden"))
        .unwrap_or_else(|e| {
            log_build_error("403", &e);
            Response::new(body::full("403 Forbidden"))
        })
}

/// Build 405 Method Not Allowed response
pub fn build_405_response() -> Response<ResponseBody> {
    Response::builder()
        .status(StatusCode::METHOD_NOT_ALLOWED)
        .header("Content-Type", "text/plain; charset=utf-8")
        .header("Allow", "GET, HEAD, OPTIONS")
        .body(body::full("405 Method Not Allowed"))
        .unwrap_or_else(|e| {
            log_build_error("405", &e);
            Response::new(body::full("405 Method Not Allowed"))
        })
}

/// Build OPTIONS response (CORS headers are added by the caller)
pub fn build_options_response() -> Response<ResponseBody> {
    Response::builder()
        .status(StatusCode::NO_CONTENT)
        .header("Allow", "GET, HEAD, OPTIONS")
        .body(body::empty())
        .unwrap_or_else(|e| {
            log_build_error("OPTIONS", &e);
            Response::new(body::empty())
        })
}

/// Build 416 Range Not Satisfiable response
///
/// Carries `Content-Range: bytes */<size>` and no body.
pub fn build_416_response(file_size: u64) -> Response<ResponseBody> {
    Response::builder()
        .status(StatusCode::RANGE_NOT_SATISFIABLE)
        .header("Content-Range", format!("bytes */{file_size}"))
        .header("Accept-Ranges", "bytes")
        .body(body::empty())
        .unwrap_or_else(|e| {
            log_build_error("416", &e);
            Response::new(body::empty())
        })
}

/// Build 304 Not Modified response
pub fn build_304_response(etag: &str, cache_control: &str) -> Response<ResponseBody> {
    Response::builder()
        .status(StatusCode::NOT_MODIFIED)
        .header("ETag", etag)
        .header("Cache-Control", cache_control)
        .body(body::empty())
        .unwrap_or_else(|e| {
            log_build_error("304", &e);
            Response::new(body::empty())
        })
}

/// Build health check response
pub fn build_health_response(status: &str) -> Response<ResponseBody> {
    Response::builder()
        .status(StatusCode::OK)
        .header("Content-Type", "text/plain; charset=utf-8")
        .header("Cache-Control", "no-cache, no-store")
        .body(body::full(status.to_string()))
        .unwrap_or_else(|e| {
            log_build_error("health", &e);
            Response::new(body::full(status.to_string()))
        })
}

/// Build JSON response
pub fn json_response<T: Serialize>(
    status: StatusCode,
    value: &T,
    cache_control: &str,
) -> Response<ResponseBody> {
    let json = match serde_json::to_vec(value) {
        Ok(j) => j,
        Err(e) => {
            crate::logger::log_error(&format!("Failed to serialize response: {e}"));
            return build_500_response("Internal server error");
        }
    };

    Response::builder()
        .status(status)
        .header("Content-Type", "application/json")
        .header("Content-Length", json.len())
        .header("Cache-Control", cache_control)
        .body(body::full(json))
        .unwrap_or_else(|e| {
            log_build_error("JSON", &e);
            Response::new(body::empty())
        })
}

/// Build 500 response with a JSON `{"error": ...}` body
pub fn build_500_response(message: &str) -> Response<ResponseBody> {
    let json = serde_json::json!({ "error": message }).to_string();
    Response::builder()
        .status(StatusCode::INTERNAL_SERVER_ERROR)
        .header("Content-Type", "application/json")
        .body(body::full(json))
        .unwrap_or_else(|e| {
            log_build_error("500", &e);
            Response::new(body::full(r#"{"error":"Internal server error"}"#))
        })
}

/// Build 200 response streaming a whole media file
pub fn build_full_response(
    data: ResponseBody,
    content_type: &str,
    file_size: u64,
) -> Response<ResponseBody> {
    Response::builder()
        .status(StatusCode::OK)
        .header("Content-Type", content_type)
        .header("Content-Length", file_size)
        .header("Accept-Ranges", "bytes")
        .body(data)
        .unwrap_or_else(|e| {
            log_build_error("200", &e);
            Response::new(body::empty())
        })
}

/// Build 206 Partial Content response streaming one byte window
pub fn build_partial_response(
    data: ResponseBody,
    content_type: &str,
    range: ByteRange,
    file_size: u64,
) -> Response<ResponseBody> {
    Response::builder()
        .status(StatusCode::PARTIAL_CONTENT)
        .header("Content-Type", content_type)
        .header("Content-Length", range.len())
        .header("Content-Range", range.content_range(file_size))
        .header("Accept-Ranges", "bytes")
        .body(data)
        .unwrap_or_else(|e| {
            log_build_error("206", &e);
            Response::new(body::empty())
        })
}

/// Build 200 response for a static mirror file with validators
pub fn build_cached_response(
    data: ResponseBody,
    content_type: &str,
    file_size: u64,
    etag: &str,
    last_modified: Option<&str>,
    cache_control: &str,
) -> Response<ResponseBody> {
    let mut builder = Response::builder()
        .status(StatusCode::OK)
        .header("Content-Type", content_type)
        .header("Content-Length", file_size)
        .header("ETag", etag)
        .header("Cache-Control", cache_control);

    if let Some(date) = last_modified {
        builder = builder.header("Last-Modified", date);
    }

    builder.body(data).unwrap_or_else(|e| {
        log_build_error("200", &e);
        Response::new(body::empty())
    })
}

/// Log response build error
fn log_build_error(status: &str, error: &hyper::http::Error) {
    crate::logger::log_error(&format!("Failed to build {status} response: {error}"));
}
