//! Range-serving playback endpoint: `GET|HEAD /play/<file>` and `/movies/<file>`
//!
//! Answers 200 with the whole file, 206 with one byte window, 416 when the
//! window does not fit, and 404 for anything that does not resolve to a
//! regular file inside the media root. Bodies are streamed chunk by chunk;
//! the file handle lives inside the body and closes when hyper drops it,
//! which also happens when the client goes away mid-stream.

use hyper::Response;

use super::error_response;
use super::router::RequestContext;
use crate::config::AppState;
use crate::error::{MediaError, Result};
use crate::http::{self, body, range, ByteRange, ResponseBody};
use crate::logger;

/// Serve `/play/<encoded_name>` or `/movies/<encoded_name>`
pub async fn serve_media(
    ctx: &RequestContext<'_>,
    state: &AppState,
    encoded_name: &str,
) -> Response<ResponseBody> {
    let Ok(name) = urlencoding::decode(encoded_name) else {
        return http::build_404_response();
    };

    match stream_file(ctx, state, &name).await {
        Ok(response) => response,
        Err(e) => error_response(&e),
    }
}

async fn stream_file(
    ctx: &RequestContext<'_>,
    state: &AppState,
    name: &str,
) -> Result<Response<ResponseBody>> {
    let file = state.media.resolve(name).await?;
    let file_size = file.len();

    match requested_range(ctx.range_header, file_size)? {
        Some(window) => {
            logger::log_debug(&format!(
                "Streaming {name}: {}",
                window.content_range(file_size)
            ));
            let data = if ctx.is_head {
                body::empty()
            } else {
                body::reader_stream(file.open_range(window).await?, state.chunk_size())
            };
            Ok(http::response::build_partial_response(
                data,
                file.content_type(),
                window,
                file_size,
            ))
        }
        None => {
            logger::log_debug(&format!("Streaming {name}: full {file_size} bytes"));
            let data = if ctx.is_head {
                body::empty()
            } else {
                body::reader_stream(file.open().await?, state.chunk_size())
            };
            Ok(http::response::build_full_response(
                data,
                file.content_type(),
                file_size,
            ))
        }
    }
}

/// Turn an optional `Range` header into the window to send
///
/// `None` means the whole file: either no header, or one too malformed to
/// act on. Suffix and out-of-bounds ranges are unsatisfiable.
pub fn requested_range(header: Option<&str>, file_size: u64) -> Result<Option<ByteRange>> {
    let Some(header) = header else {
        return Ok(None);
    };

    match range::parse_range_header(header).and_then(|spec| spec.resolve(file_size)) {
        Ok(window) => Ok(Some(window)),
        Err(e) if e.is_unsatisfiable() => Err(MediaError::RangeNotSatisfiable { file_size }),
        Err(_) => {
            logger::log_debug(&format!("Ignoring malformed Range header '{header}'"));
            Ok(None)
        }
    }
}
