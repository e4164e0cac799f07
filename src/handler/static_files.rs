//! Static image mirrors: `/posters/*` and `/backgrounds/*`
//!
//! Whole-file serving with validators. No range logic.

use std::path::Path;

use hyper::Response;

use super::error_response;
use super::router::RequestContext;
use crate::config::AppState;
use crate::http::cache::{self, CachePolicy};
use crate::http::{self, body, response, ResponseBody};
use crate::media::resolve_nested;

/// Serve `relative` (still percent-encoded) from the mirror rooted at `dir`
pub async fn serve_mirror(
    ctx: &RequestContext<'_>,
    state: &AppState,
    dir: &Path,
    relative: &str,
) -> Response<ResponseBody> {
    let Ok(relative) = urlencoding::decode(relative) else {
        return http::build_404_response();
    };

    let file = match resolve_nested(dir, &relative).await {
        Ok(file) => file,
        Err(e) => return error_response(&e),
    };

    let etag = cache::generate_etag(file.len(), file.modified());
    let cache_control = CachePolicy::IMAGES.to_header_value();

    // Check if client has cached version
    if cache::check_etag_match(ctx.if_none_match, &etag) {
        return response::build_304_response(&etag, &cache_control);
    }

    let data = if ctx.is_head {
        body::empty()
    } else {
        match file.open().await {
            Ok(reader) => body::reader_stream(reader, state.chunk_size()),
            Err(e) => return error_response(&e),
        }
    };

    let last_modified = file.modified().map(cache::http_date);
    response::build_cached_response(
        data,
        file.content_type(),
        file.len(),
        &etag,
        last_modified.as_deref(),
        &cache_control,
    )
}
