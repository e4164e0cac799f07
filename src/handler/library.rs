//! Directory listing endpoint: `GET /api/videos`

use hyper::{Response, StatusCode};

use crate::config::AppState;
use crate::http::{self, cache::CachePolicy, response, ResponseBody};
use crate::logger;

/// JSON array of playable file names, or 500 when the root cannot be read
pub async fn list_videos(state: &AppState) -> Response<ResponseBody> {
    match state.media.list_videos().await {
        Ok(names) => response::json_response(
            StatusCode::OK,
            &names,
            &CachePolicy::NoCache.to_header_value(),
        ),
        Err(e) => {
            logger::log_error(&format!(
                "Failed to read media directory '{}': {e}",
                state.media.dir().display()
            ));
            http::build_500_response("Failed to read media directory")
        }
    }
}
