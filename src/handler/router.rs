//! Request routing dispatch module
//!
//! Entry point for HTTP request processing, responsible for origin checks,
//! method validation, route matching, and access logging.

use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use hyper::header::{HeaderMap, HeaderName, CONTENT_LENGTH, IF_NONE_MATCH, RANGE};
use hyper::{Method, Request, Response};

use super::{error_response, library, playback, static_files};
use crate::config::AppState;
use crate::error::MediaError;
use crate::http::{self, cors::OriginCheck, ResponseBody};
use crate::logger::{self, AccessLogEntry};

const VIDEOS_PATH: &str = "/api/videos";
const PLAY_PREFIX: &str = "/play/";
/// Static-style mount of the media root, used by the web client's player
const MOVIES_PREFIX: &str = "/movies/";
const POSTERS_PREFIX: &str = "/posters/";
const BACKGROUNDS_PREFIX: &str = "/backgrounds/";

/// Request context encapsulating information needed for request processing
#[derive(Debug)]
pub struct RequestContext<'a> {
    pub path: &'a str,
    pub is_head: bool,
    pub if_none_match: Option<&'a str>,
    pub range_header: Option<&'a str>,
}

/// Main entry point for HTTP request handling
///
/// Generic over the request body since no route reads one.
pub async fn handle_request<B>(
    req: Request<B>,
    state: Arc<AppState>,
    remote_addr: SocketAddr,
) -> Result<Response<ResponseBody>, Infallible> {
    let started = Instant::now();
    let (parts, _) = req.into_parts();

    let entry = state.config.logging.access_log.then(|| {
        AccessLogEntry::from_request(
            remote_addr.ip().to_string(),
            &parts.method,
            &parts.uri,
            parts.version,
            &parts.headers,
        )
    });

    let response = route_request(&parts, &state).await;

    if let Some(mut entry) = entry {
        entry.status = response.status().as_u16();
        entry.body_bytes = response
            .headers()
            .get(CONTENT_LENGTH)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse().ok())
            .unwrap_or(0);
        entry.request_time_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
        logger::log_access(&entry, &state.config.logging.access_log_format);
    }

    Ok(response)
}

/// Apply the origin policy around method and path dispatch
async fn route_request(
    parts: &hyper::http::request::Parts,
    state: &AppState,
) -> Response<ResponseBody> {
    let allowed = match state.cors.check(&parts.headers) {
        OriginCheck::Allowed => true,
        OriginCheck::SameOrigin => false,
        OriginCheck::Rejected(origin) => {
            return error_response(&MediaError::Forbidden { origin });
        }
    };

    let mut response = match parts.method {
        Method::GET | Method::HEAD => {
            let ctx = RequestContext {
                path: parts.uri.path(),
                is_head: parts.method == Method::HEAD,
                if_none_match: header_str(&parts.headers, IF_NONE_MATCH),
                range_header: header_str(&parts.headers, RANGE),
            };
            dispatch(&ctx, state).await
        }
        Method::OPTIONS => {
            let mut response = http::build_options_response();
            if allowed {
                state.cors.apply_preflight(response.headers_mut());
            }
            return response;
        }
        _ => {
            logger::log_warning(&format!("Method not allowed: {}", parts.method));
            http::build_405_response()
        }
    };

    if allowed {
        state.cors.apply(response.headers_mut());
    }
    response
}

fn header_str(headers: &HeaderMap, name: HeaderName) -> Option<&str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}

/// Route request based on path
async fn dispatch(ctx: &RequestContext<'_>, state: &AppState) -> Response<ResponseBody> {
    let health = &state.config.health;
    if health.enabled && ctx.path == health.path {
        return http::build_health_response("ok");
    }

    if ctx.path == VIDEOS_PATH {
        return library::list_videos(state).await;
    }

    if let Some(name) = ctx
        .path
        .strip_prefix(PLAY_PREFIX)
        .or_else(|| ctx.path.strip_prefix(MOVIES_PREFIX))
    {
        return playback::serve_media(ctx, state, name).await;
    }

    if let Some(rest) = ctx.path.strip_prefix(POSTERS_PREFIX) {
        return static_files::serve_mirror(ctx, state, &state.posters_dir, rest).await;
    }

    if let Some(rest) = ctx.path.strip_prefix(BACKGROUNDS_PREFIX) {
        return static_files::serve_mirror(ctx, state, &state.backgrounds_dir, rest).await;
    }

    http::build_404_response()
}
