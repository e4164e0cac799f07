//! Shared test harness for integration tests.
//!
//! [`TestHarness`] lays out temporary media, poster and background
//! directories and builds an [`AppState`] over them. Requests can be sent
//! straight to the handler, or over TCP after [`TestHarness::with_server`].

#![allow(dead_code)]

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use http_body_util::{BodyExt, Empty};
use hyper::body::Bytes;
use hyper::header::{HeaderMap, HeaderName, RANGE};
use hyper::{Request, StatusCode};
use tempfile::TempDir;
use tokio::sync::Notify;
use tokio::task::JoinHandle;

use media_range_server::config::{AppState, Config};
use media_range_server::handler::handle_request;
use media_range_server::server;

/// Peer address reported for requests that bypass the socket layer
pub const CLIENT_ADDR: &str = "127.0.0.1:50000";

pub struct TestHarness {
    pub dir: TempDir,
    pub state: Arc<AppState>,
}

/// Collected response
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl TestResponse {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    pub fn json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.body).expect("response body is not JSON")
    }
}

/// Handle on a server started by [`TestHarness::with_server`]
pub struct RunningServer {
    pub addr: SocketAddr,
    pub shutdown: Arc<Notify>,
    pub task: JoinHandle<std::io::Result<()>>,
}

impl TestHarness {
    /// Harness with default configuration over empty directories
    pub fn new() -> Self {
        Self::with_config(|_| {})
    }

    /// Harness whose configuration is adjusted by `customize` after the
    /// directory paths are filled in
    pub fn with_config(customize: impl FnOnce(&mut Config)) -> Self {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        for sub in ["media", "posters", "backgrounds"] {
            std::fs::create_dir(dir.path().join(sub)).expect("failed to create subdir");
        }

        let mut config = Config::default();
        config.media.root = path_string(&dir.path().join("media"));
        config.media.posters_dir = path_string(&dir.path().join("posters"));
        config.media.backgrounds_dir = path_string(&dir.path().join("backgrounds"));
        config.logging.access_log = false;
        customize(&mut config);

        Self {
            state: Arc::new(AppState::new(config)),
            dir,
        }
    }

    pub fn media_dir(&self) -> PathBuf {
        self.dir.path().join("media")
    }

    /// Write a file into the media root
    pub fn write_media(&self, name: &str, contents: &[u8]) -> PathBuf {
        let path = self.media_dir().join(name);
        std::fs::write(&path, contents).expect("failed to write media file");
        path
    }

    /// Write a file under the poster or background mirror, creating parents
    pub fn write_mirror(&self, mirror: &str, relative: &str, contents: &[u8]) -> PathBuf {
        let path = self.dir.path().join(mirror).join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("failed to create mirror dirs");
        }
        std::fs::write(&path, contents).expect("failed to write mirror file");
        path
    }

    /// Send a request straight to the handler and collect the response
    pub async fn send(&self, req: Request<Empty<Bytes>>) -> TestResponse {
        let resp = handle_request(req, Arc::clone(&self.state), CLIENT_ADDR.parse().unwrap())
            .await
            .unwrap();
        let (parts, body) = resp.into_parts();
        TestResponse {
            status: parts.status,
            headers: parts.headers,
            body: body.collect().await.expect("body stream failed").to_bytes(),
        }
    }

    pub async fn get(&self, path: &str) -> TestResponse {
        self.send(get(path).body(Empty::new()).unwrap()).await
    }

    pub async fn get_range(&self, path: &str, range: &str) -> TestResponse {
        self.send(get(path).header(RANGE, range).body(Empty::new()).unwrap())
            .await
    }

    pub async fn get_with(&self, path: &str, name: HeaderName, value: &str) -> TestResponse {
        self.send(get(path).header(name, value).body(Empty::new()).unwrap())
            .await
    }

    /// Serve the harness state on a random local port
    pub async fn with_server(self) -> (Self, RunningServer) {
        let listener = server::create_reusable_listener("127.0.0.1:0".parse().unwrap())
            .expect("failed to bind random port");
        let addr = listener.local_addr().expect("failed to get local addr");
        let shutdown = Arc::new(Notify::new());

        let task = tokio::spawn(server::run(
            listener,
            Arc::clone(&self.state),
            Arc::clone(&shutdown),
        ));

        (
            self,
            RunningServer {
                addr,
                shutdown,
                task,
            },
        )
    }
}

pub fn get(path: &str) -> hyper::http::request::Builder {
    Request::get(path)
}

/// Deterministic, non-repeating-at-small-scale test payload
pub fn video_bytes(len: usize) -> Vec<u8> {
    (0..len).map(|i| u8::try_from(i % 251).unwrap()).collect()
}

fn path_string(path: &Path) -> String {
    path.to_str().expect("temp path is not UTF-8").to_string()
}
