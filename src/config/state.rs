// Application state module
// Immutable per-process state shared by every request handler

use std::path::PathBuf;

use super::types::Config;
use crate::http::cors::CorsPolicy;
use crate::media::MediaRoot;

/// Application state
///
/// Built once at startup and shared behind an `Arc`. Nothing in here changes
/// while the server runs, so request handlers never take a lock.
pub struct AppState {
    pub config: Config,
    pub media: MediaRoot,
    pub posters_dir: PathBuf,
    pub backgrounds_dir: PathBuf,
    pub cors: CorsPolicy,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let media = MediaRoot::new(&config.media.root, &config.media.video_extensions);
        let cors = CorsPolicy::from_config(&config.cors);

        Self {
            posters_dir: PathBuf::from(&config.media.posters_dir),
            backgrounds_dir: PathBuf::from(&config.media.backgrounds_dir),
            media,
            cors,
            config,
        }
    }

    /// Read size for streamed bodies
    pub const fn chunk_size(&self) -> usize {
        self.config.media.chunk_size
    }
}
