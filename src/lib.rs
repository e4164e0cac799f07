//! HTTP video streaming server
//!
//! Lists the videos in one configured directory and streams them with
//! byte-range support so browsers can seek. Poster and background images
//! are mirrored from their own directories.

pub mod config;
pub mod error;
pub mod handler;
pub mod http;
pub mod logger;
pub mod media;
pub mod server;
