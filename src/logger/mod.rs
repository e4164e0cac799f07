//! Logger module
//!
//! Provides logging utilities for the media server including:
//! - Server lifecycle logging
//! - Access logging with multiple formats
//! - Leveled error, warning, info and debug logging
//! - File-based logging support
//!
//! Before [`init`] runs (and in tests) messages go straight to
//! stdout/stderr.

mod format;
pub mod writer;

pub use format::AccessLogEntry;
pub use writer::LogLevel;

use crate::config::Config;
use std::net::SocketAddr;

/// Initialize the logger with configuration
///
/// Should be called once at application startup.
pub fn init(config: &Config) -> std::io::Result<()> {
    let level = config
        .logging
        .level
        .parse::<LogLevel>()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;
    writer::init(
        level,
        config.logging.access_log_file.as_deref(),
        config.logging.error_log_file.as_deref(),
    )
}

fn write(level: LogLevel, message: &str) {
    match writer::get() {
        Some(w) => w.write(level, message),
        None if level >= LogLevel::Warn => eprintln!("{message}"),
        None if level == LogLevel::Info => println!("{message}"),
        None => {}
    }
}

/// Write to access log specifically
fn write_access(message: &str) {
    match writer::get() {
        Some(w) => w.write_access(message),
        None => println!("{message}"),
    }
}

pub fn log_server_start(addr: &SocketAddr, config: &Config) {
    let info = |m: &str| write(LogLevel::Info, m);
    info("======================================");
    info("Media server started");
    info(&format!("Listening on: http://{addr}"));
    info(&format!("Media root: {}", config.media.root));
    info(&format!("Posters from: {}", config.media.posters_dir));
    info(&format!("Backgrounds from: {}", config.media.backgrounds_dir));
    info(&format!(
        "Video extensions: {}",
        config.media.video_extensions.join(", ")
    ));
    info(&format!("Allowed origin: {}", config.cors.allowed_origin));
    info(&format!("Log level: {}", config.logging.level));
    if let Some(workers) = config.server.workers {
        info(&format!("Worker threads: {workers}"));
    }
    if let Some(ref path) = config.logging.access_log_file {
        info(&format!("Access log: {path}"));
    }
    if let Some(ref path) = config.logging.error_log_file {
        info(&format!("Error log: {path}"));
    }
    info("======================================");
}

pub fn log_connection_error(err: &impl std::fmt::Display) {
    write(
        LogLevel::Debug,
        &format!("[Connection] Closed with error: {err}"),
    );
}

pub fn log_error(message: &str) {
    write(LogLevel::Error, &format!("[ERROR] {message}"));
}

pub fn log_warning(message: &str) {
    write(LogLevel::Warn, &format!("[WARN] {message}"));
}

pub fn log_info(message: &str) {
    write(LogLevel::Info, &format!("[INFO] {message}"));
}

pub fn log_debug(message: &str) {
    write(LogLevel::Debug, &format!("[DEBUG] {message}"));
}

/// Log formatted access log entry
pub fn log_access(entry: &AccessLogEntry, format: &str) {
    write_access(&entry.format(format));
}

pub fn log_shutdown(active_connections: usize) {
    write(
        LogLevel::Info,
        &format!("[Shutdown] Listener closed, {active_connections} connection(s) still draining"),
    );
}
