//! A resolved media file

use std::fs::Metadata;
use std::io::SeekFrom;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use tokio::fs::File;
use tokio::io::{AsyncReadExt, AsyncSeekExt, Take};

use crate::error::Result;
use crate::http::mime;
use crate::http::range::ByteRange;

/// Regular file that has passed root containment checks
///
/// Holds no file handle; handles are opened per response and owned by the
/// response body.
#[derive(Debug, Clone)]
pub struct MediaFile {
    path: PathBuf,
    name: String,
    len: u64,
    modified: Option<SystemTime>,
    content_type: &'static str,
}

impl MediaFile {
    pub(crate) fn new(path: PathBuf, name: &str, metadata: &Metadata) -> Self {
        let content_type = mime::content_type_for_path(&path);
        Self {
            name: name.to_string(),
            len: metadata.len(),
            modified: metadata.modified().ok(),
            content_type,
            path,
        }
    }

    /// Canonical path on disk
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Name as requested by the client
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Total size in bytes
    pub const fn len(&self) -> u64 {
        self.len
    }

    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub const fn modified(&self) -> Option<SystemTime> {
        self.modified
    }

    pub const fn content_type(&self) -> &'static str {
        self.content_type
    }

    /// Open the whole file for reading
    ///
    /// The reader is capped at the length seen when the file was resolved so
    /// the body never exceeds the `Content-Length` already sent.
    pub async fn open(&self) -> Result<Take<File>> {
        let file = File::open(&self.path).await?;
        Ok(file.take(self.len))
    }

    /// Open the file positioned at `range.start`, limited to `range.len()` bytes
    pub async fn open_range(&self, range: ByteRange) -> Result<Take<File>> {
        let mut file = File::open(&self.path).await?;
        if range.start > 0 {
            file.seek(SeekFrom::Start(range.start)).await?;
        }
        Ok(file.take(range.len()))
    }
}
