//! Media root: directory listing and safe name resolution

use std::path::{Path, PathBuf};

use tokio::fs;

use super::file::MediaFile;
use crate::error::{MediaError, Result};

/// Directory configured as the only source of streamable files
#[derive(Debug, Clone)]
pub struct MediaRoot {
    dir: PathBuf,
    /// Lowercase, without leading dot
    extensions: Vec<String>,
}

impl MediaRoot {
    pub fn new(dir: impl Into<PathBuf>, extensions: &[String]) -> Self {
        Self {
            dir: dir.into(),
            extensions: extensions
                .iter()
                .map(|e| e.trim().trim_start_matches('.').to_ascii_lowercase())
                .filter(|e| !e.is_empty())
                .collect(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Whether `name` carries one of the allow-listed video extensions
    pub fn is_video(&self, name: &str) -> bool {
        Path::new(name)
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| self.extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)))
    }

    /// Names of the playable files directly inside the root, sorted
    ///
    /// An unreadable root is an error, never an empty list.
    pub async fn list_videos(&self) -> Result<Vec<String>> {
        let mut entries = fs::read_dir(&self.dir).await?;
        let mut names = Vec::new();

        while let Some(entry) = entries.next_entry().await? {
            let Ok(name) = entry.file_name().into_string() else {
                continue;
            };
            if !self.is_video(&name) {
                continue;
            }
            // Follows symlinks; a directory named `x.mp4` is not playable
            if fs::metadata(entry.path())
                .await
                .is_ok_and(|m| m.is_file())
            {
                names.push(name);
            }
        }

        names.sort_unstable();
        Ok(names)
    }

    /// Resolve a single file name taken from a request path
    pub async fn resolve(&self, name: &str) -> Result<MediaFile> {
        if !is_safe_segment(name) {
            return Err(MediaError::not_found(name));
        }
        resolve_within(&self.dir, Path::new(name), name).await
    }
}

/// Resolve a `/`-separated relative path beneath `root`
pub async fn resolve_nested(root: &Path, relative: &str) -> Result<MediaFile> {
    let mut path = PathBuf::new();
    for segment in relative.split('/') {
        if !is_safe_segment(segment) {
            return Err(MediaError::not_found(relative));
        }
        path.push(segment);
    }
    resolve_within(root, &path, relative).await
}

/// One path component that cannot climb out of its parent
fn is_safe_segment(segment: &str) -> bool {
    !segment.is_empty()
        && segment != "."
        && segment != ".."
        && !segment.contains(['/', '\\', '\0'])
        && !(segment.len() >= 2 && segment.as_bytes()[1] == b':')
}

/// Canonicalize `root/relative` and require it to be a regular file inside `root`
///
/// Symlinks are followed, so a link pointing outside the root is rejected
/// like any other escape. Every failure reads as `NotFound`.
async fn resolve_within(root: &Path, relative: &Path, name: &str) -> Result<MediaFile> {
    let not_found = || MediaError::not_found(name);

    let root = fs::canonicalize(root).await.map_err(|_| not_found())?;
    let candidate = fs::canonicalize(root.join(relative))
        .await
        .map_err(|_| not_found())?;

    if candidate == root || !candidate.starts_with(&root) {
        crate::logger::log_warning(&format!(
            "Path traversal attempt blocked: {name} -> {}",
            candidate.display()
        ));
        return Err(not_found());
    }

    let metadata = fs::metadata(&candidate).await.map_err(|_| not_found())?;
    if !metadata.is_file() {
        return Err(not_found());
    }

    Ok(MediaFile::new(candidate, name, &metadata))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extensions() -> Vec<String> {
        vec!["mp4".to_string(), ".MKV".to_string(), "avi".to_string()]
    }

    fn root_with(files: &[&str]) -> (tempfile::TempDir, MediaRoot) {
        let dir = tempfile::tempdir().unwrap();
        for name in files {
            std::fs::write(dir.path().join(name), b"data").unwrap();
        }
        let root = MediaRoot::new(dir.path(), &extensions());
        (dir, root)
    }

    #[test]
    fn test_is_video() {
        let root = MediaRoot::new("/unused", &extensions());
        assert!(root.is_video("a.mp4"));
        assert!(root.is_video("b.MP4"));
        assert!(root.is_video("c.mkv"));
        assert!(!root.is_video("d.txt"));
        assert!(!root.is_video("mp4"));
    }

    #[test]
    fn test_safe_segment() {
        assert!(is_safe_segment("movie.mp4"));
        assert!(is_safe_segment("..hidden.mp4"));
        assert!(!is_safe_segment(""));
        assert!(!is_safe_segment(".."));
        assert!(!is_safe_segment("."));
        assert!(!is_safe_segment("a/b"));
        assert!(!is_safe_segment("a\\b"));
        assert!(!is_safe_segment("C:evil"));
    }

    #[tokio::test]
    async fn test_list_filters_by_extension() {
        let (_dir, root) = root_with(&["a.mp4", "b.txt", "c.mkv", "D.AVI"]);
        let names = root.list_videos().await.unwrap();
        assert_eq!(names, vec!["D.AVI", "a.mp4", "c.mkv"]);
    }

    #[tokio::test]
    async fn test_list_skips_directories() {
        let (dir, root) = root_with(&["a.mp4"]);
        std::fs::create_dir(dir.path().join("season.mkv")).unwrap();
        assert_eq!(root.list_videos().await.unwrap(), vec!["a.mp4"]);
    }

    #[tokio::test]
    async fn test_list_missing_dir_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let root = MediaRoot::new(dir.path().join("missing"), &extensions());
        assert!(matches!(root.list_videos().await, Err(MediaError::Io(_))));
    }

    #[tokio::test]
    async fn test_resolve_existing() {
        let (_dir, root) = root_with(&["a.mp4"]);
        let file = root.resolve("a.mp4").await.unwrap();
        assert_eq!(file.len(), 4);
        assert_eq!(file.content_type(), "video/mp4");
    }

    #[tokio::test]
    async fn test_resolve_missing() {
        let (_dir, root) = root_with(&[]);
        assert!(matches!(
            root.resolve("nope.mp4").await,
            Err(MediaError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_resolve_rejects_traversal() {
        let outer = tempfile::tempdir().unwrap();
        std::fs::write(outer.path().join("secret.mp4"), b"secret").unwrap();
        let inner = outer.path().join("media");
        std::fs::create_dir(&inner).unwrap();
        let root = MediaRoot::new(&inner, &extensions());

        for name in ["../secret.mp4", "..", "media/../../secret.mp4", ""] {
            assert!(
                matches!(root.resolve(name).await, Err(MediaError::NotFound { .. })),
                "{name} should not resolve"
            );
        }
        assert!(resolve_nested(&inner, "../secret.mp4").await.is_err());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_resolve_rejects_symlink_escape() {
        let outer = tempfile::tempdir().unwrap();
        std::fs::write(outer.path().join("secret.mp4"), b"secret").unwrap();
        let inner = outer.path().join("media");
        std::fs::create_dir(&inner).unwrap();
        std::os::unix::fs::symlink(outer.path().join("secret.mp4"), inner.join("link.mp4"))
            .unwrap();
        let root = MediaRoot::new(&inner, &extensions());

        assert!(root.resolve("link.mp4").await.is_err());
    }

    #[tokio::test]
    async fn test_resolve_rejects_directory() {
        let (dir, root) = root_with(&[]);
        std::fs::create_dir(dir.path().join("folder.mp4")).unwrap();
        assert!(root.resolve("folder.mp4").await.is_err());
    }

    #[tokio::test]
    async fn test_resolve_nested() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("2024")).unwrap();
        std::fs::write(dir.path().join("2024").join("dune.jpg"), b"jpeg").unwrap();

        let file = resolve_nested(dir.path(), "2024/dune.jpg").await.unwrap();
        assert_eq!(file.content_type(), "image/jpeg");
        assert!(resolve_nested(dir.path(), "2024//dune.jpg").await.is_err());
        assert!(resolve_nested(dir.path(), "2024").await.is_err());
    }
}
