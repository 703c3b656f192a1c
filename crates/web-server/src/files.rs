//! Local file access for cover images and the static front end
use nowplaying_core::FILE_SCHEME;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error)]
pub enum FileError {
    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Error serving file {}: {}", .0.display(), .1)]
    Read(PathBuf, #[source] std::io::Error),
}

/// A file loaded into memory with its content type
#[derive(Debug)]
pub struct LoadedFile {
    pub bytes: Vec<u8>,
    pub content_type: &'static str,
}

/// Filesystem path for a cover reference, with any `file://` prefix removed
pub fn cover_path(reference: &str) -> PathBuf {
    PathBuf::from(reference.strip_prefix(FILE_SCHEME).unwrap_or(reference))
}

/// Image content type from the file extension: PNG, GIF, otherwise JPEG
pub fn cover_mime(path: &Path) -> &'static str {
    let name = path.to_string_lossy().to_lowercase();
    if name.ends_with(".png") {
        "image/png"
    } else if name.ends_with(".gif") {
        "image/gif"
    } else {
        "image/jpeg"
    }
}

/// Read a local cover image
pub async fn read_cover(reference: &str) -> Result<LoadedFile, FileError> {
    let path = cover_path(reference);
    let content_type = cover_mime(&path);
    read_file(path, content_type).await
}

/// Content type for a front-end asset
pub fn static_mime(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "html" | "htm" => "text/html; charset=utf-8",
        "css" => "text/css; charset=utf-8",
        "js" | "mjs" => "text/javascript; charset=utf-8",
        "json" => "application/json",
        "svg" => "image/svg+xml",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "ico" => "image/x-icon",
        "woff2" => "font/woff2",
        "txt" => "text/plain; charset=utf-8",
        _ => "application/octet-stream",
    }
}

/// Read a front-end asset relative to the static directory.
///
/// Only plain relative paths are served; anything with `..`, a root or a prefix
/// is reported as not found.
pub async fn read_static(static_dir: &Path, relative: &str) -> Result<LoadedFile, FileError> {
    let relative = Path::new(relative);
    if !relative
        .components()
        .all(|component| matches!(component, Component::Normal(_)))
    {
        return Err(FileError::NotFound(relative.to_path_buf()));
    }

    let path = static_dir.join(relative);
    let content_type = static_mime(&path);
    read_file(path, content_type).await
}

async fn read_file(path: PathBuf, content_type: &'static str) -> Result<LoadedFile, FileError> {
    if !tokio::fs::try_exists(&path).await.unwrap_or(false) {
        warn!("File not found: {}", path.display());
        return Err(FileError::NotFound(path));
    }

    match tokio::fs::read(&path).await {
        Ok(bytes) => Ok(LoadedFile { bytes, content_type }),
        Err(e) => Err(FileError::Read(path, e)),
    }
}
