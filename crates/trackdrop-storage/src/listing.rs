//! Audio directory listings.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::fs;

use trackdrop_core::error::{AppError, ErrorKind};
use trackdrop_core::result::AppResult;

/// Extensions visible in listings and accepted for upload (lowercase,
/// without the leading dot). A fixed design constant.
pub const ALLOWED_EXTENSIONS: [&str; 5] = ["mp3", "ogg", "wav", "flac", "m4a"];

/// Check whether a filename carries an allowed audio extension.
///
/// The comparison is case-insensitive; files without an extension never
/// match.
pub fn has_allowed_extension(filename: &str) -> bool {
    Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ALLOWED_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

/// The immediate children of one directory.
///
/// Recomputed on every request, never cached.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DirectoryListing {
    /// Allowed audio files, most recently modified first.
    pub files: Vec<String>,
    /// Sub-directories, sorted lexicographically.
    pub folders: Vec<String>,
}

/// Enumerate the immediate children of a resolved directory.
///
/// A missing directory yields an empty listing rather than an error.
/// Files outside the allowed extension set are omitted (they remain
/// resolvable by direct path); directories are included unconditionally.
pub async fn list(dir: &Path) -> AppResult<DirectoryListing> {
    if !dir.exists() {
        return Ok(DirectoryListing::default());
    }

    let mut files: Vec<(String, DateTime<Utc>)> = Vec::new();
    let mut folders: Vec<String> = Vec::new();

    let mut entries = fs::read_dir(dir).await.map_err(|e| {
        AppError::with_source(
            ErrorKind::Storage,
            format!("Failed to list directory: {}", dir.display()),
            e,
        )
    })?;

    while let Some(entry) = entries.next_entry().await.map_err(|e| {
        AppError::with_source(ErrorKind::Storage, "Failed to read directory entry", e)
    })? {
        let meta = entry.metadata().await.map_err(|e| {
            AppError::with_source(ErrorKind::Storage, "Failed to get entry metadata", e)
        })?;

        let name = entry.file_name().to_string_lossy().to_string();

        if meta.is_dir() {
            folders.push(name);
        } else if meta.is_file() && has_allowed_extension(&name) {
            let modified = meta
                .modified()
                .map(DateTime::<Utc>::from)
                .unwrap_or(DateTime::<Utc>::UNIX_EPOCH);
            files.push((name, modified));
        }
    }

    folders.sort();
    // Stable sort keeps ties deterministic.
    files.sort_by(|a, b| b.1.cmp(&a.1));

    Ok(DirectoryListing {
        files: files.into_iter().map(|(name, _)| name).collect(),
        folders,
    })
}
