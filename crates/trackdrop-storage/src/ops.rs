//! Low-level filesystem mutation primitives.
//!
//! Every path passed here must already be confined by
//! [`PathResolver`](crate::resolver::PathResolver); these helpers do no
//! containment checking of their own.

use std::path::{Path, PathBuf};

use bytes::Bytes;
use tokio::fs;
use tracing::debug;

use trackdrop_core::error::{AppError, ErrorKind};
use trackdrop_core::result::AppResult;

/// Create a directory and any missing ancestors. Idempotent.
pub async fn ensure_dir(path: &Path) -> AppResult<()> {
    fs::create_dir_all(path).await.map_err(|e| {
        AppError::with_source(
            ErrorKind::Storage,
            format!("Failed to create directory: {}", path.display()),
            e,
        )
    })
}

/// Remove a regular file.
pub async fn remove_file(path: &Path) -> AppResult<()> {
    fs::remove_file(path).await.map_err(|e| {
        AppError::with_source(
            ErrorKind::Storage,
            format!("Failed to delete file: {}", path.display()),
            e,
        )
    })
}

/// Remove a directory; fails if it still has children.
pub async fn remove_dir(path: &Path) -> AppResult<()> {
    fs::remove_dir(path).await.map_err(|e| {
        AppError::with_source(
            ErrorKind::Storage,
            format!("Failed to delete directory: {}", path.display()),
            e,
        )
    })
}

/// Check whether a directory has no entries at all.
pub async fn is_dir_empty(path: &Path) -> AppResult<bool> {
    let mut entries = fs::read_dir(path).await.map_err(|e| {
        AppError::with_source(
            ErrorKind::Storage,
            format!("Failed to read directory: {}", path.display()),
            e,
        )
    })?;

    let first = entries.next_entry().await.map_err(|e| {
        AppError::with_source(ErrorKind::Storage, "Failed to read directory entry", e)
    })?;

    Ok(first.is_none())
}

/// Write a file, creating the parent directory if needed.
pub async fn write_file(path: &Path, data: &Bytes) -> AppResult<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent).await?;
    }

    fs::write(path, data).await.map_err(|e| {
        AppError::with_source(
            ErrorKind::Storage,
            format!("Failed to write file: {}", path.display()),
            e,
        )
    })?;

    debug!(path = %path.display(), bytes = data.len(), "Wrote file");
    Ok(())
}

/// Pick a collision-free target path for `filename` inside `dir`.
///
/// If `name.ext` is taken, tries `name_1.ext`, `name_2.ext`, …
/// incrementing until an unused name is found.
pub fn collision_free_path(dir: &Path, filename: &str) -> PathBuf {
    let candidate = dir.join(filename);
    if !candidate.exists() {
        return candidate;
    }

    let stem = Path::new(filename)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(filename);
    let ext = Path::new(filename).extension().and_then(|s| s.to_str());

    let mut counter: u32 = 1;
    loop {
        let name = match ext {
            Some(ext) => format!("{stem}_{counter}.{ext}"),
            None => format!("{stem}_{counter}"),
        };
        let candidate = dir.join(name);
        if !candidate.exists() {
            return candidate;
        }
        counter += 1;
    }
}
