//! Storage-root path confinement.
//!
//! The single security boundary of the system: every user-controlled path
//! fragment must pass through [`PathResolver::resolve`] before any
//! filesystem access.

use std::path::{Component, Path, PathBuf};

use tokio::fs;

use trackdrop_core::error::{AppError, ErrorKind};
use trackdrop_core::result::AppResult;

/// Resolves user-supplied relative paths against the storage root.
#[derive(Debug, Clone)]
pub struct PathResolver {
    /// Canonicalized storage root.
    root: PathBuf,
}

impl PathResolver {
    /// Create a resolver rooted at the given path, creating the directory
    /// if it does not exist yet.
    pub async fn new(root_path: &str) -> AppResult<Self> {
        let root = PathBuf::from(root_path);
        fs::create_dir_all(&root).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to create storage root: {}", root.display()),
                e,
            )
        })?;

        let root = fs::canonicalize(&root).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to canonicalize storage root: {}", root.display()),
                e,
            )
        })?;

        Ok(Self { root })
    }

    /// The canonical storage root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Confine a relative path to the storage root.
    ///
    /// Components are normalized lexically: `.` is dropped, and a `..`
    /// that would climb past the root fails with `PathEscape`, as do
    /// absolute paths and drive prefixes. Targets that exist are
    /// additionally canonicalized and re-checked so a symlink inside the
    /// root cannot point out of it. Non-existent targets (upload
    /// destinations, new folders) resolve as long as their lexical form
    /// stays inside the root.
    pub fn resolve(&self, relative: &str) -> AppResult<PathBuf> {
        let mut resolved = self.root.clone();

        for component in Path::new(relative).components() {
            match component {
                Component::Normal(part) => resolved.push(part),
                Component::CurDir => {}
                Component::ParentDir => {
                    resolved.pop();
                    if !resolved.starts_with(&self.root) {
                        return Err(AppError::path_escape(format!(
                            "Path escapes storage root: {relative}"
                        )));
                    }
                }
                Component::RootDir | Component::Prefix(_) => {
                    return Err(AppError::path_escape(format!(
                        "Absolute paths are not allowed: {relative}"
                    )));
                }
            }
        }

        if !resolved.starts_with(&self.root) {
            return Err(AppError::path_escape(format!(
                "Path escapes storage root: {relative}"
            )));
        }

        if resolved.exists() {
            let canonical = resolved.canonicalize().map_err(|e| {
                AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to canonicalize: {}", resolved.display()),
                    e,
                )
            })?;
            if !canonical.starts_with(&self.root) {
                return Err(AppError::path_escape(format!(
                    "Path escapes storage root via symlink: {relative}"
                )));
            }
            return Ok(canonical);
        }

        Ok(resolved)
    }
}
