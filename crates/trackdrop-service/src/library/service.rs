//! File and folder operations over the storage root.

use std::path::PathBuf;
use std::sync::Arc;

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use trackdrop_core::config::storage::StorageConfig;
use trackdrop_core::error::AppError;
use trackdrop_core::result::AppResult;
use trackdrop_entity::Privilege;
use trackdrop_storage::resolver::PathResolver;
use trackdrop_storage::{DirectoryListing, listing, ops};

/// Manages listings and mutations of the audio library.
#[derive(Debug, Clone)]
pub struct LibraryService {
    /// Path confinement for every user-supplied fragment.
    resolver: Arc<PathResolver>,
    /// Storage limits.
    config: StorageConfig,
}

/// Outcome of a delete operation.
///
/// Deleting never hard-fails for the refusal cases; callers inspect the
/// outcome instead (`DirectoryNotEmpty` leaves the item fully intact).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeleteOutcome {
    /// The file or empty directory was removed.
    Deleted,
    /// Nothing existed at the target path; no-op.
    NotFound,
    /// The target is a directory that still has children; left in place.
    DirectoryNotEmpty,
}

/// Outcome of an upload operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum UploadOutcome {
    /// The bytes were written under the (possibly suffixed) name.
    Stored {
        /// Final stored file name after collision handling.
        filename: String,
    },
    /// The extension is outside the allowed audio set; nothing was saved.
    SkippedExtension,
}

impl LibraryService {
    /// Creates a new library service.
    pub fn new(resolver: Arc<PathResolver>, config: StorageConfig) -> Self {
        Self { resolver, config }
    }

    /// Lists the immediate children of a directory.
    ///
    /// Requires viewer privilege. A missing directory yields an empty
    /// listing.
    pub async fn browse(
        &self,
        privilege: Privilege,
        relative_dir: &str,
    ) -> AppResult<DirectoryListing> {
        privilege.require_viewer()?;

        let dir = self.resolver.resolve(relative_dir)?;
        listing::list(&dir).await
    }

    /// Creates a folder (and any missing ancestors) under a parent.
    ///
    /// Requires editor privilege. Succeeds idempotently if the folder
    /// already exists. An OS-level failure is logged and swallowed —
    /// the request degrades rather than failing; path escapes still
    /// reject hard.
    pub async fn create_folder(
        &self,
        privilege: Privilege,
        parent: &str,
        name: &str,
    ) -> AppResult<()> {
        privilege.require_editor()?;

        if name.trim().is_empty() {
            return Err(AppError::validation("Folder name cannot be empty"));
        }

        let target = self.resolver.resolve(&join_relative(parent, name))?;
        match ops::ensure_dir(&target).await {
            Ok(()) => {
                info!(path = %target.display(), "Folder created");
            }
            Err(e) => {
                warn!(path = %target.display(), error = %e, "Folder creation failed");
            }
        }

        Ok(())
    }

    /// Deletes a file, or a directory that is empty.
    ///
    /// Requires editor privilege. A missing target is a no-op; a
    /// non-empty directory is left untouched. Both cases return normally
    /// with an inspectable [`DeleteOutcome`].
    pub async fn delete_item(
        &self,
        privilege: Privilege,
        parent: &str,
        name: &str,
    ) -> AppResult<DeleteOutcome> {
        privilege.require_editor()?;

        let target = self.resolver.resolve(&join_relative(parent, name))?;
        if !target.exists() {
            return Ok(DeleteOutcome::NotFound);
        }

        if target.is_file() {
            ops::remove_file(&target).await?;
            info!(path = %target.display(), "File deleted");
            return Ok(DeleteOutcome::Deleted);
        }

        if target.is_dir() {
            if ops::is_dir_empty(&target).await? {
                ops::remove_dir(&target).await?;
                info!(path = %target.display(), "Empty folder deleted");
                return Ok(DeleteOutcome::Deleted);
            }
            warn!(path = %target.display(), "Refusing to delete non-empty folder");
            return Ok(DeleteOutcome::DirectoryNotEmpty);
        }

        Ok(DeleteOutcome::NotFound)
    }

    /// Stores uploaded bytes under a collision-safe name.
    ///
    /// Requires editor privilege. A disallowed extension skips the save
    /// and returns normally with [`UploadOutcome::SkippedExtension`];
    /// filenames are not otherwise sanitized — confinement alone decides
    /// what is reachable. If the name is taken, `name_1.ext`,
    /// `name_2.ext`, … are tried until one is free.
    pub async fn upload(
        &self,
        privilege: Privilege,
        target_dir: &str,
        incoming_filename: &str,
        data: Bytes,
    ) -> AppResult<UploadOutcome> {
        privilege.require_editor()?;

        if !listing::has_allowed_extension(incoming_filename) {
            warn!(
                filename = %incoming_filename,
                "Skipped upload with disallowed extension"
            );
            return Ok(UploadOutcome::SkippedExtension);
        }

        if data.len() as u64 > self.config.max_upload_size_bytes {
            return Err(AppError::validation(format!(
                "Upload exceeds maximum size of {} bytes",
                self.config.max_upload_size_bytes
            )));
        }

        let resolved = self
            .resolver
            .resolve(&join_relative(target_dir, incoming_filename))?;
        let dir = resolved
            .parent()
            .map(PathBuf::from)
            .unwrap_or_else(|| self.resolver.root().to_path_buf());
        let leaf = resolved
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| AppError::validation("Upload filename is empty"))?;

        let target = ops::collision_free_path(&dir, &leaf);
        ops::write_file(&target, &data).await?;

        let filename = target
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or(leaf);

        info!(
            path = %target.display(),
            bytes = data.len(),
            "Upload stored"
        );

        Ok(UploadOutcome::Stored { filename })
    }

    /// Resolves a relative path to a servable file on disk.
    ///
    /// Takes no privilege: share visitors are anonymous; confinement and
    /// the existing-regular-file requirement are the only gates. This is
    /// also where a dangling share reference finally fails `NotFound`.
    pub async fn resolve_download(&self, relative: &str) -> AppResult<PathBuf> {
        let path = self.resolver.resolve(relative)?;
        if !path.is_file() {
            return Err(AppError::not_found(format!("File not found: {relative}")));
        }
        Ok(path)
    }
}

fn join_relative(parent: &str, name: &str) -> String {
    if parent.is_empty() {
        name.to_string()
    } else {
        format!("{}/{name}", parent.trim_end_matches('/'))
    }
}
