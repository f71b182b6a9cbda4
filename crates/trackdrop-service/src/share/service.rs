//! Share link lifecycle service.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::info;

use trackdrop_core::error::AppError;
use trackdrop_core::result::AppResult;
use trackdrop_entity::{Privilege, ShareRecord};
use trackdrop_storage::resolver::PathResolver;
use trackdrop_storage::{DirectoryListing, listing};

use super::link::LinkService;
use super::store::ShareStore;

/// Manages share link creation, resolution, and deletion.
///
/// All read-modify-write sequences on the persisted store run under one
/// mutex, so two racing requests in the same process cannot lose each
/// other's updates.
#[derive(Debug, Clone)]
pub struct ShareLinkService {
    /// Path confinement for share targets.
    resolver: Arc<PathResolver>,
    /// Token generator.
    links: LinkService,
    /// Persisted token → record mapping, behind the single-writer lock.
    store: Arc<Mutex<ShareStore>>,
}

/// Result of creating a share link.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatedShare {
    /// The newly minted token.
    pub token: String,
    /// The persisted record.
    pub record: ShareRecord,
    /// Public URL for the link.
    pub share_url: String,
}

/// One file inside a shared folder, paired with its download URL.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SharedFile {
    /// File name inside the shared folder.
    pub name: String,
    /// Public URL serving the file's bytes.
    pub download_url: String,
}

/// What a resolved share exposes to an anonymous visitor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ShareView {
    /// A single shared file.
    File {
        /// Label of the link.
        link_name: String,
        /// Display name of the file.
        file_name: String,
        /// Public URL serving the file's bytes.
        download_url: String,
    },
    /// A shared folder: its immediate audio files, plus sub-folder names
    /// for display only (sub-folders are not independently navigable
    /// through the share view).
    Folder {
        /// Label of the link.
        link_name: String,
        /// Display name of the folder.
        folder_name: String,
        /// Immediate allowed files with their download URLs.
        files: Vec<SharedFile>,
        /// Immediate sub-folder names.
        folders: Vec<String>,
    },
}

/// One row of the share overview listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShareLinkEntry {
    /// The share token.
    pub token: String,
    /// Label of the link.
    pub link_name: String,
    /// Relative path of the shared item.
    pub item_name: String,
    /// Whether the shared item was a directory at creation time.
    pub is_directory: bool,
    /// When the link stops resolving.
    pub expiry_date: DateTime<Utc>,
    /// Whether the link is already past its expiry (display only; the
    /// record is pruned lazily on resolution, not here).
    pub is_expired: bool,
    /// Public URL for the link.
    pub url: String,
}

impl ShareLinkService {
    /// Creates a new share link service.
    pub fn new(resolver: Arc<PathResolver>, store: ShareStore) -> Self {
        Self {
            resolver,
            links: LinkService::new(),
            store: Arc::new(Mutex::new(store)),
        }
    }

    /// Creates a share link for an existing file or folder.
    ///
    /// Requires editor privilege. The item path must resolve inside the
    /// storage root and exist at creation time; whether the share is a
    /// directory share is fixed here from the filesystem entry type.
    /// Expiry is always creation + 48 h.
    pub async fn create(
        &self,
        privilege: Privilege,
        item_path: &str,
        link_name: Option<String>,
        base_url: &str,
    ) -> AppResult<CreatedShare> {
        privilege.require_editor()?;

        let resolved = self.resolver.resolve(item_path)?;
        if !resolved.exists() {
            return Err(AppError::not_found(format!(
                "Share target does not exist: {item_path}"
            )));
        }

        let record = ShareRecord::new(link_name, item_path.to_string(), resolved.is_dir());

        let store = self.store.lock().await;
        let mut links = store.load().await;

        // Token entropy makes collisions vanishingly rare; re-sample
        // anyway so uniqueness is a guarantee, not a probability.
        let mut token = self.links.generate_token();
        while links.contains_key(&token) {
            token = self.links.generate_token();
        }

        links.insert(token.clone(), record.clone());
        store.save(&links).await?;
        drop(store);

        info!(
            token = %token,
            item = %record.item_name,
            is_directory = record.is_directory,
            expires = %record.expiry_date,
            "Share link created"
        );

        Ok(CreatedShare {
            share_url: share_url(base_url, &token),
            token,
            record,
        })
    }

    /// Resolves a share token into a view an anonymous visitor can use.
    ///
    /// An unknown token fails `NotFound`. An expired token is pruned
    /// from the store as a side effect and fails `Expired` — the two
    /// outcomes stay distinguishable. A valid token re-confines the
    /// stored item path (independent of the creation-time check) before
    /// deriving any download URL. Target existence is not re-verified
    /// here; a target deleted after creation surfaces as `NotFound` when
    /// the visitor fetches the file itself.
    pub async fn resolve(&self, token: &str, base_url: &str) -> AppResult<ShareView> {
        let store = self.store.lock().await;
        let mut links = store.load().await;

        let record = links
            .get(token)
            .cloned()
            .ok_or_else(|| AppError::not_found("Unknown share token"))?;

        if record.is_expired() {
            links.remove(token);
            store.save(&links).await?;
            drop(store);
            info!(token = %token, "Expired share link pruned on resolution");
            return Err(AppError::expired("Share link has expired"));
        }
        drop(store);

        let resolved = self.resolver.resolve(&record.item_name)?;

        if record.is_directory {
            let DirectoryListing { files, folders } = listing::list(&resolved).await?;
            let files = files
                .into_iter()
                .map(|name| SharedFile {
                    download_url: download_url(base_url, &join_relative(&record.item_name, &name)),
                    name,
                })
                .collect();

            Ok(ShareView::Folder {
                link_name: record.link_name.clone(),
                folder_name: record.basename(),
                files,
                folders,
            })
        } else {
            Ok(ShareView::File {
                download_url: download_url(base_url, &record.item_name),
                file_name: record.basename(),
                link_name: record.link_name,
            })
        }
    }

    /// Deletes a share link. Idempotent: a missing token is not an error.
    pub async fn delete(&self, privilege: Privilege, token: &str) -> AppResult<()> {
        privilege.require_editor()?;

        let store = self.store.lock().await;
        let mut links = store.load().await;
        if links.remove(token).is_some() {
            store.save(&links).await?;
            info!(token = %token, "Share link deleted");
        }

        Ok(())
    }

    /// Lists every persisted share link for the overview page.
    ///
    /// Expired links are flagged but not pruned — pruning only happens
    /// as the resolution-time side effect.
    pub async fn list(&self, privilege: Privilege, base_url: &str) -> AppResult<Vec<ShareLinkEntry>> {
        privilege.require_viewer()?;

        let links = self.store.lock().await.load().await;

        let mut entries: Vec<ShareLinkEntry> = links
            .into_iter()
            .map(|(token, record)| ShareLinkEntry {
                url: share_url(base_url, &token),
                is_expired: record.is_expired(),
                link_name: record.link_name,
                item_name: record.item_name,
                is_directory: record.is_directory,
                expiry_date: record.expiry_date,
                token,
            })
            .collect();

        entries.sort_by(|a, b| (a.expiry_date, &a.token).cmp(&(b.expiry_date, &b.token)));
        Ok(entries)
    }
}

fn share_url(base_url: &str, token: &str) -> String {
    format!("{}/share/{token}", base_url.trim_end_matches('/'))
}

fn download_url(base_url: &str, relative: &str) -> String {
    format!("{}/uploads/{relative}", base_url.trim_end_matches('/'))
}

fn join_relative(dir: &str, name: &str) -> String {
    if dir.is_empty() {
        name.to_string()
    } else {
        format!("{}/{name}", dir.trim_end_matches('/'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_derivation() {
        assert_eq!(
            share_url("http://localhost:50000/", "abc"),
            "http://localhost:50000/share/abc"
        );
        assert_eq!(
            download_url("http://localhost:50000", "mixes/a.mp3"),
            "http://localhost:50000/uploads/mixes/a.mp3"
        );
    }

    #[test]
    fn test_join_relative() {
        assert_eq!(join_relative("", "a.mp3"), "a.mp3");
        assert_eq!(join_relative("mixes", "a.mp3"), "mixes/a.mp3");
        assert_eq!(join_relative("mixes/", "a.mp3"), "mixes/a.mp3");
    }
}
