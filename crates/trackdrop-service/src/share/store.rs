//! Persisted share store.
//!
//! A single JSON document mapping token to [`ShareRecord`], rewritten
//! wholesale on every mutation. The store itself only loads and saves;
//! callers own the read-modify-write sequence and serialize it behind
//! one [`tokio::sync::Mutex`] per process (see
//! [`ShareLinkService`](crate::share::service::ShareLinkService)).
//! Cross-process writers remain out of scope.

use std::collections::HashMap;
use std::path::PathBuf;

use tokio::fs;
use tracing::warn;

use trackdrop_core::error::{AppError, ErrorKind};
use trackdrop_core::result::AppResult;
use trackdrop_entity::ShareRecord;

/// Loads and saves the share-store document.
#[derive(Debug, Clone)]
pub struct ShareStore {
    /// Location of the persisted JSON document.
    path: PathBuf,
}

impl ShareStore {
    /// Creates a store over the given document path.
    pub fn new(store_path: impl Into<PathBuf>) -> Self {
        Self {
            path: store_path.into(),
        }
    }

    /// Load the full token → record mapping.
    ///
    /// A missing document or one that fails to parse as a JSON object
    /// yields an empty mapping — never an error.
    pub async fn load(&self) -> HashMap<String, ShareRecord> {
        let raw = match fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(_) => return HashMap::new(),
        };

        match serde_json::from_str(&raw) {
            Ok(links) => links,
            Err(e) => {
                warn!(
                    path = %self.path.display(),
                    error = %e,
                    "Share store unreadable, treating as empty"
                );
                HashMap::new()
            }
        }
    }

    /// Overwrite the persisted document with the given mapping.
    pub async fn save(&self, links: &HashMap<String, ShareRecord>) -> AppResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).await.map_err(|e| {
                AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to create store directory: {}", parent.display()),
                    e,
                )
            })?;
        }

        let json = serde_json::to_string_pretty(links)?;
        fs::write(&self.path, json).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to write share store: {}", self.path.display()),
                e,
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_document_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = ShareStore::new(dir.path().join("links.json"));
        assert!(store.load().await.is_empty());
    }

    #[tokio::test]
    async fn test_invalid_document_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("links.json");

        for garbage in ["not json at all", "[1, 2, 3]", "42"] {
            std::fs::write(&path, garbage).unwrap();
            let store = ShareStore::new(&path);
            assert!(store.load().await.is_empty(), "{garbage}");
        }
    }

    #[tokio::test]
    async fn test_save_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = ShareStore::new(dir.path().join("nested/links.json"));

        let mut links = HashMap::new();
        links.insert(
            "abc123".to_string(),
            ShareRecord::new(Some("Mix".into()), "mixes/a.mp3".into(), false),
        );
        store.save(&links).await.unwrap();

        let loaded = store.load().await;
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded["abc123"].item_name, "mixes/a.mp3");
    }

    #[tokio::test]
    async fn test_loads_legacy_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("links.json");
        std::fs::write(
            &path,
            r#"{
                "tok": {
                    "filename": "legacy.mp3",
                    "creation_date": "2026-01-01T00:00:00Z",
                    "expiry_date": "2026-01-03T00:00:00Z"
                }
            }"#,
        )
        .unwrap();

        let loaded = ShareStore::new(&path).load().await;
        assert_eq!(loaded["tok"].item_name, "legacy.mp3");
        assert_eq!(loaded["tok"].link_name, "Unnamed link");
    }
}
