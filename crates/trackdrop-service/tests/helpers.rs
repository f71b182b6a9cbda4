//! Shared test helpers for service integration tests.

use std::sync::Arc;
use std::time::{Duration, SystemTime};

use chrono::Utc;
use tempfile::TempDir;

use trackdrop_core::config::storage::StorageConfig;
use trackdrop_entity::ShareRecord;
use trackdrop_service::{LibraryService, ShareLinkService, ShareStore};
use trackdrop_storage::PathResolver;

/// Base URL the embedding server would pass per request.
pub const BASE_URL: &str = "http://localhost:50000";

/// Test application context over a temporary storage root.
pub struct TestApp {
    /// Keeps the temp tree alive for the test's duration.
    _tmp: TempDir,
    /// Resolver over the temp storage root.
    pub resolver: Arc<PathResolver>,
    /// Direct handle on the persisted store for assertions.
    pub store: ShareStore,
    /// Share link service under test.
    pub shares: ShareLinkService,
    /// Library service under test.
    pub library: LibraryService,
}

impl TestApp {
    /// Create a new test application.
    pub async fn new() -> Self {
        let tmp = tempfile::tempdir().expect("Failed to create temp dir");
        let uploads = tmp.path().join("uploads");
        let store_path = tmp.path().join("shared_links.json");

        let resolver = Arc::new(
            PathResolver::new(uploads.to_str().unwrap())
                .await
                .expect("Failed to init resolver"),
        );

        let shares = ShareLinkService::new(Arc::clone(&resolver), ShareStore::new(&store_path));
        let library = LibraryService::new(Arc::clone(&resolver), StorageConfig::default());

        Self {
            resolver: Arc::clone(&resolver),
            store: ShareStore::new(&store_path),
            shares,
            library,
            _tmp: tmp,
        }
    }

    /// A library service with a custom upload size cap, over the same root.
    pub fn library_with_max_upload(&self, max_upload_size_bytes: u64) -> LibraryService {
        let config = StorageConfig {
            max_upload_size_bytes,
            ..StorageConfig::default()
        };
        LibraryService::new(Arc::clone(&self.resolver), config)
    }

    /// Write a file at a relative path, with an mtime `age_secs` in the past.
    pub fn write_file(&self, relative: &str, age_secs: u64) {
        let path = self.resolver.root().join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(&path, b"audio-bytes").unwrap();

        let mtime = SystemTime::now() - Duration::from_secs(age_secs);
        let file = std::fs::File::options().write(true).open(&path).unwrap();
        file.set_modified(mtime).unwrap();
    }

    /// Create a directory (and ancestors) at a relative path.
    pub fn mkdir(&self, relative: &str) {
        std::fs::create_dir_all(self.resolver.root().join(relative)).unwrap();
    }

    /// Whether anything exists at a relative path.
    pub fn exists(&self, relative: &str) -> bool {
        self.resolver.root().join(relative).exists()
    }
}

/// A record whose expiry already passed, as an old deployment would have
/// persisted it.
pub fn expired_record(item_name: &str, is_directory: bool) -> ShareRecord {
    ShareRecord {
        link_name: "Old link".to_string(),
        item_name: item_name.to_string(),
        is_directory,
        creation_date: Utc::now() - chrono::Duration::hours(50),
        expiry_date: Utc::now() - chrono::Duration::hours(2),
    }
}
