//! Share link configuration.

use serde::{Deserialize, Serialize};

/// Share link persistence configuration.
///
/// The 48-hour expiry window and the token format are fixed design
/// constants, not configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShareConfig {
    /// Path of the persisted share-store JSON document.
    #[serde(default = "default_store_path")]
    pub store_path: String,
}

impl Default for ShareConfig {
    fn default() -> Self {
        Self {
            store_path: default_store_path(),
        }
    }
}

fn default_store_path() -> String {
    "./data/shared_links.json".to_string()
}
