//! Share record entity model.

use chrono::{DateTime, Duration, Utc};
use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize};
use std::path::Path;

/// Fixed share lifetime. A design constant, not configuration.
pub const SHARE_TTL_HOURS: i64 = 48;

/// One entry of the persisted share-store document, keyed by token.
///
/// The on-disk field names (`item_name`, `creation_date`, `expiry_date`)
/// are part of the external document format and must stay stable.
#[derive(Debug, Clone, Serialize)]
pub struct ShareRecord {
    /// Human-readable label for the link.
    pub link_name: String,
    /// Relative path of the shared item inside the storage root.
    pub item_name: String,
    /// Whether the shared item was a directory at creation time.
    pub is_directory: bool,
    /// When the share was created (UTC).
    pub creation_date: DateTime<Utc>,
    /// When the share stops resolving (UTC). Always creation + 48 h.
    pub expiry_date: DateTime<Utc>,
}

/// Raw on-disk shape, tolerant of documents written by older versions:
/// `link_name` and `is_directory` may be absent, and the item path may
/// live under the legacy `filename` key.
#[derive(Deserialize)]
struct RawShareRecord {
    link_name: Option<String>,
    item_name: Option<String>,
    filename: Option<String>,
    #[serde(default)]
    is_directory: bool,
    creation_date: DateTime<Utc>,
    expiry_date: DateTime<Utc>,
}

impl<'de> Deserialize<'de> for ShareRecord {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = RawShareRecord::deserialize(deserializer)?;
        let item_name = raw
            .item_name
            .or(raw.filename)
            .ok_or_else(|| D::Error::missing_field("item_name"))?;

        Ok(Self {
            link_name: raw.link_name.unwrap_or_else(default_link_name),
            item_name,
            is_directory: raw.is_directory,
            creation_date: raw.creation_date,
            expiry_date: raw.expiry_date,
        })
    }
}

impl ShareRecord {
    /// Build a fresh record for `item_name`, stamping the fixed expiry.
    pub fn new(link_name: Option<String>, item_name: String, is_directory: bool) -> Self {
        let creation_date = Utc::now();
        let link_name =
            link_name.unwrap_or_else(|| format!("Share of {}", basename(&item_name)));

        Self {
            link_name,
            item_name,
            is_directory,
            creation_date,
            expiry_date: creation_date + Duration::hours(SHARE_TTL_HOURS),
        }
    }

    /// Check whether the record is past its expiry.
    pub fn is_expired(&self) -> bool {
        Utc::now() > self.expiry_date
    }

    /// Final path component of the shared item, for display.
    pub fn basename(&self) -> String {
        basename(&self.item_name)
    }
}

fn basename(relative: &str) -> String {
    Path::new(relative)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| relative.to_string())
}

fn default_link_name() -> String {
    "Unnamed link".to_string()
}
