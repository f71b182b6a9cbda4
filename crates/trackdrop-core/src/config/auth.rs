//! Credential gate configuration.

use serde::{Deserialize, Serialize};

/// Two-level credential configuration.
///
/// A submitted password matching `edit_password` grants editor access;
/// one matching `view_password` grants read-only access. There are no
/// user accounts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Password granting read-only (viewer) access.
    pub view_password: String,
    /// Password granting full (editor) access.
    pub edit_password: String,
}
