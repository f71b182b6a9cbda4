//! Privilege capability enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use trackdrop_core::AppError;

/// Access levels granted by the two-level credential gate.
///
/// Levels are ordered: Editor > Viewer > Unauthenticated. The value is
/// threaded explicitly through every operation call instead of living in
/// ambient session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Privilege {
    /// No valid credential presented.
    Unauthenticated,
    /// Read-only access to listings and shares.
    Viewer,
    /// Full access, including uploads, deletion, and share management.
    Editor,
}

impl Privilege {
    /// Return the privilege level (higher = more privileged).
    pub fn level(&self) -> u8 {
        match self {
            Self::Unauthenticated => 0,
            Self::Viewer => 1,
            Self::Editor => 2,
        }
    }

    /// Check if this privilege has at least the given privilege's level.
    pub fn has_at_least(&self, other: Privilege) -> bool {
        self.level() >= other.level()
    }

    /// Fail with `Unauthorized` unless the caller is at least a viewer.
    pub fn require_viewer(&self) -> Result<(), AppError> {
        if self.has_at_least(Self::Viewer) {
            Ok(())
        } else {
            Err(AppError::unauthorized("Viewer access required"))
        }
    }

    /// Fail with `Unauthorized` unless the caller is an editor.
    pub fn require_editor(&self) -> Result<(), AppError> {
        if self.has_at_least(Self::Editor) {
            Ok(())
        } else {
            Err(AppError::unauthorized("Editor access required"))
        }
    }

    /// Return the privilege as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unauthenticated => "unauthenticated",
            Self::Viewer => "viewer",
            Self::Editor => "editor",
        }
    }
}

impl fmt::Display for Privilege {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Privilege {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "unauthenticated" => Ok(Self::Unauthenticated),
            "viewer" => Ok(Self::Viewer),
            "editor" => Ok(Self::Editor),
            _ => Err(AppError::validation(format!(
                "Invalid privilege: '{s}'. Expected one of: unauthenticated, viewer, editor"
            ))),
        }
    }
}
