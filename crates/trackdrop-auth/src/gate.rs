//! Password-to-privilege mapping.

use tracing::info;

use trackdrop_core::config::auth::AuthConfig;
use trackdrop_entity::Privilege;

/// Maps a submitted password to a [`Privilege`].
///
/// The edit password is checked first so that configuring both passwords
/// to the same value grants editor access.
#[derive(Debug, Clone)]
pub struct CredentialGate {
    /// Password granting viewer access.
    view_password: String,
    /// Password granting editor access.
    edit_password: String,
}

impl CredentialGate {
    /// Creates a new credential gate from the auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            view_password: config.view_password.clone(),
            edit_password: config.edit_password.clone(),
        }
    }

    /// Evaluates a submitted password.
    ///
    /// Never fails: an unrecognized password yields
    /// [`Privilege::Unauthenticated`], which every privileged operation
    /// then rejects with `Unauthorized`.
    pub fn authenticate(&self, password: &str) -> Privilege {
        let privilege = if password == self.edit_password {
            Privilege::Editor
        } else if password == self.view_password {
            Privilege::Viewer
        } else {
            Privilege::Unauthenticated
        };

        if privilege != Privilege::Unauthenticated {
            info!(privilege = %privilege, "Credential accepted");
        }

        privilege
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gate() -> CredentialGate {
        CredentialGate::new(&AuthConfig {
            view_password: "look".into(),
            edit_password: "touch".into(),
        })
    }

    #[test]
    fn test_edit_password_grants_editor() {
        assert_eq!(gate().authenticate("touch"), Privilege::Editor);
    }

    #[test]
    fn test_view_password_grants_viewer() {
        assert_eq!(gate().authenticate("look"), Privilege::Viewer);
    }

    #[test]
    fn test_unknown_password_is_unauthenticated() {
        assert_eq!(gate().authenticate("guess"), Privilege::Unauthenticated);
        assert_eq!(gate().authenticate(""), Privilege::Unauthenticated);
    }

    #[test]
    fn test_shared_password_prefers_editor() {
        let gate = CredentialGate::new(&AuthConfig {
            view_password: "same".into(),
            edit_password: "same".into(),
        });
        assert_eq!(gate.authenticate("same"), Privilege::Editor);
    }
}
