//! # Credential store — the single owner of the persisted session
//!
//! [`CredentialStore`] is the only way the rest of the console reads or writes the
//! token and role. It is handed to consumers (the auth session, the gateway) as a
//! value instead of being looked up from ambient browser storage, so tests can
//! swap in [`crate::MemoryStore`].
//!
//! ## Persisted layout
//!
//! Two string entries, always written and removed together:
//!
//! | Key | Value |
//! |-----|-------|
//! | [`TOKEN_KEY`] (`"token"`) | bearer token, verbatim |
//! | [`ROLE_KEY`] (`"role"`) | `"admin"` or `"common"` |
//!
//! A missing token means logged out. A token with a missing or unrecognised role
//! still counts as a session and loads as [`Role::Common`].

use crate::models::{Credential, Role};

pub const TOKEN_KEY: &str = "token";
pub const ROLE_KEY: &str = "role";

/// Durable holder for the current [`Credential`].
pub trait CredentialStore {
    /// Persist a credential, replacing whatever was stored before.
    fn save(&self, credential: &Credential);
    /// Read back the stored credential, `None` when logged out.
    fn load(&self) -> Option<Credential>;
    /// Remove both entries.
    fn clear(&self);
}

/// Key/value pairs written by [`CredentialStore::save`].
pub(crate) fn entries(credential: &Credential) -> [(&'static str, &str); 2] {
    [
        (TOKEN_KEY, credential.token.as_str()),
        (ROLE_KEY, credential.role.as_str()),
    ]
}

/// Remove both entries, continuing past a failed removal. Returns `true` when
/// every removal succeeded.
pub(crate) fn remove_entries<E: std::fmt::Debug>(
    mut remove: impl FnMut(&'static str) -> Result<(), E>,
) -> bool {
    let mut removed = true;
    for key in [TOKEN_KEY, ROLE_KEY] {
        if let Err(e) = remove(key) {
            tracing::warn!("failed to remove {key}: {e:?}");
            removed = false;
        }
    }
    removed
}

/// Rebuild a credential from the raw stored entries.
pub(crate) fn from_entries(token: Option<String>, role: Option<String>) -> Option<Credential> {
    let token = token?;
    let role = match role.as_deref().map(str::parse::<Role>) {
        Some(Ok(role)) => role,
        Some(Err(e)) => {
            tracing::warn!("stored role ignored: {e}");
            Role::Common
        }
        None => Role::Common,
    };
    Some(Credential { token, role })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_token_means_logged_out() {
        assert!(from_entries(None, Some("admin".to_string())).is_none());
    }

    #[test]
    fn test_token_is_kept_verbatim() {
        let credential =
            from_entries(Some("  not a jwt  ".to_string()), Some("admin".to_string())).unwrap();
        assert_eq!(credential.token, "  not a jwt  ");
        assert_eq!(credential.role, Role::Admin);
    }

    #[test]
    fn test_bad_or_missing_role_falls_back_to_common() {
        let missing = from_entries(Some("t".to_string()), None).unwrap();
        assert_eq!(missing.role, Role::Common);

        let unknown = from_entries(Some("t".to_string()), Some("owner".to_string())).unwrap();
        assert_eq!(unknown.role, Role::Common);
    }

    #[test]
    fn test_failed_removal_still_attempts_both_keys() {
        let mut attempted = Vec::new();
        let removed = remove_entries(|key| {
            attempted.push(key);
            if key == TOKEN_KEY {
                Err("quota")
            } else {
                Ok(())
            }
        });

        assert!(!removed);
        assert_eq!(attempted, vec![TOKEN_KEY, ROLE_KEY]);
        assert!(remove_entries(|_| Ok::<(), &str>(())));
    }

    #[test]
    fn test_entries_use_both_keys() {
        let credential = Credential::new("abc", Role::Common);
        let entries = entries(&credential);
        assert_eq!(entries[0], (TOKEN_KEY, "abc"));
        assert_eq!(entries[1], (ROLE_KEY, "common"));
    }
}
