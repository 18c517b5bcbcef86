//! # localStorage credential store — browser-side persistence
//!
//! [`LocalStore`] is the [`CredentialStore`] used on the **web platform**. It keeps
//! the token and role in `window.localStorage`, which survives reloads and
//! in-app navigation but is scoped to the origin.
//!
//! ## Error handling
//!
//! Every method swallows storage errors (private mode, quota, disabled storage):
//! reads degrade to "logged out" and writes become no-ops, with a warning in the
//! console. The server remains the authority on whether a token is valid.

use web_sys::Storage;

use crate::credential::{
    entries, from_entries, remove_entries, CredentialStore, ROLE_KEY, TOKEN_KEY,
};
use crate::models::Credential;

/// `window.localStorage`-backed CredentialStore.
///
/// Zero-sized; the storage handle is looked up on every call so the value can be
/// cloned freely into closures.
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalStore;

impl LocalStore {
    pub fn new() -> Self {
        Self
    }

    fn storage(&self) -> Option<Storage> {
        match web_sys::window()?.local_storage() {
            Ok(storage) => storage,
            Err(_) => {
                tracing::warn!("localStorage is not available");
                None
            }
        }
    }
}

impl CredentialStore for LocalStore {
    fn save(&self, credential: &Credential) {
        let Some(storage) = self.storage() else {
            return;
        };
        for (key, value) in entries(credential) {
            if storage.set_item(key, value).is_err() {
                tracing::warn!("failed to persist {key}");
            }
        }
    }

    fn load(&self) -> Option<Credential> {
        let storage = self.storage()?;
        let token = storage.get_item(TOKEN_KEY).ok().flatten();
        let role = storage.get_item(ROLE_KEY).ok().flatten();
        from_entries(token, role)
    }

    fn clear(&self) {
        let Some(storage) = self.storage() else {
            return;
        };
        remove_entries(|key| storage.remove_item(key));
    }
}
