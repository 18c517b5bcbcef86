use std::collections::HashMap;
use std::convert::Infallible;
use std::sync::{Arc, Mutex};

use crate::credential::{
    entries, from_entries, remove_entries, CredentialStore, ROLE_KEY, TOKEN_KEY,
};
use crate::models::Credential;

/// In-memory CredentialStore for testing and non-browser builds.
///
/// Clones share the same entries, so one instance can be handed to the auth
/// session and the gateway at once.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw entry lookup, mirroring what a browser storage inspector would show.
    pub fn get(&self, key: &str) -> Option<String> {
        self.lock().get(key).cloned()
    }

    /// Write a raw entry, bypassing [`CredentialStore::save`].
    pub fn set(&self, key: &str, value: &str) {
        self.lock().insert(key.to_string(), value.to_string());
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        // A poisoned map still holds valid strings.
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl CredentialStore for MemoryStore {
    fn save(&self, credential: &Credential) {
        let mut map = self.lock();
        for (key, value) in entries(credential) {
            map.insert(key.to_string(), value.to_string());
        }
    }

    fn load(&self) -> Option<Credential> {
        let map = self.lock();
        from_entries(map.get(TOKEN_KEY).cloned(), map.get(ROLE_KEY).cloned())
    }

    fn clear(&self) {
        let mut map = self.lock();
        remove_entries(|key| {
            map.remove(key);
            Ok::<(), Infallible>(())
        });
    }
}
