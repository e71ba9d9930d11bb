//! Browser-backed session marker store (`localStorage`).

use jewelmart_session::{SessionStore, SESSION_KEY};

/// [`SessionStore`] over the browser's `localStorage`.
///
/// Every instance sees the same underlying slot, so components can hold
/// their own copies exactly like the in-memory store's clones.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserSessionStore;

impl BrowserSessionStore {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok().flatten()
    }
}

impl SessionStore for BrowserSessionStore {
    fn load(&self) -> Option<String> {
        Self::storage()?.get_item(SESSION_KEY).ok().flatten()
    }

    fn save(&self, raw: &str) {
        if let Some(storage) = Self::storage() {
            let _ = storage.set_item(SESSION_KEY, raw);
        }
    }

    fn clear(&self) {
        if let Some(storage) = Self::storage() {
            let _ = storage.remove_item(SESSION_KEY);
        }
    }
}
