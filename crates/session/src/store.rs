//! Persisted session marker store.
//!
//! One key-value entry under a single well-known key. The browser shell
//! backs this with `localStorage`; tests use the in-memory store.

use std::sync::{Arc, Mutex};

/// The well-known key the session marker lives under.
pub const SESSION_KEY: &str = "user";

/// Storage for the single persisted session marker.
///
/// Implementations hold the raw serialized payload; interpreting it is the
/// caller's concern. `save` overwrites, `clear` is a no-op when absent.
pub trait SessionStore {
    /// The raw marker payload, if present.
    fn load(&self) -> Option<String>;

    /// Overwrite the marker with a new payload.
    fn save(&self, raw: &str);

    /// Delete the marker.
    fn clear(&self);
}

/// In-memory marker store.
///
/// Cheap to clone; clones share the same entry, mirroring how every
/// component in the browser sees the same `localStorage` slot.
#[derive(Debug, Default, Clone)]
pub struct MemorySessionStore {
    entry: Arc<Mutex<Option<String>>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with a marker already present (as if a login just happened).
    pub fn with_marker(raw: impl Into<String>) -> Self {
        Self {
            entry: Arc::new(Mutex::new(Some(raw.into()))),
        }
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> Option<String> {
        self.entry.lock().ok().and_then(|e| e.clone())
    }

    fn save(&self, raw: &str) {
        if let Ok(mut entry) = self.entry.lock() {
            *entry = Some(raw.to_string());
        }
    }

    fn clear(&self) {
        if let Ok(mut entry) = self.entry.lock() {
            *entry = None;
        }
    }
}
