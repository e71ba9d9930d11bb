//! Session State Reader.
//!
//! Derives `is_logged_in` from the persisted marker on every route change.
//! The default mode never parses the marker (presence alone decides), so
//! the reader cannot fail.

use chrono::{DateTime, Utc};

use crate::session::Session;
use crate::store::SessionStore;

/// How the reader interprets a present marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Interpretation {
    /// Marker present means logged in. Contents are never inspected.
    PresenceOnly,
    /// Additionally parse the marker; a parseable session whose expiry has
    /// passed reports logged out. Unparseable markers fall back to presence.
    ValidateExpiry,
}

/// Reads the persisted marker and exposes the derived login flag.
#[derive(Debug)]
pub struct SessionReader<S: SessionStore> {
    store: S,
    interpretation: Interpretation,
    is_logged_in: bool,
}

impl<S: SessionStore> SessionReader<S> {
    /// Presence-only reader: the original observable contract.
    pub fn new(store: S) -> Self {
        let mut reader = Self {
            store,
            interpretation: Interpretation::PresenceOnly,
            is_logged_in: false,
        };
        reader.refresh_at(Utc::now());
        reader
    }

    /// Reader with the opt-in expiry hook enabled.
    pub fn with_validation(store: S) -> Self {
        let mut reader = Self {
            store,
            interpretation: Interpretation::ValidateExpiry,
            is_logged_in: false,
        };
        reader.refresh_at(Utc::now());
        reader
    }

    pub fn is_logged_in(&self) -> bool {
        self.is_logged_in
    }

    /// Re-derive the login flag; called by the shell on every route change.
    pub fn on_route_change(&mut self) -> bool {
        self.refresh_at(Utc::now())
    }

    /// Deterministic refresh used by `on_route_change` and tests.
    pub fn refresh_at(&mut self, now: DateTime<Utc>) -> bool {
        let marker = self.store.load();

        self.is_logged_in = match (self.interpretation, marker) {
            (_, None) => false,
            (Interpretation::PresenceOnly, Some(_)) => true,
            (Interpretation::ValidateExpiry, Some(raw)) => match Session::parse(&raw) {
                Ok(session) => session.validate(now).is_ok(),
                Err(err) => {
                    // Unparseable markers keep the presence-only behavior.
                    tracing::debug!(%err, "session marker unparseable; counting presence");
                    true
                }
            },
        };

        self.is_logged_in
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemorySessionStore;
    use chrono::Duration;
    use jewelmart_core::Identity;

    #[test]
    fn absent_marker_means_logged_out() {
        let reader = SessionReader::new(MemorySessionStore::new());
        assert!(!reader.is_logged_in());
    }

    #[test]
    fn present_marker_means_logged_in_without_parsing() {
        // Garbage contents still count: presence is the whole contract.
        let store = MemorySessionStore::with_marker("{{{ not json");
        let reader = SessionReader::new(store);
        assert!(reader.is_logged_in());
    }

    #[test]
    fn route_change_picks_up_login_and_logout() {
        let store = MemorySessionStore::new();
        let mut reader = SessionReader::new(store.clone());
        assert!(!reader.is_logged_in());

        store.save(&Identity::guest().to_marker().unwrap());
        assert!(reader.on_route_change());

        store.clear();
        assert!(!reader.on_route_change());
    }

    #[test]
    fn validation_mode_honors_expiry() {
        let now = Utc::now();
        let expired = Session::with_expiry(Identity::guest(), now - Duration::minutes(5));
        let store = MemorySessionStore::with_marker(expired.to_marker().unwrap());

        let mut reader = SessionReader::with_validation(store);
        assert!(!reader.refresh_at(now));
    }

    #[test]
    fn validation_mode_keeps_unexpired_sessions() {
        let now = Utc::now();
        let live = Session::with_expiry(Identity::guest(), now + Duration::minutes(5));
        let store = MemorySessionStore::with_marker(live.to_marker().unwrap());

        let mut reader = SessionReader::with_validation(store);
        assert!(reader.refresh_at(now));
    }

    #[test]
    fn validation_mode_falls_back_to_presence_for_garbage() {
        let store = MemorySessionStore::with_marker("not a session");
        let mut reader = SessionReader::with_validation(store);
        assert!(reader.refresh_at(Utc::now()));
    }

    #[test]
    fn presence_mode_ignores_expiry() {
        let now = Utc::now();
        let expired = Session::with_expiry(Identity::guest(), now - Duration::minutes(5));
        let store = MemorySessionStore::with_marker(expired.to_marker().unwrap());

        let mut reader = SessionReader::new(store);
        assert!(reader.refresh_at(now));
    }
}
