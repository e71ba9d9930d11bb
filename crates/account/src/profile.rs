//! Profile view model.
//!
//! Resolves the effective identity from the persisted marker, an optionally
//! injected identity, and the guest default, and exposes the profile page's
//! actions.

use jewelmart_core::{Identity, Navigator, Route};
use jewelmart_session::SessionStore;

/// A display-only dashboard section. The backend owns the richer schema
/// (orders, addresses, wishlist); this client only renders empty states and
/// never fetches them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardSection {
    pub title: &'static str,
    pub empty_state: &'static str,
    pub action_label: &'static str,
}

/// The profile page's sections, in display order.
pub const DASHBOARD_SECTIONS: [DashboardSection; 3] = [
    DashboardSection {
        title: "My Orders",
        empty_state: "You haven't placed any orders yet.",
        action_label: "Browse Products",
    },
    DashboardSection {
        title: "My Wishlist",
        empty_state: "Your wishlist is currently empty.",
        action_label: "Add Your Favorites",
    },
    DashboardSection {
        title: "Saved Addresses",
        empty_state: "No address added yet.",
        action_label: "Add New Address",
    },
];

/// View model behind the profile page.
///
/// Effective identity precedence: a parseable persisted marker wins, then
/// the injected identity, then the guest default. A persisted marker that
/// fails to parse falls back to the guest default (not to the injected
/// identity); the failure is only logged, never surfaced.
#[derive(Debug)]
pub struct ProfileViewModel<S: SessionStore, N: Navigator> {
    store: S,
    navigator: N,
    identity: Identity,
}

impl<S: SessionStore, N: Navigator> ProfileViewModel<S, N> {
    pub fn resolve(store: S, navigator: N, injected: Option<Identity>) -> Self {
        let identity = match store.load() {
            Some(raw) => match Identity::parse(&raw) {
                Ok(identity) => identity,
                Err(err) => {
                    tracing::warn!(%err, "persisted identity unparseable; using guest default");
                    Identity::guest()
                }
            },
            None => injected.unwrap_or_else(Identity::guest),
        };

        Self {
            store,
            navigator,
            identity,
        }
    }

    /// The identity actually displayed.
    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    pub fn avatar_initial(&self) -> char {
        self.identity.avatar_initial()
    }

    pub fn dashboard_sections(&self) -> &'static [DashboardSection] {
        &DASHBOARD_SECTIONS
    }

    /// Delete the persisted marker, reset to guest, go to login.
    ///
    /// Idempotent: a second call is a no-op beyond the navigation.
    pub fn logout(&mut self) {
        self.store.clear();
        self.identity = Identity::guest();
        self.navigator.navigate(Route::Login);
    }

    /// Navigate to the password reset page; no state change.
    pub fn go_to_password_reset(&self) {
        self.navigator.navigate(Route::PasswordReset);
    }
}
