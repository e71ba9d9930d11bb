//! Navigation surface: the storefront route table and the navigation capability.
//!
//! Routing mechanics live in the host (browser router, test harness); this
//! layer only names destinations and hands them to a [`Navigator`].

use core::str::FromStr;
use std::sync::{Arc, Mutex};

use crate::error::DomainError;

/// A storefront destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Home,
    Products,
    About,
    Contact,
    PoliciesFaq,
    Login,
    Cart,
    Profile,
    PasswordReset,
}

impl Route {
    /// The path the router understands.
    pub fn path(&self) -> &'static str {
        match self {
            Route::Home => "/",
            Route::Products => "/products",
            Route::About => "/about",
            Route::Contact => "/contact",
            Route::PoliciesFaq => "/policies-faq",
            Route::Login => "/login",
            Route::Cart => "/cart",
            Route::Profile => "/profile",
            // Path casing kept as the backend/router expects it.
            Route::PasswordReset => "/ForgetPassword",
        }
    }

    /// Whether this is the home route (the only scroll-eligible one).
    pub fn is_home(&self) -> bool {
        matches!(self, Route::Home)
    }
}

impl core::fmt::Display for Route {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.path())
    }
}

impl FromStr for Route {
    type Err = DomainError;

    fn from_str(path: &str) -> Result<Self, Self::Err> {
        match path {
            "/" => Ok(Route::Home),
            "/products" => Ok(Route::Products),
            "/about" => Ok(Route::About),
            "/contact" => Ok(Route::Contact),
            "/policies-faq" => Ok(Route::PoliciesFaq),
            "/login" => Ok(Route::Login),
            "/cart" => Ok(Route::Cart),
            "/profile" => Ok(Route::Profile),
            "/ForgetPassword" => Ok(Route::PasswordReset),
            other => Err(DomainError::unknown_route(other)),
        }
    }
}

/// Navigation capability consumed by flows and view models.
///
/// Destinations are opaque to the implementation; the browser shell maps
/// them onto the client-side router, tests record them.
pub trait Navigator {
    fn navigate(&self, to: Route);
}

/// Navigator that records destinations in order.
///
/// First-class (not test-gated) so every crate's tests and the demo shell
/// can share it.
#[derive(Debug, Default, Clone)]
pub struct RecordingNavigator {
    visits: Arc<Mutex<Vec<Route>>>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Destinations navigated to so far, oldest first.
    pub fn visits(&self) -> Vec<Route> {
        self.visits.lock().map(|v| v.clone()).unwrap_or_default()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, to: Route) {
        if let Ok(mut visits) = self.visits.lock() {
            visits.push(to);
        }
    }
}
