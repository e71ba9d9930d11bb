//! Navbar chrome: presentation mode and link visibility.
//!
//! The navbar overlays the hero transparently on the home route and goes
//! opaque once the viewport scrolls past a fixed threshold; every other
//! route is opaque unconditionally. Scroll listeners are only worth having
//! on the home route, so the controller tells its host when to attach and
//! detach them.

use jewelmart_core::Route;

/// Scroll offset (px) past which the home-route navbar goes opaque.
pub const SCROLL_OPAQUE_THRESHOLD_PX: f64 = 50.0;

/// Binary display mode of the navbar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChromeMode {
    /// Transparent overlay over the hero (home route, near the top).
    Transparent,
    /// Solid background.
    Opaque,
}

/// Instruction to the host about the scroll listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListenerDirective {
    Attach,
    Detach,
}

/// Derives the navbar display mode from route and scroll position.
#[derive(Debug)]
pub struct NavChrome {
    on_home: bool,
    scroll_offset_px: f64,
    listener_attached: bool,
}

impl NavChrome {
    /// Controller for a navbar mounted on `route` at `scroll_offset_px`.
    ///
    /// The returned directive must be honored immediately (a navbar mounted
    /// on the home route needs its listener from the start).
    pub fn new(route: Route, scroll_offset_px: f64) -> (Self, Option<ListenerDirective>) {
        let mut chrome = Self {
            on_home: false,
            scroll_offset_px,
            listener_attached: false,
        };
        let directive = chrome.on_route_change(route, scroll_offset_px);
        (chrome, directive)
    }

    pub fn mode(&self) -> ChromeMode {
        if !self.on_home {
            return ChromeMode::Opaque;
        }
        if self.scroll_offset_px > SCROLL_OPAQUE_THRESHOLD_PX {
            ChromeMode::Opaque
        } else {
            ChromeMode::Transparent
        }
    }

    /// Route changed. Returns the listener directive for the host, if the
    /// route's scroll-eligibility changed (edge-triggered).
    pub fn on_route_change(
        &mut self,
        route: Route,
        scroll_offset_px: f64,
    ) -> Option<ListenerDirective> {
        self.on_home = route.is_home();
        self.scroll_offset_px = scroll_offset_px;

        match (self.on_home, self.listener_attached) {
            (true, false) => {
                self.listener_attached = true;
                Some(ListenerDirective::Attach)
            }
            (false, true) => {
                self.listener_attached = false;
                Some(ListenerDirective::Detach)
            }
            _ => None,
        }
    }

    /// Scroll event while mounted. Only meaningful on the home route;
    /// events that race a detach are ignored.
    pub fn on_scroll(&mut self, scroll_offset_px: f64) {
        if self.on_home {
            self.scroll_offset_px = scroll_offset_px;
        }
    }
}

/// A navbar destination with its display label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavLink {
    pub label: &'static str,
    pub route: Route,
}

/// The links the navbar shows, in display order.
///
/// Login appears only when logged out; the profile icon only when logged in.
pub fn nav_links(is_logged_in: bool) -> Vec<NavLink> {
    let mut links = vec![
        NavLink { label: "Home", route: Route::Home },
        NavLink { label: "Products", route: Route::Products },
        NavLink { label: "About", route: Route::About },
        NavLink { label: "Contact", route: Route::Contact },
        NavLink { label: "Policies & FAQ", route: Route::PoliciesFaq },
    ];
    if !is_logged_in {
        links.push(NavLink { label: "Login", route: Route::Login });
    }
    links.push(NavLink { label: "Cart", route: Route::Cart });
    if is_logged_in {
        links.push(NavLink { label: "Profile", route: Route::Profile });
    }
    links
}
