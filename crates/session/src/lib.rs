//! `jewelmart-session` — client-side session state.
//!
//! "Logged in" here is a client-trusted local flag: the mere presence of a
//! persisted marker. This crate wraps that marker in an explicit session
//! object (with an opt-in expiry hook), a reader that re-derives login state
//! on navigation, and the navbar chrome controller.

pub mod chrome;
pub mod reader;
pub mod session;
pub mod store;

pub use chrome::{nav_links, ChromeMode, ListenerDirective, NavChrome, NavLink, SCROLL_OPAQUE_THRESHOLD_PX};
pub use reader::SessionReader;
pub use session::{Session, SessionValidationError};
pub use store::{MemorySessionStore, SessionStore, SESSION_KEY};
