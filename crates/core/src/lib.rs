//! `jewelmart-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives for the storefront client
//! (no I/O, no framework concerns).

pub mod error;
pub mod identity;
pub mod route;

pub use error::{DomainError, DomainResult};
pub use identity::Identity;
pub use route::{Navigator, RecordingNavigator, Route};
