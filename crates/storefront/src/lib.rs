//! `jewelmart-storefront`
//!
//! **Responsibility:** the client shell around the storefront core.
//!
//! This crate provides:
//! - Environment-driven configuration
//! - A REST adapter for the remote identity store
//! - A tokio-backed redirect timer and an abort-on-drop submission handle
//! - The browser presentation layer (Leptos, `wasm32` targets only)
//!
//! The shell is **thin**: every behavioral contract lives in
//! `jewelmart-session` and `jewelmart-account`.

pub mod config;
pub mod rest;

#[cfg(not(target_arch = "wasm32"))]
pub mod timer;

#[cfg(target_arch = "wasm32")]
pub mod frontend;

pub use config::StorefrontConfig;
pub use rest::RestIdentityStore;

#[cfg(not(target_arch = "wasm32"))]
pub use timer::{SubmissionHandle, TokioRedirectTimer};
