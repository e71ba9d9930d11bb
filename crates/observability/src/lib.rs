//! `jewelmart-observability` — logging/tracing setup for host-side tools
//! and test harnesses. The browser build logs through the console instead.

pub mod tracing;

pub use tracing::{init, init_plain};
