//! `jewelmart-account` — account-facing control flows.
//!
//! The password-reset flow and the profile view model, written against
//! injected collaborators (remote identity store, navigator, redirect
//! timer) so every path is testable without a browser or a backend.

pub mod profile;
pub mod remote;
pub mod reset;

pub use profile::{DashboardSection, ProfileViewModel, DASHBOARD_SECTIONS};
pub use remote::{MemoryIdentityStore, RemoteIdentityStore, StoreError};
pub use reset::{
    FlowState, MessageKind, PasswordResetFlow, RedirectTimer, ResetError, StatusMessage,
    SubmitOutcome, ValidationFailure, REDIRECT_DELAY,
};
