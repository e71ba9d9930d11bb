//! The Identity record: user-facing profile data.
//!
//! This is the only domain entity the client owns. It is created elsewhere
//! (at login) and persisted as a single JSON marker; this module gives that
//! loosely-shaped payload a fixed schema with required fields.

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};

/// Placeholder glyph for the avatar when the display name is empty.
const AVATAR_PLACEHOLDER: char = '?';

/// The user-facing profile data displayed by the storefront.
///
/// # Invariants
/// - `profile_completion` is a percentage in `0..=100`.
/// - `join_date` and `profile_completion` are display-only: whatever was
///   stored at login time, never recomputed client-side.
///
/// Wire names are camelCase to match the persisted marker written by the
/// login flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    /// Display name.
    pub name: String,
    /// Unique per account in the backend.
    pub email: String,
    /// Display-only membership date, e.g. "Jan 2024".
    pub join_date: String,
    /// Profile completion percentage, 0–100.
    pub profile_completion: u8,
}

impl Identity {
    /// The fixed default identity used when nothing else is available.
    pub fn guest() -> Self {
        Self {
            name: "Guest".to_string(),
            email: "guest@example.com".to_string(),
            join_date: "Jan 2024".to_string(),
            profile_completion: 75,
        }
    }

    /// Decode a persisted marker payload into the fixed schema.
    ///
    /// All four fields are required; a record missing any of them, or with a
    /// completion percentage out of range, is a malformed record. Callers
    /// decide the fallback (see the profile view model).
    pub fn parse(raw: &str) -> DomainResult<Self> {
        let identity: Identity =
            serde_json::from_str(raw).map_err(|e| DomainError::malformed(e.to_string()))?;

        if identity.profile_completion > 100 {
            return Err(DomainError::malformed(format!(
                "profileCompletion out of range: {}",
                identity.profile_completion
            )));
        }

        Ok(identity)
    }

    /// Serialize into the persisted marker payload.
    pub fn to_marker(&self) -> DomainResult<String> {
        serde_json::to_string(self).map_err(|e| DomainError::malformed(e.to_string()))
    }

    /// First character of the display name, upper-cased.
    ///
    /// An empty name yields an explicit placeholder rather than propagating
    /// an error into the view layer.
    pub fn avatar_initial(&self) -> char {
        match self.name.chars().next() {
            Some(c) => c.to_uppercase().next().unwrap_or(c),
            None => AVATAR_PLACEHOLDER,
        }
    }
}
