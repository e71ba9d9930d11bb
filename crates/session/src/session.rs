//! Explicit session object.
//!
//! The persisted marker historically was just the serialized identity, with
//! presence standing in for "logged in" and no freshness guarantee. This
//! module keeps that wire shape readable while adding an optional expiry and
//! a deterministic validation hook for hosts that opt in.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use jewelmart_core::{DomainError, DomainResult, Identity};

/// A client-side session: the identity plus an optional expiry.
///
/// Serializes to the same camelCase marker the login flow writes; markers
/// without an `expiresAt` field (the common case) simply never expire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    #[serde(flatten)]
    pub identity: Identity,

    /// Optional expiry. Absent in markers written by the login flow today.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionValidationError {
    #[error("session has expired")]
    Expired,
}

impl Session {
    /// A session with no expiry; presence alone keeps it valid.
    pub fn new(identity: Identity) -> Self {
        Self {
            identity,
            expires_at: None,
        }
    }

    pub fn with_expiry(identity: Identity, expires_at: DateTime<Utc>) -> Self {
        Self {
            identity,
            expires_at: Some(expires_at),
        }
    }

    /// Decode a persisted marker into a session.
    ///
    /// Identity fields are required exactly as in [`Identity::parse`];
    /// unknown extra fields in old markers are ignored.
    pub fn parse(raw: &str) -> DomainResult<Self> {
        let session: Session =
            serde_json::from_str(raw).map_err(|e| DomainError::malformed(e.to_string()))?;

        if session.identity.profile_completion > 100 {
            return Err(DomainError::malformed(format!(
                "profileCompletion out of range: {}",
                session.identity.profile_completion
            )));
        }

        Ok(session)
    }

    pub fn to_marker(&self) -> DomainResult<String> {
        serde_json::to_string(self).map_err(|e| DomainError::malformed(e.to_string()))
    }

    /// Deterministically validate the session at `now`.
    ///
    /// A session without an expiry is always valid; callers that never opt
    /// into expiry keep the original presence-only contract.
    pub fn validate(&self, now: DateTime<Utc>) -> Result<(), SessionValidationError> {
        match self.expires_at {
            Some(expires_at) if now >= expires_at => Err(SessionValidationError::Expired),
            _ => Ok(()),
        }
    }
}
