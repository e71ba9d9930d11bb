//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Keep this focused on deterministic, local failures (validation, malformed
/// persisted records). Remote/transport concerns belong to the adapters.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A value failed validation (e.g. malformed input).
    #[error("validation failed: {0}")]
    Validation(String),

    /// A persisted record could not be decoded into its fixed schema.
    #[error("malformed record: {0}")]
    MalformedRecord(String),

    /// A path does not name a known route.
    #[error("unknown route: {0}")]
    UnknownRoute(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedRecord(msg.into())
    }

    pub fn unknown_route(path: impl Into<String>) -> Self {
        Self::UnknownRoute(path.into())
    }
}
