//! Error types for `taxodepth`.
//!
//! Empty filter values and unresolvable table aliases are not errors; the
//! handler simply contributes nothing. The variants below cover the failures
//! that do abort an operation.

use thiserror::Error;

/// Result type alias for `taxodepth` operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while expanding terms or building filter conditions.
///
/// Error codes follow the pattern `TAXO-XXX` for easy debugging.
#[derive(Error, Debug)]
pub enum Error {
    /// The hierarchy data source could not answer a lookup (TAXO-001).
    ///
    /// Aborts the current expansion. Callers may retry.
    #[error("[TAXO-001] Hierarchy lookup unavailable: {0}")]
    LookupUnavailable(String),

    /// A term identifier could not be interpreted (TAXO-002).
    #[error("[TAXO-002] Invalid term id: {0}")]
    InvalidTermId(String),

    /// Configuration error (TAXO-003).
    #[error("[TAXO-003] Configuration error: {0}")]
    Config(String),

    /// IO error (TAXO-004).
    #[error("[TAXO-004] IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error (TAXO-005).
    #[error("[TAXO-005] Serialization error: {0}")]
    Serialization(String),

    /// Internal error (TAXO-006).
    ///
    /// Indicates an unexpected internal error. Please report if encountered.
    #[error("[TAXO-006] Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Returns the error code (e.g., "TAXO-001").
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::LookupUnavailable(_) => "TAXO-001",
            Self::InvalidTermId(_) => "TAXO-002",
            Self::Config(_) => "TAXO-003",
            Self::Io(_) => "TAXO-004",
            Self::Serialization(_) => "TAXO-005",
            Self::Internal(_) => "TAXO-006",
        }
    }

    /// Returns true if the failed operation may succeed when retried.
    ///
    /// Only transient hierarchy lookups qualify; the matcher itself never
    /// retries.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::LookupUnavailable(_))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl From<crate::config::ConfigError> for Error {
    fn from(err: crate::config::ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}
