//! Common error infrastructure for character-core.
//!
//! Most of the possession layer never fails loudly: a malformed call degrades
//! to a no-op and reports a sentinel (`None`, `false`, an empty list). The
//! error types in this crate cover the remaining cases where a caller has to
//! act on a failure: broken ledger invariants and persistence.
//!
//! Domain-specific errors live next to the code that produces them and
//! implement [`CoreError`] for uniform classification.

/// Severity level of an error, used for categorization and recovery strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Invalid input, should not be retried without changes.
    ///
    /// Examples: truncated save data
    Validation,

    /// Unexpected state inconsistency.
    ///
    /// Examples: a base trait without a mutation entry
    Internal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::Internal => "internal",
        }
    }

    /// Returns true if this error indicates an internal bug.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal)
    }
}

/// Common trait for all character-core errors.
///
/// - Use `#[derive(thiserror::Error)]` for the Display/Error impl
/// - Classify severity by who has to fix it, not by impact
pub trait CoreError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a stable identifier for this error variant, for logs and tests.
    fn error_code(&self) -> &'static str;
}
