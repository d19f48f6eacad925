//! Common error infrastructure for battle-core.
//!
//! Domain-specific errors (`ActionError`, `SubmitError`, `RosterError`) live
//! next to the code that produces them. This module only provides the shared
//! classification so callers can pick a recovery strategy without matching on
//! every variant.

/// Severity level of an error, used for categorization and recovery strategies.
///
/// - **Recoverable**: the caller may retry, possibly with a different action
/// - **Validation**: malformed input, retrying unchanged will fail again
/// - **Internal**: a state inconsistency that indicates a bug
/// - **Fatal**: the operation (or the match) cannot continue
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Recoverable error - can retry with same or alternative action.
    ///
    /// Examples: skill on cooldown, not your turn
    Recoverable,

    /// Validation error - invalid input, should not retry without changes.
    ///
    /// Examples: unknown skill id, item not in hand
    Validation,

    /// Internal error - unexpected state inconsistency.
    Internal,

    /// Fatal error - no further progress is possible.
    ///
    /// Examples: match already ended, roster could not be materialized
    Fatal,
}

impl ErrorSeverity {
    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable | Self::Validation)
    }
}

/// Common trait for all battle-core errors.
///
/// # Implementation Guidelines
///
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
/// - Error codes are stable strings suitable for UI lookup tables
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
