//! Common error infrastructure for object-core.
//!
//! This module provides the severity classification and the trait shared by
//! every error type in the workspace. Domain-specific errors (e.g.
//! [`DiceError`](crate::DiceError), `ParseError` in `object-content`) are
//! defined next to the code that raises them.
//!
//! # Design Principles
//!
//! - **Type Safety**: Each sub-language has its own error type with specific variants
//! - **Severity Classification**: Errors are categorized for reporting and recovery
//! - **Stable Codes**: Every variant maps to a static code usable in logs and tests

/// Severity level of an error, used for categorization and recovery strategies.
///
/// - **Validation**: Invalid data file content that must be fixed by the author
/// - **Internal**: Unexpected state inconsistencies that require investigation
/// - **Fatal**: The content tables cannot be built or used at all
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Validation error - invalid input, should not retry without changes.
    ///
    /// Examples: unknown flag name, malformed dice string
    Validation,

    /// Internal error - unexpected state inconsistency.
    ///
    /// Examples: a synthesized kind that cannot be attached to its base
    Internal,

    /// Fatal error - the registry cannot continue.
    ///
    /// Examples: missing data file, table queried before it was loaded
    Fatal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    /// Returns true if this error indicates an internal bug.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Common trait for all content errors.
///
/// # Implementation Guidelines
///
/// - All error enums should implement this trait
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on who has to act, not on impact
pub trait ContentError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    ///
    /// Default implementation uses the error type name.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
