//! Unified error types for the domain layer
//!
//! Rating values and dialog settings report failures through
//! [`DomainError`], so adapters never have to fall back to bare strings.

use thiserror::Error;

/// Unified error type for domain operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Validation failed (e.g., a star value outside 1..=5)
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Parse error (for value objects read from configuration)
    #[error("Parse error: {0}")]
    Parse(String),
}

impl DomainError {
    /// Creates a validation error for values that break an invariant.
    ///
    /// # Example
    /// ```ignore
    /// if value > 5 {
    ///     return Err(DomainError::validation("rating must be between 1 and 5"));
    /// }
    /// ```
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Creates a parse error for string-to-type conversion failures.
    ///
    /// Used by the `FromStr` implementations of [`crate::DialogMode`] and
    /// [`crate::Perspective`] when an unknown name is supplied.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }
}
