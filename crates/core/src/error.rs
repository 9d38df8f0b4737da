//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Only hard failures live here. A rejected price write is a normal outcome,
/// not an error, and is reported through the pricing operator instead.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A value failed validation (e.g. malformed input data).
    #[error("validation failed: {0}")]
    Validation(String),

    /// Two entities (or an entity and a loose value) are not of compatible kinds.
    #[error("type mismatch: {0}")]
    TypeMismatch(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn type_mismatch(msg: impl Into<String>) -> Self {
        Self::TypeMismatch(msg.into())
    }
}
