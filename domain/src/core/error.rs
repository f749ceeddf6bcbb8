//! Domain error types

use thiserror::Error;

/// Domain-level errors
///
/// Every failure the voting engine surfaces falls into one of three
/// categories. None of them is transient, so callers never retry.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Missing or malformed input (session token, mode, foreign option, ...)
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A uniqueness rule was broken (duplicate label, duplicate correlation row)
    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    /// An id did not resolve
    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },
}

impl DomainError {
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        DomainError::InvalidArgument(message.into())
    }

    pub fn constraint(message: impl Into<String>) -> Self {
        DomainError::ConstraintViolation(message.into())
    }

    pub fn not_found(kind: &'static str, id: impl ToString) -> Self {
        DomainError::NotFound {
            kind,
            id: id.to_string(),
        }
    }

    /// Check if this error is an invalid-argument rejection
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, DomainError::InvalidArgument(_))
    }

    /// Check if this error is a uniqueness violation
    pub fn is_constraint_violation(&self) -> bool {
        matches!(self, DomainError::ConstraintViolation(_))
    }

    /// Check if this error is an unresolved id
    pub fn is_not_found(&self) -> bool {
        matches!(self, DomainError::NotFound { .. })
    }
}
