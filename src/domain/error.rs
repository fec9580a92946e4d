//! Domain-level errors (no external dependencies)

use thiserror::Error;

use crate::domain::generator::Side;

/// Domain errors represent violations of the build contract.
/// Both variants are fatal to the call: no partial tree is returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("invalid argument: height must be non-negative, got {0}")]
    InvalidArgument(i64),

    #[error("type mismatch: {side} generator is not invocable: {found:?}")]
    TypeMismatch { side: Side, found: String },
}

/// Result type for tree operations.
pub type TreeResult<T> = Result<T, DomainError>;
