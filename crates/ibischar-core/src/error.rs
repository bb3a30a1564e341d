//! Core-level errors: malformed numerics and unresolved Document references.

use thiserror::Error;

/// Errors raised while building or querying the Document tree.
#[derive(Debug, Clone, Error)]
pub enum CoreError {
    #[error("invalid numeric literal: {0}")]
    InvalidNumeric(String),

    #[error("unresolved model reference: {0}")]
    UnresolvedModel(String),

    #[error("unresolved pin reference: {0}")]
    UnresolvedPin(String),
}

pub type CoreResult<T> = std::result::Result<T, CoreError>;
