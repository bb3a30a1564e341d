//! Errors raised while writing a Document tree out as a `.ibs` file
//! (spec §7, `EmitError`).

use ibischar_core::Failure;
use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EmitError {
    #[error("failed to write {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("model {0:?} has no subcircuit file for any corner")]
    MissingSubcktFile(String),
}

pub type EmitResult<T> = Result<T, EmitError>;

impl From<EmitError> for Failure {
    fn from(err: EmitError) -> Self {
        Failure::Emit(err.to_string())
    }
}
