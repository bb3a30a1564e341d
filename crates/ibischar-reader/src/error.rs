//! Errors raised while interpreting simulator output text.

use ibischar_core::Failure;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReaderError {
    #[error("no data rows found in {dialect} output")]
    NoData { dialect: &'static str },

    #[error("{dialect} output is not monotonic in the swept variable")]
    NonMonotonic { dialect: &'static str },

    #[error("malformed {dialect} output line: {line:?}")]
    MalformedLine { dialect: &'static str, line: String },
}

pub type ReaderResult<T> = Result<T, ReaderError>;

impl From<ReaderError> for Failure {
    fn from(err: ReaderError) -> Self {
        Failure::Parse(err.to_string())
    }
}
