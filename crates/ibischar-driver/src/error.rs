//! Errors raised while invoking the external simulator.

use ibischar_core::Failure;
use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DriverError {
    #[error("failed to spawn simulator command {command:?}: {source}")]
    Spawn {
        command: String,
        #[source]
        source: io::Error,
    },

    #[error("simulator exited with status {status}, but produced no result file at {path}")]
    MissingResultFile { status: String, path: String },

    #[error("simulator produced an empty result file at {path}")]
    EmptyResultFile { path: String },

    #[error("simulation was cancelled")]
    Cancelled,

    #[error("simulator exceeded the wall-clock timeout of {0:?}")]
    Timeout(std::time::Duration),

    #[error("failed to prepare scratch directory: {0}")]
    Scratch(#[from] io::Error),
}

pub type DriverResult<T> = Result<T, DriverError>;

impl From<DriverError> for Failure {
    fn from(err: DriverError) -> Self {
        match err {
            DriverError::Cancelled => Failure::Cancelled,
            other => Failure::SimulationFailed(other.to_string()),
        }
    }
}
