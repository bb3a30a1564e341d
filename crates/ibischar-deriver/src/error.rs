//! Errors raised while composing raw simulation results into IBIS-ready
//! tables (spec §7, `DeriveError`: "curve derivation produced a
//! pathological result").

use ibischar_core::Failure;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DeriveError {
    #[error("V/I sweep is not monotonically increasing in V")]
    NonMonotonic,

    #[error("ramp window never crossed the {edge} 20%/80% thresholds")]
    RampNotCrossed { edge: &'static str },

    #[error("waveform transient produced no samples to bin")]
    EmptyWaveform,

    #[error("waveform bin count must be at least 2, got {0}")]
    InvalidBinCount(usize),
}

pub type DeriveResult<T> = Result<T, DeriveError>;

impl From<DeriveError> for Failure {
    fn from(err: DeriveError) -> Self {
        Failure::Derive(err.to_string())
    }
}
