//! Errors raised while rendering a deck for a Plan Item.

use ibischar_core::Failure;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DeckError {
    #[error("model {model} has no subcircuit file for corner {corner}")]
    MissingSubcktFile { model: String, corner: String },

    #[error("plan item for curve {curve} is missing a sweep specification")]
    MissingSweep { curve: String },

    #[error("plan item for curve {curve} is missing a transient specification")]
    MissingTransient { curve: String },

    #[error("waveform fixture index {index} out of range for model {model}")]
    MissingFixture { model: String, index: usize },
}

pub type DeckResult<T> = Result<T, DeckError>;

impl From<DeckError> for Failure {
    fn from(err: DeckError) -> Self {
        Failure::Config(err.to_string())
    }
}
