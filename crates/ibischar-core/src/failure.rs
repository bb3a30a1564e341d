//! The abstract error-kind taxonomy shared by every pipeline stage.
//!
//! Each downstream crate (config, planner, driver, reader, deriver, emit) has
//! its own `thiserror`-derived `Error` enum for the mistakes specific to that
//! stage; [`Failure`] is the common currency the orchestrator collects
//! failures into so it can apply the propagation policy (fatal-at-detection
//! vs. captured-per-plan-item) uniformly, regardless of which stage raised
//! the problem.

use thiserror::Error;

/// One of the eight abstract error kinds .
#[derive(Debug, Clone, Error)]
pub enum Failure {
    /// Malformed or incomplete input: missing required field, unknown model
    /// type, unresolved model/pin reference, invalid numeric.
    #[error("configuration error: {0}")]
    Config(String),

    /// Missing SPICE file, unreadable include, unwritable output directory.
    #[error("resource error: {0}")]
    Resource(String),

    /// An impossible plan, e.g. an I/O model without a declared enable pin.
    #[error("plan error: {0}")]
    Plan(String),

    /// The simulator returned without producing the expected result file,
    /// or produced empty output.
    #[error("simulation failed: {0}")]
    SimulationFailed(String),

    /// Simulator output could not be interpreted in the declared dialect.
    #[error("parse error: {0}")]
    Parse(String),

    /// Curve derivation produced a pathological result (non-monotonic V/I,
    /// a ramp window that never crossed 20%/80%).
    #[error("curve derivation error: {0}")]
    Derive(String),

    /// The emitter could not write the output file.
    #[error("emit error: {0}")]
    Emit(String),

    /// External cancellation was requested.
    #[error("cancelled")]
    Cancelled,
}

impl Failure {
    /// Fatal kinds abort the pipeline at detection time; non-fatal kinds are
    /// captured per Plan Item and recorded as "NA" in the affected table.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Failure::Config(_) | Failure::Resource(_) | Failure::Plan(_) | Failure::Emit(_)
        )
    }
}

/// A failure recorded against a specific (model, pin, curve, corner) tuple,
/// for the aggregate report the pipeline prints at the end of a run.
#[derive(Debug, Clone)]
pub struct RecordedFailure {
    pub model_name: String,
    pub pin_name: String,
    pub curve_label: String,
    pub failure: Failure,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fatal_kinds_match_spec_propagation_policy() {
        assert!(Failure::Config("x".into()).is_fatal());
        assert!(Failure::Resource("x".into()).is_fatal());
        assert!(Failure::Plan("x".into()).is_fatal());
        assert!(Failure::Emit("x".into()).is_fatal());
        assert!(!Failure::SimulationFailed("x".into()).is_fatal());
        assert!(!Failure::Parse("x".into()).is_fatal());
        assert!(!Failure::Derive("x".into()).is_fatal());
        assert!(!Failure::Cancelled.is_fatal());
    }
}
