//! Raw (straight-from-simulation) and derived (ready-for-emission) curves
//! carried on a [`crate::document::Model`].

use crate::corner::VCorner;
use crate::tables::{RampRecord, ViTable, VtTable};

/// A raw DC sweep: `(V, I)` pairs, monotonic in V by construction, one
/// sweep per corner that was actually simulated.
pub type RawDcSweep = VCorner<Vec<(f64, f64)>>;

/// A raw transient: `(t, V, I)` samples at simulator-chosen time points.
pub type RawTransient = VCorner<Vec<(f64, f64, f64)>>;

/// Results straight from the simulator, before composition into IBIS
/// tables. Absent fields simply haven't been simulated (or didn't apply to
/// this model type).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawCurves {
    pub pullup_enabled: RawDcSweep,
    pub pullup_disabled: RawDcSweep,
    pub pulldown_enabled: RawDcSweep,
    pub pulldown_disabled: RawDcSweep,
    pub power_clamp: RawDcSweep,
    pub ground_clamp: RawDcSweep,
    /// The single pulse transient every `Ramp` plan item produces; one
    /// rising and one falling edge live in the same sample stream (spec
    /// §4.5 "Ramp rate").
    pub ramp: RawTransient,
    pub rising_waveform: Vec<RawTransient>,
    pub falling_waveform: Vec<RawTransient>,
    pub series_rvds: RawDcSweep,
}

/// Tables ready to hand to the emitter.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DerivedCurves {
    pub pullup: Option<ViTable>,
    pub pulldown: Option<ViTable>,
    pub power_clamp: Option<ViTable>,
    pub ground_clamp: Option<ViTable>,
    pub ramp: Option<RampRecord>,
    pub rising_waveforms: Vec<VtTable>,
    pub falling_waveforms: Vec<VtTable>,
    pub series_rvds: Option<ViTable>,
}
