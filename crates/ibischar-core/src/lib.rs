//! Document model and constants for IBIS characterization.
//!
//! This crate has no knowledge of SPICE dialects, subprocess invocation, or
//! file formats — it only defines the in-memory Document tree and
//! the shared vocabulary (curve kinds, corners, reserved names, the
//! abstract [`Failure`](failure::Failure) taxonomy) every other crate in the
//! workspace builds on.

pub mod constants;
pub mod corner;
pub mod curves;
pub mod document;
pub mod error;
pub mod failure;
pub mod plan;
pub mod tables;
pub mod units;

pub use constants::{CurveKind, ReservedKind, NA_SENTINEL, RESERVED_MODEL_NAMES};
pub use corner::{Corner, VCorner};
pub use curves::{DerivedCurves, RawCurves, RawDcSweep, RawTransient};
pub use document::{
    resolve_defaults, Component, Defaults, DiffPin, Document, EnablePolarity, Model, ModelType,
    Pin, Polarity, SeriesPinMapping, SeriesSwitchGroup, SimulatorKind,
};
pub use error::{CoreError, CoreResult};
pub use failure::{Failure, RecordedFailure};
pub use plan::{SimPlanItem, StimulusRecipe, SweepSpec, Termination, TransientSpec};
pub use tables::{decimate, Fixture, RampRecord, ViRow, ViTable, VtRow, VtTable};
pub use units::parse_value;
