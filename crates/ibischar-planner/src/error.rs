//! Errors the planner can raise while turning a populated [`Document`] into
//! an ordered [`ibischar_core::SimPlanItem`] list.
//!
//! Both variants here are spec §7 `PlanError`s: fatal at detection, no
//! simulation attempted.

use ibischar_core::{Failure, ModelType};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlannerError {
    #[error("pin {pin} on component {component} references unknown model {model}")]
    UnknownModel {
        component: String,
        pin: String,
        model: String,
    },

    /// Spec §4.1 decision table: I/O and 3-state models need a declared
    /// enable pin to plan the enabled/disabled sweep pair.
    #[error(
        "model {model} ({model_type:?}) requires a declared enable pin, but pin {pin} on \
         component {component} declares none"
    )]
    MissingEnablePin {
        component: String,
        pin: String,
        model: String,
        model_type: ModelType,
    },
}

pub type PlannerResult<T> = Result<T, PlannerError>;

impl From<PlannerError> for Failure {
    fn from(err: PlannerError) -> Self {
        Failure::Plan(err.to_string())
    }
}
