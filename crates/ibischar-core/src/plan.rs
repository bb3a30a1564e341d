//! Simulation Plan Item and the stimulus/termination recipe the planner
//! attaches to each one.

use crate::constants::CurveKind;
use crate::corner::Corner;

/// A single `.DC`-style sweep specification.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepSpec {
    pub start: f64,
    pub stop: f64,
    pub step: f64,
    pub num_points: usize,
}

/// A transient-stimulus specification (edge shaping for ramp/waveform
/// characterization).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransientSpec {
    pub sim_time: f64,
    pub rise_time: f64,
    pub fall_time: f64,
}

/// Termination/fixture network selected for a curve (spec §4.2 step 6,
/// §4.5 edge-direction rules).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    Ground,
    Power,
    Load,
    PullupFixture,
    PulldownFixture,
    Short,
}

/// The stimulus/termination recipe the deck synthesizer renders for a Plan
/// Item.
#[derive(Debug, Clone, PartialEq)]
pub struct StimulusRecipe {
    pub sweep: Option<SweepSpec>,
    pub transient: Option<TransientSpec>,
    pub termination: Termination,
    /// `Some(true)`/`Some(false)` for curves that require a specific
    /// enable-pin state (I/O, 3-state, open-X); `None` when not applicable.
    pub enable_asserted: Option<bool>,
    /// The corner's resolved `voltage_range` value (spec §4.1, §4.2 step 2):
    /// the deck biases its power source at this level rather than a fixed
    /// literal, so typ/min/max decks each see their own supply.
    pub supply_voltage: f64,
}

/// `(model, curve-type, corner, output-file-name)` plus the recipe needed
/// to synthesize its deck (spec §3, §4.1).
#[derive(Debug, Clone, PartialEq)]
pub struct SimPlanItem {
    pub model_name: String,
    pub pin_name: String,
    pub curve: CurveKind,
    pub corner: Corner,
    pub output_file_name: String,
    pub stimulus: StimulusRecipe,
    /// Set when this item's raw simulation feeds more than one curve (e.g.
    /// a 3-state model's pullup and clamp sharing a sweep) (spec §4.1 tie-breaks).
    pub multi_use: bool,
}

impl SimPlanItem {
    /// The `{prefix}_{pin}_{corner}.sp` filename discipline.
    pub fn default_filename(curve: CurveKind, pin_name: &str, corner: Corner) -> String {
        format!("{}_{}_{}.sp", curve.filename_prefix(), pin_name, corner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_filename_follows_discipline() {
        let name = SimPlanItem::default_filename(CurveKind::Pullup, "net7", Corner::Typ);
        assert_eq!(name, "pullup_net7_typ.sp");
    }
}
