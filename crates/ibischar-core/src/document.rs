//! The in-memory IBIS document tree.
//!
//! A [`Document`] transitively owns [`Component`]s, [`Pin`]s, and
//! [`Model`]s; Pins reference Models by name only (lookup, never
//! ownership). Populated by the configuration loader, mutated in place by
//! the planner and curve deriver, and finally serialized by the emitter.

use crate::constants::ReservedKind;
use crate::corner::VCorner;
use crate::curves::{DerivedCurves, RawCurves};
use crate::tables::Fixture;

/// Hierarchical defaults bag, applied Document -> Component -> Model, each
/// layer overriding only the fields its parent left unset.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Defaults {
    pub voltage_range: VCorner<f64>,
    pub temperature_range: VCorner<f64>,
    pub pullup_ref: VCorner<f64>,
    pub pulldown_ref: VCorner<f64>,
    pub power_clamp_ref: VCorner<f64>,
    pub gnd_clamp_ref: VCorner<f64>,
    pub package_r: VCorner<f64>,
    pub package_l: VCorner<f64>,
    pub package_c: VCorner<f64>,
    pub die_c: VCorner<f64>,
    pub load_r: VCorner<f64>,
    pub sim_time: VCorner<f64>,
    pub input_lo_stim: VCorner<f64>,
    pub input_hi_stim: VCorner<f64>,
    pub target_rise_time: VCorner<f64>,
    pub target_fall_time: VCorner<f64>,
    pub clamp_tolerance: VCorner<f64>,
    pub derate_vi_pct: VCorner<f64>,
    pub derate_ramp_pct: VCorner<f64>,
}

/// Resolve `model`'s defaults against its parent layers. No implicit
/// inheritance at the type level: each field is walked explicitly so corner
/// mixing across layers stays auditable.
pub fn resolve_defaults(document: &Defaults, component: &Defaults, model: &Defaults) -> Defaults {
    macro_rules! layer {
        ($field:ident) => {
            model
                .$field
                .clone()
                .or(component.$field.clone())
                .or(document.$field.clone())
        };
    }
    Defaults {
        voltage_range: layer!(voltage_range),
        temperature_range: layer!(temperature_range),
        pullup_ref: layer!(pullup_ref),
        pulldown_ref: layer!(pulldown_ref),
        power_clamp_ref: layer!(power_clamp_ref),
        gnd_clamp_ref: layer!(gnd_clamp_ref),
        package_r: layer!(package_r),
        package_l: layer!(package_l),
        package_c: layer!(package_c),
        die_c: layer!(die_c),
        load_r: layer!(load_r),
        sim_time: layer!(sim_time),
        input_lo_stim: layer!(input_lo_stim),
        input_hi_stim: layer!(input_hi_stim),
        target_rise_time: layer!(target_rise_time),
        target_fall_time: layer!(target_fall_time),
        clamp_tolerance: layer!(clamp_tolerance),
        derate_vi_pct: layer!(derate_vi_pct),
        derate_ramp_pct: layer!(derate_ramp_pct),
    }
}

/// Differential pin pairing. Named in the structured form but never
/// required there, so it's modeled here as first-class-but-optional.
#[derive(Debug, Clone, PartialEq)]
pub struct DiffPin {
    pub pin_a: String,
    pub pin_b: String,
    pub vdiff: Option<f64>,
}

/// One entry of `[Series Pin Mapping]`.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesPinMapping {
    pub pin: String,
    pub model_name: String,
}

/// One `[Series Switch Groups]` entry: a named group of pins switched
/// together by a Series_switch model.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesSwitchGroup {
    pub name: String,
    pub pins: Vec<String>,
}

/// `(pin-name, node-name, signal-name, model-name)` plus optional package
/// parasitics and directives.
#[derive(Debug, Clone, PartialEq)]
pub struct Pin {
    pub pin_name: String,
    pub node_name: String,
    pub signal_name: String,
    pub model_name: String,
    pub package_r: Option<VCorner<f64>>,
    pub package_l: Option<VCorner<f64>>,
    pub package_c: Option<VCorner<f64>>,
    /// For bidirectional pins: which pin's model provides receiver
    /// behavior.
    pub input_pin: Option<String>,
    /// For tri-state/I-O pins: which pin drives output enable.
    pub enable_pin: Option<String>,
}

impl Pin {
    /// `Some` when this pin's model name is one of the reserved
    /// "do not simulate" tokens.
    pub fn reserved_kind(&self) -> Option<ReservedKind> {
        ReservedKind::from_model_name(&self.model_name)
    }
}

/// A named physical part.
#[derive(Debug, Clone, PartialEq)]
pub struct Component {
    pub name: String,
    pub netlist_path: Option<String>,
    pub series_netlist_path: Option<String>,
    pub manufacturer: Option<String>,
    pub package_model: Option<String>,
    pub pins: Vec<Pin>,
    pub defaults: Defaults,
    pub diff_pins: Vec<DiffPin>,
    pub series_pin_mapping: Vec<SeriesPinMapping>,
    pub series_switch_groups: Vec<SeriesSwitchGroup>,
}

impl Component {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            netlist_path: None,
            series_netlist_path: None,
            manufacturer: None,
            package_model: None,
            pins: Vec::new(),
            defaults: Defaults::default(),
            diff_pins: Vec::new(),
            series_pin_mapping: Vec::new(),
            series_switch_groups: Vec::new(),
        }
    }
}

/// Electrical polarity of a driver relative to its logical input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Polarity {
    Inverting,
    NonInverting,
}

/// Enable-pin sense for tri-state/open-X/I-O models.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnablePolarity {
    ActiveHigh,
    ActiveLow,
}

/// The enumerated model types from the model taxonomy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ModelType {
    Input,
    Output,
    Io,
    ThreeState,
    OpenDrain,
    OpenSink,
    OpenSource,
    InputEcl,
    OutputEcl,
    IoEcl,
    Terminator,
    Series,
    SeriesSwitch,
}

impl ModelType {
    /// Whether this model type has an active driver structure at all
    /// (i.e. is not purely a receiver/terminator/series element).
    pub fn has_driver(self) -> bool {
        matches!(
            self,
            ModelType::Output
                | ModelType::OutputEcl
                | ModelType::Io
                | ModelType::IoEcl
                | ModelType::ThreeState
                | ModelType::OpenDrain
                | ModelType::OpenSink
                | ModelType::OpenSource
        )
    }

    /// Whether this model type requires a declared enable pin. Planning an
    /// I/O or 3-state model without one is a configuration error.
    pub fn requires_enable_pin(self) -> bool {
        matches!(
            self,
            ModelType::Io | ModelType::IoEcl | ModelType::ThreeState
        )
    }
}

/// A named behavioral description.
#[derive(Debug, Clone, PartialEq)]
pub struct Model {
    pub name: String,
    pub model_type: ModelType,
    pub polarity: Polarity,
    pub enable_polarity: EnablePolarity,
    pub vinl: VCorner<f64>,
    pub vinh: VCorner<f64>,
    pub vmeas: VCorner<f64>,
    pub vref: VCorner<f64>,
    pub cref: VCorner<f64>,
    pub rref: VCorner<f64>,
    /// SPICE subcircuit file per corner (typ/min/max variants).
    pub subckt_files: VCorner<String>,
    /// Structurally present but excluded from simulation.
    pub nomodel: bool,
    pub defaults: Defaults,
    /// User-specified fixtures (R/L/C/V) driving rising/falling waveform
    /// characterization; one transient per fixture per edge direction.
    pub waveform_fixtures: Vec<Fixture>,
    pub raw: RawCurves,
    pub derived: DerivedCurves,
}

impl Model {
    /// The raw ramp transient samples captured at `corner`, if that corner
    /// was simulated.
    pub fn raw_ramp_samples(&self, corner: crate::corner::Corner) -> Option<&Vec<(f64, f64, f64)>> {
        self.raw.ramp.get(corner)
    }

    pub fn new(name: impl Into<String>, model_type: ModelType) -> Self {
        Self {
            name: name.into(),
            model_type,
            polarity: Polarity::NonInverting,
            enable_polarity: EnablePolarity::ActiveHigh,
            vinl: VCorner::all_unset(),
            vinh: VCorner::all_unset(),
            vmeas: VCorner::all_unset(),
            vref: VCorner::all_unset(),
            cref: VCorner::all_unset(),
            rref: VCorner::all_unset(),
            subckt_files: VCorner::all_unset(),
            nomodel: false,
            defaults: Defaults::default(),
            waveform_fixtures: Vec::new(),
            raw: RawCurves::default(),
            derived: DerivedCurves::default(),
        }
    }
}

/// Declared external simulator dialect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimulatorKind {
    Hspice,
    Spectre,
    Eldo,
}

/// Top-level container.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub ibis_version: String,
    pub file_name: String,
    pub file_rev: String,
    pub date: String,
    pub source: Option<String>,
    pub notes: Vec<String>,
    pub disclaimer: Option<String>,
    pub copyright: Option<String>,
    pub defaults: Defaults,
    pub components: Vec<Component>,
    pub models: Vec<Model>,
    pub simulator: SimulatorKind,
}

impl Document {
    pub fn new(file_name: impl Into<String>, ibis_version: impl Into<String>) -> Self {
        Self {
            ibis_version: ibis_version.into(),
            file_name: file_name.into(),
            file_rev: "1.0".to_string(),
            date: String::new(),
            source: None,
            notes: Vec::new(),
            disclaimer: None,
            copyright: None,
            defaults: Defaults::default(),
            components: Vec::new(),
            models: Vec::new(),
            simulator: SimulatorKind::Hspice,
        }
    }

    pub fn find_model(&self, name: &str) -> Option<&Model> {
        self.models.iter().find(|m| m.name.eq_ignore_ascii_case(name))
    }

    pub fn find_model_mut(&mut self, name: &str) -> Option<&mut Model> {
        self.models
            .iter_mut()
            .find(|m| m.name.eq_ignore_ascii_case(name))
    }

    /// Whether the IBIS version targets 4.0 or later (gates the 1000-row
    /// waveform table policy).
    pub fn is_ibis_v4_or_later(&self) -> bool {
        self.ibis_version
            .trim()
            .split('.')
            .next()
            .and_then(|major| major.parse::<u32>().ok())
            .map(|major| major >= 4)
            .unwrap_or(false)
    }

    /// Resolve the effective Defaults seen by `pin`'s model, walking
    /// Document -> Component -> Model.
    pub fn resolve_pin_defaults(&self, component: &Component, pin: &Pin) -> Defaults {
        let component_defaults = resolve_defaults(&self.defaults, &Defaults::default(), &component.defaults);
        match self.find_model(&pin.model_name) {
            Some(model) => resolve_defaults(&self.defaults, &component_defaults, &model.defaults),
            None => component_defaults,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc_with_value(value: f64) -> Defaults {
        Defaults {
            voltage_range: VCorner::uniform(value),
            ..Defaults::default()
        }
    }

    #[test]
    fn resolve_defaults_walks_three_layers() {
        let document = doc_with_value(1.0);
        let component = Defaults {
            pullup_ref: VCorner::uniform(2.0),
            ..Defaults::default()
        };
        let model = Defaults {
            clamp_tolerance: VCorner::uniform(3.0),
            ..Defaults::default()
        };

        let resolved = resolve_defaults(&document, &component, &model);
        assert_eq!(resolved.voltage_range.typ, Some(1.0));
        assert_eq!(resolved.pullup_ref.typ, Some(2.0));
        assert_eq!(resolved.clamp_tolerance.typ, Some(3.0));
    }

    #[test]
    fn resolve_defaults_is_idempotent() {
        let document = doc_with_value(1.0);
        let component = Defaults::default();
        let model = Defaults::default();
        let once = resolve_defaults(&document, &component, &model);
        let twice = resolve_defaults(&document, &component, &model);
        assert_eq!(once, twice);
    }

    #[test]
    fn reserved_pin_model_names_are_detected() {
        let pin = Pin {
            pin_name: "1".into(),
            node_name: "vdd".into(),
            signal_name: "VDD".into(),
            model_name: "POWER".into(),
            package_r: None,
            package_l: None,
            package_c: None,
            input_pin: None,
            enable_pin: None,
        };
        assert_eq!(pin.reserved_kind(), Some(ReservedKind::Power));
    }

    #[test]
    fn ibis_version_gates_waveform_row_policy() {
        let mut doc = Document::new("test.ibs", "3.2");
        assert!(!doc.is_ibis_v4_or_later());
        doc.ibis_version = "4.0".to_string();
        assert!(doc.is_ibis_v4_or_later());
        doc.ibis_version = "5.1".to_string();
        assert!(doc.is_ibis_v4_or_later());
    }
}
