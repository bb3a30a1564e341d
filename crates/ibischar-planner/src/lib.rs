//! The analysis orchestrator (spec §4.1): given a populated [`Document`],
//! decides which characterization simulations are required per pin, in
//! which corners, and with which stimulus/termination recipe, then emits an
//! ordered [`SimPlanItem`] list partitioned by pin.
//!
//! This crate has no knowledge of SPICE syntax or simulator dialects — it
//! only decides *what* needs to be simulated, not *how* to render the deck
//! (that's [`ibischar_deck`]).

mod error;
mod sweep;

use ibischar_core::{
    Corner, CurveKind, Defaults, Document, Model, ModelType, Pin, SimPlanItem, StimulusRecipe,
    Termination, TransientSpec, VCorner,
};

pub use error::{PlannerError, PlannerResult};
pub use sweep::{
    adaptive_sweep, driver_range, ecl_driver_range, ecl_ground_clamp_range,
    ecl_power_clamp_range, ground_clamp_range, power_clamp_range, series_vds_range, ECL_VEE, VGND,
};

/// Build the ordered Simulation Plan for every pin in `doc`, grouped
/// component-by-component, pin-by-pin, so per-pin failures can be reported
/// without losing the deterministic ordering spec §5 requires.
pub fn build_plan(doc: &Document) -> PlannerResult<Vec<SimPlanItem>> {
    let mut items = Vec::new();
    for component in &doc.components {
        for pin in &component.pins {
            if pin.reserved_kind().is_some() {
                log::debug!("pin {} is a reserved model name, skipping planning", pin.pin_name);
                continue;
            }
            let model = doc.find_model(&pin.model_name).ok_or_else(|| PlannerError::UnknownModel {
                component: component.name.clone(),
                pin: pin.pin_name.clone(),
                model: pin.model_name.clone(),
            })?;
            if model.nomodel {
                log::debug!("model {} is marked nomodel, skipping planning", model.name);
                continue;
            }
            if model.model_type.requires_enable_pin() && pin.enable_pin.is_none() {
                return Err(PlannerError::MissingEnablePin {
                    component: component.name.clone(),
                    pin: pin.pin_name.clone(),
                    model: model.name.clone(),
                    model_type: model.model_type,
                });
            }
            let defaults = doc.resolve_pin_defaults(component, pin);
            log::info!(
                "planning pin {} (model {}, type {:?})",
                pin.pin_name,
                model.name,
                model.model_type
            );
            items.extend(plan_pin(pin, model, &defaults));
        }
    }
    Ok(items)
}

fn plan_pin(pin: &Pin, model: &Model, defaults: &Defaults) -> Vec<SimPlanItem> {
    let mut items = Vec::new();
    for corner in Corner::ALL {
        let Some(&vmax) = defaults.voltage_range.get(corner) else {
            log::debug!(
                "corner {corner} unset for pin {}, no plan items for this corner",
                pin.pin_name
            );
            continue;
        };
        items.extend(plan_pin_corner(pin, model, defaults, corner, vmax));
    }
    items
}

fn plan_pin_corner(
    pin: &Pin,
    model: &Model,
    defaults: &Defaults,
    corner: Corner,
    vmax: f64,
) -> Vec<SimPlanItem> {
    use ModelType::*;

    let pin_name = pin.pin_name.as_str();
    let model_name = model.name.as_str();

    match model.model_type {
        Input | Terminator => clamp_items(pin_name, model_name, corner, vmax, false),
        InputEcl => clamp_items(pin_name, model_name, corner, vmax, true),

        Output => {
            let mut items = vec![driver_sweep_item(
                pin_name,
                model_name,
                CurveKind::PullupEnabled,
                corner,
                vmax,
                false,
                None,
                Termination::Ground,
                true,
            )];
            items.push(ramp_item(pin_name, model_name, corner, defaults, Termination::Ground, vmax));
            items.extend(waveform_items(pin_name, model_name, model, corner, defaults, vmax));
            items
        }
        OutputEcl => {
            let mut items = vec![driver_sweep_item(
                pin_name,
                model_name,
                CurveKind::PullupEnabled,
                corner,
                vmax,
                true,
                None,
                Termination::Ground,
                true,
            )];
            items.push(ramp_item(pin_name, model_name, corner, defaults, Termination::Ground, vmax));
            items.extend(waveform_items(pin_name, model_name, model, corner, defaults, vmax));
            items
        }

        Io | ThreeState | IoEcl => {
            let ecl = matches!(model.model_type, IoEcl);
            let mut items = vec![
                driver_sweep_item(
                    pin_name,
                    model_name,
                    CurveKind::PullupEnabled,
                    corner,
                    vmax,
                    ecl,
                    Some(true),
                    Termination::Load,
                    true,
                ),
                driver_sweep_item(
                    pin_name,
                    model_name,
                    CurveKind::PullupDisabled,
                    corner,
                    vmax,
                    ecl,
                    Some(false),
                    Termination::Short,
                    true,
                ),
            ];
            items.push(ramp_item(pin_name, model_name, corner, defaults, Termination::Load, vmax));
            items.extend(waveform_items(pin_name, model_name, model, corner, defaults, vmax));
            items
        }

        OpenDrain | OpenSink => {
            let mut items = vec![driver_sweep_item(
                pin_name,
                model_name,
                CurveKind::PulldownEnabled,
                corner,
                vmax,
                false,
                None,
                Termination::PullupFixture,
                false,
            )];
            items.extend(clamp_items(pin_name, model_name, corner, vmax, false));
            items.push(ramp_item(
                pin_name,
                model_name,
                corner,
                defaults,
                Termination::PullupFixture,
                vmax,
            ));
            items.extend(waveform_items(pin_name, model_name, model, corner, defaults, vmax));
            items
        }

        OpenSource => {
            let mut items = vec![driver_sweep_item(
                pin_name,
                model_name,
                CurveKind::PullupEnabled,
                corner,
                vmax,
                false,
                None,
                Termination::PulldownFixture,
                false,
            )];
            items.extend(clamp_items(pin_name, model_name, corner, vmax, false));
            items.push(ramp_item(
                pin_name,
                model_name,
                corner,
                defaults,
                Termination::PulldownFixture,
                vmax,
            ));
            items.extend(waveform_items(pin_name, model_name, model, corner, defaults, vmax));
            items
        }

        Series | SeriesSwitch => vec![series_item(pin_name, model_name, corner, vmax)],

        // ModelType is non_exhaustive upstream; nothing else is planned yet.
        _ => Vec::new(),
    }
}

fn clamp_items(
    pin_name: &str,
    model_name: &str,
    corner: Corner,
    vmax: f64,
    ecl: bool,
) -> Vec<SimPlanItem> {
    let (pc_range, gc_range) = if ecl {
        (ecl_power_clamp_range(vmax), ecl_ground_clamp_range(vmax))
    } else {
        (power_clamp_range(vmax), ground_clamp_range(vmax))
    };
    vec![
        sweep_item(
            pin_name,
            model_name,
            CurveKind::PowerClamp,
            corner,
            pc_range,
            None,
            Termination::Short,
            false,
            vmax,
        ),
        sweep_item(
            pin_name,
            model_name,
            CurveKind::GroundClamp,
            corner,
            gc_range,
            None,
            Termination::Short,
            false,
            vmax,
        ),
    ]
}

#[allow(clippy::too_many_arguments)]
fn driver_sweep_item(
    pin_name: &str,
    model_name: &str,
    curve: CurveKind,
    corner: Corner,
    vmax: f64,
    ecl: bool,
    enable_asserted: Option<bool>,
    termination: Termination,
    multi_use: bool,
) -> SimPlanItem {
    let range = if ecl { ecl_driver_range(vmax) } else { driver_range(vmax) };
    sweep_item(pin_name, model_name, curve, corner, range, enable_asserted, termination, multi_use, vmax)
}

fn series_item(pin_name: &str, model_name: &str, corner: Corner, vmax: f64) -> SimPlanItem {
    sweep_item(
        pin_name,
        model_name,
        CurveKind::SeriesRVds,
        corner,
        series_vds_range(vmax),
        None,
        Termination::Load,
        false,
        vmax,
    )
}

#[allow(clippy::too_many_arguments)]
fn sweep_item(
    pin_name: &str,
    model_name: &str,
    curve: CurveKind,
    corner: Corner,
    range: (f64, f64),
    enable_asserted: Option<bool>,
    termination: Termination,
    multi_use: bool,
    supply_voltage: f64,
) -> SimPlanItem {
    let sweep = adaptive_sweep(range.0, range.1);
    SimPlanItem {
        model_name: model_name.to_string(),
        pin_name: pin_name.to_string(),
        curve,
        corner,
        output_file_name: SimPlanItem::default_filename(curve, pin_name, corner),
        stimulus: StimulusRecipe {
            sweep: Some(sweep),
            transient: None,
            termination,
            enable_asserted,
            supply_voltage,
        },
        multi_use,
    }
}

fn ramp_item(
    pin_name: &str,
    model_name: &str,
    corner: Corner,
    defaults: &Defaults,
    termination: Termination,
    supply_voltage: f64,
) -> SimPlanItem {
    let transient = transient_spec(defaults, corner);
    SimPlanItem {
        model_name: model_name.to_string(),
        pin_name: pin_name.to_string(),
        curve: CurveKind::Ramp,
        corner,
        output_file_name: SimPlanItem::default_filename(CurveKind::Ramp, pin_name, corner),
        stimulus: StimulusRecipe {
            sweep: None,
            transient: Some(transient),
            termination,
            enable_asserted: None,
            supply_voltage,
        },
        multi_use: false,
    }
}

fn waveform_items(
    pin_name: &str,
    model_name: &str,
    model: &Model,
    corner: Corner,
    defaults: &Defaults,
    supply_voltage: f64,
) -> Vec<SimPlanItem> {
    let transient = transient_spec(defaults, corner);
    let mut items = Vec::with_capacity(model.waveform_fixtures.len() * 2);
    for fixture_index in 0..model.waveform_fixtures.len() {
        for curve in [
            CurveKind::RisingWaveform { fixture_index },
            CurveKind::FallingWaveform { fixture_index },
        ] {
            items.push(SimPlanItem {
                model_name: model_name.to_string(),
                pin_name: pin_name.to_string(),
                curve,
                corner,
                output_file_name: SimPlanItem::default_filename(curve, pin_name, corner),
                stimulus: StimulusRecipe {
                    sweep: None,
                    transient: Some(transient),
                    termination: Termination::Load,
                    enable_asserted: None,
                    supply_voltage,
                },
                multi_use: false,
            });
        }
    }
    items
}

/// Resolve a transient parameter for `corner`, falling back to `typ` and
/// then to a conservative default when neither is set.
fn resolve_scalar(field: &VCorner<f64>, corner: Corner, default: f64) -> f64 {
    field.get_copied(corner).or(field.typ).unwrap_or(default)
}

fn transient_spec(defaults: &Defaults, corner: Corner) -> TransientSpec {
    TransientSpec {
        sim_time: resolve_scalar(&defaults.sim_time, corner, 10e-9),
        rise_time: resolve_scalar(&defaults.target_rise_time, corner, 1e-9),
        fall_time: resolve_scalar(&defaults.target_fall_time, corner, 1e-9),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ibischar_core::{Component, Document, ModelType, Pin};

    fn pin(name: &str, model: &str) -> Pin {
        Pin {
            pin_name: name.to_string(),
            node_name: name.to_string(),
            signal_name: name.to_uppercase(),
            model_name: model.to_string(),
            package_r: None,
            package_l: None,
            package_c: None,
            input_pin: None,
            enable_pin: None,
        }
    }

    fn doc_with_model(model_type: ModelType, enable_pin: bool) -> Document {
        let mut doc = Document::new("test.ibs", "4.2");
        doc.defaults.voltage_range = VCorner::uniform(3.3);
        doc.defaults.sim_time = VCorner::uniform(10e-9);
        doc.defaults.target_rise_time = VCorner::uniform(1e-9);
        doc.defaults.target_fall_time = VCorner::uniform(1e-9);

        let mut model = Model::new("driver", model_type);
        model.waveform_fixtures = vec![Default::default()];
        doc.models.push(model);

        let mut component = Component::new("Buffer");
        let mut p = pin("net7", "driver");
        if enable_pin {
            p.enable_pin = Some("oe".to_string());
            component.pins.push(pin("oe", "driver"));
        }
        component.pins.push(p);
        doc.components.push(component);
        doc
    }

    #[test]
    fn reserved_model_names_produce_no_plan_items() {
        let mut doc = Document::new("t.ibs", "4.2");
        let mut component = Component::new("C");
        component.pins.push(pin("1", "POWER"));
        doc.components.push(component);
        let plan = build_plan(&doc).unwrap();
        assert!(plan.is_empty());
    }

    #[test]
    fn nomodel_models_produce_no_plan_items() {
        let mut doc = doc_with_model(ModelType::Output, false);
        doc.models[0].nomodel = true;
        let plan = build_plan(&doc).unwrap();
        assert!(plan.is_empty());
    }

    #[test]
    fn input_model_plans_only_clamps() {
        let doc = doc_with_model(ModelType::Input, false);
        let plan = build_plan(&doc).unwrap();
        let curves: Vec<_> = plan.iter().map(|i| i.curve).collect();
        assert!(curves.iter().all(|c| matches!(c, CurveKind::PowerClamp | CurveKind::GroundClamp)));
        assert_eq!(plan.len(), 2 * 3);
    }

    #[test]
    fn output_model_plans_pullup_ramp_and_waveforms() {
        let doc = doc_with_model(ModelType::Output, false);
        let plan = build_plan(&doc).unwrap();
        assert!(plan.iter().any(|i| i.curve == CurveKind::PullupEnabled));
        assert!(plan.iter().any(|i| i.curve == CurveKind::Ramp));
        assert!(plan
            .iter()
            .any(|i| matches!(i.curve, CurveKind::RisingWaveform { .. })));
        assert!(!plan.iter().any(|i| i.curve == CurveKind::PowerClamp));
    }

    #[test]
    fn io_model_without_enable_pin_is_a_plan_error() {
        let doc = doc_with_model(ModelType::Io, false);
        assert!(matches!(
            build_plan(&doc),
            Err(PlannerError::MissingEnablePin { .. })
        ));
    }

    #[test]
    fn io_model_with_enable_pin_plans_enabled_and_disabled_sweeps_as_multi_use() {
        let doc = doc_with_model(ModelType::Io, true);
        let plan = build_plan(&doc).unwrap();
        let io_items: Vec<_> = plan
            .iter()
            .filter(|i| i.pin_name == "net7")
            .filter(|i| matches!(i.curve, CurveKind::PullupEnabled | CurveKind::PullupDisabled))
            .collect();
        assert_eq!(io_items.len(), 6);
        assert!(io_items.iter().all(|i| i.multi_use));
    }

    #[test]
    fn open_drain_omits_pullup_but_keeps_clamps() {
        let doc = doc_with_model(ModelType::OpenDrain, false);
        let plan = build_plan(&doc).unwrap();
        assert!(!plan.iter().any(|i| i.curve == CurveKind::PullupEnabled));
        assert!(plan.iter().any(|i| i.curve == CurveKind::PulldownEnabled));
        assert!(plan.iter().any(|i| i.curve == CurveKind::PowerClamp));
    }

    #[test]
    fn series_model_has_no_ramp_or_waveform() {
        let doc = doc_with_model(ModelType::Series, false);
        let plan = build_plan(&doc).unwrap();
        assert_eq!(plan.len(), 3);
        assert!(plan.iter().all(|i| i.curve == CurveKind::SeriesRVds));
    }

    #[test]
    fn absent_corner_produces_no_items_for_that_corner() {
        let mut doc = doc_with_model(ModelType::Terminator, false);
        doc.defaults.voltage_range.max = None;
        let plan = build_plan(&doc).unwrap();
        assert!(plan.iter().all(|i| i.corner != Corner::Max));
    }
}
