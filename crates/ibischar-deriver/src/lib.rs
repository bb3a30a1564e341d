//! The curve deriver (spec §4.5): composes raw simulation results sitting
//! on a [`Model`] into the IBIS-ready tables the emitter writes out.
//!
//! This crate has no knowledge of SPICE decks or simulator dialects — it
//! only knows how to turn [`RawCurves`] into [`DerivedCurves`], given the
//! resolved [`Defaults`] that governed the simulations that produced them.

mod derate;
mod error;
mod ramp;
mod vi_derive;
mod waveform;

use ibischar_core::{Defaults, DerivedCurves, Fixture, Model, ModelType, RampRecord, VCorner, VtRow, VtTable};

pub use derate::{derate_ramp, derate_vi_table};
pub use error::{DeriveError, DeriveResult};
pub use ramp::measure_ramp;
pub use vi_derive::{clamp_table, driver_tables, series_table, ClampKind};
pub use waveform::bin_waveform;

/// Derive every curve `model`'s raw sweeps support and populate
/// `model.derived` in place.
///
/// Per spec §7 propagation policy, a failure deriving one sub-curve (e.g.
/// a ramp transient that never crosses 80%) does not abort the whole
/// model: the affected field is simply left `None` (the emitter's "NA"),
/// and the caller is expected to have already logged a WARN for it at the
/// orchestrator level. This function itself returns `Err` only for
/// unrecoverable shape errors (non-monotonic V/I) that indicate the raw
/// data itself is broken rather than merely incomplete.
pub fn derive_model(model: &mut Model, defaults: &Defaults, ibis_version_at_least_4: bool) -> DeriveResult<()> {
    let mut derived = DerivedCurves::default();

    match model.model_type {
        ModelType::Series | ModelType::SeriesSwitch => {
            derived.series_rvds = series_table(&model.raw.series_rvds)?;
        }
        ModelType::Input | ModelType::InputEcl | ModelType::Terminator => {
            derived.power_clamp = clamp_table(
                &model.raw.power_clamp,
                ClampKind::Power,
                &defaults.voltage_range,
                &defaults.clamp_tolerance,
            )?;
            derived.ground_clamp = clamp_table(
                &model.raw.ground_clamp,
                ClampKind::Ground,
                &defaults.voltage_range,
                &defaults.clamp_tolerance,
            )?;
        }
        ModelType::OpenDrain | ModelType::OpenSink => {
            let (_, pulldown) =
                driver_tables(&model.raw.pulldown_enabled, &model.raw.pulldown_disabled, &defaults.voltage_range)?;
            derived.pulldown = pulldown;
            derived.power_clamp = clamp_table(
                &model.raw.power_clamp,
                ClampKind::Power,
                &defaults.voltage_range,
                &defaults.clamp_tolerance,
            )?;
            derived.ground_clamp = clamp_table(
                &model.raw.ground_clamp,
                ClampKind::Ground,
                &defaults.voltage_range,
                &defaults.clamp_tolerance,
            )?;
            derived.ramp = derive_ramp_record(model, defaults);
            derived.rising_waveforms = derive_waveforms(&model.raw.rising_waveform, &model.waveform_fixtures, defaults, ibis_version_at_least_4);
            derived.falling_waveforms = derive_waveforms(&model.raw.falling_waveform, &model.waveform_fixtures, defaults, ibis_version_at_least_4);
        }
        ModelType::OpenSource => {
            let (pullup, _) =
                driver_tables(&model.raw.pullup_enabled, &model.raw.pullup_disabled, &defaults.voltage_range)?;
            derived.pullup = pullup;
            derived.power_clamp = clamp_table(
                &model.raw.power_clamp,
                ClampKind::Power,
                &defaults.voltage_range,
                &defaults.clamp_tolerance,
            )?;
            derived.ground_clamp = clamp_table(
                &model.raw.ground_clamp,
                ClampKind::Ground,
                &defaults.voltage_range,
                &defaults.clamp_tolerance,
            )?;
            derived.ramp = derive_ramp_record(model, defaults);
            derived.rising_waveforms = derive_waveforms(&model.raw.rising_waveform, &model.waveform_fixtures, defaults, ibis_version_at_least_4);
            derived.falling_waveforms = derive_waveforms(&model.raw.falling_waveform, &model.waveform_fixtures, defaults, ibis_version_at_least_4);
        }
        ModelType::Output | ModelType::OutputEcl => {
            let (pullup, pulldown) =
                driver_tables(&model.raw.pullup_enabled, &model.raw.pullup_disabled, &defaults.voltage_range)?;
            derived.pullup = pullup;
            derived.pulldown = pulldown;
            derived.ramp = derive_ramp_record(model, defaults);
            derived.rising_waveforms = derive_waveforms(&model.raw.rising_waveform, &model.waveform_fixtures, defaults, ibis_version_at_least_4);
            derived.falling_waveforms = derive_waveforms(&model.raw.falling_waveform, &model.waveform_fixtures, defaults, ibis_version_at_least_4);
        }
        ModelType::Io | ModelType::ThreeState | ModelType::IoEcl => {
            let (pullup, pulldown) =
                driver_tables(&model.raw.pullup_enabled, &model.raw.pullup_disabled, &defaults.voltage_range)?;
            derived.pullup = pullup;
            derived.pulldown = pulldown;
            derived.power_clamp = clamp_table(
                &model.raw.pullup_disabled,
                ClampKind::Power,
                &defaults.voltage_range,
                &defaults.clamp_tolerance,
            )?;
            derived.ground_clamp = clamp_table(
                &model.raw.pullup_disabled,
                ClampKind::Ground,
                &defaults.voltage_range,
                &defaults.clamp_tolerance,
            )?;
            derived.ramp = derive_ramp_record(model, defaults);
            derived.rising_waveforms = derive_waveforms(&model.raw.rising_waveform, &model.waveform_fixtures, defaults, ibis_version_at_least_4);
            derived.falling_waveforms = derive_waveforms(&model.raw.falling_waveform, &model.waveform_fixtures, defaults, ibis_version_at_least_4);
        }
        _ => {}
    }

    if let Some(pullup) = derived.pullup.take() {
        derived.pullup = Some(derate_vi_table(pullup, defaults.derate_vi_pct.typ));
    }
    if let Some(pulldown) = derived.pulldown.take() {
        derived.pulldown = Some(derate_vi_table(pulldown, defaults.derate_vi_pct.typ));
    }
    if let Some(ramp) = derived.ramp.take() {
        derived.ramp = Some(derate_ramp(ramp, defaults.derate_ramp_pct.typ));
    }

    model.derived = derived;
    Ok(())
}

/// Measure rise/fall ramp rates at every corner that has a raw transient.
/// A corner whose transient never crosses 20%/80% is logged and left
/// unset (spec §8 boundary behavior: "emits NA"), not propagated as a
/// fatal error.
fn derive_ramp_record(model: &Model, _defaults: &Defaults) -> Option<RampRecord> {
    let mut record = RampRecord::default();
    let mut any = false;
    for corner in ibischar_core::Corner::ALL {
        if let Some(samples) = model.raw_ramp_samples(corner) {
            match measure_ramp(samples) {
                Ok((rise, fall)) => {
                    record.dv_dt_rise.set(corner, rise);
                    record.dv_dt_fall.set(corner, fall);
                    any = true;
                }
                Err(err) => {
                    log::warn!("ramp measurement failed for model {} corner {corner}: {err}", model.name);
                }
            }
        }
    }
    any.then_some(record)
}

fn derive_waveforms(
    raw: &[VCorner<Vec<(f64, f64, f64)>>],
    fixtures: &[Fixture],
    defaults: &Defaults,
    ibis_v4: bool,
) -> Vec<VtTable> {
    let n_bins = VtTable::expected_row_count(ibis_v4);
    raw.iter()
        .enumerate()
        .filter_map(|(index, transient)| {
            let sim_time = defaults.sim_time.typ.unwrap_or(10e-9);
            let typ_samples = transient.typ.as_ref()?;
            let vt_samples: Vec<(f64, f64)> = typ_samples.iter().map(|&(t, v, _)| (t, v)).collect();
            match bin_waveform(&vt_samples, sim_time, n_bins) {
                Ok(rows) => Some(VtTable {
                    rows: rows.into_iter().map(|(t, v)| VtRow { t, v_typ: Some(v), v_min: None, v_max: None }).collect(),
                    fixture: fixtures.get(index).cloned().unwrap_or_default(),
                }),
                Err(err) => {
                    log::warn!("waveform binning failed: {err}");
                    None
                }
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ibischar_core::ModelType;

    #[test]
    fn derive_model_carries_waveform_fixtures_into_the_vt_table() {
        let mut model = Model::new("driver", ModelType::Output);
        model.waveform_fixtures = vec![Fixture {
            r: VCorner::uniform(25.0),
            l: VCorner::uniform(2e-9),
            c: VCorner::uniform(1e-12),
            v: VCorner::uniform(3.3),
            ..Default::default()
        }];
        let samples: Vec<(f64, f64, f64)> =
            (0..=10).map(|i| (i as f64 * 1e-9, i as f64 * 0.33, 0.0)).collect();
        model.raw.rising_waveform.push(VCorner::uniform(samples.clone()));
        model.raw.pullup_enabled = VCorner::uniform(vec![(0.0, 0.0), (3.3, 0.01)]);
        model.raw.pulldown_enabled = VCorner::uniform(vec![(0.0, 0.0), (3.3, -0.01)]);

        let defaults = Defaults::default();
        derive_model(&mut model, &defaults, true).unwrap();

        let table = model.derived.rising_waveforms.first().expect("one rising waveform table");
        assert_eq!(table.fixture.r.typ, Some(25.0));
        assert_eq!(table.fixture.v.typ, Some(3.3));
    }
}
