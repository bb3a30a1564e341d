//! Pullup/pulldown-via-subtraction and clamp-curve derivation (spec §4.5).
//!
//! Every raw DC sweep arrives in the SPICE passive sign convention: current
//! is positive when it flows *into* the supply's positive terminal. IBIS
//! tables use the active convention (positive = current sourced by the
//! supply into the circuit), so every row built here is negated exactly
//! once on the way out.

use ibischar_core::{Corner, VCorner, ViRow, ViTable};

use crate::error::{DeriveError, DeriveResult};

/// SPICE passive convention -> IBIS active convention (spec §4.2 "Sign
/// convention"; applied here rather than at the reader because the reader
/// has no notion of which curve a sweep feeds).
fn to_active_convention(passive_current: f64) -> f64 {
    -passive_current
}

/// Linear interpolation of `sweep` (assumed sorted ascending in V) at `v`;
/// `None` when `v` falls outside the sampled range.
fn interpolate(sweep: &[(f64, f64)], v: f64) -> Option<f64> {
    if sweep.is_empty() {
        return None;
    }
    if v < sweep[0].0 || v > sweep[sweep.len() - 1].0 {
        return None;
    }
    for w in sweep.windows(2) {
        let (v0, i0) = w[0];
        let (v1, i1) = w[1];
        if v >= v0 && v <= v1 {
            if (v1 - v0).abs() < f64::EPSILON {
                return Some(i0);
            }
            let alpha = (v - v0) / (v1 - v0);
            return Some(i0 + alpha * (i1 - i0));
        }
    }
    sweep.iter().find(|&&(sv, _)| (sv - v).abs() < f64::EPSILON).map(|&(_, i)| i)
}

/// Per-corner current at `v`, enabled minus disabled. An absent disabled
/// sweep (pure Output/Output_ECL models never run a disabled state)
/// contributes zero, so the driver current is just the enabled sweep.
fn driver_current_at(enabled: &[(f64, f64)], disabled: Option<&[(f64, f64)]>, v: f64) -> Option<f64> {
    let i_enabled = interpolate(enabled, v)?;
    let i_disabled = disabled.and_then(|d| interpolate(d, v)).unwrap_or(0.0);
    Some(i_enabled - i_disabled)
}

/// Build the pullup and pulldown tables from enabled/disabled sweeps
/// (spec §4.5 "Pullup/pulldown for enabled outputs"). Uses the typ corner's
/// enabled sweep as the master V grid; min/max columns are interpolated at
/// those same V points so every row carries all three corners on a common
/// axis.
///
/// The composed driver current `I_enabled(V) - I_disabled(V)` is one
/// continuous curve across the full `driver_range` swept by the planner
/// (`Vgnd - Vmax` to `2*Vmax`); that range is exactly the union of
/// [`ClampKind::Ground`]'s and [`ClampKind::Power`]'s sub-ranges (see
/// `ibischar_planner::sweep`'s `clamp_ranges_cover_the_driver_range_between_them`
/// test), so the same split that separates ground-clamp from power-clamp
/// behavior also separates the pulldown-active region (near/below ground)
/// from the pullup-active region (near/above Vmax) of one driver sweep.
/// For models that run a disabled sweep (I/O, 3-state), this is exactly
/// the clamp-structure contribution the subtraction already removes; for
/// models with no disabled sweep at all (Output, Output_ECL), `disabled`
/// contributes zero and the enabled sweep is split as-is.
pub fn driver_tables(
    enabled: &VCorner<Vec<(f64, f64)>>,
    disabled: &VCorner<Vec<(f64, f64)>>,
    vmax: &VCorner<f64>,
) -> DeriveResult<(Option<ViTable>, Option<ViTable>)> {
    let Some(master) = enabled.typ.as_deref().or(enabled.min.as_deref()).or(enabled.max.as_deref()) else {
        return Ok((None, None));
    };
    if master.is_empty() {
        return Ok((None, None));
    }
    let typ_vmax = vmax.typ.or(vmax.min).or(vmax.max).unwrap_or(f64::INFINITY);
    let (pd_lo, pd_hi) = clamp_range(ClampKind::Ground, typ_vmax);
    let (pu_lo, pu_hi) = clamp_range(ClampKind::Power, typ_vmax);

    let mut rows = Vec::with_capacity(master.len());
    for &(v, _) in master {
        let i_typ = enabled
            .typ
            .as_deref()
            .and_then(|e| driver_current_at(e, disabled.typ.as_deref(), v));
        let i_min = enabled
            .min
            .as_deref()
            .and_then(|e| driver_current_at(e, disabled.min.as_deref(), v));
        let i_max = enabled
            .max
            .as_deref()
            .and_then(|e| driver_current_at(e, disabled.max.as_deref(), v));
        rows.push(ViRow {
            v,
            i_typ: i_typ.map(to_active_convention),
            i_min: i_min.map(to_active_convention),
            i_max: i_max.map(to_active_convention),
        });
    }

    if rows.windows(2).any(|w| w[0].v >= w[1].v) {
        return Err(DeriveError::NonMonotonic);
    }

    let pulldown_rows: Vec<ViRow> = rows.iter().copied().filter(|r| r.v >= pd_lo && r.v <= pd_hi).collect();
    let pullup_rows: Vec<ViRow> = rows.iter().copied().filter(|r| r.v >= pu_lo && r.v <= pu_hi).collect();

    let pullup = (!pullup_rows.is_empty()).then(|| ViTable::capped(pullup_rows));
    let pulldown = (!pulldown_rows.is_empty()).then(|| ViTable::capped(pulldown_rows));
    Ok((pullup, pulldown))
}

/// Which rail a clamp curve straddles, and therefore which V sub-range of a
/// disabled driver sweep to slice when a dedicated clamp sweep wasn't run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClampKind {
    Power,
    Ground,
}

/// Build a clamp table, either from a dedicated clamp sweep (Input,
/// Terminator, Open_drain/Open_sink/Open_source models, which plan an
/// explicit power/ground clamp sweep) or by slicing the wider disabled
/// driver sweep to the clamp's V sub-range (I/O, 3-state, spec §4.1 "clamps
/// derived while the driver is disabled"). Rows whose magnitude falls below
/// `clamp_tolerance` are suppressed (spec §4.5).
pub fn clamp_table(
    source: &VCorner<Vec<(f64, f64)>>,
    kind: ClampKind,
    vmax: &VCorner<f64>,
    clamp_tolerance: &VCorner<f64>,
) -> DeriveResult<Option<ViTable>> {
    let Some(master) = source.typ.as_deref().or(source.min.as_deref()).or(source.max.as_deref()) else {
        return Ok(None);
    };
    if master.is_empty() {
        return Ok(None);
    }

    let typ_vmax = vmax.typ.or(vmax.min).or(vmax.max).unwrap_or(f64::INFINITY);
    let (lo, hi) = clamp_range(kind, typ_vmax);
    let tolerance = clamp_tolerance.typ.unwrap_or(0.0);

    let mut rows = Vec::new();
    for &(v, _) in master {
        if v < lo || v > hi {
            continue;
        }
        let i_typ = source.typ.as_deref().and_then(|s| interpolate(s, v));
        let i_min = source.min.as_deref().and_then(|s| interpolate(s, v));
        let i_max = source.max.as_deref().and_then(|s| interpolate(s, v));
        if i_typ.map(|i| i.abs() < tolerance).unwrap_or(false) {
            continue;
        }
        rows.push(ViRow {
            v,
            i_typ: i_typ.map(to_active_convention),
            i_min: i_min.map(to_active_convention),
            i_max: i_max.map(to_active_convention),
        });
    }
    if rows.is_empty() {
        return Ok(None);
    }
    if rows.windows(2).any(|w| w[0].v >= w[1].v) {
        return Err(DeriveError::NonMonotonic);
    }
    Ok(Some(ViTable::capped(rows)))
}

fn clamp_range(kind: ClampKind, vmax: f64) -> (f64, f64) {
    match kind {
        ClampKind::Power => (vmax, 2.0 * vmax),
        ClampKind::Ground => (-vmax, vmax),
    }
}

/// Build the series R/Vds table directly from a plain sweep (no
/// enabled/disabled subtraction, no clamp slicing — spec §4.1 "Series,
/// Series_switch: R Series / Vds tables only").
pub fn series_table(sweep: &VCorner<Vec<(f64, f64)>>) -> DeriveResult<Option<ViTable>> {
    let Some(master) = sweep.typ.as_deref().or(sweep.min.as_deref()).or(sweep.max.as_deref()) else {
        return Ok(None);
    };
    if master.is_empty() {
        return Ok(None);
    }
    let mut rows = Vec::with_capacity(master.len());
    for &(v, _) in master {
        rows.push(ViRow {
            v,
            i_typ: sweep.typ.as_deref().and_then(|s| interpolate(s, v)).map(to_active_convention),
            i_min: sweep.min.as_deref().and_then(|s| interpolate(s, v)).map(to_active_convention),
            i_max: sweep.max.as_deref().and_then(|s| interpolate(s, v)).map(to_active_convention),
        });
    }
    if rows.windows(2).any(|w| w[0].v >= w[1].v) {
        return Err(DeriveError::NonMonotonic);
    }
    Ok(Some(ViTable::capped(rows)))
}

/// Resolve the available corners' sweep for a single [`Corner`], used by
/// callers that already know which corner they want rather than the full
/// typ/min/max triple.
pub fn sweep_for(source: &VCorner<Vec<(f64, f64)>>, corner: Corner) -> Option<&[(f64, f64)]> {
    source.get(corner).map(Vec::as_slice)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sweep(vs: &[f64], is: &[f64]) -> Vec<(f64, f64)> {
        vs.iter().copied().zip(is.iter().copied()).collect()
    }

    #[test]
    fn driver_sweep_splits_into_pullup_and_pulldown_by_v_range() {
        let enabled = VCorner::uniform(sweep(&[-3.3, 0.0, 3.3, 5.0, 6.6], &[-0.01, 0.0, -0.05, -0.06, -0.08]));
        let disabled = VCorner::<Vec<(f64, f64)>>::all_unset();
        let vmax = VCorner::uniform(3.3);
        let (pullup, pulldown) = driver_tables(&enabled, &disabled, &vmax).unwrap();
        let pullup = pullup.unwrap();
        let pulldown = pulldown.unwrap();
        assert!(pullup.rows.iter().all(|r| r.v >= 3.3 && r.v <= 6.6));
        assert!(pulldown.rows.iter().all(|r| r.v >= -3.3 && r.v <= 3.3));
        assert!(pullup.is_monotonic());
        assert!(pulldown.is_monotonic());
    }

    #[test]
    fn disabled_sweep_is_subtracted_before_the_range_split() {
        let enabled = VCorner::uniform(sweep(&[-3.3, 0.0, 3.3, 6.6], &[-0.01, 0.0, -0.05, -0.08]));
        let disabled = VCorner::uniform(sweep(&[-3.3, 0.0, 3.3, 6.6], &[-0.01, 0.0, -0.01, -0.01]));
        let vmax = VCorner::uniform(3.3);
        let (pullup, _) = driver_tables(&enabled, &disabled, &vmax).unwrap();
        let pullup = pullup.unwrap();
        // passive delta at V=6.6 is -0.07, active convention flips it positive.
        let last = pullup.rows.last().unwrap();
        assert!(last.i_typ.unwrap() > 0.0);
    }

    #[test]
    fn output_only_model_uses_enabled_sweep_directly() {
        let enabled = VCorner::uniform(sweep(&[0.0, 3.3], &[0.0, -0.1]));
        let disabled = VCorner::<Vec<(f64, f64)>>::all_unset();
        let vmax = VCorner::uniform(3.3);
        let (pullup, _) = driver_tables(&enabled, &disabled, &vmax).unwrap();
        assert!(pullup.is_some());
    }

    #[test]
    fn clamp_table_slices_disabled_sweep_to_power_clamp_range() {
        let disabled = VCorner::uniform(sweep(&[-3.3, 0.0, 3.3, 5.0, 6.6], &[0.5, 0.0, 0.0, 0.01, 0.2]));
        let vmax = VCorner::uniform(3.3);
        let tolerance = VCorner::uniform(0.0);
        let table = clamp_table(&disabled, ClampKind::Power, &vmax, &tolerance).unwrap().unwrap();
        assert!(table.rows.iter().all(|r| r.v >= 3.3 && r.v <= 6.6));
    }

    #[test]
    fn clamp_tolerance_suppresses_small_magnitude_rows() {
        let disabled = VCorner::uniform(sweep(&[3.3, 4.0, 6.6], &[0.0005, 0.0, 0.2]));
        let vmax = VCorner::uniform(3.3);
        let tolerance = VCorner::uniform(0.01);
        let table = clamp_table(&disabled, ClampKind::Power, &vmax, &tolerance).unwrap().unwrap();
        assert_eq!(table.rows.len(), 1);
    }
}
