//! Ramp-rate extraction via 20%/80% crossing measurement (spec §4.5
//! "Ramp rate"), grounded on the trigger-crossing/linear-interpolation
//! shape of a SPICE `.MEAS TRIG...TARG` evaluator: find the time each
//! threshold is crossed, interpolate the crossing time linearly between
//! the bracketing samples, then report `dV/dt` over that window.

use crate::error::{DeriveError, DeriveResult};

/// `(dV/dt rise, dV/dt fall)` measured from one transient that contains
/// both a rising and a falling edge (the planner's ramp stimulus is a
/// pulse, so a single run always carries both).
pub fn measure_ramp(samples: &[(f64, f64, f64)]) -> DeriveResult<(f64, f64)> {
    let times: Vec<f64> = samples.iter().map(|&(t, _, _)| t).collect();
    let values: Vec<f64> = samples.iter().map(|&(_, v, _)| v).collect();

    let v_lo = values.iter().copied().fold(f64::INFINITY, f64::min);
    let v_hi = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let swing = v_hi - v_lo;
    let th20 = v_lo + 0.2 * swing;
    let th80 = v_lo + 0.8 * swing;

    let t20_rise = find_crossing(&times, &values, th20, true, 0.0).ok_or(DeriveError::RampNotCrossed { edge: "rise" })?;
    let t80_rise =
        find_crossing(&times, &values, th80, true, t20_rise).ok_or(DeriveError::RampNotCrossed { edge: "rise" })?;
    let t80_fall = find_crossing(&times, &values, th80, false, t80_rise)
        .ok_or(DeriveError::RampNotCrossed { edge: "fall" })?;
    let t20_fall =
        find_crossing(&times, &values, th20, false, t80_fall).ok_or(DeriveError::RampNotCrossed { edge: "fall" })?;

    let dv_dt_rise = (th80 - th20) / (t80_rise - t20_rise);
    let dv_dt_fall = (th20 - th80) / (t20_fall - t80_fall);
    Ok((dv_dt_rise, dv_dt_fall))
}

/// Find the first crossing of `threshold` at or after `after`, in the
/// rising (`rising = true`) or falling direction, interpolating the exact
/// crossing time linearly between the bracketing samples.
fn find_crossing(times: &[f64], values: &[f64], threshold: f64, rising: bool, after: f64) -> Option<f64> {
    for i in 0..times.len().saturating_sub(1) {
        let (t0, t1) = (times[i], times[i + 1]);
        let (v0, v1) = (values[i], values[i + 1]);
        if t1 < after {
            continue;
        }
        let crosses = if rising {
            v0 < threshold && v1 >= threshold
        } else {
            v0 > threshold && v1 <= threshold
        };
        if !crosses {
            continue;
        }
        let t = if (v1 - v0).abs() < f64::EPSILON {
            t0
        } else {
            let alpha = (threshold - v0) / (v1 - v0);
            t0 + alpha * (t1 - t0)
        };
        if t >= after {
            return Some(t);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pulse_samples() -> Vec<(f64, f64, f64)> {
        // Rise 0 -> 3.3V over 1ns, hold, fall 3.3V -> 0 over 1ns.
        let mut samples = Vec::new();
        for i in 0..=10 {
            let t = i as f64 * 0.1e-9;
            samples.push((t, 3.3 * (t / 1e-9), 0.0));
        }
        for i in 0..=10 {
            let t = 2e-9 + i as f64 * 0.1e-9;
            samples.push((t, 3.3 * (1.0 - (i as f64 * 0.1)), 0.0));
        }
        samples
    }

    #[test]
    fn measures_rise_and_fall_rates_from_one_transient() {
        let samples = pulse_samples();
        let (rise, fall) = measure_ramp(&samples).unwrap();
        assert!(rise > 0.0, "rise rate should be positive, got {rise}");
        assert!(fall < 0.0, "fall rate should be negative, got {fall}");
        let expected_rate = (0.8 - 0.2) * 3.3 / 0.6e-9;
        assert!((rise - expected_rate).abs() / expected_rate < 0.05);
    }

    #[test]
    fn transient_with_no_falling_edge_is_a_derive_error() {
        // Monotonically rising only: both rising thresholds cross, but
        // there's no falling edge left to measure.
        let samples: Vec<(f64, f64, f64)> = (0..3).map(|i| (i as f64 * 1e-9, 0.3 * i as f64, 0.0)).collect();
        assert!(matches!(measure_ramp(&samples), Err(DeriveError::RampNotCrossed { edge: "fall" })));
    }
}
