//! Fixed-bin waveform averaging (spec §4.5 "Rising/falling waveforms"),
//! grounded on the interpolate-then-resample shape of a transient
//! sample-at-times helper: partition `[0, sim_time]` into `n_bins` uniform
//! bins, average whatever raw samples land in each, then linearly
//! interpolate any bin that got no samples at all.

use crate::error::{DeriveError, DeriveResult};

/// Bin `samples` (assumed `(t, v)` pairs spanning `[0, sim_time]`) into
/// exactly `n_bins` rows. Row `i` carries `t = i * sim_time / (n_bins - 1)`,
/// so the first row is always `t = 0` and the last is always `t =
/// sim_time` (spec invariant 2), regardless of where the raw samples
/// actually fell.
pub fn bin_waveform(samples: &[(f64, f64)], sim_time: f64, n_bins: usize) -> DeriveResult<Vec<(f64, f64)>> {
    if n_bins < 2 {
        return Err(DeriveError::InvalidBinCount(n_bins));
    }
    if samples.is_empty() {
        return Err(DeriveError::EmptyWaveform);
    }

    let dt = sim_time / (n_bins - 1) as f64;
    let mut sums = vec![0.0_f64; n_bins];
    let mut counts = vec![0usize; n_bins];
    for &(t, v) in samples {
        let idx = ((t / dt).round() as isize).clamp(0, n_bins as isize - 1) as usize;
        sums[idx] += v;
        counts[idx] += 1;
    }

    let mut bins: Vec<Option<f64>> = (0..n_bins)
        .map(|i| (counts[i] > 0).then(|| sums[i] / counts[i] as f64))
        .collect();
    interpolate_empty_bins(&mut bins);

    Ok((0..n_bins)
        .map(|i| (i as f64 * dt, bins[i].expect("every bin filled by interpolate_empty_bins")))
        .collect())
}

/// Fill every `None` entry by linearly interpolating between its nearest
/// filled neighbors; an entry with a filled neighbor on only one side
/// (leading/trailing empty run) copies that neighbor's value (spec §4.5
/// "empty bins are linearly interpolated from neighbors").
fn interpolate_empty_bins(bins: &mut [Option<f64>]) {
    let n = bins.len();
    let filled: Vec<usize> = (0..n).filter(|&i| bins[i].is_some()).collect();
    if filled.is_empty() {
        return;
    }
    for i in 0..n {
        if bins[i].is_some() {
            continue;
        }
        let left = filled.iter().rev().find(|&&j| j < i).copied();
        let right = filled.iter().find(|&&j| j > i).copied();
        bins[i] = match (left, right) {
            (Some(l), Some(r)) => {
                let (vl, vr) = (bins[l].unwrap(), bins[r].unwrap());
                let alpha = (i - l) as f64 / (r - l) as f64;
                Some(vl + alpha * (vr - vl))
            }
            (Some(l), None) => bins[l],
            (None, Some(r)) => bins[r],
            (None, None) => unreachable!("filled is non-empty"),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bins_cover_the_full_simulation_window() {
        let samples: Vec<(f64, f64)> = (0..1000).map(|i| (i as f64 * 1e-12, i as f64 * 1e-3)).collect();
        let rows = bin_waveform(&samples, 1e-9, 100).unwrap();
        assert_eq!(rows.len(), 100);
        assert_eq!(rows[0].0, 0.0);
        assert!((rows[99].0 - 1e-9).abs() < 1e-18);
    }

    #[test]
    fn sparse_bins_are_interpolated_but_preserve_point_count() {
        // Ten percent of the window has no samples at all; every bin must
        // still come out filled.
        let mut samples: Vec<(f64, f64)> = (0..90).map(|i| (i as f64 * 1e-11, i as f64 * 1e-3)).collect();
        samples.push((95e-11, 0.95));
        let rows = bin_waveform(&samples, 1e-9, 100).unwrap();
        assert_eq!(rows.len(), 100);
        assert!(rows.iter().all(|&(_, v)| v.is_finite()));
    }

    #[test]
    fn last_bin_is_forced_to_sim_time() {
        let samples = vec![(0.0, 0.0), (5e-10, 0.5)];
        let rows = bin_waveform(&samples, 1e-9, 10).unwrap();
        assert_eq!(rows.last().unwrap().0, 1e-9);
    }

    #[test]
    fn empty_samples_is_a_derive_error() {
        assert!(matches!(bin_waveform(&[], 1e-9, 100), Err(DeriveError::EmptyWaveform)));
    }
}
