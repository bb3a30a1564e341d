//! V/I table, V/T waveform table, and ramp record — the tabular forms an
//! IBIS model ultimately carries.

use crate::constants::{VI_TABLE_MAX_ROWS, VT_TABLE_ROWS_PRE_V4, VT_TABLE_ROWS_V4};
use crate::corner::VCorner;

/// One row of a V/I table: a swept pad voltage and the current drawn at
/// each available corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViRow {
    pub v: f64,
    pub i_typ: Option<f64>,
    pub i_min: Option<f64>,
    pub i_max: Option<f64>,
}

/// Ordered, monotonic-in-V sequence of rows, capped at
/// [`VI_TABLE_MAX_ROWS`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ViTable {
    pub rows: Vec<ViRow>,
}

impl ViTable {
    /// Build a table from rows already sorted by ascending V, decimating to
    /// the IBIS 1.x row cap if necessary (spec §3, "Derived tables with
    /// point counts exceeding the cap are decimated to the cap").
    pub fn capped(rows: Vec<ViRow>) -> Self {
        Self {
            rows: decimate(rows, VI_TABLE_MAX_ROWS),
        }
    }

    pub fn is_monotonic(&self) -> bool {
        self.rows.windows(2).all(|w| w[0].v < w[1].v)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// One row of a V/T waveform table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VtRow {
    pub t: f64,
    pub v_typ: Option<f64>,
    pub v_min: Option<f64>,
    pub v_max: Option<f64>,
}

/// External R/L/C/V network used during waveform characterization (spec
/// §3 "Fixture"), plus the die parasitics carried alongside it.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Fixture {
    pub r: VCorner<f64>,
    pub l: VCorner<f64>,
    pub c: VCorner<f64>,
    pub v: VCorner<f64>,
    pub die_r: VCorner<f64>,
    pub die_l: VCorner<f64>,
    pub die_c: VCorner<f64>,
}

/// Fixed-sample-count V/T table: 100 rows below IBIS 4.0, up to 1000 at or
/// above it.
#[derive(Debug, Clone, PartialEq)]
pub struct VtTable {
    pub rows: Vec<VtRow>,
    pub fixture: Fixture,
}

impl VtTable {
    pub fn expected_row_count(ibis_version_at_least_4: bool) -> usize {
        if ibis_version_at_least_4 {
            VT_TABLE_ROWS_V4
        } else {
            VT_TABLE_ROWS_PRE_V4
        }
    }

    /// Spec invariant 2: `t` strictly increasing, `t[0] == 0`,
    /// `t[-1] == sim_time`, row count matches the IBIS-version policy.
    pub fn satisfies_invariants(&self, sim_time: f64, ibis_version_at_least_4: bool) -> bool {
        if self.rows.is_empty() {
            return false;
        }
        let strictly_increasing = self.rows.windows(2).all(|w| w[0].t < w[1].t);
        let starts_at_zero = self.rows.first().map(|r| r.t == 0.0).unwrap_or(false);
        let ends_at_sim_time = self
            .rows
            .last()
            .map(|r| (r.t - sim_time).abs() < 1e-15)
            .unwrap_or(false);
        let expected_len = Self::expected_row_count(ibis_version_at_least_4);
        strictly_increasing && starts_at_zero && ends_at_sim_time && self.rows.len() == expected_len
    }
}

/// Rise/fall rate (ΔV/Δt), measured 20%→80% of swing, each corner-valued
///.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RampRecord {
    pub dv_dt_rise: VCorner<f64>,
    pub dv_dt_fall: VCorner<f64>,
}

/// Evenly resample `rows` down to `cap` entries, always keeping the first
/// and last row. A no-op when already within the cap.
pub fn decimate<T: Clone>(rows: Vec<T>, cap: usize) -> Vec<T> {
    let n = rows.len();
    if n <= cap || cap == 0 {
        return rows;
    }
    if cap == 1 {
        return vec![rows[0].clone()];
    }
    (0..cap)
        .map(|i| rows[i * (n - 1) / (cap - 1)].clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(v: f64) -> ViRow {
        ViRow {
            v,
            i_typ: Some(v),
            i_min: Some(v),
            i_max: Some(v),
        }
    }

    #[test]
    fn capped_table_respects_row_cap() {
        let rows: Vec<ViRow> = (0..500).map(|i| row(i as f64)).collect();
        let table = ViTable::capped(rows);
        assert_eq!(table.len(), VI_TABLE_MAX_ROWS);
        assert!(table.is_monotonic());
        assert_eq!(table.rows.first().unwrap().v, 0.0);
        assert_eq!(table.rows.last().unwrap().v, 499.0);
    }

    #[test]
    fn capped_table_under_cap_is_unchanged() {
        let rows: Vec<ViRow> = (0..10).map(|i| row(i as f64)).collect();
        let table = ViTable::capped(rows.clone());
        assert_eq!(table.rows.len(), rows.len());
    }

    #[test]
    fn vt_table_invariants_detect_bad_terminal_time() {
        let table = VtTable {
            rows: vec![
                VtRow {
                    t: 0.0,
                    v_typ: Some(0.0),
                    v_min: None,
                    v_max: None,
                },
                VtRow {
                    t: 1e-9,
                    v_typ: Some(1.0),
                    v_min: None,
                    v_max: None,
                },
            ],
            fixture: Fixture::default(),
        };
        assert!(!table.satisfies_invariants(2e-9, false));
    }
}
