//! Derating by corner scaling (spec §4.5 "Derating"): when a V/I row or
//! ramp value has no explicit min/max simulation result, fill it by scaling
//! the typ column by `+-pct`.

use ibischar_core::{RampRecord, VCorner, ViTable};

/// Fill missing min/max columns of `table` by scaling each row's typ value
/// by `+-derate_pct` percent. A no-op when `derate_pct` is `None` or a row
/// already carries explicit min/max data.
pub fn derate_vi_table(mut table: ViTable, derate_pct: Option<f64>) -> ViTable {
    let Some(pct) = derate_pct else {
        return table;
    };
    let scale = pct / 100.0;
    for row in &mut table.rows {
        let Some(typ) = row.i_typ else { continue };
        let lo = typ * (1.0 - scale);
        let hi = typ * (1.0 + scale);
        let (lo, hi) = (lo.min(hi), lo.max(hi));
        row.i_min.get_or_insert(lo);
        row.i_max.get_or_insert(hi);
    }
    table
}

/// Fill missing min/max corners of a [`RampRecord`] the same way.
pub fn derate_ramp(mut ramp: RampRecord, derate_pct: Option<f64>) -> RampRecord {
    let Some(pct) = derate_pct else {
        return ramp;
    };
    ramp.dv_dt_rise = derate_scalar(ramp.dv_dt_rise, pct);
    ramp.dv_dt_fall = derate_scalar(ramp.dv_dt_fall, pct);
    ramp
}

fn derate_scalar(mut value: VCorner<f64>, pct: f64) -> VCorner<f64> {
    let Some(typ) = value.typ else { return value };
    let scale = pct / 100.0;
    let lo = typ * (1.0 - scale);
    let hi = typ * (1.0 + scale);
    let (lo, hi) = (lo.min(hi), lo.max(hi));
    value.min.get_or_insert(lo);
    value.max.get_or_insert(hi);
    value
}

#[cfg(test)]
mod tests {
    use super::*;
    use ibischar_core::ViRow;

    #[test]
    fn derating_fills_missing_corners_by_percent() {
        let table = ViTable {
            rows: vec![ViRow { v: 3.3, i_typ: Some(-0.1), i_min: None, i_max: None }],
        };
        let derated = derate_vi_table(table, Some(10.0));
        let row = derated.rows[0];
        assert!((row.i_min.unwrap() - (-0.11)).abs() < 1e-9);
        assert!((row.i_max.unwrap() - (-0.09)).abs() < 1e-9);
    }

    #[test]
    fn derating_never_overwrites_explicit_simulation_data() {
        let table = ViTable {
            rows: vec![ViRow { v: 3.3, i_typ: Some(-0.1), i_min: Some(-0.2), i_max: Some(-0.05) }],
        };
        let derated = derate_vi_table(table, Some(10.0));
        assert_eq!(derated.rows[0].i_min, Some(-0.2));
        assert_eq!(derated.rows[0].i_max, Some(-0.05));
    }

    #[test]
    fn no_pct_is_a_no_op() {
        let table = ViTable {
            rows: vec![ViRow { v: 3.3, i_typ: Some(-0.1), i_min: None, i_max: None }],
        };
        let derated = derate_vi_table(table, None);
        assert_eq!(derated.rows[0].i_min, None);
    }
}
