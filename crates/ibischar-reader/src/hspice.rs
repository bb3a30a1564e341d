//! HSPICE `.PRINT DC`/`.PRINT TRAN` output: a banner line followed by
//! whitespace-columnar numeric rows.

use crate::common::{ensure_monotonic, scan_rows};
use crate::error::{ReaderError, ReaderResult};

const DIALECT: &str = "hspice";

pub fn parse_dc(text: &str) -> ReaderResult<Vec<(f64, f64)>> {
    let rows = scan_rows(text, 2);
    if rows.is_empty() {
        return Err(ReaderError::NoData { dialect: DIALECT });
    }
    let points: Vec<(f64, f64)> = rows.into_iter().map(|r| (r[0], r[1])).collect();
    ensure_monotonic(&points, DIALECT)?;
    Ok(points)
}

pub fn parse_tran(text: &str) -> ReaderResult<Vec<(f64, f64, f64)>> {
    let rows = scan_rows(text, 3);
    if rows.is_empty() {
        return Err(ReaderError::NoData { dialect: DIALECT });
    }
    Ok(rows.into_iter().map(|r| (r[0], r[1], r[2])).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_dc_sweep_table() {
        let text = "v-sweep i(vsupply)\n0.0 1.0e-3\n0.1 1.1e-3\n0.2 1.2e-3\n";
        let points = parse_dc(text).unwrap();
        assert_eq!(points, vec![(0.0, 1.0e-3), (0.1, 1.1e-3), (0.2, 1.2e-3)]);
    }

    #[test]
    fn parses_a_transient_table() {
        let text = "time v(out) i(vsupply)\n0.0 0.0 1.0e-3\n1.0e-9 0.5 1.1e-3\n";
        let points = parse_tran(text).unwrap();
        assert_eq!(points.len(), 2);
        assert_eq!(points[1], (1.0e-9, 0.5, 1.1e-3));
    }

    #[test]
    fn non_monotonic_sweep_is_an_error() {
        let text = "0.0 1.0\n0.2 1.1\n0.1 1.2\n";
        assert!(matches!(parse_dc(text), Err(ReaderError::NonMonotonic { .. })));
    }
}
