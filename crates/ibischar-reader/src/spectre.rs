//! Spectre's ASCII PSF-style output: comma-separated numeric rows (the
//! comma is already handled by [`crate::common::numeric_tokens`]).

use crate::common::{ensure_monotonic, scan_rows};
use crate::error::{ReaderError, ReaderResult};

const DIALECT: &str = "spectre";

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
    fn parses_comma_separated_dc_rows() {
        let text = "sweep, i\n0.0, 1.0e-3\n0.1, 1.1e-3\n";
        let points = parse_dc(text).unwrap();
        assert_eq!(points, vec![(0.0, 1.0e-3), (0.1, 1.1e-3)]);
    }
}
