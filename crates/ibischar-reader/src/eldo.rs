//! Eldo's `.PRINT` output: each row is prefixed with a 1-based point index
//! that HSPICE and Spectre don't carry, so the leading column is dropped
//! before the usual (V, I) / (t, V, I) tuple.

use crate::common::{ensure_monotonic, numeric_tokens};
use crate::error::{ReaderError, ReaderResult};

const DIALECT: &str = "eldo";

pub fn parse_dc(text: &str) -> ReaderResult<Vec<(f64, f64)>> {
    let rows: Vec<Vec<f64>> = text
        .lines()
        .filter_map(|line| {
            let tokens = numeric_tokens(line);
            (tokens.len() >= 3).then(|| tokens[1..].to_vec())
        })
        .collect();
    if rows.is_empty() {
        return Err(ReaderError::NoData { dialect: DIALECT });
    }
    let points: Vec<(f64, f64)> = rows.into_iter().map(|r| (r[0], r[1])).collect();
    ensure_monotonic(&points, DIALECT)?;
    Ok(points)
}

pub fn parse_tran(text: &str) -> ReaderResult<Vec<(f64, f64, f64)>> {
    let rows: Vec<Vec<f64>> = text
        .lines()
        .filter_map(|line| {
            let tokens = numeric_tokens(line);
            (tokens.len() >= 4).then(|| tokens[1..4].to_vec())
        })
        .collect();
    if rows.is_empty() {
        return Err(ReaderError::NoData { dialect: DIALECT });
    }
    Ok(rows.into_iter().map(|r| (r[0], r[1], r[2])).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drops_the_leading_point_index() {
        let text = "1  0.000000e+00  1.000000e-03\n2  1.000000e-01  1.100000e-03\n";
        let points = parse_dc(text).unwrap();
        assert_eq!(points, vec![(0.0, 1.0e-3), (0.1, 1.1e-3)]);
    }

    #[test]
    fn malformed_text_yields_no_data() {
        assert!(matches!(parse_dc("nothing here"), Err(ReaderError::NoData { .. })));
    }
}
