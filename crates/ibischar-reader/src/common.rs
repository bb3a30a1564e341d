//! Shared line-scanning helpers the three dialect parsers build on. None of
//! HSPICE/Spectre/Eldo's output grammars are whitespace-sensitive for our
//! purposes: every data row is some separator-delimited run of numbers, and
//! every header/banner line fails to parse as one. Each dialect module
//! supplies only its own "is this a data row" predicate and column count.

use crate::error::{ReaderError, ReaderResult};

/// Split `line` on whitespace and commas and parse every token as `f64`,
/// dropping anything that doesn't parse (unit suffixes, stray labels).
pub fn numeric_tokens(line: &str) -> Vec<f64> {
    line.split(|c: char| c.is_whitespace() || c == ',')
        .filter(|t| !t.is_empty())
        .filter_map(|t| t.parse::<f64>().ok())
        .collect()
}

/// Scan `text` for lines yielding at least `min_columns` numeric tokens,
/// keeping the first `min_columns` of each as one row.
pub fn scan_rows(text: &str, min_columns: usize) -> Vec<Vec<f64>> {
    text.lines()
        .filter_map(|line| {
            let tokens = numeric_tokens(line);
            (tokens.len() >= min_columns).then_some(tokens)
        })
        .collect()
}

/// Confirm `points` are strictly increasing in the swept variable (spec §4.4
/// "DC sweep result ... monotonic in V by construction").
pub fn ensure_monotonic(points: &[(f64, f64)], dialect: &'static str) -> ReaderResult<()> {
    if points.windows(2).all(|w| w[0].0 < w[1].0) {
        Ok(())
    } else {
        Err(ReaderError::NonMonotonic { dialect })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_tokens_ignores_labels() {
        assert_eq!(numeric_tokens("1.0 2.5e-3 label"), vec![1.0, 2.5e-3]);
    }

    #[test]
    fn scan_rows_drops_header_lines() {
        let text = "v-sweep i(vsupply)\n0.0 1.0\n0.1 1.1\n";
        let rows = scan_rows(text, 2);
        assert_eq!(rows.len(), 2);
    }
}
