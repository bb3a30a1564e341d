//! Numeric parsing with SI-style magnitude suffixes or scientific notation.
//!
//! The structured configuration form allows either convention;
//! this is the single place both the config loader and tests go to parse a
//! bare numeric token.

use crate::error::CoreError;

/// Magnitude suffixes recognized on a numeric token, longest match first so
/// `"meg"` is tried before `"m"`.
const SUFFIXES: &[(&str, f64)] = &[
    ("meg", 1e6),
    ("t", 1e12),
    ("g", 1e9),
    ("k", 1e3),
    ("m", 1e-3),
    ("u", 1e-6),
    ("n", 1e-9),
    ("p", 1e-12),
    ("f", 1e-15),
];

/// Parse a numeric literal that may carry an SI-style suffix (`1n`, `2.2p`,
/// `10meg`) or plain/scientific notation (`1e-9`, `3.3`).
pub fn parse_value(raw: &str) -> Result<f64, CoreError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(CoreError::InvalidNumeric(raw.to_string()));
    }

    if let Ok(value) = raw.parse::<f64>() {
        return Ok(value);
    }

    let lower = raw.to_ascii_lowercase();
    for (suffix, scale) in SUFFIXES {
        if let Some(mantissa) = lower.strip_suffix(suffix) {
            if let Ok(value) = mantissa.parse::<f64>() {
                return Ok(value * scale);
            }
        }
    }

    Err(CoreError::InvalidNumeric(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_and_scientific() {
        assert_eq!(parse_value("3.3").unwrap(), 3.3);
        assert_eq!(parse_value("1e-9").unwrap(), 1e-9);
        assert_eq!(parse_value("-2.5E3").unwrap(), -2500.0);
    }

    #[test]
    fn si_suffixes() {
        assert!((parse_value("1n").unwrap() - 1e-9).abs() < 1e-20);
        assert!((parse_value("2.2p").unwrap() - 2.2e-12).abs() < 1e-22);
        assert!((parse_value("10meg").unwrap() - 10e6).abs() < 1e-3);
        assert!((parse_value("10m").unwrap() - 10e-3).abs() < 1e-12);
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse_value("").is_err());
        assert!(parse_value("abc").is_err());
    }
}
