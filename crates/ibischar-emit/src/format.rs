//! Fixed-precision scientific numeric formatting (`%1.4e`-equivalent) and
//! the "NA" sentinel for unavailable corner values (spec §4.6).

use ibischar_core::{VCorner, NA_SENTINEL};

/// Column width every formatted numeric field is padded to, wide enough
/// that strict IBIS parsers never see two columns run together.
const FIELD_WIDTH: usize = 13;

/// Format `value` as fixed-precision scientific notation: four mantissa
/// digits after the point, a signed two-digit exponent (`1.2340e+01`,
/// `-3.3000e+00`, `1.0000e-09`).
pub fn scientific(value: f64) -> String {
    let formatted = format!("{value:.4e}");
    let (mantissa, exponent) = formatted
        .split_once('e')
        .expect("Rust's {:e} formatter always emits an 'e'");
    let exp: i32 = exponent.parse().expect("exponent is always a valid integer");
    let sign = if exp < 0 { '-' } else { '+' };
    format!("{mantissa}e{sign}{:02}", exp.abs())
}

/// Format an `Option<f64>` as scientific notation, or [`NA_SENTINEL`] when
/// absent.
pub fn scientific_or_na(value: Option<f64>) -> String {
    match value {
        Some(v) => scientific(v),
        None => NA_SENTINEL.to_string(),
    }
}

/// Right-pad a formatted column to [`FIELD_WIDTH`] so table columns line
/// up visually (not required by the format, but matches the column
/// discipline a strict parser's test suite is usually built against).
pub fn column(text: &str) -> String {
    format!("{text:<FIELD_WIDTH$}")
}

/// Render one typ/min/max row as three whitespace-separated, NA-aware
/// columns.
pub fn corner_row(typ: Option<f64>, min: Option<f64>, max: Option<f64>) -> String {
    format!(
        "{}{}{}",
        column(&scientific_or_na(typ)),
        column(&scientific_or_na(min)),
        column(&scientific_or_na(max))
    )
}

/// Render a [`VCorner<f64>`] as a typ/min/max row.
pub fn vcorner_row(v: &VCorner<f64>) -> String {
    corner_row(v.typ, v.min, v.max)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positive_value_formats_with_signed_exponent() {
        assert_eq!(scientific(3.3), "3.3000e+00");
    }

    #[test]
    fn negative_exponent_is_zero_padded() {
        assert_eq!(scientific(1e-9), "1.0000e-09");
    }

    #[test]
    fn large_magnitude_formats_with_two_digit_exponent() {
        assert_eq!(scientific(1234.5678), "1.2346e+03");
    }

    #[test]
    fn zero_formats_without_panicking() {
        assert_eq!(scientific(0.0), "0.0000e+00");
    }

    #[test]
    fn negative_values_keep_their_sign_in_the_mantissa() {
        assert_eq!(scientific(-3.3), "-3.3000e+00");
    }

    #[test]
    fn missing_value_is_the_na_sentinel() {
        assert_eq!(scientific_or_na(None), "NA");
    }
}
