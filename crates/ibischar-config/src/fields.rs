//! The keyword <-> [`Defaults`] field table shared by the flat-form parser,
//! the flat-form emitter, and the structured-form converter, so the three
//! never drift out of sync with each other.

use ibischar_core::{Defaults, VCorner};

use crate::error::{ConfigError, ConfigResult};

/// Every corner-valued keyword under `[Voltage Range]`-style blocks, in the
/// order the flat emitter writes them.
pub const DEFAULTS_KEYWORDS: &[&str] = &[
    "Voltage Range",
    "Temperature Range",
    "Pullup Reference",
    "Pulldown Reference",
    "Power Clamp Reference",
    "GND Clamp Reference",
    "Package R",
    "Package L",
    "Package C",
    "Die Capacitance",
    "Load Resistance",
    "Sim Time",
    "Input Lo Stim",
    "Input Hi Stim",
    "Target Rise Time",
    "Target Fall Time",
    "Clamp Tolerance",
    "Derate VI Pct",
    "Derate Ramp Pct",
];

pub fn get_defaults_field(defaults: &Defaults, keyword: &str) -> Option<VCorner<f64>> {
    match_keyword_ref(keyword, defaults).cloned()
}

fn match_keyword_ref<'a>(keyword: &str, d: &'a Defaults) -> Option<&'a VCorner<f64>> {
    Some(match keyword {
        k if k.eq_ignore_ascii_case("Voltage Range") => &d.voltage_range,
        k if k.eq_ignore_ascii_case("Temperature Range") => &d.temperature_range,
        k if k.eq_ignore_ascii_case("Pullup Reference") => &d.pullup_ref,
        k if k.eq_ignore_ascii_case("Pulldown Reference") => &d.pulldown_ref,
        k if k.eq_ignore_ascii_case("Power Clamp Reference") => &d.power_clamp_ref,
        k if k.eq_ignore_ascii_case("GND Clamp Reference") => &d.gnd_clamp_ref,
        k if k.eq_ignore_ascii_case("Package R") => &d.package_r,
        k if k.eq_ignore_ascii_case("Package L") => &d.package_l,
        k if k.eq_ignore_ascii_case("Package C") => &d.package_c,
        k if k.eq_ignore_ascii_case("Die Capacitance") => &d.die_c,
        k if k.eq_ignore_ascii_case("Load Resistance") => &d.load_r,
        k if k.eq_ignore_ascii_case("Sim Time") => &d.sim_time,
        k if k.eq_ignore_ascii_case("Input Lo Stim") => &d.input_lo_stim,
        k if k.eq_ignore_ascii_case("Input Hi Stim") => &d.input_hi_stim,
        k if k.eq_ignore_ascii_case("Target Rise Time") => &d.target_rise_time,
        k if k.eq_ignore_ascii_case("Target Fall Time") => &d.target_fall_time,
        k if k.eq_ignore_ascii_case("Clamp Tolerance") => &d.clamp_tolerance,
        k if k.eq_ignore_ascii_case("Derate VI Pct") => &d.derate_vi_pct,
        k if k.eq_ignore_ascii_case("Derate Ramp Pct") => &d.derate_ramp_pct,
        _ => return None,
    })
}

pub fn set_defaults_field(d: &mut Defaults, keyword: &str, value: VCorner<f64>) -> bool {
    let slot = match keyword {
        k if k.eq_ignore_ascii_case("Voltage Range") => &mut d.voltage_range,
        k if k.eq_ignore_ascii_case("Temperature Range") => &mut d.temperature_range,
        k if k.eq_ignore_ascii_case("Pullup Reference") => &mut d.pullup_ref,
        k if k.eq_ignore_ascii_case("Pulldown Reference") => &mut d.pulldown_ref,
        k if k.eq_ignore_ascii_case("Power Clamp Reference") => &mut d.power_clamp_ref,
        k if k.eq_ignore_ascii_case("GND Clamp Reference") => &mut d.gnd_clamp_ref,
        k if k.eq_ignore_ascii_case("Package R") => &mut d.package_r,
        k if k.eq_ignore_ascii_case("Package L") => &mut d.package_l,
        k if k.eq_ignore_ascii_case("Package C") => &mut d.package_c,
        k if k.eq_ignore_ascii_case("Die Capacitance") => &mut d.die_c,
        k if k.eq_ignore_ascii_case("Load Resistance") => &mut d.load_r,
        k if k.eq_ignore_ascii_case("Sim Time") => &mut d.sim_time,
        k if k.eq_ignore_ascii_case("Input Lo Stim") => &mut d.input_lo_stim,
        k if k.eq_ignore_ascii_case("Input Hi Stim") => &mut d.input_hi_stim,
        k if k.eq_ignore_ascii_case("Target Rise Time") => &mut d.target_rise_time,
        k if k.eq_ignore_ascii_case("Target Fall Time") => &mut d.target_fall_time,
        k if k.eq_ignore_ascii_case("Clamp Tolerance") => &mut d.clamp_tolerance,
        k if k.eq_ignore_ascii_case("Derate VI Pct") => &mut d.derate_vi_pct,
        k if k.eq_ignore_ascii_case("Derate Ramp Pct") => &mut d.derate_ramp_pct,
        _ => return false,
    };
    *slot = value;
    true
}

/// Parse up to three whitespace-split tokens (`typ min max`) into a
/// corner-valued scalar. `NA`/`NC` (spec §6 reserved tokens) map to unset;
/// fewer than three tokens leaves the trailing corners unset.
pub fn parse_corner_tokens(tokens: &[String]) -> ConfigResult<VCorner<f64>> {
    let mut out = VCorner::all_unset();
    if let Some(token) = tokens.first() {
        out.typ = parse_optional_token(token)?;
    }
    if let Some(token) = tokens.get(1) {
        out.min = parse_optional_token(token)?;
    }
    if let Some(token) = tokens.get(2) {
        out.max = parse_optional_token(token)?;
    }
    Ok(out)
}

fn parse_optional_token(token: &str) -> ConfigResult<Option<f64>> {
    if token.eq_ignore_ascii_case("NA") || token.eq_ignore_ascii_case("NC") {
        return Ok(None);
    }
    Ok(Some(ibischar_core::parse_value(token).map_err(ConfigError::Core)?))
}

/// Render a corner-valued scalar as `typ min max`, `NA` for unset fields —
/// the inverse of [`parse_corner_tokens`].
pub fn format_corner_tokens(value: &VCorner<f64>) -> String {
    [value.typ, value.min, value.max]
        .iter()
        .map(|v| match v {
            Some(f) => format_float(*f),
            None => "NA".to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// `f64` formatted so `s.parse::<f64>()` round-trips exactly.
pub fn format_float(value: f64) -> String {
    format!("{value}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corner_tokens_round_trip() {
        let tokens = vec!["3.3".to_string(), "3.0".to_string(), "3.6".to_string()];
        let corner = parse_corner_tokens(&tokens).unwrap();
        assert_eq!(corner.typ, Some(3.3));
        assert_eq!(corner.min, Some(3.0));
        assert_eq!(corner.max, Some(3.6));
        assert_eq!(format_corner_tokens(&corner), "3.3 3 3.6");
    }

    #[test]
    fn na_token_is_unset() {
        let tokens = vec!["NA".to_string(), "NA".to_string(), "NA".to_string()];
        let corner = parse_corner_tokens(&tokens).unwrap();
        assert!(corner.is_fully_unset());
    }

    #[test]
    fn every_keyword_is_settable_and_gettable() {
        let mut d = Defaults::default();
        for keyword in DEFAULTS_KEYWORDS {
            assert!(set_defaults_field(&mut d, keyword, VCorner::uniform(1.0)));
            assert_eq!(get_defaults_field(&d, keyword), Some(VCorner::uniform(1.0)));
        }
    }
}
