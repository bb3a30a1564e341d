//! `[Waveform Fixture]` line encoding: one line per user-specified R/L/C/V
//! (plus die parasitic) fixture feeding rising/falling waveform
//! characterization (spec §3 "Fixture"). Each of the seven corner-valued
//! fields is written as a comma-joined `typ,min,max` group so a fixture
//! line stays a fixed seven whitespace-separated tokens regardless of which
//! corners are set.

use ibischar_core::Fixture;

use crate::error::ConfigResult;
use crate::fields::{format_corner_tokens, parse_corner_tokens};

const FIXTURE_FIELD_ORDER: usize = 7;

/// Parse one `[Waveform Fixture]` body line (seven comma-grouped tokens:
/// R, L, C, V, die-R, die-L, die-C).
pub fn parse_fixture_line(tokens: &[String]) -> ConfigResult<Fixture> {
    let mut groups = tokens.iter().map(|t| parse_csv_group(t));
    let mut next = || -> ConfigResult<ibischar_core::VCorner<f64>> {
        match groups.next() {
            Some(result) => result,
            None => Ok(ibischar_core::VCorner::all_unset()),
        }
    };
    Ok(Fixture {
        r: next()?,
        l: next()?,
        c: next()?,
        v: next()?,
        die_r: next()?,
        die_l: next()?,
        die_c: next()?,
    })
}

fn parse_csv_group(token: &str) -> ConfigResult<ibischar_core::VCorner<f64>> {
    let tokens: Vec<String> = token.split(',').map(str::to_string).collect();
    parse_corner_tokens(&tokens)
}

/// Render a [`Fixture`] back out as a `[Waveform Fixture]` body line — the
/// inverse of [`parse_fixture_line`].
pub fn format_fixture_line(fixture: &Fixture) -> String {
    let fields = [
        &fixture.r,
        &fixture.l,
        &fixture.c,
        &fixture.v,
        &fixture.die_r,
        &fixture.die_l,
        &fixture.die_c,
    ];
    debug_assert_eq!(fields.len(), FIXTURE_FIELD_ORDER);
    fields
        .iter()
        .map(|v| format_corner_tokens(v).replace(' ', ","))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use ibischar_core::VCorner;

    #[test]
    fn fixture_line_round_trips() {
        let fixture = Fixture {
            r: VCorner::uniform(50.0),
            l: VCorner::all_unset(),
            c: VCorner {
                typ: Some(2e-12),
                min: None,
                max: Some(3e-12),
            },
            v: VCorner::uniform(3.3),
            die_r: VCorner::all_unset(),
            die_l: VCorner::all_unset(),
            die_c: VCorner::all_unset(),
        };
        let line = format_fixture_line(&fixture);
        let tokens: Vec<String> = line.split_whitespace().map(str::to_string).collect();
        let reparsed = parse_fixture_line(&tokens).unwrap();
        assert_eq!(fixture, reparsed);
    }
}
