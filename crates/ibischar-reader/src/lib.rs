//! Dialect-guarded parsing of simulator output into canonical DC-sweep and
//! transient sample streams (spec §4.4). Downsampling/binning into IBIS
//! tables is the curve deriver's concern, not this crate's.

mod common;
mod eldo;
mod error;
mod hspice;
mod spectre;

use ibischar_core::SimulatorKind;

pub use error::{ReaderError, ReaderResult};

/// Parse a DC sweep result: `(V, I)` pairs, monotonic in V.
pub fn parse_dc(kind: SimulatorKind, text: &str) -> ReaderResult<Vec<(f64, f64)>> {
    match kind {
        SimulatorKind::Hspice => hspice::parse_dc(text),
        SimulatorKind::Spectre => spectre::parse_dc(text),
        SimulatorKind::Eldo => eldo::parse_dc(text),
    }
}

/// Parse a transient result: raw `(t, V, I)` samples at simulator-chosen
/// time points.
pub fn parse_tran(kind: SimulatorKind, text: &str) -> ReaderResult<Vec<(f64, f64, f64)>> {
    match kind {
        SimulatorKind::Hspice => hspice::parse_tran(text),
        SimulatorKind::Spectre => spectre::parse_tran(text),
        SimulatorKind::Eldo => eldo::parse_tran(text),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dispatches_on_declared_dialect() {
        let text = "0.0 1.0e-3\n0.1 1.1e-3\n";
        assert_eq!(parse_dc(SimulatorKind::Hspice, text).unwrap().len(), 2);
        assert_eq!(parse_dc(SimulatorKind::Spectre, text).unwrap().len(), 2);
    }
}
