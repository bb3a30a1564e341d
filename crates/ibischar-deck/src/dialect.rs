//! Per-simulator dialect profile.
//!
//! Mirrors the teacher's per-backend trait split (`ComputeBackend` in
//! `spicier-solver`, one module per concrete backend): each supported
//! simulator gets its own small module implementing the same trait, and the
//! caller dispatches on [`ibischar_core::SimulatorKind`] once at the top.

use ibischar_core::SimulatorKind;

/// The three deck-synthesis operations that vary by simulator (spec §9
/// design note: "interface with three operations").
pub trait SimulatorDialect {
    /// `.OPTIONS` card text (no trailing newline).
    fn options_card(&self) -> &'static str;

    /// Sweep control card for a `.DC`-style analysis.
    fn dc_card(&self, source_name: &str, start: f64, stop: f64, step: f64) -> String;

    /// Control card for a `.TRAN`-style analysis.
    fn tran_card(&self, step: f64, stop: f64) -> String;

    /// `.PRINT`/probe card for a DC sweep of a named supply current.
    fn dc_print_card(&self, supply_name: &str) -> String;

    /// `.PRINT`/probe card for a transient sweep of a node voltage and
    /// supply current.
    fn tran_print_card(&self, node_name: &str, supply_name: &str) -> String;

    /// `.INCLUDE`-equivalent directive for a subcircuit file.
    fn include_card(&self, path: &str) -> String;

    /// End-of-deck terminator card (`.END` or dialect equivalent).
    fn end_card(&self) -> &'static str;
}

pub mod hspice {
    use super::SimulatorDialect;

    pub struct Hspice;

    impl SimulatorDialect for Hspice {
        fn options_card(&self) -> &'static str {
            ".OPTIONS POST INGOLD=1 PROBE"
        }

        fn dc_card(&self, source_name: &str, start: f64, stop: f64, step: f64) -> String {
            format!(".DC {source_name} {start:e} {stop:e} {step:e}")
        }

        fn tran_card(&self, step: f64, stop: f64) -> String {
            format!(".TRAN {step:e} {stop:e}")
        }

        fn dc_print_card(&self, supply_name: &str) -> String {
            format!(".PRINT DC I({supply_name})")
        }

        fn tran_print_card(&self, node_name: &str, supply_name: &str) -> String {
            format!(".PRINT TRAN V({node_name}) I({supply_name})")
        }

        fn include_card(&self, path: &str) -> String {
            format!(".INCLUDE '{path}'")
        }

        fn end_card(&self) -> &'static str {
            ".END"
        }
    }
}

pub mod spectre {
    use super::SimulatorDialect;

    pub struct Spectre;

    impl SimulatorDialect for Spectre {
        fn options_card(&self) -> &'static str {
            "simulator lang=spectre\noptions post=1"
        }

        fn dc_card(&self, source_name: &str, start: f64, stop: f64, step: f64) -> String {
            format!("dcSweep dc param={source_name} start={start:e} stop={stop:e} step={step:e}")
        }

        fn tran_card(&self, step: f64, stop: f64) -> String {
            format!("tranAnalysis tran step={step:e} stop={stop:e}")
        }

        fn dc_print_card(&self, supply_name: &str) -> String {
            format!("save {supply_name}:p")
        }

        fn tran_print_card(&self, node_name: &str, supply_name: &str) -> String {
            format!("save {node_name} {supply_name}:p")
        }

        fn include_card(&self, path: &str) -> String {
            format!("include \"{path}\"")
        }

        fn end_card(&self) -> &'static str {
            "// end"
        }
    }
}

pub mod eldo {
    use super::SimulatorDialect;

    pub struct Eldo;

    impl SimulatorDialect for Eldo {
        fn options_card(&self) -> &'static str {
            ".OPTION POST"
        }

        fn dc_card(&self, source_name: &str, start: f64, stop: f64, step: f64) -> String {
            format!(".DC {source_name} {start:e} {stop:e} {step:e}")
        }

        fn tran_card(&self, step: f64, stop: f64) -> String {
            format!(".TRAN {step:e} {stop:e}")
        }

        fn dc_print_card(&self, supply_name: &str) -> String {
            format!(".PRINT DC I({supply_name})")
        }

        fn tran_print_card(&self, node_name: &str, supply_name: &str) -> String {
            format!(".PRINT TRAN V({node_name}) I({supply_name})")
        }

        fn include_card(&self, path: &str) -> String {
            format!(".INCLUDE {path}")
        }

        fn end_card(&self) -> &'static str {
            ".END"
        }
    }
}

/// Select the dialect profile implied by a Document's declared simulator.
pub fn dialect_for(kind: SimulatorKind) -> Box<dyn SimulatorDialect> {
    match kind {
        SimulatorKind::Hspice => Box::new(hspice::Hspice),
        SimulatorKind::Spectre => Box::new(spectre::Spectre),
        SimulatorKind::Eldo => Box::new(eldo::Eldo),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn each_dialect_produces_a_distinct_options_card() {
        let h = dialect_for(SimulatorKind::Hspice).options_card().to_string();
        let s = dialect_for(SimulatorKind::Spectre).options_card().to_string();
        let e = dialect_for(SimulatorKind::Eldo).options_card().to_string();
        assert_ne!(h, s);
        assert_ne!(s, e);
        assert_ne!(h, e);
    }
}
