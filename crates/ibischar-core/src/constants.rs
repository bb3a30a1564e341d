//! Curve-type enumeration, reserved model names, output filename prefixes,
//! numeric sentinels, and per-table point caps.

/// IBIS 1.x V/I table row cap.
pub const VI_TABLE_MAX_ROWS: usize = 100;

/// V/T waveform table row count for IBIS versions below 4.0.
pub const VT_TABLE_ROWS_PRE_V4: usize = 100;

/// V/T waveform table row count for IBIS versions 4.0 and above.
pub const VT_TABLE_ROWS_V4: usize = 1000;

/// Sentinel the emitter writes in place of an unavailable corner value.
pub const NA_SENTINEL: &str = "NA";

/// Model names that bypass the planner entirely (case-insensitive).
pub const RESERVED_MODEL_NAMES: [&str; 5] = ["POWER", "GND", "NC", "DUMMY", "NOMODEL"];

/// `NA`/`NC` are also reserved value tokens in the flat configuration form.
pub const TOKEN_NOT_AVAILABLE: &str = "NA";
pub const TOKEN_NO_CONNECT: &str = "NC";

/// A pin model name that signals "do not simulate this pin".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReservedKind {
    Power,
    Gnd,
    Nc,
    Dummy,
    NoModel,
}

impl ReservedKind {
    pub fn from_model_name(name: &str) -> Option<Self> {
        match name.to_ascii_uppercase().as_str() {
            "POWER" => Some(Self::Power),
            "GND" => Some(Self::Gnd),
            "NC" => Some(Self::Nc),
            "DUMMY" => Some(Self::Dummy),
            "NOMODEL" => Some(Self::NoModel),
            _ => None,
        }
    }
}

/// The curve types the planner, deck synthesizer, result reader, curve
/// deriver, and emitter exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum CurveKind {
    PowerClamp,
    GroundClamp,
    PullupEnabled,
    PullupDisabled,
    PulldownEnabled,
    PulldownDisabled,
    Pullup,
    Pulldown,
    Ramp,
    RisingWaveform { fixture_index: usize },
    FallingWaveform { fixture_index: usize },
    SeriesRVds,
}

impl CurveKind {
    /// Central prefix table keyed by curve-type, feeding the
    /// `{prefix}_{pin}_{corner}.sp` filename discipline.
    pub fn filename_prefix(self) -> String {
        match self {
            CurveKind::PowerClamp => "pclamp".to_string(),
            CurveKind::GroundClamp => "gclamp".to_string(),
            CurveKind::PullupEnabled => "pu_en".to_string(),
            CurveKind::PullupDisabled => "pu_dis".to_string(),
            CurveKind::PulldownEnabled => "pd_en".to_string(),
            CurveKind::PulldownDisabled => "pd_dis".to_string(),
            CurveKind::Pullup => "pullup".to_string(),
            CurveKind::Pulldown => "pulldown".to_string(),
            CurveKind::Ramp => "ramp".to_string(),
            CurveKind::RisingWaveform { fixture_index } => format!("rise{fixture_index}"),
            CurveKind::FallingWaveform { fixture_index } => format!("fall{fixture_index}"),
            CurveKind::SeriesRVds => "series".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reserved_names_are_case_insensitive() {
        assert_eq!(ReservedKind::from_model_name("power"), Some(ReservedKind::Power));
        assert_eq!(ReservedKind::from_model_name("Gnd"), Some(ReservedKind::Gnd));
        assert_eq!(ReservedKind::from_model_name("nomodel"), Some(ReservedKind::NoModel));
        assert_eq!(ReservedKind::from_model_name("driver"), None);
    }

    #[test]
    fn filename_prefixes_are_stable() {
        assert_eq!(CurveKind::Pullup.filename_prefix(), "pullup");
        assert_eq!(
            CurveKind::RisingWaveform { fixture_index: 2 }.filename_prefix(),
            "rise2"
        );
    }
}
