//! Textual encodings of the Document's enumerated fields, shared by the
//! flat and structured form readers/writers so the two stay in lockstep.

use ibischar_core::{EnablePolarity, ModelType, Polarity, SimulatorKind};

use crate::error::ConfigError;

pub fn parse_model_type(token: &str) -> Result<ModelType, ConfigError> {
    Ok(match token.to_ascii_lowercase().as_str() {
        "input" => ModelType::Input,
        "output" => ModelType::Output,
        "i/o" | "io" => ModelType::Io,
        "3-state" | "3state" => ModelType::ThreeState,
        "open_drain" => ModelType::OpenDrain,
        "open_sink" => ModelType::OpenSink,
        "open_source" => ModelType::OpenSource,
        "input_ecl" => ModelType::InputEcl,
        "output_ecl" => ModelType::OutputEcl,
        "i/o_ecl" | "io_ecl" => ModelType::IoEcl,
        "terminator" => ModelType::Terminator,
        "series" => ModelType::Series,
        "series_switch" => ModelType::SeriesSwitch,
        _ => return Err(ConfigError::UnknownModelType(token.to_string())),
    })
}

pub fn format_model_type(model_type: ModelType) -> &'static str {
    match model_type {
        ModelType::Input => "Input",
        ModelType::Output => "Output",
        ModelType::Io => "I/O",
        ModelType::ThreeState => "3-state",
        ModelType::OpenDrain => "Open_drain",
        ModelType::OpenSink => "Open_sink",
        ModelType::OpenSource => "Open_source",
        ModelType::InputEcl => "Input_ECL",
        ModelType::OutputEcl => "Output_ECL",
        ModelType::IoEcl => "I/O_ECL",
        ModelType::Terminator => "Terminator",
        ModelType::Series => "Series",
        ModelType::SeriesSwitch => "Series_switch",
    }
}

pub fn parse_polarity(token: &str) -> Result<Polarity, ConfigError> {
    Ok(match token.to_ascii_lowercase().as_str() {
        "inverting" => Polarity::Inverting,
        "non-inverting" | "noninverting" => Polarity::NonInverting,
        _ => return Err(ConfigError::UnknownPolarity(token.to_string())),
    })
}

pub fn format_polarity(polarity: Polarity) -> &'static str {
    match polarity {
        Polarity::Inverting => "Inverting",
        Polarity::NonInverting => "Non-Inverting",
    }
}

pub fn parse_enable_polarity(token: &str) -> Result<EnablePolarity, ConfigError> {
    Ok(match token.to_ascii_lowercase().as_str() {
        "active-high" | "activehigh" => EnablePolarity::ActiveHigh,
        "active-low" | "activelow" => EnablePolarity::ActiveLow,
        _ => return Err(ConfigError::UnknownEnablePolarity(token.to_string())),
    })
}

pub fn format_enable_polarity(polarity: EnablePolarity) -> &'static str {
    match polarity {
        EnablePolarity::ActiveHigh => "Active-High",
        EnablePolarity::ActiveLow => "Active-Low",
    }
}

pub fn parse_simulator(token: &str) -> Result<SimulatorKind, ConfigError> {
    Ok(match token.to_ascii_lowercase().as_str() {
        "hspice" => SimulatorKind::Hspice,
        "spectre" => SimulatorKind::Spectre,
        "eldo" => SimulatorKind::Eldo,
        _ => return Err(ConfigError::UnknownSimulator(token.to_string())),
    })
}

pub fn format_simulator(kind: SimulatorKind) -> &'static str {
    match kind {
        SimulatorKind::Hspice => "hspice",
        SimulatorKind::Spectre => "spectre",
        SimulatorKind::Eldo => "eldo",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn model_type_round_trips() {
        for mt in [
            ModelType::Input,
            ModelType::Output,
            ModelType::Io,
            ModelType::ThreeState,
            ModelType::OpenDrain,
            ModelType::OpenSink,
            ModelType::OpenSource,
            ModelType::InputEcl,
            ModelType::OutputEcl,
            ModelType::IoEcl,
            ModelType::Terminator,
            ModelType::Series,
            ModelType::SeriesSwitch,
        ] {
            let text = format_model_type(mt);
            assert_eq!(parse_model_type(text).unwrap(), mt);
        }
    }
}
