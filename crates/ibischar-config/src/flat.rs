//! Flat keyword-form reader and writer (spec §6, "legacy but fully
//! supported"). Bracketed keywords are scoped by the most recently opened
//! `[Component]`/`[Model]` block; everything before the first such block
//! applies to the [`Document`] itself.

use std::path::Path;

use ibischar_core::{
    Component, Defaults, DiffPin, Document, Model, ModelType, Pin, SeriesPinMapping,
    SeriesSwitchGroup, VCorner,
};

use crate::enums::{
    format_enable_polarity, format_model_type, format_polarity, format_simulator,
    parse_enable_polarity, parse_model_type, parse_polarity, parse_simulator,
};
use crate::error::{ConfigError, ConfigResult};
use crate::fields::{
    format_corner_tokens, format_float, get_defaults_field, parse_corner_tokens, set_defaults_field,
    DEFAULTS_KEYWORDS,
};
use crate::fixture::{format_fixture_line, parse_fixture_line};
use crate::lexer::{load_blocks, tokenize, Block};

/// Which structural scope the parser is currently filling in as it walks
/// blocks top to bottom.
enum Scope {
    Document,
    Component(usize),
    Model(usize),
}

/// Load a flat-form configuration file into a [`Document`].
pub fn parse_flat(path: &Path) -> ConfigResult<Document> {
    let blocks = load_blocks(path)?;
    build_document(&blocks)
}

/// Parse already-spliced flat-form text (no include resolution) — used by
/// tests and by the round-trip property.
pub fn parse_flat_text(text: &str) -> ConfigResult<Document> {
    let blocks = tokenize(text)?;
    build_document(&blocks)
}

fn build_document(blocks: &[Block]) -> ConfigResult<Document> {
    let mut doc = Document::new("", "");
    let mut scope = Scope::Document;

    for block in blocks {
        if block.keyword_eq("Component") {
            let name = block.header_args.first().cloned().unwrap_or_default();
            doc.components.push(Component::new(name));
            scope = Scope::Component(doc.components.len() - 1);
            continue;
        }
        if block.keyword_eq("Model") {
            let name = block.header_args.first().cloned().unwrap_or_default();
            doc.models.push(Model::new(name, ModelType::Input));
            scope = Scope::Model(doc.models.len() - 1);
            continue;
        }

        if DEFAULTS_KEYWORDS.iter().any(|k| k.eq_ignore_ascii_case(&block.keyword)) {
            let corner = parse_corner_tokens(block.body.first().cloned().unwrap_or_default().as_slice())?;
            set_defaults_field(defaults_mut(&mut doc, &scope), &block.keyword, corner);
            continue;
        }

        apply_document_keyword(&mut doc, &scope, block)?;
    }

    validate_pin_references(&doc)?;
    Ok(doc)
}

fn defaults_mut<'a>(doc: &'a mut Document, scope: &Scope) -> &'a mut Defaults {
    match scope {
        Scope::Document => &mut doc.defaults,
        Scope::Component(idx) => &mut doc.components[*idx].defaults,
        Scope::Model(idx) => &mut doc.models[*idx].defaults,
    }
}

fn apply_document_keyword(doc: &mut Document, scope: &Scope, block: &Block) -> ConfigResult<()> {
    let keyword = block.keyword.as_str();

    if keyword.eq_ignore_ascii_case("IBIS Ver") {
        doc.ibis_version = require_token(block)?.to_string();
        return Ok(());
    }
    if keyword.eq_ignore_ascii_case("File Name") {
        doc.file_name = require_token(block)?.to_string();
        return Ok(());
    }
    if keyword.eq_ignore_ascii_case("File Rev") {
        doc.file_rev = require_token(block)?.to_string();
        return Ok(());
    }
    if keyword.eq_ignore_ascii_case("Date") {
        doc.date = block.body_text();
        return Ok(());
    }
    if keyword.eq_ignore_ascii_case("Source") {
        doc.source = Some(block.body_text());
        return Ok(());
    }
    if keyword.eq_ignore_ascii_case("Notes") {
        doc.notes = block.body.iter().map(|line| line.join(" ")).collect();
        return Ok(());
    }
    if keyword.eq_ignore_ascii_case("Disclaimer") {
        doc.disclaimer = Some(block.body_text());
        return Ok(());
    }
    if keyword.eq_ignore_ascii_case("Copyright") {
        doc.copyright = Some(block.body_text());
        return Ok(());
    }
    if keyword.eq_ignore_ascii_case("Simulator") {
        doc.simulator = parse_simulator(require_token(block)?)?;
        return Ok(());
    }

    match scope {
        Scope::Component(idx) => apply_component_keyword(&mut doc.components[*idx], block),
        Scope::Model(idx) => apply_model_keyword(&mut doc.models[*idx], block),
        Scope::Document => Err(ConfigError::Syntax {
            line: block.line,
            message: format!("keyword [{keyword}] is not valid at document scope"),
        }),
    }
}

fn apply_component_keyword(component: &mut Component, block: &Block) -> ConfigResult<()> {
    let keyword = block.keyword.as_str();

    if keyword.eq_ignore_ascii_case("Manufacturer") {
        component.manufacturer = Some(block.body_text());
        return Ok(());
    }
    if keyword.eq_ignore_ascii_case("Package Model") {
        component.package_model = Some(require_token(block)?.to_string());
        return Ok(());
    }
    if keyword.eq_ignore_ascii_case("Netlist File") {
        component.netlist_path = Some(require_token(block)?.to_string());
        return Ok(());
    }
    if keyword.eq_ignore_ascii_case("Series Netlist File") {
        component.series_netlist_path = Some(require_token(block)?.to_string());
        return Ok(());
    }
    if keyword.eq_ignore_ascii_case("Pin") {
        for line in &block.body {
            component.pins.push(parse_pin_line(line, block.line)?);
        }
        return Ok(());
    }
    if keyword.eq_ignore_ascii_case("Diff Pin") {
        for line in &block.body {
            if line.len() < 2 {
                return Err(ConfigError::Syntax {
                    line: block.line,
                    message: "[Diff Pin] line needs at least two pin names".to_string(),
                });
            }
            component.diff_pins.push(DiffPin {
                pin_a: line[0].clone(),
                pin_b: line[1].clone(),
                vdiff: line.get(2).map(|s| ibischar_core::parse_value(s)).transpose()?,
            });
        }
        return Ok(());
    }
    if keyword.eq_ignore_ascii_case("Series Pin Mapping") {
        for line in &block.body {
            if line.len() < 2 {
                return Err(ConfigError::Syntax {
                    line: block.line,
                    message: "[Series Pin Mapping] line needs pin and model name".to_string(),
                });
            }
            component.series_pin_mapping.push(SeriesPinMapping {
                pin: line[0].clone(),
                model_name: line[1].clone(),
            });
        }
        return Ok(());
    }
    if keyword.eq_ignore_ascii_case("Series Switch Groups") {
        let name = block.header_args.first().cloned().unwrap_or_default();
        let pins = block.body.iter().flatten().cloned().collect();
        component.series_switch_groups.push(SeriesSwitchGroup { name, pins });
        return Ok(());
    }

    Err(ConfigError::Syntax {
        line: block.line,
        message: format!("keyword [{keyword}] is not valid within [Component]"),
    })
}

fn parse_pin_line(line: &[String], block_line: usize) -> ConfigResult<Pin> {
    if line.len() < 4 {
        return Err(ConfigError::Syntax {
            line: block_line,
            message: "[Pin] line needs pin, node, signal, and model name".to_string(),
        });
    }
    let mut pin = Pin {
        pin_name: line[0].clone(),
        node_name: line[1].clone(),
        signal_name: line[2].clone(),
        model_name: line[3].clone(),
        package_r: None,
        package_l: None,
        package_c: None,
        input_pin: None,
        enable_pin: None,
    };
    for token in &line[4..] {
        let Some((key, value)) = token.split_once('=') else {
            continue;
        };
        match key {
            "inputPin" => pin.input_pin = Some(value.to_string()),
            "enablePin" => pin.enable_pin = Some(value.to_string()),
            "pkgR" => pin.package_r = Some(parse_csv_corner(value)?),
            "pkgL" => pin.package_l = Some(parse_csv_corner(value)?),
            "pkgC" => pin.package_c = Some(parse_csv_corner(value)?),
            _ => {}
        }
    }
    Ok(pin)
}

fn parse_csv_corner(value: &str) -> ConfigResult<VCorner<f64>> {
    let tokens: Vec<String> = value.split(',').map(|s| s.to_string()).collect();
    parse_corner_tokens(&tokens)
}

fn format_csv_corner(value: &VCorner<f64>) -> String {
    format_corner_tokens(value).replace(' ', ",")
}

fn apply_model_keyword(model: &mut Model, block: &Block) -> ConfigResult<()> {
    let keyword = block.keyword.as_str();

    if keyword.eq_ignore_ascii_case("Model type") {
        model.model_type = parse_model_type(require_token(block)?)?;
        return Ok(());
    }
    if keyword.eq_ignore_ascii_case("Polarity") {
        model.polarity = parse_polarity(require_token(block)?)?;
        return Ok(());
    }
    if keyword.eq_ignore_ascii_case("Enable Polarity") {
        model.enable_polarity = parse_enable_polarity(require_token(block)?)?;
        return Ok(());
    }
    if keyword.eq_ignore_ascii_case("NoModel") {
        model.nomodel = true;
        return Ok(());
    }
    if keyword.eq_ignore_ascii_case("Waveform Fixture") {
        for line in &block.body {
            model.waveform_fixtures.push(parse_fixture_line(line)?);
        }
        return Ok(());
    }
    if keyword.eq_ignore_ascii_case("Subckt File") {
        let tokens = block.body.first().cloned().unwrap_or_default();
        model.subckt_files = VCorner {
            typ: tokens.first().filter(|s| !s.eq_ignore_ascii_case("NA")).cloned(),
            min: tokens.get(1).filter(|s| !s.eq_ignore_ascii_case("NA")).cloned(),
            max: tokens.get(2).filter(|s| !s.eq_ignore_ascii_case("NA")).cloned(),
        };
        return Ok(());
    }

    let scalar_field = match keyword {
        k if k.eq_ignore_ascii_case("Vinl") => Some(&mut model.vinl),
        k if k.eq_ignore_ascii_case("Vinh") => Some(&mut model.vinh),
        k if k.eq_ignore_ascii_case("Vmeas") => Some(&mut model.vmeas),
        k if k.eq_ignore_ascii_case("Vref") => Some(&mut model.vref),
        k if k.eq_ignore_ascii_case("Cref") => Some(&mut model.cref),
        k if k.eq_ignore_ascii_case("Rref") => Some(&mut model.rref),
        _ => None,
    };
    if let Some(field) = scalar_field {
        *field = parse_corner_tokens(block.body.first().cloned().unwrap_or_default().as_slice())?;
        return Ok(());
    }

    if DEFAULTS_KEYWORDS.iter().any(|k| k.eq_ignore_ascii_case(keyword)) {
        let corner = parse_corner_tokens(block.body.first().cloned().unwrap_or_default().as_slice())?;
        set_defaults_field(&mut model.defaults, keyword, corner);
        return Ok(());
    }

    Err(ConfigError::Syntax {
        line: block.line,
        message: format!("keyword [{keyword}] is not valid within [Model]"),
    })
}

fn require_token(block: &Block) -> ConfigResult<&str> {
    block.first_token().ok_or_else(|| ConfigError::Syntax {
        line: block.line,
        message: format!("[{}] requires a value", block.keyword),
    })
}

fn validate_pin_references(doc: &Document) -> ConfigResult<()> {
    for component in &doc.components {
        for pin in &component.pins {
            if pin.reserved_kind().is_some() {
                continue;
            }
            if doc.find_model(&pin.model_name).is_none() {
                return Err(ConfigError::UnresolvedModel {
                    pin: pin.pin_name.clone(),
                    model: pin.model_name.clone(),
                });
            }
        }
    }
    Ok(())
}

/// Render `doc` back out in flat-keyword form — the inverse of
/// [`parse_flat_text`], used by the structured<->flat round-trip property.
pub fn to_flat(doc: &Document) -> String {
    let mut out = String::new();
    let mut line = |keyword: &str, value: &str| {
        out.push_str(&format!("[{keyword}]\n{value}\n"));
    };

    line("IBIS Ver", &doc.ibis_version);
    line("File Name", &doc.file_name);
    line("File Rev", &doc.file_rev);
    line("Date", &doc.date);
    if let Some(source) = &doc.source {
        line("Source", source);
    }
    if !doc.notes.is_empty() {
        out.push_str("[Notes]\n");
        for note in &doc.notes {
            out.push_str(note);
            out.push('\n');
        }
    }
    if let Some(disclaimer) = &doc.disclaimer {
        line("Disclaimer", disclaimer);
    }
    if let Some(copyright) = &doc.copyright {
        line("Copyright", copyright);
    }
    line("Simulator", format_simulator(doc.simulator));
    emit_defaults_block(&mut out, &doc.defaults);

    for component in &doc.components {
        out.push_str(&format!("[Component] {}\n", component.name));
        if let Some(m) = &component.manufacturer {
            line("Manufacturer", m);
        }
        if let Some(p) = &component.package_model {
            line("Package Model", p);
        }
        if let Some(p) = &component.netlist_path {
            line("Netlist File", p);
        }
        if let Some(p) = &component.series_netlist_path {
            line("Series Netlist File", p);
        }
        emit_defaults_block(&mut out, &component.defaults);
        if !component.pins.is_empty() {
            out.push_str("[Pin]\n");
            for pin in &component.pins {
                out.push_str(&format_pin_line(pin));
                out.push('\n');
            }
        }
        if !component.diff_pins.is_empty() {
            out.push_str("[Diff Pin]\n");
            for diff in &component.diff_pins {
                match diff.vdiff {
                    Some(v) => out.push_str(&format!("{} {} {}\n", diff.pin_a, diff.pin_b, format_float(v))),
                    None => out.push_str(&format!("{} {}\n", diff.pin_a, diff.pin_b)),
                }
            }
        }
        if !component.series_pin_mapping.is_empty() {
            out.push_str("[Series Pin Mapping]\n");
            for mapping in &component.series_pin_mapping {
                out.push_str(&format!("{} {}\n", mapping.pin, mapping.model_name));
            }
        }
        for group in &component.series_switch_groups {
            out.push_str(&format!("[Series Switch Groups] {}\n", group.name));
            out.push_str(&group.pins.join(" "));
            out.push('\n');
        }
    }

    for model in &doc.models {
        out.push_str(&format!("[Model] {}\n", model.name));
        line("Model type", format_model_type(model.model_type));
        line("Polarity", format_polarity(model.polarity));
        line("Enable Polarity", format_enable_polarity(model.enable_polarity));
        if model.nomodel {
            out.push_str("[NoModel]\n");
        }
        line("Vinl", &format_corner_tokens(&model.vinl));
        line("Vinh", &format_corner_tokens(&model.vinh));
        line("Vmeas", &format_corner_tokens(&model.vmeas));
        line("Vref", &format_corner_tokens(&model.vref));
        line("Cref", &format_corner_tokens(&model.cref));
        line("Rref", &format_corner_tokens(&model.rref));
        line(
            "Subckt File",
            &[&model.subckt_files.typ, &model.subckt_files.min, &model.subckt_files.max]
                .iter()
                .map(|v| v.clone().unwrap_or_else(|| "NA".to_string()))
                .collect::<Vec<_>>()
                .join(" "),
        );
        emit_defaults_block(&mut out, &model.defaults);
        if !model.waveform_fixtures.is_empty() {
            out.push_str("[Waveform Fixture]\n");
            for fixture in &model.waveform_fixtures {
                out.push_str(&format_fixture_line(fixture));
                out.push('\n');
            }
        }
    }

    out
}

fn emit_defaults_block(out: &mut String, defaults: &Defaults) {
    for keyword in DEFAULTS_KEYWORDS {
        if let Some(value) = get_defaults_field(defaults, keyword) {
            if value.is_fully_unset() {
                continue;
            }
            out.push_str(&format!("[{keyword}]\n{}\n", format_corner_tokens(&value)));
        }
    }
}

fn format_pin_line(pin: &Pin) -> String {
    let mut parts = vec![
        pin.pin_name.clone(),
        pin.node_name.clone(),
        pin.signal_name.clone(),
        pin.model_name.clone(),
    ];
    if let Some(v) = &pin.input_pin {
        parts.push(format!("inputPin={v}"));
    }
    if let Some(v) = &pin.enable_pin {
        parts.push(format!("enablePin={v}"));
    }
    if let Some(v) = &pin.package_r {
        parts.push(format!("pkgR={}", format_csv_corner(v)));
    }
    if let Some(v) = &pin.package_l {
        parts.push(format!("pkgL={}", format_csv_corner(v)));
    }
    if let Some(v) = &pin.package_c {
        parts.push(format!("pkgC={}", format_csv_corner(v)));
    }
    parts.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    const SIMPLE_OUTPUT: &str = "\
[IBIS Ver]
4.2
[File Name]
driver.ibs
[File Rev]
1.0
[Date]
2026-01-01
[Component] Buffer
[Pin]
1 vdd VDD POWER
2 gnd GND GND
3 net7 sig driver
[Model] driver
[Model type]
Output
[Voltage Range]
3.3 3.0 3.6
";

    #[test]
    fn parses_simple_output_buffer() {
        let doc = parse_flat_text(SIMPLE_OUTPUT).unwrap();
        assert_eq!(doc.ibis_version, "4.2");
        assert_eq!(doc.components.len(), 1);
        assert_eq!(doc.components[0].pins.len(), 3);
        assert_eq!(doc.models.len(), 1);
        assert_eq!(doc.models[0].model_type, ibischar_core::ModelType::Output);
        assert_eq!(doc.models[0].defaults.voltage_range.typ, Some(3.3));
    }

    #[test]
    fn unresolved_pin_model_is_an_error() {
        let text = "[Component] C\n[Pin]\n1 n s missing\n";
        assert!(matches!(
            parse_flat_text(text),
            Err(ConfigError::UnresolvedModel { .. })
        ));
    }

    #[test]
    fn reserved_model_names_bypass_resolution() {
        let text = "[Component] C\n[Pin]\n1 vdd VDD power\n2 n s NC\n";
        assert!(parse_flat_text(text).is_ok());
    }

    #[test]
    fn waveform_fixtures_round_trip_through_flat_form() {
        let text = "\
[Component] C
[Pin]
1 net7 sig driver
[Model] driver
[Model type]
Output
[Waveform Fixture]
50,50,50 NA,NA,NA 2p,NA,3p 3.3,3.3,3.3 NA,NA,NA NA,NA,NA NA,NA,NA
";
        let doc = parse_flat_text(text).unwrap();
        assert_eq!(doc.models[0].waveform_fixtures.len(), 1);
        let fixture = &doc.models[0].waveform_fixtures[0];
        assert_eq!(fixture.r.typ, Some(50.0));
        assert_eq!(fixture.c.max, Some(3e-12));

        let rendered = to_flat(&doc);
        let reparsed = parse_flat_text(&rendered).unwrap();
        assert_eq!(doc.models[0].waveform_fixtures, reparsed.models[0].waveform_fixtures);
    }

    #[test]
    fn flat_round_trips_through_itself() {
        let doc = parse_flat_text(SIMPLE_OUTPUT).unwrap();
        let rendered = to_flat(&doc);
        let reparsed = parse_flat_text(&rendered).unwrap();
        assert_eq!(doc, reparsed);
    }
}
