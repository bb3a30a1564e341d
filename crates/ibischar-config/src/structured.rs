//! Structured hierarchical form reader/writer (spec §6): a JSON document
//! with nested groups — top-level metadata, `global_defaults`, `models[]`,
//! `components[]` each with `pList[]`. Numeric values may carry SI-style
//! suffixes or scientific notation, so every numeric field is accepted as
//! either a JSON number or a JSON string run through
//! [`ibischar_core::parse_value`].

use std::path::Path;

use ibischar_core::{
    Component, Defaults, DiffPin, Document, Fixture, Model, ModelType, Pin, SeriesPinMapping,
    SeriesSwitchGroup, VCorner,
};
use serde_json::{json, Map, Value};

use crate::enums::{
    format_enable_polarity, format_model_type, format_polarity, format_simulator,
    parse_enable_polarity, parse_model_type, parse_polarity, parse_simulator,
};
use crate::error::{ConfigError, ConfigResult};
use crate::fields::{get_defaults_field, set_defaults_field, DEFAULTS_KEYWORDS};

/// Load a structured-form (JSON) configuration file into a [`Document`].
pub fn parse_structured(path: &Path) -> ConfigResult<Document> {
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_structured_text(&text)
}

pub fn parse_structured_text(text: &str) -> ConfigResult<Document> {
    let root: Value = serde_json::from_str(text)?;
    document_from_json(&root)
}

fn field_str<'a>(obj: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    obj.get(key).and_then(Value::as_str)
}

fn number_from_value(value: &Value) -> ConfigResult<Option<f64>> {
    match value {
        Value::Null => Ok(None),
        Value::Number(n) => Ok(n.as_f64()),
        Value::String(s) if s.eq_ignore_ascii_case("NA") || s.eq_ignore_ascii_case("NC") => Ok(None),
        Value::String(s) => Ok(Some(ibischar_core::parse_value(s)?)),
        other => Err(ConfigError::Structured(format!("expected number, got {other}"))),
    }
}

fn corner_from_json(value: Option<&Value>) -> ConfigResult<VCorner<f64>> {
    let Some(Value::Object(obj)) = value else {
        return Ok(VCorner::all_unset());
    };
    Ok(VCorner {
        typ: obj.get("typ").map(number_from_value).transpose()?.flatten(),
        min: obj.get("min").map(number_from_value).transpose()?.flatten(),
        max: obj.get("max").map(number_from_value).transpose()?.flatten(),
    })
}

fn corner_to_json(value: &VCorner<f64>) -> Value {
    json!({
        "typ": value.typ,
        "min": value.min,
        "max": value.max,
    })
}

fn defaults_from_json(value: Option<&Value>) -> ConfigResult<Defaults> {
    let mut defaults = Defaults::default();
    let Some(Value::Object(obj)) = value else {
        return Ok(defaults);
    };
    for keyword in DEFAULTS_KEYWORDS {
        let json_key = json_key_for(keyword);
        if let Some(corner_value) = obj.get(&json_key) {
            let corner = corner_from_json(Some(corner_value))?;
            set_defaults_field(&mut defaults, keyword, corner);
        }
    }
    Ok(defaults)
}

fn defaults_to_json(defaults: &Defaults) -> Value {
    let mut obj = Map::new();
    for keyword in DEFAULTS_KEYWORDS {
        if let Some(value) = get_defaults_field(defaults, keyword) {
            if value.is_fully_unset() {
                continue;
            }
            obj.insert(json_key_for(keyword), corner_to_json(&value));
        }
    }
    Value::Object(obj)
}

/// `"Voltage Range"` -> `"voltage_range"`.
fn json_key_for(keyword: &str) -> String {
    keyword.to_ascii_lowercase().replace(' ', "_")
}

fn document_from_json(root: &Value) -> ConfigResult<Document> {
    let obj = root
        .as_object()
        .ok_or_else(|| ConfigError::Structured("root must be a JSON object".to_string()))?;

    let mut doc = Document::new(
        field_str(obj, "file_name").unwrap_or_default(),
        field_str(obj, "ibis_version").unwrap_or_default(),
    );
    doc.file_rev = field_str(obj, "file_rev").unwrap_or("1.0").to_string();
    doc.date = field_str(obj, "date").unwrap_or_default().to_string();
    doc.source = field_str(obj, "source").map(str::to_string);
    doc.disclaimer = field_str(obj, "disclaimer").map(str::to_string);
    doc.copyright = field_str(obj, "copyright").map(str::to_string);
    doc.notes = obj
        .get("notes")
        .and_then(Value::as_array)
        .map(|a| a.iter().filter_map(Value::as_str).map(str::to_string).collect())
        .unwrap_or_default();
    if let Some(sim) = field_str(obj, "simulator") {
        doc.simulator = parse_simulator(sim)?;
    }
    doc.defaults = defaults_from_json(obj.get("global_defaults"))?;

    for model_value in obj.get("models").and_then(Value::as_array).unwrap_or(&[]) {
        doc.models.push(model_from_json(model_value)?);
    }
    for component_value in obj.get("components").and_then(Value::as_array).unwrap_or(&[]) {
        doc.components.push(component_from_json(component_value)?);
    }

    validate_pin_references(&doc)?;
    Ok(doc)
}

fn model_from_json(value: &Value) -> ConfigResult<Model> {
    let obj = value
        .as_object()
        .ok_or_else(|| ConfigError::Structured("model entry must be an object".to_string()))?;
    let name = field_str(obj, "name")
        .ok_or_else(|| ConfigError::MissingField("model.name".to_string()))?;
    let model_type = parse_model_type(
        field_str(obj, "model_type")
            .ok_or_else(|| ConfigError::MissingField("model.model_type".to_string()))?,
    )?;
    let mut model = Model::new(name, model_type);
    if let Some(p) = field_str(obj, "polarity") {
        model.polarity = parse_polarity(p)?;
    }
    if let Some(p) = field_str(obj, "enable_polarity") {
        model.enable_polarity = parse_enable_polarity(p)?;
    }
    model.nomodel = obj.get("nomodel").and_then(Value::as_bool).unwrap_or(false);
    model.vinl = corner_from_json(obj.get("vinl"))?;
    model.vinh = corner_from_json(obj.get("vinh"))?;
    model.vmeas = corner_from_json(obj.get("vmeas"))?;
    model.vref = corner_from_json(obj.get("vref"))?;
    model.cref = corner_from_json(obj.get("cref"))?;
    model.rref = corner_from_json(obj.get("rref"))?;
    if let Some(Value::Object(files)) = obj.get("subckt_files") {
        model.subckt_files = VCorner {
            typ: field_str(files, "typ").map(str::to_string),
            min: field_str(files, "min").map(str::to_string),
            max: field_str(files, "max").map(str::to_string),
        };
    }
    model.defaults = defaults_from_json(obj.get("defaults"))?;
    for fixture_value in obj.get("waveform_fixtures").and_then(Value::as_array).unwrap_or(&[]) {
        model.waveform_fixtures.push(fixture_from_json(fixture_value)?);
    }
    Ok(model)
}

fn fixture_from_json(value: &Value) -> ConfigResult<Fixture> {
    let obj = value
        .as_object()
        .ok_or_else(|| ConfigError::Structured("waveform_fixtures entry must be an object".to_string()))?;
    Ok(Fixture {
        r: corner_from_json(obj.get("r"))?,
        l: corner_from_json(obj.get("l"))?,
        c: corner_from_json(obj.get("c"))?,
        v: corner_from_json(obj.get("v"))?,
        die_r: corner_from_json(obj.get("die_r"))?,
        die_l: corner_from_json(obj.get("die_l"))?,
        die_c: corner_from_json(obj.get("die_c"))?,
    })
}

fn fixture_to_json(fixture: &Fixture) -> Value {
    json!({
        "r": corner_to_json(&fixture.r),
        "l": corner_to_json(&fixture.l),
        "c": corner_to_json(&fixture.c),
        "v": corner_to_json(&fixture.v),
        "die_r": corner_to_json(&fixture.die_r),
        "die_l": corner_to_json(&fixture.die_l),
        "die_c": corner_to_json(&fixture.die_c),
    })
}

fn component_from_json(value: &Value) -> ConfigResult<Component> {
    let obj = value
        .as_object()
        .ok_or_else(|| ConfigError::Structured("component entry must be an object".to_string()))?;
    let name = field_str(obj, "name")
        .ok_or_else(|| ConfigError::MissingField("component.name".to_string()))?;
    let mut component = Component::new(name);
    component.netlist_path = field_str(obj, "netlist_path").map(str::to_string);
    component.series_netlist_path = field_str(obj, "series_netlist_path").map(str::to_string);
    component.manufacturer = field_str(obj, "manufacturer").map(str::to_string);
    component.package_model = field_str(obj, "package_model").map(str::to_string);
    component.defaults = defaults_from_json(obj.get("defaults"))?;

    for pin_value in obj.get("pList").and_then(Value::as_array).unwrap_or(&[]) {
        component.pins.push(pin_from_json(pin_value)?);
    }
    for diff_value in obj.get("diff_pins").and_then(Value::as_array).unwrap_or(&[]) {
        let diff_obj = diff_value
            .as_object()
            .ok_or_else(|| ConfigError::Structured("diff_pins entry must be an object".to_string()))?;
        component.diff_pins.push(DiffPin {
            pin_a: field_str(diff_obj, "pin_a").unwrap_or_default().to_string(),
            pin_b: field_str(diff_obj, "pin_b").unwrap_or_default().to_string(),
            vdiff: diff_obj.get("vdiff").map(number_from_value).transpose()?.flatten(),
        });
    }
    for mapping_value in obj
        .get("series_pin_mapping")
        .and_then(Value::as_array)
        .unwrap_or(&[])
    {
        let mapping_obj = mapping_value.as_object().ok_or_else(|| {
            ConfigError::Structured("series_pin_mapping entry must be an object".to_string())
        })?;
        component.series_pin_mapping.push(SeriesPinMapping {
            pin: field_str(mapping_obj, "pin").unwrap_or_default().to_string(),
            model_name: field_str(mapping_obj, "model_name").unwrap_or_default().to_string(),
        });
    }
    for group_value in obj
        .get("series_switch_groups")
        .and_then(Value::as_array)
        .unwrap_or(&[])
    {
        let group_obj = group_value.as_object().ok_or_else(|| {
            ConfigError::Structured("series_switch_groups entry must be an object".to_string())
        })?;
        component.series_switch_groups.push(SeriesSwitchGroup {
            name: field_str(group_obj, "name").unwrap_or_default().to_string(),
            pins: group_obj
                .get("pins")
                .and_then(Value::as_array)
                .map(|a| a.iter().filter_map(Value::as_str).map(str::to_string).collect())
                .unwrap_or_default(),
        });
    }
    Ok(component)
}

fn pin_from_json(value: &Value) -> ConfigResult<Pin> {
    let obj = value
        .as_object()
        .ok_or_else(|| ConfigError::Structured("pin entry must be an object".to_string()))?;
    Ok(Pin {
        pin_name: field_str(obj, "pin_name").unwrap_or_default().to_string(),
        node_name: field_str(obj, "node_name").unwrap_or_default().to_string(),
        signal_name: field_str(obj, "signal_name").unwrap_or_default().to_string(),
        model_name: field_str(obj, "model_name").unwrap_or_default().to_string(),
        package_r: obj.get("package_r").map(|v| corner_from_json(Some(v))).transpose()?,
        package_l: obj.get("package_l").map(|v| corner_from_json(Some(v))).transpose()?,
        package_c: obj.get("package_c").map(|v| corner_from_json(Some(v))).transpose()?,
        input_pin: field_str(obj, "input_pin").map(str::to_string),
        enable_pin: field_str(obj, "enable_pin").map(str::to_string),
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

/// Render `doc` as the structured JSON form — the inverse of
/// [`parse_structured_text`].
pub fn to_structured(doc: &Document) -> Value {
    json!({
        "ibis_version": doc.ibis_version,
        "file_name": doc.file_name,
        "file_rev": doc.file_rev,
        "date": doc.date,
        "source": doc.source,
        "notes": doc.notes,
        "disclaimer": doc.disclaimer,
        "copyright": doc.copyright,
        "simulator": format_simulator(doc.simulator),
        "global_defaults": defaults_to_json(&doc.defaults),
        "models": doc.models.iter().map(model_to_json).collect::<Vec<_>>(),
        "components": doc.components.iter().map(component_to_json).collect::<Vec<_>>(),
    })
}

fn model_to_json(model: &Model) -> Value {
    json!({
        "name": model.name,
        "model_type": format_model_type(model.model_type),
        "polarity": format_polarity(model.polarity),
        "enable_polarity": format_enable_polarity(model.enable_polarity),
        "nomodel": model.nomodel,
        "vinl": corner_to_json(&model.vinl),
        "vinh": corner_to_json(&model.vinh),
        "vmeas": corner_to_json(&model.vmeas),
        "vref": corner_to_json(&model.vref),
        "cref": corner_to_json(&model.cref),
        "rref": corner_to_json(&model.rref),
        "subckt_files": {
            "typ": model.subckt_files.typ,
            "min": model.subckt_files.min,
            "max": model.subckt_files.max,
        },
        "defaults": defaults_to_json(&model.defaults),
        "waveform_fixtures": model.waveform_fixtures.iter().map(fixture_to_json).collect::<Vec<_>>(),
    })
}

fn component_to_json(component: &Component) -> Value {
    json!({
        "name": component.name,
        "netlist_path": component.netlist_path,
        "series_netlist_path": component.series_netlist_path,
        "manufacturer": component.manufacturer,
        "package_model": component.package_model,
        "defaults": defaults_to_json(&component.defaults),
        "pList": component.pins.iter().map(pin_to_json).collect::<Vec<_>>(),
        "diff_pins": component.diff_pins.iter().map(|d| json!({
            "pin_a": d.pin_a,
            "pin_b": d.pin_b,
            "vdiff": d.vdiff,
        })).collect::<Vec<_>>(),
        "series_pin_mapping": component.series_pin_mapping.iter().map(|m| json!({
            "pin": m.pin,
            "model_name": m.model_name,
        })).collect::<Vec<_>>(),
        "series_switch_groups": component.series_switch_groups.iter().map(|g| json!({
            "name": g.name,
            "pins": g.pins,
        })).collect::<Vec<_>>(),
    })
}

fn pin_to_json(pin: &Pin) -> Value {
    json!({
        "pin_name": pin.pin_name,
        "node_name": pin.node_name,
        "signal_name": pin.signal_name,
        "model_name": pin.model_name,
        "package_r": pin.package_r.as_ref().map(corner_to_json),
        "package_l": pin.package_l.as_ref().map(corner_to_json),
        "package_c": pin.package_c.as_ref().map(corner_to_json),
        "input_pin": pin.input_pin,
        "enable_pin": pin.enable_pin,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn si_suffix_numeric_strings_are_accepted() {
        let text = r#"{
            "ibis_version": "4.2",
            "file_name": "d.ibs",
            "global_defaults": {
                "die_capacitance": {"typ": "2.5p", "min": "2p", "max": "3p"}
            },
            "models": [],
            "components": []
        }"#;
        let doc = parse_structured_text(text).unwrap();
        assert!((doc.defaults.die_c.typ.unwrap() - 2.5e-12).abs() < 1e-20);
    }

    #[test]
    fn structured_round_trips_through_itself() {
        let text = r#"{
            "ibis_version": "4.2",
            "file_name": "d.ibs",
            "models": [{"name": "driver", "model_type": "Output"}],
            "components": [{
                "name": "Buffer",
                "pList": [{"pin_name": "1", "node_name": "net7", "signal_name": "sig", "model_name": "driver"}]
            }]
        }"#;
        let doc = parse_structured_text(text).unwrap();
        let rendered = to_structured(&doc);
        let reparsed = document_from_json(&rendered).unwrap();
        assert_eq!(doc, reparsed);
    }
}
