//! The emitter (spec §4.6): serializes a [`Document`] tree into a
//! syntactically correct `.ibs` file.
//!
//! Section order is fixed: header, then one block per [`Component`], then
//! one block per [`Model`], then `[End]`. Nothing here inspects raw
//! simulation data — by the time a `Document` reaches this crate every
//! table it carries is either a finished [`ViTable`]/[`VtTable`]/
//! [`RampRecord`] or `None`, and `None` becomes the `NA` sentinel.

mod error;
mod format;
mod sections;

use ibischar_core::{resolve_defaults, Defaults, Document};
use std::fs;
use std::path::Path;

pub use error::{EmitError, EmitResult};
pub use format::{scientific, scientific_or_na};

/// Render `doc` as the text of a `.ibs` file.
pub fn emit_document(doc: &Document) -> String {
    let mut buf = String::new();
    sections::write_header(doc, &mut buf);

    for component in &doc.components {
        sections::write_component(component, &mut buf);
    }

    for model in &doc.models {
        let defaults = resolve_defaults(&doc.defaults, &Defaults::default(), &model.defaults);
        sections::write_model(model, &defaults, &mut buf);
    }

    sections::write_end(&mut buf);
    buf
}

/// Render `doc` and write it to `path`.
pub fn emit_to_file(doc: &Document, path: impl AsRef<Path>) -> EmitResult<()> {
    let path = path.as_ref();
    let text = emit_document(doc);
    fs::write(path, text).map_err(|source| EmitError::Io {
        path: path.display().to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ibischar_core::{
        Component, EnablePolarity, Model, ModelType, Pin, Polarity, ViRow, ViTable, VCorner,
    };

    fn sample_pin(name: &str, model: &str) -> Pin {
        Pin {
            pin_name: name.to_string(),
            node_name: name.to_string(),
            signal_name: format!("SIG_{name}"),
            model_name: model.to_string(),
            package_r: None,
            package_l: None,
            package_c: None,
            input_pin: None,
            enable_pin: None,
        }
    }

    #[test]
    fn sections_appear_in_strict_order() {
        let mut doc = Document::new("demo.ibs", "4.0");
        doc.date = "July 29, 2026".to_string();

        let mut component = Component::new("DEMO_IC");
        component.pins.push(sample_pin("1", "OUT1"));
        doc.components.push(component);

        let mut model = Model::new("OUT1", ModelType::Output);
        model.polarity = Polarity::NonInverting;
        model.enable_polarity = EnablePolarity::ActiveHigh;
        model.derived.pullup = Some(ViTable::capped(vec![ViRow {
            v: 0.0,
            i_typ: Some(0.0),
            i_min: None,
            i_max: None,
        }]));
        doc.models.push(model);

        let text = emit_document(&doc);
        let header_pos = text.find("[IBIS Ver]").unwrap();
        let component_pos = text.find("[Component]").unwrap();
        let model_pos = text.find("[Model]").unwrap();
        let end_pos = text.find("[End]").unwrap();
        assert!(header_pos < component_pos);
        assert!(component_pos < model_pos);
        assert!(model_pos < end_pos);
    }

    #[test]
    fn missing_corner_values_become_na() {
        let mut doc = Document::new("demo.ibs", "3.2");
        let mut model = Model::new("IN1", ModelType::Input);
        model.derived.ground_clamp = Some(ViTable::capped(vec![ViRow {
            v: -1.0,
            i_typ: Some(1e-3),
            i_min: None,
            i_max: None,
        }]));
        doc.models.push(model);

        let text = emit_document(&doc);
        assert!(text.contains("NA"));
    }

    #[test]
    fn voltage_range_is_always_present_even_when_unset() {
        let doc = Document::new("demo.ibs", "3.2");
        let mut model_doc = doc.clone();
        model_doc.models.push(Model::new("IN1", ModelType::Input));
        let text = emit_document(&model_doc);
        assert!(text.contains("[Voltage Range]"));
        assert!(text.contains("NA"));
    }

    #[test]
    fn diff_pin_section_only_appears_when_populated() {
        let mut doc = Document::new("demo.ibs", "4.0");
        let mut component = Component::new("DEMO_IC");
        component.pins.push(sample_pin("1", "OUT1"));
        doc.components.push(component);
        let without_diff = emit_document(&doc);
        assert!(!without_diff.contains("[Diff Pin]"));

        doc.components[0].diff_pins.push(ibischar_core::DiffPin {
            pin_a: "1".to_string(),
            pin_b: "2".to_string(),
            vdiff: Some(0.1),
        });
        let with_diff = emit_document(&doc);
        assert!(with_diff.contains("[Diff Pin]"));
    }

    #[test]
    fn voltage_range_row_uses_scientific_formatting() {
        let mut doc = Document::new("demo.ibs", "4.0");
        doc.defaults.voltage_range = VCorner {
            typ: Some(3.3),
            min: Some(3.0),
            max: Some(3.6),
        };
        doc.models.push(Model::new("IN1", ModelType::Input));
        let text = emit_document(&doc);
        assert!(text.contains("3.3000e+00"));
    }
}
