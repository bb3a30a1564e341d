//! Spec §8 invariant 3: parse flat -> emit structured -> re-parse ->
//! emit flat must reproduce the same in-memory Document, field for field.

use ibischar_config::{flat, structured};

const TRI_STATE: &str = "\
[IBIS Ver]
4.2
[File Name]
triout.ibs
[File Rev]
1.1
[Date]
2026-02-14
[Component] Buffer
[Manufacturer]
Acme Corp
[Voltage Range]
3.3 3.0 3.6
[Pin]
1 vdd VDD POWER
2 gnd GND GND
3 net7 sig driver enablePin=oe
4 oe OE oe_model
[Model] driver
[Model type]
3-state
[Enable Polarity]
Active-High
[Model] oe_model
[Model type]
Input
";

#[test]
fn flat_to_structured_to_flat_preserves_document() {
    let from_flat = flat::parse_flat_text(TRI_STATE).unwrap();

    let json = structured::to_structured(&from_flat);
    let reparsed_structured = structured::parse_structured_text(&json.to_string()).unwrap();
    assert_eq!(from_flat, reparsed_structured, "flat -> structured round trip diverged");

    let flat_text = flat::to_flat(&reparsed_structured);
    let reparsed_flat = flat::parse_flat_text(&flat_text).unwrap();
    assert_eq!(from_flat, reparsed_flat, "structured -> flat round trip diverged");
}

#[test]
fn hierarchical_defaults_resolve_idempotently_across_forms() {
    let doc = flat::parse_flat_text(TRI_STATE).unwrap();
    let component = &doc.components[0];
    let resolved_once = doc.resolve_pin_defaults(component, &component.pins[2]);
    let resolved_twice = doc.resolve_pin_defaults(component, &component.pins[2]);
    assert_eq!(resolved_once, resolved_twice);
    assert_eq!(resolved_once.voltage_range.typ, Some(3.3));
}
