//! Deck assembly: turn one [`SimPlanItem`] into a complete simulator deck
//! text, following the abstract deck structure (title/options, power
//! sources, includes, instantiation, stimulus, termination, probes).

use ibischar_core::{Component, CurveKind, Document, Model, Pin, StimulusRecipe, Termination};

use crate::dialect::{dialect_for, SimulatorDialect};
use crate::error::{DeckError, DeckResult};

/// Supply name kept stable across every deck so the driver can always probe
/// current through the same node regardless of curve type or corner.
const SUPPLY_NAME: &str = "VSUPPLY";
const ENABLE_SOURCE_NAME: &str = "VEN";
const FORCE_SOURCE_NAME: &str = "VFORCE";
const OUTPUT_NODE: &str = "out";

pub fn render_deck(
    doc: &Document,
    component: &Component,
    pin: &Pin,
    model: &Model,
    item: &ibischar_core::SimPlanItem,
) -> DeckResult<String> {
    let dialect = dialect_for(doc.simulator);
    let subckt_path = subckt_path(model, item.corner)?;

    let mut deck = String::new();
    deck.push_str(&title_line(component, pin, item));
    deck.push('\n');
    deck.push_str(dialect.options_card());
    deck.push('\n');
    deck.push_str(&dialect.include_card(subckt_path));
    deck.push('\n');
    deck.push_str(&power_source_lines(&item.stimulus));
    deck.push_str(&instantiation_line(component, pin, model));
    deck.push('\n');

    if let Some(sweep) = item.stimulus.sweep {
        deck.push_str(&format!("{FORCE_SOURCE_NAME} {OUTPUT_NODE} 0 DC {:e}\n", sweep.start));
        deck.push_str(&termination_lines(item.stimulus.termination));
        deck.push_str(&dialect.dc_card(FORCE_SOURCE_NAME, sweep.start, sweep.stop, sweep.step));
        deck.push('\n');
        deck.push_str(&dialect.dc_print_card(SUPPLY_NAME));
        deck.push('\n');
    } else if let Some(transient) = item.stimulus.transient {
        deck.push_str(&pulse_source_line(transient.rise_time, transient.fall_time));
        deck.push_str(&termination_lines(item.stimulus.termination));
        deck.push_str(&dialect.tran_card(transient.rise_time.min(transient.fall_time) / 10.0, transient.sim_time));
        deck.push('\n');
        deck.push_str(&dialect.tran_print_card(OUTPUT_NODE, SUPPLY_NAME));
        deck.push('\n');
    } else {
        return Err(DeckError::MissingSweep {
            curve: format!("{:?}", item.curve),
        });
    }

    deck.push_str(dialect.end_card());
    deck.push('\n');
    Ok(deck)
}

fn subckt_path(model: &Model, corner: ibischar_core::Corner) -> DeckResult<&str> {
    model
        .subckt_files
        .get(corner)
        .map(String::as_str)
        .or(model.subckt_files.typ.as_deref())
        .ok_or_else(|| DeckError::MissingSubcktFile {
            model: model.name.clone(),
            corner: corner.to_string(),
        })
}

fn title_line(component: &Component, pin: &Pin, item: &ibischar_core::SimPlanItem) -> String {
    format!(
        "* {} pin {} model {} curve {:?} corner {}",
        component.name, pin.pin_name, item.model_name, item.curve, item.corner
    )
}

fn power_source_lines(stimulus: &StimulusRecipe) -> String {
    let mut lines = format!("{SUPPLY_NAME} vdd 0 DC {:e}\n", stimulus.supply_voltage);
    if let Some(enable_asserted) = stimulus.enable_asserted {
        let level = if enable_asserted { 1 } else { 0 };
        lines.push_str(&format!("{ENABLE_SOURCE_NAME} en 0 DC {level}\n"));
    }
    lines
}

fn instantiation_line(component: &Component, pin: &Pin, model: &Model) -> String {
    let enable_node = if pin.enable_pin.is_some() { "en" } else { "0" };
    format!(
        "XBUF {} vdd 0 en_in={} {}_sub",
        OUTPUT_NODE,
        enable_node,
        sanitize(&format!("{}_{}", component.name, model.name))
    )
}

fn pulse_source_line(rise_time: f64, fall_time: f64) -> String {
    format!(
        "{FORCE_SOURCE_NAME} in 0 PULSE(0 1 0 {rise_time:e} {fall_time:e} 0 {:e})\n",
        2.0 * (rise_time + fall_time)
    )
}

fn termination_lines(termination: Termination) -> String {
    match termination {
        Termination::Ground => format!("RLOAD {OUTPUT_NODE} 0 1MEG\n"),
        Termination::Power => format!("RLOAD {OUTPUT_NODE} vdd 1MEG\n"),
        Termination::Load => format!("RLOAD {OUTPUT_NODE} 0 50\n"),
        Termination::Short => format!("RSHORT {OUTPUT_NODE} 0 1M\n"),
        Termination::PullupFixture => format!("RFIXPU {OUTPUT_NODE} vdd 1K\n"),
        Termination::PulldownFixture => format!("RFIXPD {OUTPUT_NODE} 0 1K\n"),
    }
}

fn sanitize(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}

/// The curve-type-specific filename prefix used by both the synthesizer's
/// output filename and the driver's result lookup; re-derived here so deck
/// rendering and result parsing stay in lockstep without threading
/// `SimPlanItem` all the way through.
pub fn curve_label(curve: CurveKind) -> String {
    curve.filename_prefix()
}
