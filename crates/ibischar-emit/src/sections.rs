//! Section writers, one function per `[Keyword]` block, assembled by
//! [`crate::emit_document`] in the strict order spec §4.6 requires.

use ibischar_core::{
    Component, Defaults, Document, EnablePolarity, Model, ModelType, Pin, Polarity, ViTable,
    VtTable,
};
use std::fmt::Write as _;

use crate::format::{column, scientific, scientific_or_na, vcorner_row};

pub fn write_header(doc: &Document, buf: &mut String) {
    writeln!(buf, "[IBIS Ver]       {}", doc.ibis_version).unwrap();
    writeln!(buf, "[File Name]      {}", doc.file_name).unwrap();
    writeln!(buf, "[File Rev]       {}", doc.file_rev).unwrap();
    if !doc.date.is_empty() {
        writeln!(buf, "[Date]           {}", doc.date).unwrap();
    }
    if let Some(source) = &doc.source {
        writeln!(buf, "[Source]         {source}").unwrap();
    }
    for note in &doc.notes {
        writeln!(buf, "[Notes]          {note}").unwrap();
    }
    if let Some(disclaimer) = &doc.disclaimer {
        writeln!(buf, "[Disclaimer]").unwrap();
        writeln!(buf, "{disclaimer}").unwrap();
        writeln!(buf, "[End Disclaimer]").unwrap();
    }
    if let Some(copyright) = &doc.copyright {
        writeln!(buf, "[Copyright]").unwrap();
        writeln!(buf, "{copyright}").unwrap();
        writeln!(buf, "[End Copyright]").unwrap();
    }
    buf.push('\n');
}

pub fn write_component(component: &Component, buf: &mut String) {
    writeln!(buf, "[Component]      {}", component.name).unwrap();
    if let Some(manufacturer) = &component.manufacturer {
        writeln!(buf, "[Manufacturer]   {manufacturer}").unwrap();
    } else {
        writeln!(buf, "[Manufacturer]   Unknown").unwrap();
    }

    writeln!(buf, "[Package]").unwrap();
    writeln!(
        buf,
        "{}{}{}{}",
        column("R_pkg"),
        column(&scientific_or_na(component.defaults.package_r.typ)),
        column(&scientific_or_na(component.defaults.package_r.min)),
        column(&scientific_or_na(component.defaults.package_r.max))
    )
    .unwrap();
    writeln!(
        buf,
        "{}{}{}{}",
        column("L_pkg"),
        column(&scientific_or_na(component.defaults.package_l.typ)),
        column(&scientific_or_na(component.defaults.package_l.min)),
        column(&scientific_or_na(component.defaults.package_l.max))
    )
    .unwrap();
    writeln!(
        buf,
        "{}{}{}{}",
        column("C_pkg"),
        column(&scientific_or_na(component.defaults.package_c.typ)),
        column(&scientific_or_na(component.defaults.package_c.min)),
        column(&scientific_or_na(component.defaults.package_c.max))
    )
    .unwrap();

    if let Some(package_model) = &component.package_model {
        writeln!(buf, "[Package Model]  {package_model}").unwrap();
    }

    writeln!(buf, "[Pin]            signal_name          model_name").unwrap();
    for pin in &component.pins {
        write_pin_row(pin, buf);
    }

    if component.pins.iter().any(|p| p.input_pin.is_some() || p.enable_pin.is_some()) {
        writeln!(buf, "[Pin Mapping]    PULLUP_DC     PULLDOWN_DC     GND_CLAMP_DC    POWER_CLAMP_DC").unwrap();
        for pin in &component.pins {
            if let Some(input_pin) = &pin.input_pin {
                writeln!(buf, "{}{}", column(&pin.pin_name), column(input_pin)).unwrap();
            }
        }
    }

    if !component.diff_pins.is_empty() {
        writeln!(buf, "[Diff Pin]       inv_pin          vdiff").unwrap();
        for diff in &component.diff_pins {
            writeln!(
                buf,
                "{}{}{}",
                column(&diff.pin_a),
                column(&diff.pin_b),
                column(&diff.vdiff.map(scientific).unwrap_or_else(|| "NA".to_string()))
            )
            .unwrap();
        }
    }

    if !component.series_pin_mapping.is_empty() {
        writeln!(buf, "[Series Pin Mapping]   model_name").unwrap();
        for mapping in &component.series_pin_mapping {
            writeln!(buf, "{}{}", column(&mapping.pin), column(&mapping.model_name)).unwrap();
        }
    }

    if !component.series_switch_groups.is_empty() {
        writeln!(buf, "[Series Switch Groups]").unwrap();
        for group in &component.series_switch_groups {
            writeln!(buf, "{}   {}", group.name, group.pins.join(" ")).unwrap();
        }
    }

    buf.push('\n');
}

fn write_pin_row(pin: &Pin, buf: &mut String) {
    write!(
        buf,
        "{}{}{}",
        column(&pin.pin_name),
        column(&pin.signal_name),
        column(&pin.model_name)
    )
    .unwrap();
    if pin.package_r.is_some() || pin.package_l.is_some() || pin.package_c.is_some() {
        write!(
            buf,
            "{}{}{}",
            column(&pin.package_r.as_ref().and_then(|v| v.typ).map(scientific).unwrap_or_default()),
            column(&pin.package_l.as_ref().and_then(|v| v.typ).map(scientific).unwrap_or_default()),
            column(&pin.package_c.as_ref().and_then(|v| v.typ).map(scientific).unwrap_or_default())
        )
        .unwrap();
    }
    buf.push('\n');
}

pub fn model_type_label(model_type: ModelType) -> &'static str {
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

fn polarity_label(polarity: Polarity) -> &'static str {
    match polarity {
        Polarity::Inverting => "Inverting",
        Polarity::NonInverting => "Non-Inverting",
    }
}

fn enable_polarity_label(polarity: EnablePolarity) -> &'static str {
    match polarity {
        EnablePolarity::ActiveHigh => "Active-High",
        EnablePolarity::ActiveLow => "Active-Low",
    }
}

pub fn write_model(model: &Model, defaults: &Defaults, buf: &mut String) {
    writeln!(buf, "[Model]          {}", model.name).unwrap();
    writeln!(buf, "Model_type       {}", model_type_label(model.model_type)).unwrap();
    if model.model_type.has_driver() {
        writeln!(buf, "Polarity         {}", polarity_label(model.polarity)).unwrap();
        if model.model_type.requires_enable_pin()
            || matches!(model.model_type, ModelType::OpenDrain | ModelType::OpenSink | ModelType::OpenSource)
        {
            writeln!(buf, "Enable           {}", enable_polarity_label(model.enable_polarity)).unwrap();
        }
    }

    if model.vinl.typ.is_some() {
        writeln!(buf, "Vinl             {}", scientific_or_na(model.vinl.typ)).unwrap();
    }
    if model.vinh.typ.is_some() {
        writeln!(buf, "Vinh             {}", scientific_or_na(model.vinh.typ)).unwrap();
    }
    if model.vmeas.typ.is_some() {
        writeln!(buf, "Vmeas            {}", scientific_or_na(model.vmeas.typ)).unwrap();
    }
    if model.vref.typ.is_some() {
        writeln!(buf, "Vref             {}", scientific_or_na(model.vref.typ)).unwrap();
    }
    if model.cref.typ.is_some() {
        writeln!(buf, "Cref             {}", scientific_or_na(model.cref.typ)).unwrap();
    }
    if model.rref.typ.is_some() {
        writeln!(buf, "Rref             {}", scientific_or_na(model.rref.typ)).unwrap();
    }

    writeln!(buf, "[Voltage Range]  {}", vcorner_row(&defaults.voltage_range)).unwrap();
    writeln!(buf, "[Temperature Range]  {}", vcorner_row(&defaults.temperature_range)).unwrap();

    if defaults.pullup_ref.typ.is_some() {
        writeln!(buf, "[Pullup Reference]  {}", vcorner_row(&defaults.pullup_ref)).unwrap();
    }
    if defaults.pulldown_ref.typ.is_some() {
        writeln!(buf, "[Pulldown Reference]  {}", vcorner_row(&defaults.pulldown_ref)).unwrap();
    }
    if defaults.power_clamp_ref.typ.is_some() {
        writeln!(buf, "[Power Clamp Reference]  {}", vcorner_row(&defaults.power_clamp_ref)).unwrap();
    }
    if defaults.gnd_clamp_ref.typ.is_some() {
        writeln!(buf, "[GND Clamp Reference]  {}", vcorner_row(&defaults.gnd_clamp_ref)).unwrap();
    }

    if let Some(table) = &model.derived.pulldown {
        write_vi_table("[Pulldown]", table, buf);
    }
    if let Some(table) = &model.derived.pullup {
        write_vi_table("[Pullup]", table, buf);
    }
    if let Some(table) = &model.derived.ground_clamp {
        write_vi_table("[GND Clamp]", table, buf);
    }
    if let Some(table) = &model.derived.power_clamp {
        write_vi_table("[POWER Clamp]", table, buf);
    }
    if let Some(table) = &model.derived.series_rvds {
        write_vi_table("[Series Current]", table, buf);
    }

    if let Some(ramp) = &model.derived.ramp {
        writeln!(buf, "[Ramp]").unwrap();
        writeln!(
            buf,
            "dV/dt_r          {}",
            vcorner_row(&ramp.dv_dt_rise)
        )
        .unwrap();
        writeln!(
            buf,
            "dV/dt_f          {}",
            vcorner_row(&ramp.dv_dt_fall)
        )
        .unwrap();
    }

    for (index, table) in model.derived.rising_waveforms.iter().enumerate() {
        write_vt_table("[Rising Waveform]", index, table, buf);
    }
    for (index, table) in model.derived.falling_waveforms.iter().enumerate() {
        write_vt_table("[Falling Waveform]", index, table, buf);
    }

    buf.push('\n');
}

fn write_vi_table(keyword: &str, table: &ViTable, buf: &mut String) {
    writeln!(buf, "{keyword}").unwrap();
    writeln!(
        buf,
        "{}{}{}{}",
        column("V"),
        column("I(typ)"),
        column("I(min)"),
        column("I(max)")
    )
    .unwrap();
    for row in &table.rows {
        writeln!(
            buf,
            "{}{}{}{}",
            column(&scientific(row.v)),
            column(&scientific_or_na(row.i_typ)),
            column(&scientific_or_na(row.i_min)),
            column(&scientific_or_na(row.i_max))
        )
        .unwrap();
    }
}

fn write_vt_table(keyword: &str, index: usize, table: &VtTable, buf: &mut String) {
    let fixture = &table.fixture;
    writeln!(
        buf,
        "{keyword} {}   R_fixture={} L_fixture={} C_fixture={} V_fixture={}",
        index + 1,
        scientific_or_na(fixture.r.typ),
        scientific_or_na(fixture.l.typ),
        scientific_or_na(fixture.c.typ),
        scientific_or_na(fixture.v.typ)
    )
    .unwrap();
    writeln!(
        buf,
        "{}{}{}{}",
        column("time"),
        column("V(typ)"),
        column("V(min)"),
        column("V(max)")
    )
    .unwrap();
    for row in &table.rows {
        writeln!(
            buf,
            "{}{}{}{}",
            column(&scientific(row.t)),
            column(&scientific_or_na(row.v_typ)),
            column(&scientific_or_na(row.v_min)),
            column(&scientific_or_na(row.v_max))
        )
        .unwrap();
    }
}

pub fn write_end(buf: &mut String) {
    writeln!(buf, "[End]").unwrap();
}
