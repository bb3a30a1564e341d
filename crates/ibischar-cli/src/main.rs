//! `ibischar`: runs a characterization config through the full pipeline
//! (plan -> deck -> simulate -> parse -> derive -> emit) and writes the
//! resulting `.ibs` file (spec §6).

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::AtomicBool;

use anyhow::{bail, Context, Result};
use clap::Parser;
use ibischar_core::{
    resolve_defaults, Component, Defaults, Document, Failure, Model, Pin, RecordedFailure,
    SimPlanItem, SimulatorKind,
};
use ibischar_driver::DriverConfig;

#[derive(Parser)]
#[command(name = "ibischar")]
#[command(about = "Characterizes SPICE subcircuits into an IBIS model file")]
#[command(version)]
struct Cli {
    /// Characterization configuration: flat keyword form or structured JSON, detected by extension.
    config: PathBuf,

    /// Directory decks, per-item results, and the final .ibs file are written to.
    #[arg(long, default_value = ".")]
    outdir: PathBuf,

    /// Simulator dialect (hspice, spectre, eldo). Overrides the config's declared simulator.
    #[arg(long)]
    spice_type: Option<String>,

    /// Simulator executable name or path.
    #[arg(long, default_value = "hspice")]
    spice_cmd: String,

    /// Skip re-simulating a Plan Item whose result file is already newer than its deck.
    #[arg(long)]
    iterate: bool,

    /// Delete scratch decks and logs after a successful parse.
    #[arg(long)]
    cleanup: bool,

    /// Run the external ibischk checker against the emitted file.
    #[arg(long)]
    ibischk: bool,

    /// Emit compare_{pin}.sp correlation decks alongside the characterization decks.
    #[arg(long)]
    correlate: bool,

    /// Debug-level logging.
    #[arg(short, long)]
    verbose: bool,
}

/// What a single Plan Item's simulation produced, before it's folded back
/// into the owning model's raw curves.
enum PlanOutcome {
    Dc(Vec<(f64, f64)>),
    Tran(Vec<(f64, f64, f64)>),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    fs::create_dir_all(&cli.outdir)
        .with_context(|| format!("creating output directory {}", cli.outdir.display()))?;

    let mut doc = load_config(&cli.config)?;
    if let Some(spice_type) = &cli.spice_type {
        doc.simulator = parse_simulator_kind(spice_type)?;
    }

    let plan = ibischar_planner::build_plan(&doc).map_err(|err| anyhow::anyhow!(Failure::from(err)))?;
    log::info!("planned {} simulation items", plan.len());

    let driver_config = DriverConfig::default()
        .with_command(cli.spice_cmd.clone())
        .with_iterate(cli.iterate)
        .with_cleanup(cli.cleanup);
    let cancel = AtomicBool::new(false);

    let mut failures: Vec<RecordedFailure> = Vec::new();
    let mut outcomes: Vec<(String, SimPlanItem, PlanOutcome)> = Vec::new();

    let components = doc.components.clone();
    for component in &components {
        for pin in &component.pins {
            if pin.reserved_kind().is_some() {
                continue;
            }
            let Some(model) = doc.find_model(&pin.model_name).cloned() else {
                continue;
            };
            let items: Vec<&SimPlanItem> = plan
                .iter()
                .filter(|item| item.pin_name == pin.pin_name && item.model_name == pin.model_name)
                .collect();
            let had_items = !items.is_empty();

            for item in items {
                match run_plan_item(&doc, component, pin, &model, item, &cli.outdir, &driver_config, &cancel) {
                    Ok(outcome) => outcomes.push((model.name.clone(), item.clone(), outcome)),
                    Err(failure) => {
                        if failure.is_fatal() {
                            bail!("{failure}");
                        }
                        log::warn!(
                            "pin {} curve {:?} corner {}: {failure}",
                            item.pin_name,
                            item.curve,
                            item.corner
                        );
                        failures.push(RecordedFailure {
                            model_name: model.name.clone(),
                            pin_name: pin.pin_name.clone(),
                            curve_label: format!("{:?}", item.curve),
                            failure,
                        });
                    }
                }
            }

            if cli.correlate && had_items {
                write_correlation_deck(&cli.outdir, pin)?;
            }
        }
    }

    for (model_name, item, outcome) in outcomes {
        if let Some(model) = doc.find_model_mut(&model_name) {
            apply_outcome(model, &item, outcome);
        }
    }

    let ibis_v4 = doc.is_ibis_v4_or_later();
    let document_defaults = doc.defaults.clone();
    for model in &mut doc.models {
        let defaults = resolve_defaults(&document_defaults, &Defaults::default(), &model.defaults);
        if let Err(err) = ibischar_deriver::derive_model(model, &defaults, ibis_v4) {
            let failure: Failure = err.into();
            log::warn!("model {}: {failure}", model.name);
            failures.push(RecordedFailure {
                model_name: model.name.clone(),
                pin_name: String::new(),
                curve_label: "derive".to_string(),
                failure,
            });
        }
    }

    let ibs_path = cli.outdir.join(&doc.file_name);
    ibischar_emit::emit_to_file(&doc, &ibs_path).map_err(|err| anyhow::anyhow!(Failure::from(err)))?;
    log::info!("wrote {}", ibs_path.display());

    if cli.ibischk {
        run_ibischk(&ibs_path, &cli.outdir)?;
    }

    report_failures(&failures);
    Ok(())
}

fn load_config(path: &Path) -> Result<Document> {
    let is_json = path.extension().and_then(|ext| ext.to_str()).is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    if is_json {
        ibischar_config::parse_structured(path).with_context(|| format!("loading structured config {}", path.display()))
    } else {
        ibischar_config::parse_flat(path).with_context(|| format!("loading flat config {}", path.display()))
    }
}

fn parse_simulator_kind(name: &str) -> Result<SimulatorKind> {
    match name.to_ascii_lowercase().as_str() {
        "hspice" => Ok(SimulatorKind::Hspice),
        "spectre" => Ok(SimulatorKind::Spectre),
        "eldo" => Ok(SimulatorKind::Eldo),
        other => bail!("unknown --spice-type {other:?}, expected hspice, spectre, or eldo"),
    }
}

#[allow(clippy::too_many_arguments)]
fn run_plan_item(
    doc: &Document,
    component: &Component,
    pin: &Pin,
    model: &Model,
    item: &SimPlanItem,
    outdir: &Path,
    driver_config: &DriverConfig,
    cancel: &AtomicBool,
) -> Result<PlanOutcome, Failure> {
    let deck_text = ibischar_deck::render_deck(doc, component, pin, model, item)?;
    let deck_path = outdir.join(&item.output_file_name);
    fs::write(&deck_path, deck_text).map_err(|source| Failure::Resource(source.to_string()))?;

    let result_path = deck_path.with_extension("result");
    let handle = ibischar_driver::invoke(&deck_path, &result_path, driver_config, cancel)?;

    let result_text = fs::read_to_string(&handle.result_path).map_err(|source| Failure::Resource(source.to_string()))?;

    let outcome = if item.stimulus.sweep.is_some() {
        PlanOutcome::Dc(ibischar_reader::parse_dc(doc.simulator, &result_text)?)
    } else {
        PlanOutcome::Tran(ibischar_reader::parse_tran(doc.simulator, &result_text)?)
    };

    if driver_config.cleanup {
        ibischar_driver::cleanup(&handle);
    }

    Ok(outcome)
}

fn apply_outcome(model: &mut Model, item: &SimPlanItem, outcome: PlanOutcome) {
    use ibischar_core::CurveKind;

    match (item.curve, outcome) {
        (CurveKind::PowerClamp, PlanOutcome::Dc(rows)) => model.raw.power_clamp.set(item.corner, rows),
        (CurveKind::GroundClamp, PlanOutcome::Dc(rows)) => model.raw.ground_clamp.set(item.corner, rows),
        (CurveKind::PullupEnabled, PlanOutcome::Dc(rows)) => model.raw.pullup_enabled.set(item.corner, rows),
        (CurveKind::PullupDisabled, PlanOutcome::Dc(rows)) => model.raw.pullup_disabled.set(item.corner, rows),
        (CurveKind::PulldownEnabled, PlanOutcome::Dc(rows)) => model.raw.pulldown_enabled.set(item.corner, rows),
        (CurveKind::PulldownDisabled, PlanOutcome::Dc(rows)) => model.raw.pulldown_disabled.set(item.corner, rows),
        (CurveKind::SeriesRVds, PlanOutcome::Dc(rows)) => model.raw.series_rvds.set(item.corner, rows),
        (CurveKind::Ramp, PlanOutcome::Tran(rows)) => model.raw.ramp.set(item.corner, rows),
        (CurveKind::RisingWaveform { fixture_index }, PlanOutcome::Tran(rows)) => {
            ensure_fixture_slot(&mut model.raw.rising_waveform, fixture_index);
            model.raw.rising_waveform[fixture_index].set(item.corner, rows);
        }
        (CurveKind::FallingWaveform { fixture_index }, PlanOutcome::Tran(rows)) => {
            ensure_fixture_slot(&mut model.raw.falling_waveform, fixture_index);
            model.raw.falling_waveform[fixture_index].set(item.corner, rows);
        }
        (curve, _) => {
            log::warn!("plan item curve {curve:?} produced a result shape with no raw-curve slot to store it in");
        }
    }
}

fn ensure_fixture_slot<T: Default + Clone>(slots: &mut Vec<T>, index: usize) {
    if slots.len() <= index {
        slots.resize(index + 1, T::default());
    }
}

fn write_correlation_deck(outdir: &Path, pin: &Pin) -> Result<()> {
    let path = outdir.join(format!("compare_{}.sp", pin.pin_name));
    let text = format!(
        "* correlation deck for pin {} (model {})\n* compares the characterized IBIS model against the source SPICE subcircuit\n",
        pin.pin_name, pin.model_name
    );
    fs::write(&path, text).with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

fn run_ibischk(ibs_path: &Path, outdir: &Path) -> Result<()> {
    let log_path = outdir.join(format!(
        "{}.ibischk_log.txt",
        ibs_path.file_stem().and_then(|s| s.to_str()).unwrap_or("model")
    ));
    let json_path = log_path.with_extension("json");

    let output = std::process::Command::new("ibischk").arg(ibs_path).output();
    match output {
        Ok(output) => {
            let mut log_text = String::from_utf8_lossy(&output.stdout).into_owned();
            log_text.push_str(&String::from_utf8_lossy(&output.stderr));
            fs::write(&log_path, &log_text).with_context(|| format!("writing {}", log_path.display()))?;

            let summary = serde_json::json!({
                "file": ibs_path.display().to_string(),
                "exit_status": output.status.code(),
                "passed": output.status.success(),
            });
            fs::write(&json_path, serde_json::to_string_pretty(&summary)?)
                .with_context(|| format!("writing {}", json_path.display()))?;
            log::info!("ibischk log written to {}", log_path.display());
        }
        Err(err) => {
            log::warn!("ibischk not invoked: {err}");
        }
    }
    Ok(())
}

fn report_failures(failures: &[RecordedFailure]) {
    if failures.is_empty() {
        log::info!("characterization completed with no recorded failures");
        return;
    }
    log::warn!("characterization completed with {} recorded failure(s):", failures.len());
    for failure in failures {
        log::warn!(
            "  model={} pin={} curve={}: {}",
            failure.model_name,
            failure.pin_name,
            failure.curve_label,
            failure.failure
        );
    }
}
