//! Non-interactive commands
//!
//! Everything writes to a caller-supplied `Write` so the binary can use
//! stdout and tests can use a buffer.

use std::io::{self, Write};
use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use hpc_blueprint::{Session, SessionSpec};
use hpc_catalog::{Catalog, Category, OptionKind, OptionSpec};
use hpc_orchestrator::{OrchestratorHandle, PipelineSnapshot, RequestState, RequestStatus};
use hpc_services::{CostEstimate, CostService, ValidationReport, ValidationService};

use crate::config::HpcConfig;

/// List the catalog grouped by category
///
/// # Errors
/// Write failures
pub fn write_catalog(out: &mut impl Write, catalog: &Catalog) -> io::Result<()> {
    for category in Category::ALL {
        let mut defs = catalog.by_category(category).peekable();
        if defs.peek().is_none() {
            continue;
        }
        writeln!(out, "[{category}]")?;
        for def in defs {
            writeln!(
                out,
                "  {:<20} {} (${} / {})",
                def.id, def.name, def.unit_cost, def.cost_unit
            )?;
            for option in &def.options {
                writeln!(
                    out,
                    "      {:<18} default {}{}",
                    option.id,
                    option.default,
                    constraint_text(option)
                )?;
            }
        }
    }
    Ok(())
}

fn constraint_text(option: &OptionSpec) -> String {
    match option.kind {
        OptionKind::Select => {
            let values: Vec<&str> = option.choices.iter().map(|c| c.value.as_str()).collect();
            format!(", one of {}", values.join("|"))
        }
        OptionKind::Slider => {
            let mut text = String::new();
            if let (Some(min), Some(max)) = (option.min, option.max) {
                text.push_str(&format!(", {min}..{max}"));
            }
            if let Some(step) = option.step {
                text.push_str(&format!(" step {step}"));
            }
            if let Some(unit) = &option.unit {
                text.push_str(&format!(" {unit}"));
            }
            text
        }
        OptionKind::Text | OptionKind::Number => String::new(),
    }
}

/// Build a session from a YAML session file
///
/// Values outside their option's constraints are kept and logged.
///
/// # Errors
/// Unreadable file, malformed YAML, unknown component or option
pub fn load_session(path: &Path, catalog: Catalog) -> anyhow::Result<Session> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading session file {}", path.display()))?;
    let spec = SessionSpec::from_yaml(&text)
        .with_context(|| format!("parsing session file {}", path.display()))?;
    let (session, warnings) = Session::from_spec(catalog, &spec)
        .with_context(|| format!("building session from {}", path.display()))?;

    tracing::info!(
        components = session.store().len(),
        warnings = warnings.len(),
        "session loaded"
    );
    Ok(session)
}

/// Submit one document and wait for both results
///
/// # Errors
/// The pipeline stopped before settling
pub async fn check(
    config: &HpcConfig,
    document: String,
    validator: Arc<dyn ValidationService>,
    coster: Arc<dyn CostService>,
) -> anyhow::Result<PipelineSnapshot> {
    let pipeline = config.pipeline().with_debounce(Duration::ZERO);
    let mut handle = OrchestratorHandle::spawn(pipeline, validator, coster);

    let revision = handle.submit(document)?;
    let snapshot = handle
        .wait_until_settled(revision)
        .await
        .context("waiting for service results")?;
    handle.shutdown().await;
    Ok(snapshot)
}

/// Whether a settled snapshot is a clean pass
#[must_use]
pub fn passed(snapshot: &PipelineSnapshot) -> bool {
    snapshot.validation.result().is_some_and(|r| r.valid)
        && snapshot.cost.status() == RequestStatus::Succeeded
}

/// Process exit status for a settled `check`
#[must_use]
pub fn exit_code(snapshot: &PipelineSnapshot) -> ExitCode {
    if passed(snapshot) {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

/// Print both request states
///
/// # Errors
/// Write failures
pub fn write_report(out: &mut impl Write, snapshot: &PipelineSnapshot) -> io::Result<()> {
    write_validation(out, &snapshot.validation)?;
    write_cost(out, &snapshot.cost)
}

fn write_validation(out: &mut impl Write, state: &RequestState<ValidationReport>) -> io::Result<()> {
    match (state.status(), state.result(), state.error()) {
        (RequestStatus::Succeeded, Some(report), _) if report.valid => {
            writeln!(out, "Validation: valid")
        }
        (RequestStatus::Succeeded, Some(report), _) => {
            writeln!(out, "Validation: invalid ({} errors)", report.errors.len())?;
            for error in &report.errors {
                writeln!(out, "  - {error}")?;
            }
            Ok(())
        }
        (RequestStatus::Failed, _, Some(error)) => writeln!(out, "Validation: failed: {error}"),
        (status, _, _) => writeln!(out, "Validation: {status}"),
    }
}

fn write_cost(out: &mut impl Write, state: &RequestState<CostEstimate>) -> io::Result<()> {
    match (state.status(), state.result(), state.error()) {
        (RequestStatus::Succeeded, Some(estimate), _) => {
            writeln!(out, "Estimated monthly cost: {}", money(estimate.total_cost))?;
            for (label, amount) in &estimate.breakdown {
                writeln!(out, "  {label:<24} {:>14}", money(*amount))?;
            }
            Ok(())
        }
        (RequestStatus::Failed, _, Some(error)) => writeln!(out, "Cost: failed: {error}"),
        (status, _, _) => writeln!(out, "Cost: {status}"),
    }
}

/// `1234.5` → `$1,234.50`
#[must_use]
pub fn money(amount: f64) -> String {
    let text = format!("{:.2}", amount.abs());
    let (int_part, frac) = text.split_once('.').unwrap_or((text.as_str(), "00"));
    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    let sign = if amount < 0.0 { "-" } else { "" };
    format!("{sign}${grouped}.{frac}")
}
