//! CLI command implementations.
//!
//! Each command prints its report to stdout and returns the exit code from
//! [`exit_codes`]. Errors propagate to `main`, which maps them to `INVALID`.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::core::thresholds::evaluate;
use crate::core::vte::{ACADEMIC, MEMETIC};
use crate::exit_codes;
use crate::io::config::{
    CONFIG_FILE, ConfigOverrides, EvidenceConfig, apply_overrides, load_config,
};
use crate::io::logs::load_logs;
use crate::io::milestones::load_milestones;
use crate::report::{SourceInfo, ThresholdReport, VteReport};

/// Output format for reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_json_flag(json: bool) -> Self {
        if json { Self::Json } else { Self::Text }
    }
}

/// Load config (from `config_path` or `<root>/evidence.toml`), apply
/// overrides, and resolve paths against `root`.
pub fn resolve_config(
    root: &Path,
    config_path: Option<&Path>,
    overrides: &ConfigOverrides,
) -> Result<EvidenceConfig> {
    let config_path = config_path
        .map(Path::to_path_buf)
        .unwrap_or_else(|| root.join(CONFIG_FILE));
    let cfg = load_config(&config_path).context("load config")?;
    let cfg = apply_overrides(cfg, overrides).context("apply overrides")?;
    Ok(cfg.resolved(root))
}

/// Evaluate the participant log against the evidence thresholds.
pub fn build_threshold_report(cfg: &EvidenceConfig) -> Result<ThresholdReport> {
    let logs = load_logs(&cfg.logs_path).context("load participant logs")?;
    let records = logs.records;
    let verdict = evaluate(&records);
    let source = SourceInfo {
        path: cfg.logs_path.display().to_string(),
        sha256: logs.sha256,
        records: records.len(),
    };
    info!(
        records = records.len(),
        all_passed = verdict.all_passed(),
        "thresholds evaluated"
    );
    Ok(ThresholdReport::new(source, &verdict))
}

/// Compute VTE for both arms.
///
/// Missing milestone files or milestones leave an arm pending; malformed
/// timestamps on selected milestones are errors.
pub fn build_vte_report(cfg: &EvidenceConfig) -> Result<VteReport> {
    let academic_events = load_milestones(&cfg.academic_milestones_path)
        .context("load academic milestones")?;
    let memetic_events =
        load_milestones(&cfg.memetic_milestones_path).context("load memetic milestones")?;
    let academic = ACADEMIC.duration(&academic_events)?;
    let memetic = MEMETIC.duration(&memetic_events)?;
    debug!(?academic, ?memetic, "arm durations computed");
    Ok(VteReport::new(academic, memetic))
}

/// `evidence check`: print the threshold report.
pub fn check(cfg: &EvidenceConfig, format: OutputFormat) -> Result<i32> {
    let report = build_threshold_report(cfg)?;
    match format {
        OutputFormat::Text => print!("{}", report.render_text()),
        OutputFormat::Json => print_json(&report)?,
    }
    Ok(if report.all_passed {
        exit_codes::OK
    } else {
        exit_codes::NOT_MET
    })
}

/// `evidence vte`: print the VTE report.
pub fn vte(cfg: &EvidenceConfig, format: OutputFormat) -> Result<i32> {
    let report = build_vte_report(cfg)?;
    match format {
        OutputFormat::Text => print!("{}", report.render_text()),
        OutputFormat::Json => print_json(&report)?,
    }
    Ok(if report.is_complete() {
        exit_codes::OK
    } else {
        exit_codes::PENDING
    })
}

/// Default project root: the current directory.
pub fn default_root() -> Result<PathBuf> {
    std::env::current_dir().context("resolve current directory")
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    let contents = serde_json::to_string_pretty(value).context("serialize report")?;
    println!("{contents}");
    Ok(())
}
