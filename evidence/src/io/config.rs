//! Input locations stored in `evidence.toml`.
//!
//! Only file locations are configurable. Evidence thresholds are fixed
//! constants in `core::thresholds`.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use serde::Deserialize;
use tracing::debug;

/// Default config file name, looked up in the project root.
pub const CONFIG_FILE: &str = "evidence.toml";

/// Evidence tool configuration (TOML).
///
/// Missing fields fall back to the conventional project layout. Relative
/// paths are resolved against the project root.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct EvidenceConfig {
    /// Participant log table (CSV with header row).
    pub logs_path: PathBuf,

    /// Academic arm milestone log (JSON Lines).
    pub academic_milestones_path: PathBuf,

    /// Memetic arm milestone log (JSON Lines).
    pub memetic_milestones_path: PathBuf,
}

impl Default for EvidenceConfig {
    fn default() -> Self {
        Self {
            logs_path: PathBuf::from("memetic/data/logs.csv"),
            academic_milestones_path: PathBuf::from("academic/milestones/milestones.jsonl"),
            memetic_milestones_path: PathBuf::from("memetic/milestones/milestones.jsonl"),
        }
    }
}

impl EvidenceConfig {
    pub fn validate(&self) -> Result<()> {
        if self.logs_path.as_os_str().is_empty() {
            return Err(anyhow!("logs_path must be non-empty"));
        }
        if self.academic_milestones_path.as_os_str().is_empty() {
            return Err(anyhow!("academic_milestones_path must be non-empty"));
        }
        if self.memetic_milestones_path.as_os_str().is_empty() {
            return Err(anyhow!("memetic_milestones_path must be non-empty"));
        }
        Ok(())
    }

    /// Resolve every path against `root`. Absolute paths are kept.
    pub fn resolved(&self, root: &Path) -> Self {
        Self {
            logs_path: root.join(&self.logs_path),
            academic_milestones_path: root.join(&self.academic_milestones_path),
            memetic_milestones_path: root.join(&self.memetic_milestones_path),
        }
    }
}

/// Command-line overrides for config values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub logs_path: Option<PathBuf>,
    pub academic_milestones_path: Option<PathBuf>,
    pub memetic_milestones_path: Option<PathBuf>,
}

/// Apply command-line overrides to the loaded config.
pub fn apply_overrides(
    mut base: EvidenceConfig,
    overrides: &ConfigOverrides,
) -> Result<EvidenceConfig> {
    if let Some(path) = &overrides.logs_path {
        base.logs_path = path.clone();
    }
    if let Some(path) = &overrides.academic_milestones_path {
        base.academic_milestones_path = path.clone();
    }
    if let Some(path) = &overrides.memetic_milestones_path {
        base.memetic_milestones_path = path.clone();
    }
    base.validate()?;
    Ok(base)
}

/// Load config from a TOML file.
///
/// If the file is missing, returns `EvidenceConfig::default()`.
pub fn load_config(path: &Path) -> Result<EvidenceConfig> {
    if !path.exists() {
        debug!(path = %path.display(), "config missing, using defaults");
        let cfg = EvidenceConfig::default();
        cfg.validate()?;
        return Ok(cfg);
    }
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: EvidenceConfig =
        toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    cfg.validate()
        .with_context(|| format!("validate {}", path.display()))?;
    debug!(path = %path.display(), "config loaded");
    Ok(cfg)
}
