//! Milestone log loader (JSON Lines, one event per line).

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde_json::{Map, Value};
use tracing::{debug, info, instrument};

use crate::core::types::MilestoneEvent;

/// Load an arm's milestone events.
///
/// A missing file means the arm has not logged anything yet and yields an
/// empty list. A line that is not a JSON object is an error.
#[instrument(skip_all, fields(path = %path.display()))]
pub fn load_milestones(path: &Path) -> Result<Vec<MilestoneEvent>> {
    if !path.exists() {
        info!("milestone log missing, treating arm as empty");
        return Ok(Vec::new());
    }
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let events = parse_milestones(&contents).with_context(|| format!("parse {}", path.display()))?;
    debug!(events = events.len(), "milestones loaded");
    Ok(events)
}

/// Parse JSON Lines text; blank lines are skipped.
///
/// Every line must be a JSON object. The `code` and `ts` values are taken as
/// they are, whatever their JSON type.
pub fn parse_milestones(contents: &str) -> Result<Vec<MilestoneEvent>> {
    let mut events = Vec::new();
    for (index, line) in contents.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            debug!(line = index + 1, "skipping blank line");
            continue;
        }
        let mut fields: Map<String, Value> =
            serde_json::from_str(line).with_context(|| format!("line {}", index + 1))?;
        events.push(MilestoneEvent {
            code: fields.remove("code"),
            ts: fields.remove("ts"),
        });
    }
    Ok(events)
}
