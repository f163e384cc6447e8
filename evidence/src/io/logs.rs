//! Participant log table loader (CSV with a header row).

use std::fs;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result, bail};
use tracing::{debug, instrument};

use crate::core::types::ParticipantLogRecord;
use crate::io::digest::sha256_hex;

/// Records loaded from one file, with the digest of the bytes they came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedLogs {
    pub records: Vec<ParticipantLogRecord>,
    pub sha256: String,
}

/// Load participant records from a CSV file.
///
/// The file is read once; the records and the digest describe the same bytes.
#[instrument(skip_all, fields(path = %path.display()))]
pub fn load_logs(path: &Path) -> Result<LoadedLogs> {
    if !path.exists() {
        bail!(
            "logs not found at {}; expected a CSV with columns {}",
            path.display(),
            ParticipantLogRecord::COLUMNS.join(", ")
        );
    }
    let contents = fs::read(path).with_context(|| format!("read {}", path.display()))?;
    let records =
        parse_logs(contents.as_slice()).with_context(|| format!("parse {}", path.display()))?;
    debug!(records = records.len(), "participant logs loaded");
    Ok(LoadedLogs {
        records,
        sha256: sha256_hex(&contents),
    })
}

/// Parse participant records from any CSV source with a header row.
///
/// Columns are matched by exact header name and extra columns are ignored. A
/// column missing from the header leaves the field `None`. A header column
/// missing from a short row reads as an empty cell. Cell text is kept verbatim.
pub fn parse_logs<R: Read>(source: R) -> Result<Vec<ParticipantLogRecord>> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(source);
    let headers = reader.headers().context("read header row")?.clone();
    let mut records = Vec::new();
    for (index, row) in reader.records().enumerate() {
        // Header is line 1.
        let row = row.with_context(|| format!("parse row {}", index + 2))?;
        let mut record = ParticipantLogRecord::default();
        for (position, column) in headers.iter().enumerate() {
            if let Some(slot) = record.field_mut(column) {
                *slot = Some(row.get(position).unwrap_or_default().to_string());
            }
        }
        records.push(record);
    }
    Ok(records)
}
