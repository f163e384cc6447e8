//! Record types shared between the loaders and the core checks.
//!
//! Field values stay text-encoded exactly as loaded; each check parses the
//! fields it needs on demand and applies its own policy for bad values.

use serde_json::Value;

/// One row of the participant log table.
///
/// `None` means the column was absent from the header. `Some("")` means the
/// column was present but the cell was empty or missing from a short row; the
/// distinction matters for
/// the effect-direction check, which defaults absent energy values to 0 but
/// excludes unparsable ones.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParticipantLogRecord {
    pub pid: Option<String>,
    pub city: Option<String>,
    pub energy_pre: Option<String>,
    pub energy_post: Option<String>,
    pub hrv_rmssd_pre_24h: Option<String>,
    pub hrv_rmssd_post_24h: Option<String>,
    pub sleep_eff_pre: Option<String>,
    pub sleep_eff_post: Option<String>,
}

impl ParticipantLogRecord {
    /// Column names recognised in the tabular input, in canonical order.
    pub const COLUMNS: [&'static str; 8] = [
        "pid",
        "city",
        "energy_pre",
        "energy_post",
        "hrv_rmssd_pre_24h",
        "hrv_rmssd_post_24h",
        "sleep_eff_pre",
        "sleep_eff_post",
    ];

    /// Mutable slot for a recognised column, or `None` for extra columns.
    pub fn field_mut(&mut self, column: &str) -> Option<&mut Option<String>> {
        match column {
            "pid" => Some(&mut self.pid),
            "city" => Some(&mut self.city),
            "energy_pre" => Some(&mut self.energy_pre),
            "energy_post" => Some(&mut self.energy_post),
            "hrv_rmssd_pre_24h" => Some(&mut self.hrv_rmssd_pre_24h),
            "hrv_rmssd_post_24h" => Some(&mut self.hrv_rmssd_post_24h),
            "sleep_eff_pre" => Some(&mut self.sleep_eff_pre),
            "sleep_eff_post" => Some(&mut self.sleep_eff_post),
            _ => None,
        }
    }
}

/// One line of an arm's milestone log.
///
/// Unknown keys are ignored and both values are kept as raw JSON. An event
/// whose `code` is missing or not a string never matches a milestone. A `ts`
/// that is missing or not a string is only an error once the event is
/// selected as a start or stop marker.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MilestoneEvent {
    pub code: Option<Value>,
    pub ts: Option<Value>,
}

impl MilestoneEvent {
    pub fn code_str(&self) -> Option<&str> {
        self.code.as_ref().and_then(Value::as_str)
    }

    pub fn has_code(&self, code: &str) -> bool {
        self.code_str() == Some(code)
    }
}
