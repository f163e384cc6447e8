//! Test-only helpers for constructing log records and milestone events.

use serde_json::Value;

use crate::core::types::{MilestoneEvent, ParticipantLogRecord};

fn owned(value: Option<&str>) -> Option<String> {
    value.map(str::to_string)
}

/// Record with only the participant and city columns set.
pub fn participant(pid: &str, city: &str) -> ParticipantLogRecord {
    ParticipantLogRecord {
        pid: Some(pid.to_string()),
        city: Some(city.to_string()),
        ..ParticipantLogRecord::default()
    }
}

/// Record with only the energy columns set (`None` = column absent).
pub fn energy(pre: Option<&str>, post: Option<&str>) -> ParticipantLogRecord {
    ParticipantLogRecord {
        energy_pre: owned(pre),
        energy_post: owned(post),
        ..ParticipantLogRecord::default()
    }
}

/// Record with only the HRV and sleep columns set.
pub fn sensors(
    hrv_pre: Option<&str>,
    hrv_post: Option<&str>,
    sleep_pre: Option<&str>,
    sleep_post: Option<&str>,
) -> ParticipantLogRecord {
    ParticipantLogRecord {
        hrv_rmssd_pre_24h: owned(hrv_pre),
        hrv_rmssd_post_24h: owned(hrv_post),
        sleep_eff_pre: owned(sleep_pre),
        sleep_eff_post: owned(sleep_post),
        ..ParticipantLogRecord::default()
    }
}

/// Fully populated record that passes every individual check.
pub fn strong_record(index: usize, city: &str) -> ParticipantLogRecord {
    ParticipantLogRecord {
        pid: Some(format!("p{index:03}")),
        city: Some(city.to_string()),
        energy_pre: Some("40".to_string()),
        energy_post: Some("55".to_string()),
        hrv_rmssd_pre_24h: Some("42.0".to_string()),
        hrv_rmssd_post_24h: Some("48.5".to_string()),
        sleep_eff_pre: Some("85".to_string()),
        sleep_eff_post: Some("86".to_string()),
    }
}

/// Milestone event with string `code` and `ts`.
pub fn milestone(code: &str, ts: &str) -> MilestoneEvent {
    MilestoneEvent {
        code: Some(Value::from(code)),
        ts: Some(Value::from(ts)),
    }
}
