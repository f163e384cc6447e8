//! Verification time to evidence (VTE) per experimental arm.
//!
//! An arm's VTE is the wall-clock time from its start milestone to the
//! earliest of its stop milestones. Missing milestones yield `None` ("not yet
//! available"); a malformed timestamp on a selected milestone is an error.

use anyhow::{Context, Result, anyhow};
use chrono::TimeDelta;
use serde_json::Value;
use tracing::debug;

use crate::core::timestamp::{Timestamp, parse_timestamp};
use crate::core::types::MilestoneEvent;

/// Start and stop milestones for one arm.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArmSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub start_code: &'static str,
    /// Alternative completion signals; the earliest one wins.
    pub stop_codes: &'static [&'static str],
}

/// Hypothesis lock (A0) to external acceptance (A6).
pub const ACADEMIC: ArmSpec = ArmSpec {
    name: "academic",
    label: "A-VTE",
    start_code: "A0",
    stop_codes: &["A6"],
};

/// Hypothesis lock (M0) to all verification criteria met (M4 or M5).
pub const MEMETIC: ArmSpec = ArmSpec {
    name: "memetic",
    label: "M-VTE",
    start_code: "M0",
    stop_codes: &["M4", "M5"],
};

impl ArmSpec {
    pub fn duration(&self, events: &[MilestoneEvent]) -> Result<Option<f64>> {
        compute_arm_duration(events, self.start_code, self.stop_codes)
            .with_context(|| format!("compute {} duration", self.name))
    }
}

/// Seconds from `start_code` to the earliest of `stop_codes`.
///
/// The start is the first matching event in input order; no re-sorting by
/// timestamp happens there. The stop is the minimum timestamp over all
/// matching stop events. The result may be negative when the data puts a stop
/// before the start. Selected timestamps must either all carry a UTC offset or
/// all lack one.
pub fn compute_arm_duration(
    events: &[MilestoneEvent],
    start_code: &str,
    stop_codes: &[&str],
) -> Result<Option<f64>> {
    let Some(start_event) = events.iter().find(|event| event.has_code(start_code)) else {
        debug!(start_code, "start milestone missing");
        return Ok(None);
    };
    let start = event_time(start_event, start_code)?;

    let mut stop: Option<Timestamp> = None;
    for event in events {
        let Some(code) = event.code_str() else {
            continue;
        };
        if !stop_codes.contains(&code) {
            continue;
        }
        let ts = event_time(event, code)?;
        stop = Some(match stop {
            Some(current) if ts.since(&current)? >= TimeDelta::zero() => current,
            _ => ts,
        });
    }
    let Some(stop) = stop else {
        debug!(?stop_codes, "stop milestone missing");
        return Ok(None);
    };

    let seconds = delta_seconds(stop.since(&start)?);
    debug!(start_code, %start, %stop, seconds, "arm duration computed");
    Ok(Some(seconds))
}

/// Signed difference `a - b`, or `None` if either arm is incomplete.
pub fn compute_delta(a: Option<f64>, b: Option<f64>) -> Option<f64> {
    Some(a? - b?)
}

fn event_time(event: &MilestoneEvent, code: &str) -> Result<Timestamp> {
    let raw = event
        .ts
        .as_ref()
        .and_then(Value::as_str)
        .ok_or_else(|| anyhow!("milestone {code} has no string ts"))?;
    parse_timestamp(raw).with_context(|| format!("parse ts of milestone {code}"))
}

fn delta_seconds(delta: TimeDelta) -> f64 {
    delta.num_seconds() as f64 + f64::from(delta.subsec_nanos()) / 1e9
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::milestone;

    #[test]
    fn academic_two_days() {
        let events = vec![
            milestone("A0", "2024-01-01T00:00:00Z"),
            milestone("A6", "2024-01-03T00:00:00Z"),
        ];
        let seconds = ACADEMIC.duration(&events).expect("duration");
        assert_eq!(seconds, Some(172_800.0));
    }

    #[test]
    fn missing_start_is_pending() {
        let events = vec![milestone("A6", "2024-01-03T00:00:00Z")];
        assert_eq!(ACADEMIC.duration(&events).expect("duration"), None);
    }

    #[test]
    fn missing_stop_is_pending() {
        let events = vec![
            milestone("M0", "2024-01-01T00:00:00Z"),
            milestone("M3", "2024-01-02T00:00:00Z"),
        ];
        assert_eq!(MEMETIC.duration(&events).expect("duration"), None);
    }

    #[test]
    fn earliest_stop_wins_regardless_of_order() {
        let events = vec![
            milestone("M0", "2024-01-01T00:00:00Z"),
            milestone("M5", "2024-01-04T00:00:00Z"),
            milestone("M4", "2024-01-02T12:00:00Z"),
        ];
        let seconds = MEMETIC.duration(&events).expect("duration");
        assert_eq!(seconds, Some(129_600.0));
    }

    #[test]
    fn first_start_in_input_order_is_used() {
        let events = vec![
            milestone("A0", "2024-01-02T00:00:00Z"),
            milestone("A0", "2024-01-01T00:00:00Z"),
            milestone("A6", "2024-01-03T00:00:00Z"),
        ];
        let seconds = ACADEMIC.duration(&events).expect("duration");
        assert_eq!(seconds, Some(86_400.0));
    }

    #[test]
    fn stop_before_start_is_negative() {
        let events = vec![
            milestone("A0", "2024-01-03T00:00:00Z"),
            milestone("A6", "2024-01-01T00:00:00Z"),
        ];
        assert_eq!(
            ACADEMIC.duration(&events).expect("duration"),
            Some(-172_800.0)
        );
    }

    #[test]
    fn mixed_offsets_subtract_exactly() {
        let events = vec![
            milestone("A0", "2024-01-01T00:00:00Z"),
            milestone("A6", "2024-01-01T03:00:00+02:00"),
        ];
        assert_eq!(ACADEMIC.duration(&events).expect("duration"), Some(3_600.0));
    }

    #[test]
    fn fractional_seconds_are_kept() {
        let events = vec![
            milestone("A0", "2024-01-01T00:00:00Z"),
            milestone("A6", "2024-01-01T00:00:01.5Z"),
        ];
        assert_eq!(ACADEMIC.duration(&events).expect("duration"), Some(1.5));
    }

    #[test]
    fn malformed_stop_timestamp_propagates() {
        let events = vec![
            milestone("M0", "2024-01-01T00:00:00Z"),
            milestone("M4", "2024-01-02T00:00:00Z"),
            milestone("M5", "not-a-date"),
        ];
        let err = MEMETIC.duration(&events).expect_err("malformed");
        let chain = format!("{err:#}");
        assert!(chain.contains("M5"));
        assert!(chain.contains("not-a-date"));
    }

    #[test]
    fn malformed_start_timestamp_propagates() {
        let events = vec![milestone("A0", "01/01/2024")];
        assert!(ACADEMIC.duration(&events).is_err());
    }

    #[test]
    fn missing_ts_on_matched_event_propagates() {
        let events = vec![
            milestone("A0", "2024-01-01T00:00:00Z"),
            MilestoneEvent {
                code: Some(Value::from("A6")),
                ts: None,
            },
        ];
        assert!(ACADEMIC.duration(&events).is_err());
    }

    #[test]
    fn non_string_ts_on_matched_event_propagates() {
        let events = vec![
            milestone("A0", "2024-01-01T00:00:00Z"),
            MilestoneEvent {
                code: Some(Value::from("A6")),
                ts: Some(Value::from(1_704_240_000)),
            },
        ];
        let err = ACADEMIC.duration(&events).expect_err("numeric ts");
        assert!(format!("{err:#}").contains("A6"));
    }

    #[test]
    fn unmatched_malformed_events_are_ignored() {
        let events = vec![
            milestone("A0", "2024-01-01T00:00:00Z"),
            milestone("A3", "garbage"),
            MilestoneEvent::default(),
            milestone("A6", "2024-01-01T00:10:00Z"),
        ];
        assert_eq!(ACADEMIC.duration(&events).expect("duration"), Some(600.0));
    }

    #[test]
    fn unmatched_events_with_non_string_values_are_ignored() {
        let events = vec![
            milestone("A0", "2024-01-01T00:00:00Z"),
            MilestoneEvent {
                code: Some(Value::from("A3")),
                ts: Some(Value::from(1_704_067_200)),
            },
            MilestoneEvent {
                code: Some(Value::from(6)),
                ts: Some(Value::from("2023-12-01T00:00:00Z")),
            },
            milestone("A6", "2024-01-03T00:00:00Z"),
        ];
        assert_eq!(
            ACADEMIC.duration(&events).expect("duration"),
            Some(172_800.0)
        );
    }

    #[test]
    fn naive_timestamps_subtract_as_given() {
        let events = vec![
            milestone("M0", "2024-01-01T00:00:00"),
            milestone("M4", "2024-01-02"),
        ];
        assert_eq!(MEMETIC.duration(&events).expect("duration"), Some(86_400.0));
    }

    #[test]
    fn naive_and_aware_selection_is_error() {
        let events = vec![
            milestone("M0", "2024-01-01T00:00:00Z"),
            milestone("M4", "2024-01-02T00:00:00"),
        ];
        let err = MEMETIC.duration(&events).expect_err("mixed");
        assert!(format!("{err:#}").contains("UTC offset"));

        let stops_disagree = vec![
            milestone("M0", "2024-01-01T00:00:00"),
            milestone("M4", "2024-01-02T00:00:00"),
            milestone("M5", "2024-01-03T00:00:00Z"),
        ];
        assert!(MEMETIC.duration(&stops_disagree).is_err());
    }

    #[test]
    fn delta_is_signed_and_optional() {
        assert_eq!(compute_delta(Some(1000.0), Some(600.0)), Some(400.0));
        assert_eq!(compute_delta(Some(600.0), Some(1000.0)), Some(-400.0));
        assert_eq!(compute_delta(None, Some(600.0)), None);
        assert_eq!(compute_delta(Some(600.0), None), None);
    }
}
