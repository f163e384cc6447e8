//! Evidence threshold checks over participant log records.
//!
//! Each check is lenient: a field that fails to parse removes the record from
//! that check's denominator and never fails the batch. The three verdicts are
//! combined by logical AND with no partial credit.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::core::types::ParticipantLogRecord;

/// Minimum energy gain (post - pre) for a record to count as positive.
pub const EFFECT_MIN_DELTA: i64 = 10;
/// Share of valid records that must be positive, in percent.
pub const EFFECT_PASS_PCT: f64 = 70.0;
/// Distinct participants required for replication.
pub const REPLICATION_MIN_PARTICIPANTS: usize = 150;
/// Distinct cities required for replication.
pub const REPLICATION_MIN_CITIES: usize = 3;
/// Minimum HRV (RMSSD) gain in milliseconds.
pub const HRV_MIN_DELTA_MS: f64 = 5.0;
/// Minimum sleep efficiency gain in percentage points.
pub const SLEEP_MIN_DELTA_PTS: f64 = 2.0;
/// Share of quantified records that must improve, in percent.
pub const SENSOR_PASS_PCT: f64 = 60.0;
/// Quantified records required before the sensor check can pass.
pub const SENSOR_MIN_QUANTIFIED: usize = 50;

/// Result of the effect-direction check.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EffectDirection {
    pub percentage: f64,
    pub positive: usize,
    pub total_valid: usize,
}

impl EffectDirection {
    pub fn passed(&self) -> bool {
        self.percentage >= EFFECT_PASS_PCT
    }
}

/// Result of the replication check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Replication {
    pub participants: usize,
    pub cities: usize,
}

impl Replication {
    pub fn passed(&self) -> bool {
        self.participants >= REPLICATION_MIN_PARTICIPANTS && self.cities >= REPLICATION_MIN_CITIES
    }
}

/// Result of the sensor-corroboration check.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SensorCorroboration {
    pub percentage: f64,
    pub positive: usize,
    pub total_quantified: usize,
}

impl SensorCorroboration {
    /// The sample-size floor is part of the pass criterion.
    pub fn passed(&self) -> bool {
        self.percentage >= SENSOR_PASS_PCT && self.total_quantified >= SENSOR_MIN_QUANTIFIED
    }
}

/// All three verdicts for one dataset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ThresholdVerdict {
    pub effect: EffectDirection,
    pub replication: Replication,
    pub sensor: SensorCorroboration,
}

impl ThresholdVerdict {
    pub fn all_passed(&self) -> bool {
        self.effect.passed() && self.replication.passed() && self.sensor.passed()
    }
}

/// Run every check over the same records.
pub fn evaluate(records: &[ParticipantLogRecord]) -> ThresholdVerdict {
    ThresholdVerdict {
        effect: check_effect_direction(records),
        replication: check_replication(records),
        sensor: check_sensor_corroboration(records),
    }
}

/// Share of records whose energy rose by at least [`EFFECT_MIN_DELTA`].
///
/// Absent energy fields default to 0; present but non-integer fields exclude
/// the record from `total_valid`. The gain is computed in `i128` so any pair
/// of `i64` readings subtracts exactly.
pub fn check_effect_direction(records: &[ParticipantLogRecord]) -> EffectDirection {
    let mut positive = 0;
    let mut total_valid = 0;
    for record in records {
        let (Some(pre), Some(post)) = (
            parse_energy(record.energy_pre.as_deref()),
            parse_energy(record.energy_post.as_deref()),
        ) else {
            continue;
        };
        total_valid += 1;
        if i128::from(post) - i128::from(pre) >= i128::from(EFFECT_MIN_DELTA) {
            positive += 1;
        }
    }
    EffectDirection {
        percentage: percentage(positive, total_valid),
        positive,
        total_valid,
    }
}

/// Count distinct participants and cities.
///
/// A record contributes to either set only when both `pid` and `city` are
/// non-empty after trimming.
pub fn check_replication(records: &[ParticipantLogRecord]) -> Replication {
    let mut participants = BTreeSet::new();
    let mut cities = BTreeSet::new();
    for record in records {
        let pid = record.pid.as_deref().unwrap_or_default().trim();
        let city = record.city.as_deref().unwrap_or_default().trim();
        if pid.is_empty() || city.is_empty() {
            continue;
        }
        participants.insert(pid);
        cities.insert(city);
    }
    Replication {
        participants: participants.len(),
        cities: cities.len(),
    }
}

/// Share of quantified records showing an HRV or sleep improvement.
pub fn check_sensor_corroboration(records: &[ParticipantLogRecord]) -> SensorCorroboration {
    let mut positive = 0;
    let mut total_quantified = 0;
    for record in records {
        let hrv = signal(
            record.hrv_rmssd_pre_24h.as_deref(),
            record.hrv_rmssd_post_24h.as_deref(),
        );
        let sleep = signal(
            record.sleep_eff_pre.as_deref(),
            record.sleep_eff_post.as_deref(),
        );
        if hrv.is_none() && sleep.is_none() {
            continue;
        }
        total_quantified += 1;
        let hrv_improved = hrv.is_some_and(|delta| delta >= HRV_MIN_DELTA_MS);
        let sleep_improved = sleep.is_some_and(|delta| delta >= SLEEP_MIN_DELTA_PTS);
        if hrv_improved || sleep_improved {
            positive += 1;
        }
    }
    SensorCorroboration {
        percentage: percentage(positive, total_quantified),
        positive,
        total_quantified,
    }
}

fn parse_energy(raw: Option<&str>) -> Option<i64> {
    match raw {
        None => Some(0),
        Some(value) => value.trim().parse().ok(),
    }
}

/// Post - pre for a physiological signal, if both readings are present.
///
/// Missing values read as 0 and unparsable values drop the whole signal;
/// either way a signal is present only when both readings are > 0.
fn signal(pre: Option<&str>, post: Option<&str>) -> Option<f64> {
    let pre = parse_reading(pre)?;
    let post = parse_reading(post)?;
    (pre > 0.0 && post > 0.0).then_some(post - pre)
}

fn parse_reading(raw: Option<&str>) -> Option<f64> {
    match raw {
        None => Some(0.0),
        Some(value) => value.trim().parse().ok(),
    }
}

fn percentage(positive: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    (positive as f64 / total as f64) * 100.0
}
