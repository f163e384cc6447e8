//! Report assembly and rendering.
//!
//! Reports wrap core results with the thresholds they were judged against and
//! the input they came from. Text rendering is presentation only; the JSON
//! form carries the same values.

use serde::Serialize;

use crate::core::duration::format_duration;
use crate::core::thresholds::{
    EFFECT_MIN_DELTA, EFFECT_PASS_PCT, EffectDirection, HRV_MIN_DELTA_MS,
    REPLICATION_MIN_CITIES, REPLICATION_MIN_PARTICIPANTS, Replication, SENSOR_MIN_QUANTIFIED,
    SENSOR_PASS_PCT, SLEEP_MIN_DELTA_PTS, SensorCorroboration, ThresholdVerdict,
};
use crate::core::vte::{ACADEMIC, ArmSpec, MEMETIC, compute_delta};

const RULE_WIDTH: usize = 60;

/// Where a report's input came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceInfo {
    pub path: String,
    pub sha256: String,
    pub records: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EffectSection {
    #[serde(flatten)]
    pub result: EffectDirection,
    pub min_delta: i64,
    pub threshold_pct: f64,
    pub passed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReplicationSection {
    #[serde(flatten)]
    pub result: Replication,
    pub min_participants: usize,
    pub min_cities: usize,
    pub passed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SensorSection {
    #[serde(flatten)]
    pub result: SensorCorroboration,
    pub hrv_min_delta_ms: f64,
    pub sleep_min_delta_pts: f64,
    pub threshold_pct: f64,
    pub min_quantified: usize,
    pub passed: bool,
}

/// Threshold check report for one participant log.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ThresholdReport {
    pub source: SourceInfo,
    pub effect_direction: EffectSection,
    pub replication: ReplicationSection,
    pub sensor_corroboration: SensorSection,
    pub all_passed: bool,
}

impl ThresholdReport {
    pub fn new(source: SourceInfo, verdict: &ThresholdVerdict) -> Self {
        Self {
            source,
            effect_direction: EffectSection {
                result: verdict.effect,
                min_delta: EFFECT_MIN_DELTA,
                threshold_pct: EFFECT_PASS_PCT,
                passed: verdict.effect.passed(),
            },
            replication: ReplicationSection {
                result: verdict.replication,
                min_participants: REPLICATION_MIN_PARTICIPANTS,
                min_cities: REPLICATION_MIN_CITIES,
                passed: verdict.replication.passed(),
            },
            sensor_corroboration: SensorSection {
                result: verdict.sensor,
                hrv_min_delta_ms: HRV_MIN_DELTA_MS,
                sleep_min_delta_pts: SLEEP_MIN_DELTA_PTS,
                threshold_pct: SENSOR_PASS_PCT,
                min_quantified: SENSOR_MIN_QUANTIFIED,
                passed: verdict.sensor.passed(),
            },
            all_passed: verdict.all_passed(),
        }
    }

    pub fn render_text(&self) -> String {
        let mut out = String::new();
        header(&mut out, "Evidence Threshold Check");

        let effect = &self.effect_direction;
        out.push_str("1. Effect direction consistency\n");
        out.push_str(&format!(
            "   {:.1}% show energy change >= +{} ({}/{})\n",
            effect.result.percentage,
            effect.min_delta,
            effect.result.positive,
            effect.result.total_valid
        ));
        out.push_str(&format!("   Threshold: >= {}%\n", effect.threshold_pct));
        status(&mut out, effect.passed);

        let replication = &self.replication;
        out.push_str("2. Replication count\n");
        out.push_str(&format!(
            "   {} participants across {} cities\n",
            replication.result.participants, replication.result.cities
        ));
        out.push_str(&format!(
            "   Threshold: >= {} participants across >= {} cities\n",
            replication.min_participants, replication.min_cities
        ));
        status(&mut out, replication.passed);

        let sensor = &self.sensor_corroboration;
        out.push_str("3. Sensor corroboration\n");
        out.push_str(&format!(
            "   {:.1}% show HRV (>= +{} ms) or sleep (>= +{} pts) improvement ({}/{} quantified)\n",
            sensor.result.percentage,
            sensor.hrv_min_delta_ms,
            sensor.sleep_min_delta_pts,
            sensor.result.positive,
            sensor.result.total_quantified
        ));
        out.push_str(&format!(
            "   Threshold: >= {}% with >= {} quantified\n",
            sensor.threshold_pct, sensor.min_quantified
        ));
        status(&mut out, sensor.passed);

        rule(&mut out);
        if self.all_passed {
            out.push_str("Overall: ALL CRITERIA MET\n");
            rule(&mut out);
            out.push_str("\nReady for curator audit (M5 milestone).\n");
        } else {
            out.push_str("Overall: CRITERIA NOT MET\n");
            rule(&mut out);
            out.push_str("\nContinue data collection until all thresholds are met.\n");
        }
        out
    }
}

/// Duration of one arm, or `None` while its milestones are incomplete.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArmSection {
    pub arm: &'static str,
    pub label: &'static str,
    pub start_code: &'static str,
    pub stop_codes: &'static [&'static str],
    pub seconds: Option<f64>,
    pub display: Option<String>,
}

impl ArmSection {
    pub fn new(spec: &ArmSpec, seconds: Option<f64>) -> Self {
        Self {
            arm: spec.name,
            label: spec.label,
            start_code: spec.start_code,
            stop_codes: spec.stop_codes,
            seconds,
            display: seconds.map(format_duration),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SlowerArm {
    Academic,
    Memetic,
    Neither,
}

/// Academic minus memetic VTE.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeltaSection {
    pub seconds: f64,
    pub display: String,
    pub slower: SlowerArm,
}

/// VTE report covering both arms.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VteReport {
    pub academic: ArmSection,
    pub memetic: ArmSection,
    pub delta: Option<DeltaSection>,
}

impl VteReport {
    pub fn new(academic_seconds: Option<f64>, memetic_seconds: Option<f64>) -> Self {
        let delta = compute_delta(academic_seconds, memetic_seconds).map(|seconds| {
            let slower = if seconds > 0.0 {
                SlowerArm::Academic
            } else if seconds < 0.0 {
                SlowerArm::Memetic
            } else {
                SlowerArm::Neither
            };
            DeltaSection {
                seconds,
                display: format_duration(seconds.abs()),
                slower,
            }
        });
        Self {
            academic: ArmSection::new(&ACADEMIC, academic_seconds),
            memetic: ArmSection::new(&MEMETIC, memetic_seconds),
            delta,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.delta.is_some()
    }

    pub fn render_text(&self) -> String {
        let mut out = String::new();
        header(&mut out, "Verification Time to Evidence (VTE) Report");

        for arm in [&self.academic, &self.memetic] {
            let name = capitalize(arm.arm);
            match (arm.seconds, &arm.display) {
                (Some(seconds), Some(display)) => {
                    out.push_str(&format!("{name} VTE ({}): {display}\n", arm.label));
                    out.push_str(&format!("  ({seconds:.0} seconds)\n"));
                }
                _ => {
                    out.push_str(&format!(
                        "{name} VTE: not yet computed (missing milestones)\n"
                    ));
                }
            }
            out.push('\n');
        }

        match &self.delta {
            Some(delta) => {
                out.push_str(&format!("Delta VTE (A-VTE - M-VTE): {}\n", delta.display));
                match delta.slower {
                    SlowerArm::Academic => {
                        out.push_str(&format!("  (Academic arm is {} slower)\n", delta.display));
                    }
                    SlowerArm::Memetic => {
                        out.push_str(&format!("  (Memetic arm is {} slower)\n", delta.display));
                    }
                    SlowerArm::Neither => {
                        out.push_str("  (Both arms completed simultaneously)\n");
                    }
                }
            }
            None => {
                out.push_str("Delta VTE: cannot compute (one or both arms incomplete)\n");
            }
        }
        out.push('\n');
        rule(&mut out);
        out
    }
}

fn header(out: &mut String, title: &str) {
    rule(out);
    out.push_str(&format!("{title}\n"));
    rule(out);
    out.push('\n');
}

fn rule(out: &mut String) {
    out.push_str(&format!("{}\n", "=".repeat(RULE_WIDTH)));
}

fn status(out: &mut String, passed: bool) {
    out.push_str(&format!("   Status: {}\n", if passed { "PASS" } else { "FAIL" }));
    out.push('\n');
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
