//! CLI tests for `evidence vte`.
//!
//! Verifies that complete arms exit OK, incomplete arms exit PENDING, and
//! malformed timestamps exit INVALID.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use evidence::exit_codes;

fn write_milestones(root: &Path, arm: &str, lines: &[&str]) {
    let dir = root.join(arm).join("milestones");
    fs::create_dir_all(&dir).expect("milestones dir");
    let mut contents = lines.join("\n");
    contents.push('\n');
    fs::write(dir.join("milestones.jsonl"), contents).expect("write milestones");
}

fn run_vte(root: &Path, extra: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_evidence"))
        .arg("--root")
        .arg(root)
        .arg("vte")
        .args(extra)
        .output()
        .expect("evidence vte")
}

#[test]
fn vte_both_arms_complete_exits_ok() {
    let temp = tempfile::tempdir().expect("tempdir");
    write_milestones(
        temp.path(),
        "academic",
        &[
            r#"{"code":"A0","ts":"2024-01-01T00:00:00Z"}"#,
            r#"{"code":"A6","ts":"2024-01-03T00:00:00Z"}"#,
        ],
    );
    write_milestones(
        temp.path(),
        "memetic",
        &[
            r#"{"code":"M0","ts":"2024-01-01T00:00:00Z"}"#,
            r#"{"code":"M5","ts":"2024-01-02T06:00:00Z"}"#,
            r#"{"code":"M4","ts":"2024-01-02T01:00:00Z"}"#,
        ],
    );

    let output = run_vte(temp.path(), &[]);
    assert_eq!(output.status.code(), Some(exit_codes::OK));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Academic VTE (A-VTE): 2 days"));
    assert!(stdout.contains("Memetic VTE (M-VTE): 1 day, 1 hour"));
    assert!(stdout.contains("Academic arm is 23 hours slower"));
}

#[test]
fn vte_missing_arm_exits_pending() {
    let temp = tempfile::tempdir().expect("tempdir");
    write_milestones(
        temp.path(),
        "memetic",
        &[r#"{"code":"M0","ts":"2024-01-01T00:00:00Z"}"#],
    );

    let output = run_vte(temp.path(), &["--json"]);
    assert_eq!(output.status.code(), Some(exit_codes::PENDING));
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json report");
    assert!(report["academic"]["seconds"].is_null());
    assert!(report["memetic"]["seconds"].is_null());
    assert!(report["delta"].is_null());
}

#[test]
fn vte_malformed_timestamp_exits_invalid() {
    let temp = tempfile::tempdir().expect("tempdir");
    write_milestones(
        temp.path(),
        "academic",
        &[
            r#"{"code":"A0","ts":"2024-01-01T00:00:00Z"}"#,
            r#"{"code":"A6","ts":"soon"}"#,
        ],
    );

    let output = run_vte(temp.path(), &[]);
    assert_eq!(output.status.code(), Some(exit_codes::INVALID));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("soon"));
    assert!(output.stdout.is_empty());
}

#[test]
fn vte_path_overrides() {
    let temp = tempfile::tempdir().expect("tempdir");
    let academic = temp.path().join("a.jsonl");
    fs::write(
        &academic,
        "{\"code\":\"A0\",\"ts\":\"2024-01-01T00:00:00Z\"}\n{\"code\":\"A6\",\"ts\":\"2024-01-01T00:30:00Z\"}\n",
    )
    .expect("academic");
    let memetic = temp.path().join("m.jsonl");
    fs::write(
        &memetic,
        "{\"code\":\"M0\",\"ts\":\"2024-01-01T00:00:00Z\"}\n{\"code\":\"M4\",\"ts\":\"2024-01-01T00:30:00Z\"}\n",
    )
    .expect("memetic");

    let output = run_vte(
        temp.path(),
        &[
            "--academic",
            academic.to_str().expect("utf8"),
            "--memetic",
            memetic.to_str().expect("utf8"),
        ],
    );
    assert_eq!(output.status.code(), Some(exit_codes::OK));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Both arms completed simultaneously"));
}

#[test]
fn vte_ignores_unmatched_events_with_numeric_ts() {
    let temp = tempfile::tempdir().expect("tempdir");
    write_milestones(
        temp.path(),
        "academic",
        &[
            r#"{"code":"A0","ts":"2024-01-01T00:00:00Z"}"#,
            r#"{"code":"A3","ts":1704067200}"#,
            r#"{"code":"A6","ts":"2024-01-03T00:00:00Z"}"#,
        ],
    );

    let output = run_vte(temp.path(), &["--json"]);
    assert_eq!(output.status.code(), Some(exit_codes::PENDING));
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json report");
    assert_eq!(report["academic"]["seconds"], 172_800.0);
    assert!(report["memetic"]["seconds"].is_null());
}
