//! E2E scheduling workflow tests for the `tempo` binary.
//!
//! Covers `tempo schedule` against a snapshot file and stdin, with JSON +
//! text verification and snapshot-validation failures.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn tempo_cmd() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("tempo"));
    cmd.env("RUST_LOG", "error");
    cmd
}

fn write_snapshot(dir: &Path, contents: &str) -> PathBuf {
    let path = dir.join("tasks.json");
    std::fs::write(&path, contents).expect("snapshot should be writable");
    path
}

const REPORT_SNAPSHOT: &str = r#"[
  {"id": "t1", "title": "Write report", "durationMinutes": 45, "energyCost": 3, "value": 95},
  {"id": "t2", "title": "Review report", "durationMinutes": 60, "energyCost": 2, "value": 85, "dependsOn": ["t1"]},
  {"id": "t3", "title": "File expenses", "durationMinutes": 15, "energyCost": 1, "value": 20}
]"#;

fn schedule_json(snapshot: &Path, time: &str, energy: &str) -> Value {
    let output = tempo_cmd()
        .args(["schedule", "--tasks"])
        .arg(snapshot)
        .args(["--time", time, "--energy", energy, "--json"])
        .output()
        .expect("schedule should not crash");
    assert!(
        output.status.success(),
        "schedule failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("valid JSON")
}

fn selected_ids(result: &Value) -> Vec<&str> {
    result["selectedTasks"]
        .as_array()
        .expect("selectedTasks must be an array")
        .iter()
        .map(|task| task["id"].as_str().expect("id must exist"))
        .collect()
}

#[test]
fn schedule_picks_best_combination_within_budgets() {
    let dir = TempDir::new().expect("tempdir");
    let snapshot = write_snapshot(dir.path(), REPORT_SNAPSHOT);

    // t1 + t2 overruns 100 minutes; t1 + t3 is the best fit at value 115.
    let result = schedule_json(&snapshot, "100", "5");

    assert_eq!(selected_ids(&result), vec!["t1", "t3"]);
    assert_eq!(result["totalDuration"], 60);
    assert_eq!(result["totalEnergy"], 4);
    assert_eq!(result["totalValue"], 115);
    assert_eq!(result["algorithm"], "knapsack_dp");
}

#[test]
fn schedule_respects_task_id_filter() {
    let dir = TempDir::new().expect("tempdir");
    let snapshot = write_snapshot(dir.path(), REPORT_SNAPSHOT);

    let output = tempo_cmd()
        .args(["schedule", "--tasks"])
        .arg(&snapshot)
        .args(["--time", "100", "--energy", "5", "--task-ids", "t3", "--json"])
        .output()
        .expect("schedule should not crash");
    assert!(output.status.success());
    let result: Value = serde_json::from_slice(&output.stdout).expect("valid JSON");
    assert_eq!(selected_ids(&result), vec!["t3"]);
    assert_eq!(result["totalValue"], 20);
}

#[test]
fn schedule_reads_snapshot_from_stdin() {
    let result_output = tempo_cmd()
        .args(["schedule", "--time", "100", "--energy", "5", "--json"])
        .write_stdin(REPORT_SNAPSHOT)
        .output()
        .expect("schedule should not crash");
    assert!(result_output.status.success());
    let result: Value = serde_json::from_slice(&result_output.stdout).expect("valid JSON");
    assert_eq!(result["totalValue"], 115);
}

#[test]
fn schedule_human_output_lists_selected_tasks() {
    let dir = TempDir::new().expect("tempdir");
    let snapshot = write_snapshot(dir.path(), REPORT_SNAPSHOT);

    tempo_cmd()
        .args(["schedule", "--tasks"])
        .arg(&snapshot)
        .args(["--time", "100", "--energy", "5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Selected 2 task(s):"))
        .stdout(predicate::str::contains("Write report"));
}

#[test]
fn schedule_rejects_duplicate_task_ids() {
    let dir = TempDir::new().expect("tempdir");
    let snapshot = write_snapshot(
        dir.path(),
        r#"[
          {"id": "dup", "title": "First", "durationMinutes": 10, "energyCost": 1, "value": 10},
          {"id": "dup", "title": "Second", "durationMinutes": 10, "energyCost": 1, "value": 10}
        ]"#,
    );

    tempo_cmd()
        .args(["schedule", "--tasks"])
        .arg(&snapshot)
        .args(["--time", "60", "--energy", "3"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("duplicate task id: dup"));
}

#[test]
fn schedule_rejects_out_of_range_task_fields() {
    let dir = TempDir::new().expect("tempdir");
    let snapshot = write_snapshot(
        dir.path(),
        r#"[{"id": "t1", "title": "Broken", "durationMinutes": 0, "energyCost": 1, "value": 10}]"#,
    );

    tempo_cmd()
        .args(["schedule", "--tasks"])
        .arg(&snapshot)
        .args(["--time", "60", "--energy", "3"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid task t1"));
}

#[test]
fn schedule_rejects_unknown_filter_ids() {
    let dir = TempDir::new().expect("tempdir");
    let snapshot = write_snapshot(dir.path(), REPORT_SNAPSHOT);

    tempo_cmd()
        .args(["schedule", "--tasks"])
        .arg(&snapshot)
        .args(["--time", "60", "--energy", "3", "--task-ids", "missing"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown task id in filter: missing"));
}
