//! Integration tests for the `quorum` CLI binary.
//!
//! These use `assert_cmd` and `predicates` to exercise the grid, rank, and
//! summary subcommands through the actual binary, including stdin/stdout
//! piping, file I/O, and error handling.

// `Command::cargo_bin` was deprecated in assert_cmd 2.1.2 in favor of
// `cargo::cargo_bin_cmd!`. Allow it until we migrate.
#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;

/// Helper: path to the snapshot.json fixture.
fn snapshot_path() -> &'static str {
    concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/snapshot.json")
}

/// Helper: read the snapshot.json fixture as a string.
fn snapshot_json() -> String {
    std::fs::read_to_string(snapshot_path()).expect("snapshot.json fixture must exist")
}

// ─────────────────────────────────────────────────────────────────────────────
// Grid subcommand
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn grid_prints_afternoon_two_hour_slots() {
    let output = Command::cargo_bin("quorum")
        .unwrap()
        .args([
            "grid",
            "--date",
            "2026-03-16",
            "--duration",
            "2",
            "--timeframe",
            "afternoon",
        ])
        .output()
        .expect("grid should succeed");

    assert!(output.status.success());
    let slots: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("grid output is valid JSON");

    let slots = slots.as_array().unwrap();
    assert_eq!(slots.len(), 4);
    assert_eq!(slots[0]["start_time"], "12:00");
    assert_eq!(slots[0]["end_time"], "14:00");
    assert_eq!(slots[3]["start_time"], "15:00");
    assert_eq!(slots[3]["end_time"], "17:00");
}

#[test]
fn grid_defaults_to_all_day() {
    Command::cargo_bin("quorum")
        .unwrap()
        .args(["grid", "--date", "2026-03-16", "--duration", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("08:00"))
        .stdout(predicate::str::contains("21:00"));
}

#[test]
fn grid_with_oversized_duration_prints_empty_array() {
    let output = Command::cargo_bin("quorum")
        .unwrap()
        .args([
            "grid",
            "--date",
            "2026-03-16",
            "--duration",
            "6",
            "--timeframe",
            "afternoon",
        ])
        .output()
        .expect("grid should succeed");

    assert!(output.status.success(), "no-fit is displayable, not an error");
    let slots: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(slots.as_array().unwrap().len(), 0);
}

#[test]
fn grid_rejects_unknown_timeframe() {
    Command::cargo_bin("quorum")
        .unwrap()
        .args([
            "grid",
            "--date",
            "2026-03-16",
            "--duration",
            "1",
            "--timeframe",
            "brunch",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("brunch"));
}

#[test]
fn grid_rejects_malformed_date() {
    Command::cargo_bin("quorum")
        .unwrap()
        .args(["grid", "--date", "March 16th", "--duration", "1"])
        .assert()
        .failure();
}

// ─────────────────────────────────────────────────────────────────────────────
// Rank subcommand
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn rank_stdin_to_stdout() {
    let output = Command::cargo_bin("quorum")
        .unwrap()
        .arg("rank")
        .write_stdin(snapshot_json())
        .output()
        .expect("rank should succeed");

    assert!(output.status.success());
    let ranked: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let ranked = ranked.as_array().unwrap();

    // alice+bob share 09:00-10:00; alice alone at 08:00-09:00; carol
    // marked nothing and the unmarked slots never appear.
    assert_eq!(ranked.len(), 2);
    assert_eq!(ranked[0]["start_time"], "09:00");
    assert_eq!(ranked[0]["participant_count"], 2);
    assert_eq!(ranked[0]["conflict_level"], "medium");
    assert_eq!(ranked[1]["start_time"], "08:00");
    assert_eq!(ranked[1]["participant_count"], 1);
    assert_eq!(ranked[1]["conflict_level"], "low");
}

#[test]
fn rank_file_to_file() {
    let output_path = "/tmp/quorum-test-rank-output.json";
    let _ = std::fs::remove_file(output_path);

    Command::cargo_bin("quorum")
        .unwrap()
        .args(["rank", "-i", snapshot_path(), "-o", output_path])
        .assert()
        .success();

    let content = std::fs::read_to_string(output_path).expect("output file must exist");
    assert!(content.contains("alice"));
    assert!(content.contains("medium"));

    let _ = std::fs::remove_file(output_path);
}

#[test]
fn rank_top_truncates() {
    let output = Command::cargo_bin("quorum")
        .unwrap()
        .args(["rank", "-i", snapshot_path(), "--top", "1"])
        .output()
        .expect("rank should succeed");

    assert!(output.status.success());
    let ranked: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let ranked = ranked.as_array().unwrap();
    assert_eq!(ranked.len(), 1);
    assert_eq!(ranked[0]["participant_count"], 2);
}

#[test]
fn rank_invalid_json_fails() {
    Command::cargo_bin("quorum")
        .unwrap()
        .arg("rank")
        .write_stdin("this is not a snapshot {{{")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse event snapshot"));
}

#[test]
fn rank_missing_input_file_fails() {
    Command::cargo_bin("quorum")
        .unwrap()
        .args(["rank", "-i", "/nonexistent/snapshot.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read file"));
}

// ─────────────────────────────────────────────────────────────────────────────
// Summary subcommand
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn summary_shows_digest_labels() {
    Command::cargo_bin("quorum")
        .unwrap()
        .args(["summary", "-i", snapshot_path()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Event:"))
        .stdout(predicate::str::contains("Team sync"))
        .stdout(predicate::str::contains("Participants:  3"))
        .stdout(predicate::str::contains("Ranked slots:  2"))
        .stdout(predicate::str::contains("2/3 available (medium)"));
}

#[test]
fn summary_with_no_selections_reports_no_best_slot() {
    let mut snapshot: serde_json::Value = serde_json::from_str(&snapshot_json()).unwrap();
    snapshot["selections"] = serde_json::json!([]);

    Command::cargo_bin("quorum")
        .unwrap()
        .arg("summary")
        .write_stdin(snapshot.to_string())
        .assert()
        .success()
        .stdout(predicate::str::contains("none (no availability marked)"));
}

// ─────────────────────────────────────────────────────────────────────────────
// General CLI behavior
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn help_flag_shows_usage() {
    Command::cargo_bin("quorum")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("grid"))
        .stdout(predicate::str::contains("rank"))
        .stdout(predicate::str::contains("summary"));
}

#[test]
fn unknown_subcommand_fails() {
    Command::cargo_bin("quorum")
        .unwrap()
        .arg("frobnicate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error").or(predicate::str::contains("unrecognized")));
}
