//! Integration tests for the `tb` CLI.
//!
//! Each test points `tb` at a temp data directory, runs it as a subprocess,
//! and verifies stdout and/or the tips.json file.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use pretty_assertions::assert_eq;
use tempfile::TempDir;

/// Get the path to the built `tb` binary.
fn tb_bin() -> PathBuf {
    // cargo test builds to target/debug/
    let mut path = std::env::current_exe().unwrap();
    path.pop(); // remove test binary name
    path.pop(); // remove deps/
    path.push("tb");
    path
}

/// Run `tb` with the data dir and config redirected into `root`.
fn run_tb(root: &Path, args: &[&str]) -> Output {
    Command::new(tb_bin())
        .arg("--data-dir")
        .arg(root)
        .arg("--config")
        .arg(root.join("config.toml"))
        .args(args)
        .env("RUST_LOG", "off")
        .output()
        .expect("failed to run tb")
}

fn stdout(output: &Output) -> String {
    String::from_utf8(output.stdout.clone()).unwrap()
}

/// A tips.json where the add-task tip was closed once
fn write_dismissed_add_task(root: &Path) {
    fs::write(
        root.join("tips.json"),
        r#"{
  "tips": {
    "add-task": {
      "first_shown_at": "2025-05-01T09:00:00Z",
      "last_shown_at": "2025-05-01T09:00:00Z",
      "display_count": 1,
      "invalidation": { "reason": "tip-closed", "at": "2025-05-01T09:01:00Z" }
    }
  }
}
"#,
    )
    .unwrap();
}

#[test]
fn tips_text_report_for_empty_board() {
    let tmp = TempDir::new().unwrap();
    let output = run_tb(tmp.path(), &["tips"]);
    assert!(output.status.success());

    let out = stdout(&output);
    assert!(out.starts_with("input: "));
    assert!(out.contains("taskCount=0"));
    assert!(out.contains("add-task  Seed your board\n  eligible  state: hidden  shown: 0x\n  [x] taskCount == 0\n"));
    assert!(out.contains("reset-board  Keep your board tidy\n  not eligible"));
    // The single-task demo tip is not part of the board demo
    assert!(!out.contains("complete-first-task"));
}

#[test]
fn tips_json_reflects_persisted_records() {
    let tmp = TempDir::new().unwrap();
    write_dismissed_add_task(tmp.path());

    let output = run_tb(tmp.path(), &["tips", "--json"]);
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(report["input"]["taskCount"], 0);
    let add = &report["tips"][0];
    assert_eq!(add["id"], "add-task");
    assert_eq!(add["eligible"], true);
    assert_eq!(add["already_shown"], true);
    assert_eq!(add["state"], "suppressed");
    assert_eq!(add["display_count"], 1);
    assert_eq!(add["invalidated"], "tip-closed");
    assert_eq!(report["tips"].as_array().unwrap().len(), 5);
}

#[test]
fn single_demo_reports_its_own_tip() {
    let tmp = TempDir::new().unwrap();
    let output = run_tb(tmp.path(), &["--demo", "single", "tips", "--json"]);
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    let tips = report["tips"].as_array().unwrap();
    assert_eq!(tips.len(), 1);
    assert_eq!(tips[0]["id"], "complete-first-task");
    assert_eq!(tips[0]["eligible"], true);
}

#[test]
fn reset_tips_clears_datastore() {
    let tmp = TempDir::new().unwrap();
    write_dismissed_add_task(tmp.path());

    let output = run_tb(tmp.path(), &["reset-tips"]);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "tip datastore reset\n");
    assert!(!tmp.path().join("tips.json").exists());

    let output = run_tb(tmp.path(), &["tips", "--json"]);
    let report: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(report["tips"][0]["already_shown"], false);
    assert_eq!(report["tips"][0]["state"], "hidden");
}

#[test]
fn reset_tips_without_data_is_fine() {
    let tmp = TempDir::new().unwrap();
    let output = run_tb(tmp.path(), &["reset-tips"]);
    assert!(output.status.success());
}

#[test]
fn malformed_config_is_an_error() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("config.toml"), "[session\n").unwrap();
    let output = run_tb(tmp.path(), &["tips"]);
    assert_eq!(output.status.code(), Some(1));
    let err = String::from_utf8(output.stderr).unwrap();
    assert!(err.starts_with("error: "));
}
