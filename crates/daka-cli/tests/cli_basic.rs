//! Basic CLI E2E tests.
//!
//! Tests invoke the built `daka` binary against a scratch data directory
//! and verify outputs.

use std::io::Write;
use std::path::Path;
use std::process::{Command, Stdio};

use tempfile::TempDir;

/// Run a CLI command and return (stdout, stderr, exit code).
fn run_cli(data_dir: &Path, args: &[&str]) -> (String, String, i32) {
    run_cli_with_input(data_dir, args, "")
}

fn run_cli_with_input(data_dir: &Path, args: &[&str], input: &str) -> (String, String, i32) {
    let mut child = Command::new(env!("CARGO_BIN_EXE_daka"))
        .args(args)
        .env("DAKA_DATA_DIR", data_dir)
        .env_remove("DAKA_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to execute CLI command");

    child
        .stdin
        .take()
        .expect("stdin is piped")
        .write_all(input.as_bytes())
        .expect("Failed to write stdin");
    let output = child.wait_with_output().expect("Failed to wait for CLI");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

fn run_json(data_dir: &Path, args: &[&str]) -> serde_json::Value {
    let (stdout, stderr, code) = run_cli(data_dir, args);
    assert_eq!(code, 0, "CLI command failed: {args:?}\n{stderr}");
    serde_json::from_str(&stdout).expect("Failed to parse JSON output")
}

#[test]
fn test_first_run_lists_default_project() {
    let dir = TempDir::new().unwrap();
    let (stdout, _, code) = run_cli(dir.path(), &["project", "list"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("* default  健身"), "got: {stdout}");
    assert!(dir.path().join("daka-projects.json").exists());
}

#[test]
fn test_project_add_and_select() {
    let dir = TempDir::new().unwrap();
    let (stdout, _, code) = run_cli(dir.path(), &["project", "add", "读书"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("Project created:"));

    let projects = run_json(dir.path(), &["project", "list", "--json"]);
    let projects = projects.as_array().unwrap();
    assert_eq!(projects.len(), 2);
    assert_eq!(projects[0]["name"], "读书");
    assert_eq!(projects[1]["id"], "default");

    let (stdout, _, code) = run_cli(dir.path(), &["project", "select", "default"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("Active project: 健身"));

    let (stdout, _, _) = run_cli(dir.path(), &["project", "list"]);
    assert!(stdout.contains("* default"));
}

#[test]
fn test_blank_project_name_is_ignored() {
    let dir = TempDir::new().unwrap();
    let (stdout, _, code) = run_cli(dir.path(), &["project", "add", "   "]);
    assert_eq!(code, 0);
    assert!(stdout.contains("nothing added"));
    let projects = run_json(dir.path(), &["project", "list", "--json"]);
    assert_eq!(projects.as_array().unwrap().len(), 1);
}

#[test]
fn test_unknown_project_select_keeps_active() {
    let dir = TempDir::new().unwrap();
    let (stdout, _, code) = run_cli(dir.path(), &["project", "select", "nope"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("Unknown project: nope"));
}

#[test]
fn test_toggle_and_stats() {
    let dir = TempDir::new().unwrap();
    for day in ["2024-06-08", "2024-06-09", "2024-06-10"] {
        let (stdout, _, code) =
            run_cli(dir.path(), &["--today", "2024-06-10", "toggle", day, "--yes"]);
        assert_eq!(code, 0);
        assert!(stdout.contains("已打卡"), "got: {stdout}");
    }

    let stats = run_json(dir.path(), &["--today", "2024-06-10", "stats", "--json"]);
    assert_eq!(stats["total"], 3);
    assert_eq!(stats["most_recent"], "2024-06-10");
    assert_eq!(stats["streak"], 3);
    assert_eq!(stats["project"]["id"], "default");
    assert_eq!(
        stats["dates"],
        serde_json::json!(["2024-06-08", "2024-06-09", "2024-06-10"])
    );

    let (stdout, _, _) = run_cli(dir.path(), &["--today", "2024-06-10", "stats"]);
    assert!(stdout.contains("连续天数: 3"));
}

#[test]
fn test_toggle_twice_removes_check_in() {
    let dir = TempDir::new().unwrap();
    let args = ["--today", "2024-06-10", "toggle", "--yes"];
    run_cli(dir.path(), &args);
    let (stdout, _, code) = run_cli(dir.path(), &args);
    assert_eq!(code, 0);
    assert!(stdout.contains("2024-06-10 未打卡"));

    let stats = run_json(dir.path(), &["--today", "2024-06-10", "stats", "--json"]);
    assert_eq!(stats["total"], 0);
    assert!(stats["most_recent"].is_null());
}

#[test]
fn test_future_toggle_is_refused() {
    let dir = TempDir::new().unwrap();
    let (stdout, _, code) = run_cli(
        dir.path(),
        &["--today", "2024-06-10", "toggle", "2024-06-11", "--yes"],
    );
    assert_eq!(code, 0);
    assert!(stdout.contains("in the future"));
    let (stdout, _, _) = run_cli(dir.path(), &["status", "2024-06-11"]);
    assert!(stdout.contains("未打卡"));
}

#[test]
fn test_future_toggle_is_refused_without_prompt() {
    let dir = TempDir::new().unwrap();
    let (stdout, _, code) =
        run_cli_with_input(dir.path(), &["--today", "2024-06-10", "toggle", "2024-06-12"], "y\n");
    assert_eq!(code, 0);
    assert!(stdout.contains("2024-06-12 is in the future"), "got: {stdout}");
    assert!(!stdout.contains("确认?"));
    assert!(!dir.path().join("daka-checkins.json").exists());
}

#[test]
fn test_toggle_prompt_can_be_declined() {
    let dir = TempDir::new().unwrap();
    let (stdout, _, code) =
        run_cli_with_input(dir.path(), &["--today", "2024-06-10", "toggle"], "n\n");
    assert_eq!(code, 0);
    assert!(stdout.contains("Cancelled"));

    let (stdout, _, code) =
        run_cli_with_input(dir.path(), &["--today", "2024-06-10", "toggle"], "y\n");
    assert_eq!(code, 0);
    assert!(stdout.contains("2024-06-10 已打卡"));
}

#[test]
fn test_grid_json_shape() {
    let dir = TempDir::new().unwrap();
    let grid = run_json(dir.path(), &["--today", "2024-06-10", "grid", "--json"]);
    let weeks = grid["weeks"].as_array().unwrap();
    assert_eq!(weeks.len(), 53);
    assert!(weeks.iter().all(|w| w.as_array().unwrap().len() == 7));
    assert_eq!(grid["month_labels"].as_array().unwrap().len(), 53);
    assert_eq!(grid["end"], "2024-06-10");
}

#[test]
fn test_grid_text_has_seven_rows() {
    let dir = TempDir::new().unwrap();
    let (stdout, _, code) = run_cli(dir.path(), &["--today", "2024-06-10", "grid", "--days", "30"]);
    assert_eq!(code, 0);
    // project name, month header, seven weekday rows
    assert_eq!(stdout.lines().count(), 9);
}

#[test]
fn test_invalid_date_is_rejected() {
    let dir = TempDir::new().unwrap();
    let (_, stderr, code) = run_cli(dir.path(), &["status", "2024-02-30"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("not a valid calendar date"));
}

#[test]
fn test_config_get_set() {
    let dir = TempDir::new().unwrap();
    let (stdout, _, code) = run_cli(dir.path(), &["config", "get", "calendar.total_days"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "365");

    let (_, _, code) = run_cli(dir.path(), &["config", "set", "calendar.total_days", "30"]);
    assert_eq!(code, 0);
    let (stdout, _, _) = run_cli(dir.path(), &["config", "get", "calendar.total_days"]);
    assert_eq!(stdout.trim(), "30");

    let (_, _, code) = run_cli(dir.path(), &["config", "get", "calendar.nope"]);
    assert_ne!(code, 0);
}

#[test]
fn test_corrupt_projects_file_recovers() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("daka-projects.json"), "not json").unwrap();
    let projects = run_json(dir.path(), &["project", "list", "--json"]);
    assert_eq!(
        projects,
        serde_json::json!([{"id": "default", "name": "健身"}])
    );
}
