//! Basic CLI E2E tests.
//!
//! Tests invoke the built binary against a throwaway board file.

use std::path::Path;
use std::process::Command;

use serde::Deserialize;

/// Run a CLI command and return (stdout, stderr, code).
fn run_cli(board: &Path, args: &[&str]) -> (String, String, i32) {
    let output = Command::new(env!("CARGO_BIN_EXE_dayplan"))
        .arg("--board")
        .arg(board)
        .args(args)
        .env_remove("DAYPLAN_CONFIG")
        .env("DAYPLAN_ENV", "dev")
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

fn run_cli_success(board: &Path, args: &[&str]) -> String {
    let (stdout, stderr, code) = run_cli(board, args);
    assert_eq!(code, 0, "CLI command failed: {:?}\n{}", args, stderr);
    stdout
}

#[derive(Deserialize)]
struct PlanOutput {
    items: Vec<serde_json::Value>,
    focus_minutes: i64,
    buffer_minutes: i64,
    finish_time: String,
    unscheduled: Vec<String>,
}

#[test]
fn test_empty_plan() {
    let dir = tempfile::tempdir().unwrap();
    let board = dir.path().join("board.json");

    let out = run_cli_success(&board, &["plan", "--json"]);
    let plan: PlanOutput = serde_json::from_str(&out).unwrap();
    assert!(plan.items.is_empty());
    assert_eq!(plan.focus_minutes, 0);
    assert_eq!(plan.buffer_minutes, 600);
    assert_eq!(plan.finish_time, "08:00");
}

#[test]
fn test_add_tasks_and_plan() {
    let dir = tempfile::tempdir().unwrap();
    let board = dir.path().join("board.json");

    run_cli_success(&board, &["day", "end", "10:30"]);
    for title in ["First", "Second", "Third"] {
        let out = run_cli_success(&board, &["task", "add", title, "--duration", "60"]);
        assert!(out.contains("Task created:"));
    }

    let out = run_cli_success(&board, &["plan", "--json"]);
    let plan: PlanOutput = serde_json::from_str(&out).unwrap();
    assert_eq!(plan.items.len(), 2);
    assert_eq!(plan.items[0]["start"], "08:00");
    assert_eq!(plan.items[1]["end"], "10:00");
    assert_eq!(plan.buffer_minutes, 30);
    assert_eq!(plan.unscheduled.len(), 1);

    let text = run_cli_success(&board, &["plan"]);
    assert!(text.contains("Does not fit: Third"));
}

#[test]
fn test_toggle_and_clear_done() {
    let dir = tempfile::tempdir().unwrap();
    let board = dir.path().join("board.json");

    run_cli_success(&board, &["task", "add", "Deck", "--must-do", "--priority", "high"]);
    run_cli_success(&board, &["task", "add", "Mail", "--duration", "15"]);

    let out = run_cli_success(&board, &["task", "list", "--json"]);
    let tasks: Vec<serde_json::Value> = serde_json::from_str(&out).unwrap();
    assert_eq!(tasks.len(), 2);
    assert_eq!(tasks[0]["must_do"], true);
    let mail_id = tasks[1]["id"].as_str().unwrap().to_string();

    let out = run_cli_success(&board, &["task", "done", &mail_id[..8]]);
    assert!(out.starts_with("done"));

    let out = run_cli_success(&board, &["task", "clear-done"]);
    assert!(out.contains("removed 1"));

    let out = run_cli_success(&board, &["task", "list", "--json"]);
    let tasks: Vec<serde_json::Value> = serde_json::from_str(&out).unwrap();
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0]["title"], "Deck");
}

#[test]
fn test_day_start_pushes_end() {
    let dir = tempfile::tempdir().unwrap();
    let board = dir.path().join("board.json");

    let out = run_cli_success(&board, &["day", "start", "19:00"]);
    assert!(out.contains("19:00-23:00"));

    let (_, stderr, code) = run_cli(&board, &["day", "end", "18:00"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("error:"));
}

#[test]
fn test_invalid_inputs_fail() {
    let dir = tempfile::tempdir().unwrap();
    let board = dir.path().join("board.json");

    let (_, stderr, code) = run_cli(&board, &["task", "add", "X", "--due", "9am"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("9am"));

    let (_, _, code) = run_cli(&board, &["task", "add", "   "]);
    assert_eq!(code, 1);

    let (_, _, code) = run_cli(&board, &["task", "done", "missing"]);
    assert_eq!(code, 1);
}

#[test]
fn test_time_conversions() {
    let dir = tempfile::tempdir().unwrap();
    let board = dir.path().join("board.json");

    assert_eq!(run_cli_success(&board, &["time", "to-minutes", "09:15"]).trim(), "555");
    assert_eq!(run_cli_success(&board, &["time", "from-minutes", "555"]).trim(), "09:15");
    assert_eq!(run_cli_success(&board, &["time", "from-minutes", "-5"]).trim(), "00:00");
}

#[test]
fn test_insights_are_seeded() {
    let dir = tempfile::tempdir().unwrap();
    let board = dir.path().join("board.json");
    run_cli_success(&board, &["task", "add", "Deck", "--energy", "high"]);

    let first = run_cli_success(&board, &["insights", "--seed", "9", "--json"]);
    let second = run_cli_success(&board, &["insights", "--seed", "9", "--json"]);
    assert_eq!(first, second);

    let json: serde_json::Value = serde_json::from_str(&first).unwrap();
    assert_eq!(json["open_tasks"], 1);
    assert_eq!(json["dominant_energy"], "high");
}

#[test]
fn test_explicit_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let board = dir.path().join("board.json");
    let config = dir.path().join("config.toml");
    std::fs::write(&config, "focus_threshold_minutes = 30\nbreak_minutes = 10\n").unwrap();
    let config = config.to_str().unwrap();

    run_cli_success(&board, &["task", "add", "A", "--duration", "30"]);
    run_cli_success(&board, &["task", "add", "B", "--duration", "30"]);

    let out = run_cli_success(&board, &["--config", config, "plan", "--json"]);
    let plan: PlanOutput = serde_json::from_str(&out).unwrap();
    assert_eq!(plan.items.len(), 3);
    assert_eq!(plan.items[1]["type"], "break");
    assert_eq!(plan.finish_time, "09:10");

    let out = run_cli_success(&board, &["--config", config, "config", "show"]);
    assert!(out.contains("break_minutes = 10"));
}
