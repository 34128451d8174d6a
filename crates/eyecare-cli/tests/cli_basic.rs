//! Basic CLI E2E tests.
//!
//! Tests invoke CLI commands via cargo run and verify outputs. They run
//! against the dev data directory (EYECARE_ENV=dev).

use std::process::Command;

/// Run a CLI command and return (stdout, stderr, exit code).
fn run_cli(args: &[&str]) -> (String, String, i32) {
    let output = Command::new("cargo")
        .args(["run", "-p", "eyecare-cli", "--"])
        .args(args)
        .env("EYECARE_ENV", "dev")
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

#[test]
fn test_exercise_list() {
    let (stdout, _, code) = run_cli(&["exercise", "list"]);
    assert_eq!(code, 0, "Exercise list failed");
    assert!(stdout.contains("figure-eight"));
}

#[test]
fn test_exercise_list_json() {
    let (stdout, _, code) = run_cli(&["exercise", "list", "--json"]);
    assert_eq!(code, 0, "Exercise list JSON failed");
    let parsed: serde_json::Value = serde_json::from_str(&stdout).expect("invalid JSON");
    assert_eq!(parsed.as_array().map(|a| a.len()), Some(10));
}

#[test]
fn test_exercise_show() {
    let (stdout, _, code) = run_cli(&["exercise", "show", "figure-eight"]);
    assert_eq!(code, 0, "Exercise show failed");
    assert!(stdout.contains("Figure Eight"));
}

#[test]
fn test_exercise_show_unknown_id_is_not_a_crash() {
    let (stdout, _, code) = run_cli(&["exercise", "show", "no-such-id"]);
    assert_eq!(code, 0, "Unknown id must render, not fail");
    assert!(stdout.contains("exercise not found"));
}

#[test]
fn test_session_start_and_status() {
    let (_, _, code) = run_cli(&["session", "start", "palming"]);
    assert_eq!(code, 0, "Session start failed");

    let (stdout, _, code) = run_cli(&["session", "status"]);
    assert_eq!(code, 0, "Session status failed");
    assert!(stdout.contains("palming"));
}

#[test]
fn test_session_start_unknown_exercise() {
    let (stdout, _, code) = run_cli(&["session", "start", "bogus"]);
    assert_eq!(code, 0, "Unknown exercise must render, not fail");
    assert!(stdout.contains("exercise not found"));
}

#[test]
fn test_session_pause_resume_reset() {
    let (_, _, code) = run_cli(&["session", "start", "palming"]);
    assert_eq!(code, 0);
    let (_, _, code) = run_cli(&["session", "pause"]);
    assert_eq!(code, 0, "Session pause failed");
    let (_, _, code) = run_cli(&["session", "resume"]);
    assert_eq!(code, 0, "Session resume failed");
    let (_, _, code) = run_cli(&["session", "reset"]);
    assert_eq!(code, 0, "Session reset failed");
}

#[test]
fn test_session_tick() {
    let (_, _, code) = run_cli(&["session", "start", "palming"]);
    assert_eq!(code, 0);
    let (_, _, code) = run_cli(&["session", "tick"]);
    assert_eq!(code, 0, "Session tick failed");
}

#[test]
fn test_session_exit() {
    let (_, _, code) = run_cli(&["session", "start", "palming"]);
    assert_eq!(code, 0);
    let (_, _, code) = run_cli(&["session", "exit"]);
    assert_eq!(code, 0, "Session exit failed");
}

#[test]
fn test_history_list() {
    let (_, _, code) = run_cli(&["history", "list"]);
    assert_eq!(code, 0, "History list failed");
}

#[test]
fn test_history_list_json() {
    let (stdout, _, code) = run_cli(&["history", "list", "--json"]);
    assert_eq!(code, 0, "History list JSON failed");
    assert!(serde_json::from_str::<serde_json::Value>(&stdout).is_ok());
}

#[test]
fn test_history_today() {
    let (stdout, _, code) = run_cli(&["history", "today"]);
    assert_eq!(code, 0, "History today failed");
    assert!(stdout.trim().parse::<usize>().is_ok());
}

#[test]
fn test_config_get() {
    let (stdout, _, code) = run_cli(&["config", "get", "advisor.model"]);
    assert_eq!(code, 0, "Config get failed");
    assert!(stdout.contains("gemini"));
}

#[test]
fn test_config_set() {
    let (_, _, code) = run_cli(&["config", "set", "player.show_ready_screen", "true"]);
    assert_eq!(code, 0, "Config set failed");
}

#[test]
fn test_config_list() {
    let (stdout, _, code) = run_cli(&["config", "list"]);
    assert_eq!(code, 0, "Config list failed");
    assert!(serde_json::from_str::<serde_json::Value>(&stdout).is_ok());
}
