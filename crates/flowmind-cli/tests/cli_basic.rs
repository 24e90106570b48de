//! Basic CLI E2E tests.
//!
//! Tests invoke the built binary against a temporary FLOWMIND_HOME and
//! verify outputs.

use std::path::Path;
use std::process::Command;

/// Run a CLI command and return (code, stdout, stderr).
fn run_cli(home: &Path, args: &[&str]) -> (i32, String, String) {
    let output = Command::new(env!("CARGO_BIN_EXE_flowmind"))
        .env("FLOWMIND_HOME", home)
        .env_remove("RUST_LOG")
        .args(args)
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (code, stdout, stderr)
}

fn run_json(home: &Path, args: &[&str]) -> serde_json::Value {
    let (code, stdout, stderr) = run_cli(home, args);
    assert_eq!(code, 0, "{args:?} failed: {stderr}");
    serde_json::from_str(&stdout).expect("stdout is JSON")
}

fn add_task(home: &Path, text: &str) -> String {
    let task = run_json(home, &["task", "add", text, "--context", "work"]);
    task["id"].as_str().unwrap().to_string()
}

#[test]
fn test_task_add_and_list() {
    let home = tempfile::tempdir().unwrap();
    let (code, stdout, stderr) = run_cli(home.path(), &["task", "add", "Write the release notes"]);
    assert_eq!(code, 0);
    assert!(stderr.contains("Task created:"));
    let task: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(task["status"], "pending");
    assert_eq!(task["metadata"]["executionType"], "do");

    let tasks = run_json(home.path(), &["task", "list"]);
    assert_eq!(tasks.as_array().unwrap().len(), 1);
    assert!(home.path().join("state.json").exists());
}

#[test]
fn test_task_analyze_does_not_store() {
    let home = tempfile::tempdir().unwrap();
    let meta = run_json(home.path(), &["task", "analyze", "quick but comprehensive"]);
    assert_eq!(meta["effort"], "low");
    let tasks = run_json(home.path(), &["task", "list"]);
    assert!(tasks.as_array().unwrap().is_empty());
}

#[test]
fn test_blank_task_is_rejected() {
    let home = tempfile::tempdir().unwrap();
    let (code, _, stderr) = run_cli(home.path(), &["task", "add", "   "]);
    assert_eq!(code, 1);
    assert!(stderr.contains("error:"));
}

#[test]
fn test_task_events_and_unknown_id() {
    let home = tempfile::tempdir().unwrap();
    let id = add_task(home.path(), "Build the export button");

    let event = run_json(home.path(), &["task", "complete", &id]);
    assert_eq!(event["type"], "task_complete");
    assert_eq!(event["task"]["context"], "work");

    let pending = run_json(home.path(), &["task", "list", "--pending"]);
    assert!(pending.as_array().unwrap().is_empty());

    let (code, _, stderr) = run_cli(home.path(), &["task", "skip", "missing-id"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("missing-id"));
}

#[test]
fn test_workflow_generate_variant_and_report() {
    let home = tempfile::tempdir().unwrap();
    for i in 0..10 {
        add_task(home.path(), &format!("Write chapter {i} of the handbook"));
    }

    let workflow = run_json(home.path(), &["workflow", "generate"]);
    assert_eq!(workflow["status"], "active");
    assert_eq!(workflow["context"], "focus");
    assert_eq!(workflow["phases"]["planning"].as_array().unwrap().len(), 3);
    assert_eq!(workflow["phases"]["execution"].as_array().unwrap().len(), 6);
    assert_eq!(workflow["checkpoints"].as_array().unwrap().len(), 1);

    let quick = run_json(home.path(), &["workflow", "variant", "quick"]);
    assert_eq!(quick["variant"], "quick");
    assert_eq!(quick["phases"]["execution"].as_array().unwrap().len(), 7);
    assert_eq!(quick["id"], workflow["id"]);

    let regenerated = run_json(home.path(), &["workflow", "generate"]);
    assert_ne!(regenerated["id"], workflow["id"]);
    let state = std::fs::read_to_string(home.path().join("state.json")).unwrap();
    let state: serde_json::Value = serde_json::from_str(&state).unwrap();
    let statuses: Vec<&str> = state["workflows"]
        .as_array()
        .unwrap()
        .iter()
        .map(|w| w["status"].as_str().unwrap())
        .collect();
    assert_eq!(statuses, vec!["paused", "active"]);

    let report = run_json(home.path(), &["workflow", "report"]);
    assert_eq!(report["usage"], 0.0);

    let rebalance = run_json(home.path(), &["workflow", "rebalance"]);
    assert_eq!(rebalance[0]["action"], "none");
}

#[test]
fn test_workflow_report_without_workflow_fails() {
    let home = tempfile::tempdir().unwrap();
    let (code, _, stderr) = run_cli(home.path(), &["workflow", "report"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("No active workflow"));
}

#[test]
fn test_analyze_commands_on_empty_state() {
    let home = tempfile::tempdir().unwrap();

    let workload = run_json(home.path(), &["analyze", "workload"]);
    assert_eq!(workload["index"], 0.0);
    assert_eq!(workload["level"], "light");
    assert_eq!(workload["avgClarity"], 1.0);

    let behavior = run_json(home.path(), &["analyze", "behavior"]);
    assert_eq!(behavior["momentum"], "flowing");
    assert_eq!(behavior["modeSwitching"]["detected"], false);
    assert!(behavior.get("cognitiveLoad").is_some());

    let intervene = run_json(home.path(), &["analyze", "intervene"]);
    assert_eq!(intervene["should"], false);

    let productivity = run_json(home.path(), &["analyze", "productivity"]);
    assert_eq!(productivity["level"], "stable");

    let suggestion = run_json(home.path(), &["analyze", "suggest", "unknown"]);
    assert_eq!(suggestion["action"], "organize");

    let debt = run_json(home.path(), &["analyze", "debt"]);
    assert_eq!(debt["vagueTasks"], 0);
    assert_eq!(debt["pendingDecisions"], 0);

    let momentum = run_json(home.path(), &["analyze", "momentum"]);
    assert_eq!(momentum["frictionText"], "—");

    for cmd in ["cognitive", "patterns", "pulses"] {
        run_json(home.path(), &["analyze", cmd]);
    }
}

#[test]
fn test_explicit_state_path() {
    let home = tempfile::tempdir().unwrap();
    let state = home.path().join("elsewhere").join("snapshot.json");
    let state_arg = state.to_str().unwrap();

    run_json(home.path(), &["--state", state_arg, "task", "add", "Tidy the desk"]);
    assert!(state.exists());
    assert!(!home.path().join("state.json").exists());

    let summary = run_json(
        home.path(),
        &["day", "summary", "--date", "2024-03-01", "--state", state_arg],
    );
    assert_eq!(summary["summary"], "0 of 1 tasks completed");
    let days = run_json(home.path(), &["day", "list", "--state", state_arg]);
    assert!(days.get("2024-03-01").is_some());
}

#[test]
fn test_config_get_set_list_reset() {
    let home = tempfile::tempdir().unwrap();

    let (code, stdout, _) = run_cli(home.path(), &["config", "get", "engine.ai_mode"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "true");

    let (code, _, _) = run_cli(home.path(), &["config", "set", "engine.ai_mode", "false"]);
    assert_eq!(code, 0);
    let task = run_json(home.path(), &["task", "add", "maybe?"]);
    assert_eq!(task["metadata"]["clarity"], 0.7);

    let (code, stdout, _) = run_cli(home.path(), &["config", "list"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("engine.ai_mode = false"));

    let (code, _, _) = run_cli(home.path(), &["config", "set", "engine.nope", "1"]);
    assert_eq!(code, 1);

    let (code, _, _) = run_cli(home.path(), &["config", "reset"]);
    assert_eq!(code, 0);
    let (_, stdout, _) = run_cli(home.path(), &["config", "get", "engine.ai_mode"]);
    assert_eq!(stdout.trim(), "true");
}

#[test]
fn test_completions() {
    let home = tempfile::tempdir().unwrap();
    let (code, stdout, _) = run_cli(home.path(), &["completions", "bash"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("flowmind"));
}
