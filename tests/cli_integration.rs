//! CLI integration tests for dragboard
//!
//! Runs the binary against scripts and config files in temp directories.

use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Get a command instance for the dragboard binary
fn dragboard_cmd() -> assert_cmd::Command {
    let mut cmd = assert_cmd::Command::new(assert_cmd::cargo::cargo_bin!("dragboard"));
    cmd.env_remove("DRAGBOARD_CONFIG").env_remove("RUST_LOG");
    cmd
}

fn write_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

const COLUMN_SWAP: &str = r#"[
    {"op": "add_column", "title": "Todo"},
    {"op": "add_column", "title": "Done"},
    {"op": "add_task", "column": "c1"},
    {"op": "add_task", "column": "c1"},
    {"op": "drag_start", "active": "c1"},
    {"op": "drag_end", "active": "c1", "over": "c2"}
]"#;

const CANCELLED_TASK_DRAG: &str = r#"[
    {"op": "add_column"},
    {"op": "add_column"},
    {"op": "add_task", "column": "c1"},
    {"op": "drag_start", "active": "t1"},
    {"op": "drag_over", "active": "t1", "over": "c2"},
    {"op": "drag_end", "active": "t1"}
]"#;

// =============================================================================
// Replay Tests
// =============================================================================

#[test]
fn test_replay_prints_final_board() {
    let dir = TempDir::new().unwrap();
    let script = write_file(&dir, "swap.json", COLUMN_SWAP);

    dragboard_cmd()
        .args(["replay", "--ids", "sequential"])
        .arg(&script)
        .assert()
        .success()
        .stdout(predicate::eq(
            "Done (c2)\n  (empty)\nTodo (c1)\n  - Task 1 (t1)\n  - Task 2 (t2)\n\
             Applied 6 step(s), skipped 0\n",
        ));
}

#[test]
fn test_replay_json_output() {
    let dir = TempDir::new().unwrap();
    let script = write_file(&dir, "swap.json", COLUMN_SWAP);

    let output = dragboard_cmd()
        .args(["--format", "json", "replay", "--ids", "sequential"])
        .arg(&script)
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["board"]["columns"][0]["id"], "c2");
    assert_eq!(json["board"]["columns"][1]["title"], "Todo");
    assert_eq!(json["board"]["tasks"][1]["content"], "Task 2");
    assert_eq!(json["summary"]["applied"], 6);
    assert_eq!(json["summary"]["skipped"], 0);
}

#[test]
fn test_replay_reports_skipped_steps() {
    let dir = TempDir::new().unwrap();
    let script = write_file(
        &dir,
        "stale.json",
        r#"[{"op": "add_column"}, {"op": "drag_start", "active": "t9"}]"#,
    );

    dragboard_cmd()
        .args(["replay", "--ids", "sequential"])
        .arg(&script)
        .assert()
        .success()
        .stdout(predicate::str::contains("Applied 1 step(s), skipped 1"))
        .stderr(predicate::str::contains("skipping step"));
}

#[test]
fn test_replay_hash_ids() {
    let dir = TempDir::new().unwrap();
    let script = write_file(&dir, "one.json", r#"[{"op": "add_column", "title": "Todo"}]"#);

    dragboard_cmd()
        .args(["replay", "--ids", "hash"])
        .arg(&script)
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"^Todo \(c-[0-9a-f]{7}\)\n").unwrap());
}

#[test]
fn test_replay_missing_script_fails() {
    let dir = TempDir::new().unwrap();

    dragboard_cmd()
        .arg("replay")
        .arg(dir.path().join("nope.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load script"));
}

#[test]
fn test_replay_invalid_script_fails() {
    let dir = TempDir::new().unwrap();
    let script = write_file(&dir, "bad.json", r#"[{"op": "teleport"}]"#);

    dragboard_cmd()
        .arg("replay")
        .arg(&script)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid script"));
}

// =============================================================================
// Config Tests
// =============================================================================

#[test]
fn test_config_prints_defaults() {
    let dir = TempDir::new().unwrap();
    let config = write_file(&dir, "config.toml", "");

    dragboard_cmd()
        .arg("--config")
        .arg(&config)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("activation_distance = 3"))
        .stdout(predicate::str::contains("cancel_policy = \"keep\""));
}

#[test]
fn test_config_from_env() {
    let dir = TempDir::new().unwrap();
    let config = write_file(&dir, "config.toml", "[drag]\nactivation_distance = 7\n");

    dragboard_cmd()
        .env("DRAGBOARD_CONFIG", &config)
        .args(["--format", "json", "config"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"activation_distance\":7"));
}

#[test]
fn test_invalid_config_fails() {
    let dir = TempDir::new().unwrap();
    let config = write_file(&dir, "config.toml", "[ui]\ncolumn_width = 4\n");

    dragboard_cmd()
        .arg("--config")
        .arg(&config)
        .arg("config")
        .assert()
        .failure()
        .stderr(predicate::str::contains("column_width"));
}

#[test]
fn test_missing_explicit_config_fails() {
    let dir = TempDir::new().unwrap();

    dragboard_cmd()
        .arg("--config")
        .arg(dir.path().join("missing.toml"))
        .arg("config")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read config"));
}

#[test]
fn test_cancel_policy_keep_vs_revert() {
    let dir = TempDir::new().unwrap();
    let script = write_file(&dir, "cancel.json", CANCELLED_TASK_DRAG);
    let keep = write_file(&dir, "keep.toml", "");
    let revert = write_file(&dir, "revert.toml", "[drag]\ncancel_policy = \"revert\"\n");

    let column_of_t1 = |config: &PathBuf| -> serde_json::Value {
        let output = dragboard_cmd()
            .arg("--config")
            .arg(config)
            .args(["--format", "json", "replay", "--ids", "sequential"])
            .arg(&script)
            .output()
            .unwrap();
        assert!(output.status.success());
        let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        json["board"]["tasks"][0]["column_id"].clone()
    };

    assert_eq!(column_of_t1(&keep), "c2");
    assert_eq!(column_of_t1(&revert), "c1");
}
