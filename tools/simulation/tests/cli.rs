//! End-to-end runs of the stable-marriage binary
//!
//! Checks exit codes and output streams for file input, corrupt input and
//! batch mode.

use std::process::{Command, Output};
use tempfile::TempDir;

fn stable_marriage(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_stable-marriage"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to launch stable-marriage")
}

fn input_file(dir: &TempDir, json: &str) -> String {
    let path = dir.path().join("prefs.json");
    std::fs::write(&path, json).unwrap();
    path.to_string_lossy().into_owned()
}

#[test]
fn test_valid_input_exits_zero() {
    let tmp = TempDir::new().unwrap();
    let input = input_file(
        &tmp,
        r#"{"proposers":[[1,0,2],[0,1,2],[0,1,2]],"receivers":[[0,1,2],[1,0,2],[0,1,2]]}"#,
    );

    let output = stable_marriage(&["--input", &input]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    assert!(stdout.contains("SOLUTION\nProposer[0] + Receiver[1]  [proposer-rank: 0, receiver-rank: 1]"));
    assert!(stdout.contains("Matching is STABLE."));
}

#[test]
fn test_corrupt_input_exits_nonzero() {
    let tmp = TempDir::new().unwrap();
    let input = input_file(
        &tmp,
        r#"{"proposers":[[1,1,2],[0,1,2],[0,1,2]],"receivers":[[0,1,2],[1,0,2],[0,1,2]]}"#,
    );

    let output = stable_marriage(&["--input", &input]);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(!output.status.success());
    assert!(stderr.contains("ranks candidate 1 more than once"), "stderr: {}", stderr);
    assert!(output.stdout.is_empty());
}

#[test]
fn test_non_integer_couples_is_usage_error() {
    let output = stable_marriage(&["three"]);
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_trials_json_prints_metrics() {
    let output = stable_marriage(&["8", "--seed", "5", "--trials", "12", "--json"]);
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["version"], simulation::VERSION);
    assert_eq!(value["metrics"]["trials"], 12);
    assert_eq!(value["metrics"]["total_pairs"], 96);
}
