//! Binary-level tests: argument parsing, exit codes, and stdout/stderr split

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// The binary run from an empty directory with a clean environment
fn safestate(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("safestate").unwrap();
    cmd.current_dir(dir.path())
        .env_remove("RUST_LOG")
        .env_remove("SAFESTATE_OUTPUT")
        .env_remove("SAFESTATE_LOG_LEVEL")
        .env("SAFESTATE_COLOR", "never");
    cmd
}

#[test]
fn no_subcommand_prints_hint() {
    let dir = TempDir::new().unwrap();
    safestate(&dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("safestate --help"));
}

#[test]
fn safety_on_safe_example() {
    let dir = TempDir::new().unwrap();
    safestate(&dir)
        .args(["safety", "--example", "classic-safe", "--fail-on-unsafe"])
        .assert()
        .code(0)
        .stdout(predicate::str::contains("Safety Status: SAFE STATE"))
        .stdout(predicate::str::contains("Safe Sequence: P0 -> P1 -> P2"));
}

#[test]
fn unsafe_state_exits_zero_without_flag() {
    let dir = TempDir::new().unwrap();
    safestate(&dir)
        .args(["safety", "--example", "unsafe"])
        .assert()
        .code(0)
        .stdout(predicate::str::contains("UNSAFE STATE"));
}

#[test]
fn unsafe_state_exits_two_with_flag() {
    let dir = TempDir::new().unwrap();
    safestate(&dir)
        .args(["safety", "--example", "unsafe", "--fail-on-unsafe"])
        .assert()
        .code(2);
}

#[test]
fn inline_matrices() {
    let dir = TempDir::new().unwrap();
    safestate(&dir)
        .args([
            "safety",
            "--available",
            "3 3 2",
            "--allocation",
            "0 1 0; 2 0 0; 3 0 2; 2 1 1; 0 0 2",
            "--max-need",
            "7 5 3; 3 2 2; 9 0 2; 2 2 2; 4 3 3",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Safe Sequence: P1 -> P3 -> P4 -> P0 -> P2"));
}

#[test]
fn negative_input_is_an_error() {
    let dir = TempDir::new().unwrap();
    safestate(&dir)
        .args([
            "safety",
            "--available",
            "-1 0",
            "--allocation",
            "0 0",
            "--max-need",
            "0 0",
        ])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("negative"));
}

#[test]
fn detect_with_fail_flag() {
    let dir = TempDir::new().unwrap();
    safestate(&dir)
        .args(["detect", "--example", "circular-wait", "--fail-on-deadlock"])
        .assert()
        .code(2)
        .stdout(predicate::str::contains("Cycle 1: P0 -> P1 -> P0"));
}

#[test]
fn json_output_parses() {
    let dir = TempDir::new().unwrap();
    let output = safestate(&dir)
        .args(["detect", "--example", "linear-chain", "--output", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["is_deadlocked"], false);
    assert_eq!(value["completion_order"], serde_json::json!(["P2", "P1", "P0"]));
}

#[test]
fn scenario_file_round_trip() {
    let dir = TempDir::new().unwrap();
    let exported = safestate(&dir)
        .args(["examples", "complex"])
        .output()
        .unwrap();
    std::fs::write(dir.path().join("complex.toml"), &exported.stdout).unwrap();

    safestate(&dir)
        .args(["detect", "--scenario", "complex.toml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deadlock Status: DETECTED"))
        .stdout(predicate::str::contains("Deadlocked Processes: P0, P1, P2, P3"));
}

#[test]
fn unknown_example_lists_alternatives() {
    let dir = TempDir::new().unwrap();
    safestate(&dir)
        .args(["graph", "--example", "nope"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("classic-safe"));
}

#[test]
fn logs_go_to_stderr() {
    let dir = TempDir::new().unwrap();
    safestate(&dir)
        .args(["--log-level", "2", "safety", "--example", "classic-safe", "-o", "json"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("{"))
        .stderr(predicate::str::contains("Safety check"));
}

#[test]
fn dotenv_sets_output_format() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join(".env"), "SAFESTATE_OUTPUT=json\n").unwrap();
    safestate(&dir)
        .args(["target", "P2", "--example", "classic-safe"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"achievable\": true"));
}
