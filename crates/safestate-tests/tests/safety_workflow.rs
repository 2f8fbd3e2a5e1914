//! End-to-end tests for `safestate safety` and `safestate target`
//!
//! Covers:
//! - Safe and unsafe verdicts from files, examples, and inline matrices
//! - Sequence verification and `--fail-on-unsafe`
//! - Targeted reachability

use anyhow::Result;
use safestate_tests::{TEXTBOOK, TestEnvironment, fixture_path};

fn textbook() -> String {
    fixture_path(TEXTBOOK).display().to_string()
}

#[test]
fn test_safe_state_from_file() -> Result<()> {
    let env = TestEnvironment::new()?;
    let run = env.run(["safety", "--scenario", &textbook()])?;

    assert!(!run.flagged());
    assert!(run.stdout.contains("Safety Status: SAFE STATE"));
    assert!(run.stdout.contains("Safe Sequence: P1 -> P3 -> P4 -> P0 -> P2"));
    assert!(run.stdout.contains("Analysis Iterations: 2"));
    assert!(!run.stdout.contains("Blocked processes"));
    Ok(())
}

#[test]
fn test_unsafe_state_reports_blockers() -> Result<()> {
    let env = TestEnvironment::new()?;
    let run = env.run(["safety", "--example", "unsafe", "--fail-on-unsafe"])?;

    assert!(run.flagged());
    assert!(run.stdout.contains("UNSAFE STATE"));
    assert!(run.stdout.contains("Some processes cannot be satisfied in any order."));
    assert!(run.stdout.contains("Blocked processes:"));
    Ok(())
}

#[test]
fn test_inline_override_turns_file_unsafe() -> Result<()> {
    let env = TestEnvironment::new()?;
    let run = env.run([
        "safety",
        "--scenario",
        &textbook(),
        "--available",
        "0 0 0",
        "--fail-on-unsafe",
    ])?;

    assert!(run.flagged());
    assert!(run.stdout.contains("Incomplete sequence: None"));
    Ok(())
}

#[test]
fn test_verify_sequence() -> Result<()> {
    let env = TestEnvironment::new()?;

    let good = env.run([
        "safety",
        "--scenario",
        &textbook(),
        "--verify",
        "P3,P1,P4,P0,P2",
        "--fail-on-unsafe",
    ])?;
    assert!(!good.flagged());
    assert!(good.stdout.contains("valid safe sequence"));

    let bad = env.run([
        "safety",
        "--scenario",
        &textbook(),
        "--verify",
        "P0,P1,P2,P3,P4",
        "--fail-on-unsafe",
    ])?;
    assert!(bad.flagged());
    assert!(bad.stdout.contains("not a safe sequence"));
    Ok(())
}

#[test]
fn test_safety_json_report() -> Result<()> {
    let env = TestEnvironment::new()?;
    let run = env.run(["safety", "--example", "unsafe", "--output", "json"])?;
    let json = run.json()?;

    assert_eq!(json["is_safe"], false);
    assert!(json["blocked"].as_array().is_some_and(|b| !b.is_empty()));
    assert!(json["trace"].as_array().is_some_and(|t| !t.is_empty()));
    Ok(())
}

#[test]
fn test_target_reachability() -> Result<()> {
    let env = TestEnvironment::new()?;

    let reachable = env.run(["target", "P4", "--scenario", &textbook()])?;
    assert!(reachable.stdout.contains("Target P4: ACHIEVABLE"));
    assert!(reachable.stdout.contains("Sequence: P1 -> P3 -> P4"));

    let unknown = env.run(["target", "P9", "--scenario", &textbook(), "--fail-on-unsafe"])?;
    assert!(unknown.flagged());
    assert!(unknown.stdout.contains("Target P9: NOT ACHIEVABLE"));
    Ok(())
}

#[test]
fn test_invalid_input_is_an_error() -> Result<()> {
    let env = TestEnvironment::new()?;

    // allocation exceeds max_need for P0
    let err = env
        .run([
            "safety",
            "--available",
            "1",
            "--allocation",
            "3",
            "--max-need",
            "2",
        ])
        .unwrap_err();
    assert!(format!("{err:#}").contains("P0"));

    let missing = env.run(["safety", "--example", "circular-wait"]).unwrap_err();
    assert!(format!("{missing:#}").contains("available"));
    Ok(())
}
