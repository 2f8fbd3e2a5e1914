//! End-to-end tests for `safestate detect` and `safestate graph`
//!
//! Covers:
//! - Both detection strategies on single- and multi-instance snapshots
//! - `--fail-on-deadlock`
//! - Wait-for graph text, JSON and DOT output

use anyhow::Result;
use serde::Deserialize;
use safestate_tests::{PIPELINE, PRINTER_SCANNER, TestEnvironment, fixture_path};

/// Fields of the JSON detection report these tests read
#[derive(Debug, Deserialize)]
struct DetectionJson {
    strategy: String,
    is_deadlocked: bool,
    deadlocked: Vec<String>,
    cycles: Vec<Vec<String>>,
    completion_order: Vec<String>,
    single_instance: bool,
}

fn path_of(name: &str) -> String {
    fixture_path(name).display().to_string()
}

#[test]
fn test_circular_wait_detected() -> Result<()> {
    let env = TestEnvironment::new()?;
    let run = env.run([
        "detect",
        "--scenario",
        &path_of(PRINTER_SCANNER),
        "--fail-on-deadlock",
    ])?;

    assert!(run.flagged());
    assert!(run.stdout.contains("Deadlock Status: DETECTED"));
    assert!(run.stdout.contains("Deadlocked Processes: editor, spooler"));
    assert!(run.stdout.contains("Cycle 1: editor -> spooler -> editor"));
    Ok(())
}

#[test]
fn test_strategies_agree_on_single_instance() -> Result<()> {
    let env = TestEnvironment::new()?;
    let scenario = path_of(PRINTER_SCANNER);

    let mut reports = Vec::new();
    for strategy in ["reclamation", "cycle-search"] {
        let run = env.run([
            "detect",
            "--scenario",
            &scenario,
            "--strategy",
            strategy,
            "--output",
            "json",
        ])?;
        let report: DetectionJson = serde_json::from_value(run.json()?)?;
        assert_eq!(report.strategy, strategy);
        assert!(report.single_instance);
        reports.push(report);
    }

    assert_eq!(reports[0].deadlocked, reports[1].deadlocked);
    assert_eq!(reports[0].cycles, reports[1].cycles);
    Ok(())
}

#[test]
fn test_multi_instance_drains() -> Result<()> {
    let env = TestEnvironment::new()?;
    let run = env.run([
        "detect",
        "--scenario",
        &path_of(PIPELINE),
        "--output",
        "json",
        "--fail-on-deadlock",
    ])?;

    assert!(!run.flagged());
    let report: DetectionJson = serde_json::from_value(run.json()?)?;
    assert!(!report.is_deadlocked);
    assert!(!report.single_instance);
    assert!(report.deadlocked.is_empty());
    assert_eq!(report.completion_order, vec!["test", "deploy", "build"]);
    Ok(())
}

#[test]
fn test_reclamation_finds_multi_instance_deadlock() -> Result<()> {
    let env = TestEnvironment::new()?;
    let run = env.run(["detect", "--example", "multi-instance", "--fail-on-deadlock"])?;

    assert!(run.flagged());
    assert!(run.stdout.contains("Strategy: reclamation"));
    Ok(())
}

#[test]
fn test_graph_text_and_json() -> Result<()> {
    let env = TestEnvironment::new()?;
    let scenario = path_of(PRINTER_SCANNER);

    let text = env.run(["graph", "--scenario", &scenario])?;
    assert!(text.stdout.contains("Holders:"));
    assert!(text.stdout.contains("Wait-for edges:"));
    assert!(text.stdout.contains("Cycle 1: editor -> spooler -> editor"));

    let json = env.run(["graph", "--scenario", &scenario, "--output", "json"])?.json()?;
    assert_eq!(json["holders"][0]["resource"], "printer");
    assert_eq!(json["holders"][0]["holder"], "editor");
    assert_eq!(json["wait_for"][0]["waits_on"], serde_json::json!(["spooler"]));
    assert_eq!(json["cycles"], serde_json::json!([["editor", "spooler"]]));
    Ok(())
}

#[test]
fn test_graph_dot_highlights_deadlock() -> Result<()> {
    let env = TestEnvironment::new()?;

    let deadlocked = env.run(["graph", "--scenario", &path_of(PRINTER_SCANNER), "--dot"])?;
    assert!(deadlocked.stdout.starts_with("digraph"));
    assert!(deadlocked.stdout.contains("#e74c3c"));

    let clear = env.run(["graph", "--scenario", &path_of(PIPELINE), "--dot"])?;
    assert!(clear.stdout.starts_with("digraph"));
    assert!(!clear.stdout.contains("#e74c3c"));
    Ok(())
}
