use super::*;
use crate::analysis::{achievable_for, check_safety, detect, detect_with, wait_for_graph};
use crate::scenario::{builtin, builtins};

fn safety(name: &str) -> (SafetyInput, SafetyReport) {
    let input = builtin(name).unwrap().safety_input().unwrap();
    let report = check_safety(&input).unwrap();
    (input, report)
}

fn detection(name: &str) -> DetectionInput {
    builtin(name).unwrap().detection_input().unwrap()
}

#[test]
fn test_safe_report_layout() {
    let styles = StyleManager::plain();
    let (input, report) = safety("classic-safe");
    let text = render_safety(&styles, &input, &report);

    assert!(text.starts_with("Safety Status: SAFE STATE\n"));
    assert!(text.contains("Processes: P0, P1, P2\n"));
    assert!(text.contains("Available: [10, 5, 7]\n"));
    assert!(text.contains("Safe Sequence: P0 -> P1 -> P2\n"));
    assert!(text.contains("Analysis Iterations: 1\n"));
    assert!(text.contains("\nIteration 1:\n"));
    assert!(text.contains("  P0:  ✓ ALLOCATED  need [7, 4, 3]  work [10, 5, 7]\n"));
    assert!(text.contains("  P2:  ✓ ALLOCATED  need [6, 0, 0]  work [12, 6, 7]\n"));
    assert!(text.contains("Final work: [15, 6, 9]"));
    assert!(!text.contains("Blocked"));
}

#[test]
fn test_unsafe_report_explains_blocked_processes() {
    let styles = StyleManager::plain();
    let (input, report) = safety("unsafe");
    let text = render_safety(&styles, &input, &report);

    assert!(text.starts_with("Safety Status: UNSAFE STATE\n"));
    assert!(text.contains("Incomplete sequence: P1, P2\n"));
    assert!(text.contains("Some processes cannot be satisfied in any order.\n"));
    assert!(text.contains("Analysis Iterations: 2\n"));
    assert!(text.contains("✗ WAITING"));
    assert!(text.contains("Blocked processes:\n  P0: R0 needs 4, 3 free\n"));
}

#[test]
fn test_target_rendering() {
    let styles = StyleManager::plain();
    let (input, _) = safety("classic-safe");

    let reached = achievable_for(&input, "P1").unwrap();
    assert_eq!(
        render_target(&styles, &reached),
        "Target P1: ACHIEVABLE\nSequence: P0 -> P1\n"
    );

    let unknown = achievable_for(&input, "P9").unwrap();
    assert_eq!(render_target(&styles, &unknown), "Target P9: NOT ACHIEVABLE\n");
}

#[test]
fn test_verification_rendering() {
    let styles = StyleManager::plain();
    let sequence = vec!["P1".to_string(), "P0".to_string()];
    assert_eq!(
        render_verification(&styles, &sequence, false),
        "Sequence P1 -> P0: ✗ not a safe sequence\n"
    );
}

#[test]
fn test_deadlock_report_closes_cycles() {
    let styles = StyleManager::plain();
    let input = detection("circular-wait");
    let report = detect(&input).unwrap();
    let text = render_detection(&styles, &input, &report);

    assert!(text.starts_with("Deadlock Status: DETECTED\n"));
    assert!(text.contains("Strategy: reclamation\n"));
    assert!(text.contains("Available: [0, 0]\n"));
    assert!(text.contains("Deadlocked Processes: P0, P1, P2\n"));
    assert!(text.contains("Number of cycles: 1\n"));
    assert!(text.contains("Cycle 1: P0 -> P1 -> P0\n"));
}

#[test]
fn test_no_deadlock_report_shows_completion_order() {
    let styles = StyleManager::plain();
    let input = detection("linear-chain");
    let report = detect(&input).unwrap();
    let text = render_detection(&styles, &input, &report);

    assert!(text.starts_with("Deadlock Status: NOT DETECTED\n"));
    assert!(text.contains("Completion Order: P2 -> P1 -> P0\n"));
    assert!(text.contains("Number of cycles: 0\n"));
    assert!(!text.contains("Deadlocked Processes"));
}

#[test]
fn test_cycle_search_warns_on_multi_instance() {
    let styles = StyleManager::plain();
    let input = detection("multi-instance");
    let report = detect_with(&input, DetectionStrategy::CycleSearch).unwrap();
    let text = render_detection(&styles, &input, &report);

    assert!(text.contains("Strategy: cycle-search\n"));
    assert!(text.contains("cycle search may miss deadlocks"));

    let reclaimed = detect(&input).unwrap();
    assert!(!render_detection(&styles, &input, &reclaimed).contains("may miss"));
}

#[test]
fn test_wait_for_rendering() {
    let styles = StyleManager::plain();
    let graph = wait_for_graph(&detection("circular-wait")).unwrap();
    let text = render_wait_for(&styles, &graph);

    assert!(text.contains("Holders:\n  R0: P0\n  R1: P1\n"));
    assert!(text.contains("Wait-for edges:\n  P0 -> P1\n  P1 -> P0\n  P2 -> P0\n"));
    assert!(text.contains("Cycle 1: P0 -> P1 -> P0\n"));
}

#[test]
fn test_wait_for_rendering_without_cycles() {
    let styles = StyleManager::plain();
    let graph = wait_for_graph(&detection("linear-chain")).unwrap();
    let text = render_wait_for(&styles, &graph);

    assert!(text.contains("  P2 -> (none)\n"));
    assert!(text.ends_with("No cycles\n"));
}

#[test]
fn test_examples_listing() {
    let styles = StyleManager::plain();
    let text = render_examples(&styles, &builtins());

    assert!(text.starts_with("Name"));
    assert!(text.lines().any(|l| l.starts_with("classic-safe") && l.contains("safety")));
    assert!(text.lines().any(|l| l.starts_with("circular-wait") && l.contains("detect")));
}

#[test]
fn test_safety_json_lists_blocked() {
    let (_, report) = safety("unsafe");
    let value = safety_json(&report).unwrap();

    assert_eq!(value["is_safe"], false);
    assert_eq!(value["sequence"], serde_json::json!(["P1", "P2"]));
    assert_eq!(value["blocked"][0]["process"], "P0");
    assert_eq!(value["blocked"][0]["shortfalls"][0]["needed"], 4);
    assert!(value.get("need").is_none());
}

#[test]
fn test_detection_json_uses_kebab_case_strategy() {
    let report = detect_with(&detection("complex"), DetectionStrategy::CycleSearch).unwrap();
    let text = to_json(&report).unwrap();
    assert!(text.contains("\"strategy\": \"cycle-search\""));
}
