// Tests for deadlock detection

use super::*;
use crate::model::Matrix;
use proptest::prelude::*;

// ============================================================================
// Test Utilities
// ============================================================================

fn named(prefix: &str, count: usize) -> Vec<String> {
    (0..count).map(|i| format!("{prefix}{i}")).collect()
}

fn input(allocation: Matrix, request: Matrix, available: Option<Vec<u64>>) -> DetectionInput {
    let m = allocation.first().map_or(0, Vec::len);
    DetectionInput {
        processes: named("P", allocation.len()),
        resources: named("R", m),
        allocation,
        request,
        available,
    }
}

fn circular_wait() -> DetectionInput {
    input(
        vec![vec![1, 0], vec![0, 1], vec![0, 0]],
        vec![vec![0, 1], vec![1, 0], vec![1, 0]],
        None,
    )
}

fn linear_chain() -> DetectionInput {
    input(
        vec![vec![1, 0, 0], vec![0, 1, 0], vec![0, 0, 1]],
        vec![vec![0, 1, 0], vec![0, 0, 1], vec![0, 0, 0]],
        None,
    )
}

/// Two instances of R0, one held by each process, each wanting one more
fn shared_pool() -> DetectionInput {
    input(vec![vec![1], vec![1]], vec![vec![1], vec![1]], Some(vec![0]))
}

// ============================================================================
// Reclamation
// ============================================================================

#[test]
fn test_circular_wait_is_deadlocked() {
    let report = detect(&circular_wait()).unwrap();
    assert_eq!(report.strategy, DetectionStrategy::Reclamation);
    assert!(report.is_deadlocked);
    assert!(report.deadlocked.contains(&"P0".to_string()));
    assert!(report.deadlocked.contains(&"P1".to_string()));
    assert_eq!(report.cycles, vec![vec!["P0", "P1"]]);
    assert!(report.single_instance);
}

#[test]
fn test_process_waiting_on_cycle_is_also_blocked() {
    // P2 waits on P0, which never finishes
    let report = detect(&circular_wait()).unwrap();
    assert_eq!(report.deadlocked, vec!["P0", "P1", "P2"]);
    assert!(report.completion_order.is_empty());
}

#[test]
fn test_linear_chain_unwinds() {
    let report = detect(&linear_chain()).unwrap();
    assert!(!report.is_deadlocked);
    assert!(report.deadlocked.is_empty());
    assert!(report.cycles.is_empty());
    assert_eq!(report.completion_order, vec!["P2", "P1", "P0"]);
}

#[test]
fn test_reclaim_counts_passes() {
    let outcome = reclaim(&linear_chain()).unwrap();
    assert_eq!(outcome.passes, 3);
    assert!(outcome.unfinished.is_empty());
}

#[test]
fn test_free_instances_break_the_cycle() {
    let mut state = circular_wait();
    state.available = Some(vec![1, 1]);
    let report = detect(&state).unwrap();

    assert!(!report.is_deadlocked);
    // The wait-for cycle still exists but no member is stuck
    assert!(report.cycles.is_empty());
    assert!(wait_for_graph(&state).unwrap().has_cycles());
}

#[test]
fn test_multi_instance_deadlock_found_by_reclamation() {
    let report = detect(&shared_pool()).unwrap();
    assert!(report.is_deadlocked);
    assert_eq!(report.deadlocked, vec!["P0", "P1"]);
    assert!(!report.single_instance);
}

#[test]
fn test_detect_rejects_bad_available_length() {
    let mut state = linear_chain();
    state.available = Some(vec![0, 0]);
    assert!(matches!(
        detect(&state),
        Err(AnalysisError::DimensionMismatch { .. })
    ));
}

// ============================================================================
// Cycle Search
// ============================================================================

#[test]
fn test_cycle_search_reports_cycle_members_only() {
    let report = detect_with(&circular_wait(), DetectionStrategy::CycleSearch).unwrap();
    assert!(report.is_deadlocked);
    assert_eq!(report.deadlocked, vec!["P0", "P1"]);
    assert!(report.completion_order.is_empty());
}

#[test]
fn test_cycle_search_misses_multi_instance_deadlock() {
    // Single-holder view: R0 belongs to P1, so P1's own request adds no edge
    let report = detect_with(&shared_pool(), DetectionStrategy::CycleSearch).unwrap();
    assert!(!report.is_deadlocked);
    assert!(report.cycles.is_empty());
}

#[test]
fn test_cycle_search_on_complex_state() {
    let state = input(
        vec![vec![1, 1, 0], vec![0, 1, 1], vec![1, 0, 1], vec![0, 0, 0]],
        vec![vec![0, 0, 1], vec![1, 0, 0], vec![0, 1, 0], vec![1, 1, 1]],
        None,
    );
    let cycles = detect_with(&state, DetectionStrategy::CycleSearch).unwrap();
    assert_eq!(cycles.deadlocked, vec!["P1", "P2"]);

    let reclaimed = detect(&state).unwrap();
    assert_eq!(reclaimed.deadlocked, vec!["P0", "P1", "P2", "P3"]);
    assert_eq!(reclaimed.cycles, vec![vec!["P2", "P1"]]);
}

#[test]
fn test_strategy_value_names() {
    use clap::ValueEnum;
    let names: Vec<String> = DetectionStrategy::value_variants()
        .iter()
        .filter_map(|v| v.to_possible_value())
        .map(|v| v.get_name().to_string())
        .collect();
    assert_eq!(names, vec!["reclamation", "cycle-search"]);
}

// ============================================================================
// Properties
// ============================================================================

fn arb_state() -> impl Strategy<Value = DetectionInput> {
    (1usize..5, 1usize..4).prop_flat_map(|(n, m)| {
        (
            prop::collection::vec(prop::collection::vec(0u64..3, m), n),
            prop::collection::vec(prop::collection::vec(0u64..3, m), n),
            prop::option::of(prop::collection::vec(0u64..3, m)),
        )
            .prop_map(|(allocation, request, available)| input(allocation, request, available))
    })
}

proptest! {
    #[test]
    fn detection_is_idempotent(state in arb_state()) {
        prop_assert_eq!(detect(&state).unwrap(), detect(&state).unwrap());
    }

    #[test]
    fn cycle_search_members_appear_in_a_cycle(state in arb_state()) {
        let report = detect_with(&state, DetectionStrategy::CycleSearch).unwrap();
        for process in &report.deadlocked {
            prop_assert!(report.cycles.iter().any(|c| c.contains(process)));
        }
        prop_assert_eq!(report.is_deadlocked, !report.deadlocked.is_empty());
    }

    #[test]
    fn reported_cycles_are_made_of_deadlocked_processes(state in arb_state()) {
        let report = detect(&state).unwrap();
        for cycle in &report.cycles {
            for process in cycle {
                prop_assert!(report.deadlocked.contains(process));
            }
        }
    }

    #[test]
    fn processes_without_requests_always_finish(state in arb_state()) {
        let report = detect(&state).unwrap();
        for (i, row) in state.request.iter().enumerate() {
            if row.iter().all(|&r| r == 0) {
                prop_assert!(!report.deadlocked.contains(&state.processes[i]));
            }
        }
    }
}

#[test]
fn test_huge_instance_counts_do_not_overflow() {
    let held = input(vec![vec![u64::MAX], vec![1]], vec![vec![0], vec![0]], None);
    let report = detect(&held).unwrap();
    assert!(!report.is_deadlocked);
    assert!(!report.single_instance);
    assert_eq!(report.completion_order, vec!["P0", "P1"]);

    let free = input(vec![vec![1]], vec![vec![0]], Some(vec![u64::MAX]));
    for strategy in [DetectionStrategy::Reclamation, DetectionStrategy::CycleSearch] {
        let report = detect_with(&free, strategy).unwrap();
        assert!(!report.is_deadlocked);
        assert!(!report.single_instance);
    }
}

#[test]
fn test_single_instance_boundary() {
    // One held, none free: exact
    let exact = input(vec![vec![1], vec![0]], vec![vec![0], vec![1]], Some(vec![0]));
    assert!(detect(&exact).unwrap().single_instance);

    // One held plus one free: two instances
    let doubled = input(vec![vec![1], vec![0]], vec![vec![0], vec![1]], Some(vec![1]));
    assert!(!detect(&doubled).unwrap().single_instance);
}
