// Tests for the safety analyzer

use super::*;
use proptest::prelude::*;

// ============================================================================
// Test Utilities
// ============================================================================

fn named(prefix: &str, count: usize) -> Vec<String> {
    (0..count).map(|i| format!("{prefix}{i}")).collect()
}

fn input(available: Vector, allocation: Matrix, max_need: Matrix) -> SafetyInput {
    SafetyInput {
        processes: named("P", allocation.len()),
        resources: named("R", available.len()),
        available,
        allocation,
        max_need,
    }
}

fn classic_safe() -> SafetyInput {
    input(
        vec![10, 5, 7],
        vec![vec![0, 1, 0], vec![2, 0, 0], vec![3, 0, 2]],
        vec![vec![7, 5, 3], vec![3, 2, 2], vec![9, 0, 2]],
    )
}

/// P0 needs [4, 2] but only [3, 2] ever becomes free
fn stalled() -> SafetyInput {
    input(
        vec![1, 1],
        vec![vec![2, 2], vec![1, 1], vec![1, 0]],
        vec![vec![6, 4], vec![2, 2], vec![2, 1]],
    )
}

// ============================================================================
// check_safety
// ============================================================================

#[test]
fn test_classic_state_is_safe() {
    let report = check_safety(&classic_safe()).unwrap();
    assert!(report.is_safe);
    assert_eq!(report.sequence, vec!["P0", "P1", "P2"]);
    assert_eq!(report.final_work, vec![15, 6, 9]);
    assert!(report.blocked().is_empty());
}

#[test]
fn test_classic_state_admits_everything_in_one_pass() {
    let report = check_safety(&classic_safe()).unwrap();
    assert_eq!(report.trace.len(), 1);

    let pass = &report.trace[0];
    assert_eq!(pass.pass, 1);
    assert_eq!(pass.admitted().collect::<Vec<_>>(), vec!["P0", "P1", "P2"]);

    // Work snapshots grow as earlier processes release within the pass
    let works: Vec<&Vector> = pass.evaluations.iter().map(|e| &e.work).collect();
    assert_eq!(works, vec![&vec![10, 5, 7], &vec![10, 6, 7], &vec![12, 6, 7]]);
    assert_eq!(pass.evaluations[0].need, vec![7, 4, 3]);
}

#[test]
fn test_two_resource_textbook_state_recovers_through_p1_and_p2() {
    // P1 and P2 finish first and free enough for P0's [2, 1] need
    let report = check_safety(&input(
        vec![1, 1],
        vec![vec![2, 2], vec![1, 1], vec![1, 0]],
        vec![vec![4, 3], vec![2, 2], vec![2, 1]],
    ))
    .unwrap();

    assert!(report.is_safe);
    assert_eq!(report.sequence, vec!["P1", "P2", "P0"]);
    assert_eq!(report.trace.len(), 2);
}

#[test]
fn test_stalled_state_is_unsafe_with_partial_sequence() {
    let report = check_safety(&stalled()).unwrap();
    assert!(!report.is_safe);
    assert_eq!(report.sequence, vec!["P1", "P2"]);
    assert_eq!(report.final_work, vec![3, 2]);

    // Pass 2 evaluates only P0 and admits nothing
    assert_eq!(report.trace.len(), 2);
    let last = report.trace.last().unwrap();
    assert_eq!(last.evaluations.len(), 1);
    assert!(!last.evaluations[0].admitted);
}

#[test]
fn test_blocked_explains_shortfall() {
    let report = check_safety(&stalled()).unwrap();
    let blocked = report.blocked();
    assert_eq!(blocked.len(), 1);

    let (name, continuation) = &blocked[0];
    assert_eq!(name, "P0");
    assert!(!continuation.can_continue());
    assert_eq!(
        continuation.shortfalls,
        vec![Shortfall {
            resource: "R0".to_string(),
            needed: 4,
            available: 3,
        }]
    );
}

#[test]
fn test_nothing_admissible_yields_empty_sequence() {
    let report = check_safety(&input(
        vec![0, 0],
        vec![vec![1, 0], vec![0, 1]],
        vec![vec![2, 1], vec![1, 2]],
    ))
    .unwrap();
    assert!(!report.is_safe);
    assert!(report.sequence.is_empty());
    assert_eq!(report.trace.len(), 1);
}

#[test]
fn test_empty_system_is_trivially_safe() {
    let report = check_safety(&input(vec![], vec![], vec![])).unwrap();
    assert!(report.is_safe);
    assert!(report.sequence.is_empty());
    assert!(report.trace.is_empty());
}

#[test]
fn test_infeasible_need_is_rejected() {
    let bad = input(vec![1], vec![vec![3]], vec![vec![2]]);
    assert!(matches!(
        check_safety(&bad),
        Err(AnalysisError::InfeasibleNeed { .. })
    ));
}

#[test]
fn test_dimension_mismatch_is_rejected() {
    let mut bad = classic_safe();
    bad.max_need.pop();
    assert!(matches!(
        check_safety(&bad),
        Err(AnalysisError::DimensionMismatch { .. })
    ));
}

#[test]
fn test_check_does_not_mutate_input() {
    let original = classic_safe();
    let copy = original.clone();
    let _ = check_safety(&copy).unwrap();
    assert_eq!(original, copy);
}

// ============================================================================
// can_process_continue
// ============================================================================

#[test]
fn test_can_process_continue_lists_every_short_dimension() {
    let need = vec![vec![3, 0, 5]];
    let resources = named("R", 3);
    let continuation = can_process_continue(0, &need, &[1, 0, 2], &resources);

    assert!(!continuation.can_continue());
    assert_eq!(continuation.process, 0);
    assert_eq!(
        continuation.shortfalls,
        vec![
            Shortfall {
                resource: "R0".to_string(),
                needed: 3,
                available: 1,
            },
            Shortfall {
                resource: "R2".to_string(),
                needed: 5,
                available: 2,
            },
        ]
    );
}

#[test]
fn test_can_process_continue_when_need_fits_exactly() {
    let need = vec![vec![0, 0], vec![2, 1]];
    let continuation = can_process_continue(1, &need, &[2, 1], &named("R", 2));
    assert!(continuation.can_continue());
}

// ============================================================================
// achievable_for
// ============================================================================

#[test]
fn test_target_sequence_ends_at_target() {
    let report = achievable_for(&classic_safe(), "P1").unwrap();
    assert!(report.achievable);
    assert_eq!(report.sequence, vec!["P0", "P1"]);
}

#[test]
fn test_target_admitted_before_stall_is_achievable() {
    let report = achievable_for(&stalled(), "P2").unwrap();
    assert!(report.achievable);
    assert_eq!(report.sequence, vec!["P1", "P2"]);
}

#[test]
fn test_target_behind_stall_is_not_achievable() {
    let report = achievable_for(&stalled(), "P0").unwrap();
    assert!(!report.achievable);
    assert!(report.sequence.is_empty());
}

#[test]
fn test_unknown_target_is_negative_not_error() {
    let report = achievable_for(&classic_safe(), "P42").unwrap();
    assert!(!report.achievable);
    assert!(report.sequence.is_empty());
    assert_eq!(report.target, "P42");
}

// ============================================================================
// verify_sequence
// ============================================================================

#[test]
fn test_verify_accepts_reported_sequence() {
    let input = classic_safe();
    let report = check_safety(&input).unwrap();
    assert!(verify_sequence(&input, &report.sequence).unwrap());
}

#[test]
fn test_verify_rejects_order_that_runs_short() {
    let input = input(
        vec![1, 1],
        vec![vec![2, 2], vec![1, 1], vec![1, 0]],
        vec![vec![4, 3], vec![2, 2], vec![2, 1]],
    );
    let order: Vec<String> = ["P0", "P1", "P2"].iter().map(|s| s.to_string()).collect();
    assert!(!verify_sequence(&input, &order).unwrap());
}

#[test]
fn test_verify_rejects_incomplete_or_repeated_orders() {
    let input = classic_safe();
    let short: Vec<String> = vec!["P0".into(), "P1".into()];
    let repeated: Vec<String> = vec!["P0".into(), "P0".into(), "P1".into()];
    let unknown: Vec<String> = vec!["P0".into(), "P1".into(), "P9".into()];
    assert!(!verify_sequence(&input, &short).unwrap());
    assert!(!verify_sequence(&input, &repeated).unwrap());
    assert!(!verify_sequence(&input, &unknown).unwrap());
}

// ============================================================================
// Properties
// ============================================================================

fn arb_state() -> impl Strategy<Value = SafetyInput> {
    (1usize..5, 1usize..4).prop_flat_map(|(n, m)| {
        (
            prop::collection::vec(0u64..6, m),
            prop::collection::vec(prop::collection::vec(0u64..4, m), n),
            prop::collection::vec(prop::collection::vec(0u64..4, m), n),
        )
            .prop_map(|(available, allocation, extra)| {
                let max_need = allocation
                    .iter()
                    .zip(&extra)
                    .map(|(held, more)| held.iter().zip(more).map(|(h, e)| h + e).collect())
                    .collect();
                input(available, allocation, max_need)
            })
    })
}

proptest! {
    #[test]
    fn safe_sequence_is_a_valid_permutation(state in arb_state()) {
        let report = check_safety(&state).unwrap();
        if report.is_safe {
            prop_assert_eq!(report.sequence.len(), state.processes.len());
            prop_assert!(verify_sequence(&state, &report.sequence).unwrap());
        }
    }

    #[test]
    fn safety_is_deterministic(state in arb_state()) {
        prop_assert_eq!(check_safety(&state).unwrap(), check_safety(&state).unwrap());
    }

    #[test]
    fn more_available_never_makes_safe_unsafe(
        state in arb_state(),
        bump in 1u64..4,
        index in 0usize..3,
    ) {
        let before = check_safety(&state).unwrap().is_safe;
        let mut richer = state.clone();
        let slot = index % richer.available.len();
        richer.available[slot] += bump;
        let after = check_safety(&richer).unwrap().is_safe;
        prop_assert!(!before || after);
    }
}
