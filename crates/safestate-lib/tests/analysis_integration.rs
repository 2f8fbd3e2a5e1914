//! Properties of the safety and reclamation fixed points over random snapshots

use proptest::prelude::*;
use safestate_lib::analysis::verify_sequence;
use safestate_lib::{
    DetectionInput, Matrix, SafetyInput, Vector, achievable_for, check_safety, detect,
};

fn names(prefix: &str, count: usize) -> Vec<String> {
    (0..count).map(|i| format!("{prefix}{i}")).collect()
}

/// Snapshots with `allocation <= max_need` row by row
fn safety_input() -> impl Strategy<Value = SafetyInput> {
    (1usize..6, 1usize..4).prop_flat_map(|(n, m)| {
        (
            prop::collection::vec(0u64..6, m),
            prop::collection::vec(prop::collection::vec(0u64..4, m), n),
            prop::collection::vec(prop::collection::vec(0u64..4, m), n),
        )
            .prop_map(move |(available, allocation, extra): (Vector, Matrix, Matrix)| {
                let max_need = allocation
                    .iter()
                    .zip(&extra)
                    .map(|(held, more)| held.iter().zip(more).map(|(a, b)| a + b).collect())
                    .collect();
                SafetyInput {
                    processes: names("P", n),
                    resources: names("R", m),
                    available,
                    allocation,
                    max_need,
                }
            })
    })
}

fn need_of(input: &SafetyInput) -> Matrix {
    input
        .max_need
        .iter()
        .zip(&input.allocation)
        .map(|(max, held)| max.iter().zip(held).map(|(a, b)| a - b).collect())
        .collect()
}

fn reversed(input: &SafetyInput) -> SafetyInput {
    let mut flipped = input.clone();
    flipped.processes.reverse();
    flipped.allocation.reverse();
    flipped.max_need.reverse();
    flipped
}

proptest! {
    #[test]
    fn safe_sequences_replay(input in safety_input()) {
        let report = check_safety(&input).unwrap();
        if report.is_safe {
            prop_assert_eq!(report.sequence.len(), input.processes.len());
            prop_assert!(verify_sequence(&input, &report.sequence).unwrap());
        } else {
            prop_assert!(report.sequence.len() < input.processes.len());
        }
    }

    #[test]
    fn verdict_ignores_process_order(input in safety_input()) {
        let forward = check_safety(&input).unwrap();
        let backward = check_safety(&reversed(&input)).unwrap();
        prop_assert_eq!(forward.is_safe, backward.is_safe);
    }

    #[test]
    fn more_available_never_hurts(input in safety_input(), bump in 0usize..3, extra in 1u64..4) {
        let before = check_safety(&input).unwrap();

        let mut richer = input.clone();
        let j = bump % richer.available.len();
        richer.available[j] += extra;
        let after = check_safety(&richer).unwrap();

        prop_assert!(!before.is_safe || after.is_safe);
    }

    #[test]
    fn detection_is_idempotent(input in safety_input()) {
        let detection = DetectionInput {
            processes: input.processes.clone(),
            resources: input.resources.clone(),
            allocation: input.allocation.clone(),
            request: input.max_need.clone(),
            available: Some(input.available.clone()),
        };
        let first = detect(&detection).unwrap();
        let second = detect(&detection).unwrap();
        prop_assert_eq!(first.deadlocked, second.deadlocked);
        prop_assert_eq!(first.cycles, second.cycles);
        prop_assert_eq!(first.completion_order, second.completion_order);
    }

    #[test]
    fn target_matches_sequence_membership(input in safety_input()) {
        let report = check_safety(&input).unwrap();
        for name in &input.processes {
            let target = achievable_for(&input, name).unwrap();
            prop_assert_eq!(target.achievable, report.sequence.contains(name));
            if target.achievable {
                prop_assert_eq!(target.sequence.last(), Some(name));
            }
        }
    }

    #[test]
    fn reclamation_with_need_as_request_agrees(input in safety_input()) {
        let detection = DetectionInput {
            processes: input.processes.clone(),
            resources: input.resources.clone(),
            allocation: input.allocation.clone(),
            request: need_of(&input),
            available: Some(input.available.clone()),
        };
        let safety = check_safety(&input).unwrap();
        let deadlock = detect(&detection).unwrap();
        prop_assert_eq!(safety.is_safe, !deadlock.is_deadlocked);
        prop_assert_eq!(deadlock.completion_order, safety.sequence);
    }
}

#[test]
fn idle_process_is_never_deadlocked() {
    let input = DetectionInput {
        processes: names("P", 3),
        resources: names("R", 2),
        allocation: vec![vec![1, 0], vec![0, 1], vec![0, 0]],
        request: vec![vec![0, 1], vec![1, 0], vec![0, 0]],
        available: None,
    };

    let report = detect(&input).unwrap();
    assert!(report.is_deadlocked);
    assert_eq!(report.deadlocked, vec!["P0", "P1"]);
    assert_eq!(report.completion_order, vec!["P2"]);
}
