use super::*;
use crate::analysis::{check_safety, detect};

#[test]
fn test_every_listed_name_resolves() {
    for name in BUILTIN_NAMES {
        let scenario = builtin(name).unwrap();
        assert!(scenario.description.is_some(), "{name} lacks a description");
    }
    assert_eq!(builtins().len(), BUILTIN_NAMES.len());
}

#[test]
fn test_unknown_example_lists_alternatives() {
    let err = builtin("nope").unwrap_err();
    assert!(err.to_string().contains("classic-safe"));
}

#[test]
fn test_safety_examples_have_expected_verdicts() {
    let safe = builtin("classic-safe").unwrap().safety_input().unwrap();
    assert!(check_safety(&safe).unwrap().is_safe);

    let unsafe_state = builtin("unsafe").unwrap().safety_input().unwrap();
    assert!(!check_safety(&unsafe_state).unwrap().is_safe);
}

#[test]
fn test_detection_examples_have_expected_verdicts() {
    let expectations = [
        ("circular-wait", true),
        ("linear-chain", false),
        ("complex", true),
        ("multi-instance", true),
    ];
    for (name, deadlocked) in expectations {
        let input = builtin(name).unwrap().detection_input().unwrap();
        assert_eq!(
            detect(&input).unwrap().is_deadlocked,
            deadlocked,
            "unexpected verdict for {name}"
        );
    }
}
