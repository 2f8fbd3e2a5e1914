use super::*;

fn safety_input() -> SafetyInput {
    SafetyInput {
        processes: vec!["P0".into(), "P1".into()],
        resources: vec!["R0".into(), "R1".into()],
        available: vec![1, 1],
        allocation: vec![vec![1, 0], vec![0, 1]],
        max_need: vec![vec![2, 1], vec![1, 1]],
    }
}

#[test]
fn test_safety_input_need() {
    let need = safety_input().need().unwrap();
    assert_eq!(need, vec![vec![1, 1], vec![1, 0]]);
}

#[test]
fn test_safety_input_rejects_short_available() {
    let input = SafetyInput {
        available: vec![1],
        ..safety_input()
    };
    assert!(matches!(
        input.need(),
        Err(AnalysisError::DimensionMismatch { .. })
    ));
}

#[test]
fn test_safety_input_rejects_missing_max_need_row() {
    let input = SafetyInput {
        max_need: vec![vec![2, 1]],
        ..safety_input()
    };
    let err = input.validate().unwrap_err();
    assert!(err.to_string().starts_with("max_need has 1 rows"));
}

#[test]
fn test_detection_input_defaults_available_to_zero() {
    let input = DetectionInput {
        processes: vec!["P0".into()],
        resources: vec!["R0".into(), "R1".into(), "R2".into()],
        allocation: vec![vec![0, 0, 0]],
        request: vec![vec![0, 0, 0]],
        available: None,
    };
    assert!(input.validate().is_ok());
    assert_eq!(input.available_or_zero(), vec![0, 0, 0]);
}

#[test]
fn test_detection_input_checks_request_shape() {
    let input = DetectionInput {
        processes: vec!["P0".into(), "P1".into()],
        resources: vec!["R0".into()],
        allocation: vec![vec![1], vec![0]],
        request: vec![vec![0], vec![1, 0]],
        available: Some(vec![0]),
    };
    assert!(matches!(
        input.validate(),
        Err(AnalysisError::DimensionMismatch { axis: "columns", .. })
    ));
}

#[test]
fn test_detection_input_deserializes_without_available() {
    let json = r#"{
        "processes": ["P0"],
        "resources": ["R0"],
        "allocation": [[1]],
        "request": [[0]]
    }"#;
    let input: DetectionInput = serde_json::from_str(json).unwrap();
    assert_eq!(input.available, None);
}
