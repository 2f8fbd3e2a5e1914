use super::*;

fn names(prefix: &str, count: usize) -> Vec<String> {
    (0..count).map(|i| format!("{prefix}{i}")).collect()
}

#[test]
fn test_unique_names_pass() {
    assert!(validate_names("process", &names("P", 3)).is_ok());
    assert!(validate_names("process", &[]).is_ok());
}

#[test]
fn test_duplicate_name_rejected() {
    let result = validate_names("resource", &["R0".to_string(), "R0".to_string()]);
    assert_eq!(
        result,
        Err(AnalysisError::DuplicateName {
            kind: "resource",
            name: "R0".to_string()
        })
    );
}

#[test]
fn test_blank_name_rejected() {
    let result = validate_names("process", &["P0".to_string(), "  ".to_string()]);
    assert_eq!(
        result,
        Err(AnalysisError::EmptyName {
            kind: "process",
            index: 1
        })
    );
}

#[test]
fn test_vector_length_checked() {
    assert!(validate_vector("available", &[1, 2, 3], 3).is_ok());
    let err = validate_vector("available", &[1, 2], 3).unwrap_err();
    assert!(matches!(
        err,
        AnalysisError::DimensionMismatch {
            expected: 3,
            found: 2,
            ..
        }
    ));
}

#[test]
fn test_matrix_row_count_checked() {
    let matrix = vec![vec![0, 1]];
    let err = validate_matrix("allocation", &matrix, 2, 2).unwrap_err();
    assert_eq!(
        err,
        AnalysisError::DimensionMismatch {
            matrix: "allocation".to_string(),
            axis: "rows",
            expected: 2,
            found: 1,
        }
    );
}

#[test]
fn test_ragged_matrix_names_offending_row() {
    let matrix = vec![vec![0, 1], vec![2]];
    let err = validate_matrix("request", &matrix, 2, 2).unwrap_err();
    assert_eq!(err.to_string(), "request row 1 has 1 columns, expected 2");
}

#[test]
fn test_need_matrix_subtracts_allocation() {
    let allocation = vec![vec![0, 1, 0], vec![2, 0, 0]];
    let max_need = vec![vec![7, 5, 3], vec![3, 2, 2]];
    let need = need_matrix(&allocation, &max_need, &names("P", 2), &names("R", 3)).unwrap();
    assert_eq!(need, vec![vec![7, 4, 3], vec![1, 2, 2]]);
}

#[test]
fn test_need_matrix_rejects_claim_below_allocation() {
    let allocation = vec![vec![1, 3]];
    let max_need = vec![vec![2, 2]];
    let err = need_matrix(&allocation, &max_need, &names("P", 1), &names("R", 2)).unwrap_err();
    assert_eq!(
        err,
        AnalysisError::InfeasibleNeed {
            process: "P0".to_string(),
            resource: "R1".to_string(),
            max_need: 2,
            allocation: 3,
        }
    );
}

#[test]
fn test_resolve_process() {
    let processes = names("P", 3);
    assert_eq!(resolve_process(&processes, "P2"), Some(2));
    assert_eq!(resolve_process(&processes, "P9"), None);
}
