use super::*;

#[test]
fn test_parse_vector_whitespace() {
    assert_eq!(parse_vector("10 5 7").unwrap(), vec![10, 5, 7]);
    assert_eq!(parse_vector("  3\t4  ").unwrap(), vec![3, 4]);
}

#[test]
fn test_parse_vector_commas() {
    assert_eq!(parse_vector("1,2, 3").unwrap(), vec![1, 2, 3]);
}

#[test]
fn test_parse_vector_empty() {
    assert!(parse_vector("   ").unwrap().is_empty());
}

#[test]
fn test_parse_vector_rejects_negative() {
    let err = parse_vector("1 -2").unwrap_err();
    match err {
        ScenarioError::InvalidNumber { token, reason } => {
            assert_eq!(token, "-2");
            assert!(reason.contains("negative"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_parse_vector_rejects_garbage() {
    assert!(matches!(
        parse_vector("1 two 3"),
        Err(ScenarioError::InvalidNumber { .. })
    ));
}

#[test]
fn test_parse_matrix_newlines_and_blank_rows() {
    let matrix = parse_matrix("0 1 0\n\n2 0 0\n3 0 2\n").unwrap();
    assert_eq!(matrix, vec![vec![0, 1, 0], vec![2, 0, 0], vec![3, 0, 2]]);
}

#[test]
fn test_parse_matrix_semicolons() {
    let matrix = parse_matrix("1 0; 0 1 ;0 0").unwrap();
    assert_eq!(matrix, vec![vec![1, 0], vec![0, 1], vec![0, 0]]);
}

#[test]
fn test_parse_matrix_keeps_ragged_rows_for_validation() {
    // Shape errors are reported by the analyzers, not the parser
    let matrix = parse_matrix("1 0;1").unwrap();
    assert_eq!(matrix, vec![vec![1, 0], vec![1]]);
}
