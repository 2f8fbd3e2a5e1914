//! Shared input checks run at the analyzer boundary

use super::{AnalysisError, Matrix};
use std::collections::HashSet;
use tracing::trace;

/// Names must be non-empty and unique within one call
pub fn validate_names(kind: &'static str, names: &[String]) -> Result<(), AnalysisError> {
    let mut seen = HashSet::with_capacity(names.len());
    for (index, name) in names.iter().enumerate() {
        if name.trim().is_empty() {
            return Err(AnalysisError::EmptyName { kind, index });
        }
        if !seen.insert(name.as_str()) {
            return Err(AnalysisError::DuplicateName {
                kind,
                name: name.clone(),
            });
        }
    }
    Ok(())
}

pub fn validate_vector(label: &str, vector: &[u64], m: usize) -> Result<(), AnalysisError> {
    if vector.len() != m {
        return Err(AnalysisError::DimensionMismatch {
            matrix: label.to_string(),
            axis: "entries",
            expected: m,
            found: vector.len(),
        });
    }
    Ok(())
}

/// Matrix must be `n` rows of exactly `m` columns
pub fn validate_matrix(label: &str, matrix: &Matrix, n: usize, m: usize) -> Result<(), AnalysisError> {
    if matrix.len() != n {
        return Err(AnalysisError::DimensionMismatch {
            matrix: label.to_string(),
            axis: "rows",
            expected: n,
            found: matrix.len(),
        });
    }

    for (i, row) in matrix.iter().enumerate() {
        if row.len() != m {
            return Err(AnalysisError::DimensionMismatch {
                matrix: format!("{label} row {i}"),
                axis: "columns",
                expected: m,
                found: row.len(),
            });
        }
    }

    trace!("{} validated as {}x{}", label, n, m);
    Ok(())
}

/// Derive `need[i][j] = max_need[i][j] - allocation[i][j]`.
///
/// Any entry where the maximum claim is below the current allocation is
/// rejected rather than clamped. Dimensions must already be validated.
pub fn need_matrix(
    allocation: &Matrix,
    max_need: &Matrix,
    processes: &[String],
    resources: &[String],
) -> Result<Matrix, AnalysisError> {
    allocation
        .iter()
        .zip(max_need)
        .enumerate()
        .map(|(i, (held_row, claim_row))| {
            held_row
                .iter()
                .zip(claim_row)
                .enumerate()
                .map(|(j, (&held, &claim))| {
                    claim
                        .checked_sub(held)
                        .ok_or_else(|| AnalysisError::InfeasibleNeed {
                            process: processes[i].clone(),
                            resource: resources[j].clone(),
                            max_need: claim,
                            allocation: held,
                        })
                })
                .collect::<Result<Vec<u64>, _>>()
        })
        .collect()
}

/// Index of a process by name
pub fn resolve_process(processes: &[String], name: &str) -> Option<usize> {
    processes.iter().position(|p| p == name)
}

#[cfg(test)]
mod tests {
    include!("validation.test.rs");
}
