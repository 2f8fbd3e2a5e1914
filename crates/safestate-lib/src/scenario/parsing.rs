//! Text parsing for vectors and matrices typed on the command line
//!
//! Entries are whitespace or comma separated. Matrix rows are separated by
//! newlines or `;`, and blank rows are skipped.

use super::ScenarioError;
use crate::model::{Matrix, Vector};

fn parse_entry(token: &str) -> Result<u64, ScenarioError> {
    token.parse::<u64>().map_err(|e| {
        let reason = if token.parse::<i64>().is_ok() {
            "instance counts cannot be negative".to_string()
        } else {
            e.to_string()
        };
        ScenarioError::InvalidNumber {
            token: token.to_string(),
            reason,
        }
    })
}

/// Parse `"10 5 7"` into `[10, 5, 7]`
pub fn parse_vector(text: &str) -> Result<Vector, ScenarioError> {
    text.split(|c: char| c.is_whitespace() || c == ',')
        .filter(|t| !t.is_empty())
        .map(parse_entry)
        .collect()
}

/// Parse `"0 1 0; 2 0 0"` (or one row per line) into a matrix
pub fn parse_matrix(text: &str) -> Result<Matrix, ScenarioError> {
    text.split(['\n', ';'])
        .map(str::trim)
        .filter(|row| !row.is_empty())
        .map(parse_vector)
        .collect()
}

#[cfg(test)]
mod tests {
    include!("parsing.test.rs");
}
