//! # Model Module
//!
//! Immutable snapshot types consumed by the analyzers, plus the shared
//! validation that guards every analysis call.
//!
//! ## Modules
//!
//! - [`validation`] - Dimension, naming, and need-feasibility checks

pub mod validation;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use validation::{
    need_matrix, resolve_process, validate_matrix, validate_names, validate_vector,
};

/// Per-resource instance counts, indexed by resource
pub type Vector = Vec<u64>;

/// Process x resource instance counts, rows indexed by process
pub type Matrix = Vec<Vec<u64>>;

/// Errors raised before an analyzer runs its fixed point
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalysisError {
    #[error("{matrix} has {found} {axis}, expected {expected}")]
    DimensionMismatch {
        matrix: String,
        axis: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("Duplicate {kind} name: {name}")]
    DuplicateName { kind: &'static str, name: String },

    #[error("Empty {kind} name at position {index}")]
    EmptyName { kind: &'static str, index: usize },

    #[error(
        "Infeasible need for {process} on {resource}: max need {max_need} is below allocation {allocation}"
    )]
    InfeasibleNeed {
        process: String,
        resource: String,
        max_need: u64,
        allocation: u64,
    },
}

/// Input to the safety analyzer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SafetyInput {
    pub processes: Vec<String>,
    pub resources: Vec<String>,
    pub available: Vector,
    pub allocation: Matrix,
    pub max_need: Matrix,
}

impl SafetyInput {
    /// Check dimensions and names without computing need
    pub fn validate(&self) -> Result<(), AnalysisError> {
        let (n, m) = (self.processes.len(), self.resources.len());
        validate_names("process", &self.processes)?;
        validate_names("resource", &self.resources)?;
        validate_vector("available", &self.available, m)?;
        validate_matrix("allocation", &self.allocation, n, m)?;
        validate_matrix("max_need", &self.max_need, n, m)?;
        Ok(())
    }

    /// Validate and derive `need = max_need - allocation`
    pub fn need(&self) -> Result<Matrix, AnalysisError> {
        self.validate()?;
        need_matrix(
            &self.allocation,
            &self.max_need,
            &self.processes,
            &self.resources,
        )
    }
}

/// Input to the deadlock analyzer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectionInput {
    pub processes: Vec<String>,
    pub resources: Vec<String>,
    pub allocation: Matrix,
    pub request: Matrix,
    /// Free instances; treated as all zeros when absent
    #[serde(default)]
    pub available: Option<Vector>,
}

impl DetectionInput {
    pub fn validate(&self) -> Result<(), AnalysisError> {
        let (n, m) = (self.processes.len(), self.resources.len());
        validate_names("process", &self.processes)?;
        validate_names("resource", &self.resources)?;
        validate_matrix("allocation", &self.allocation, n, m)?;
        validate_matrix("request", &self.request, n, m)?;
        if let Some(available) = &self.available {
            validate_vector("available", available, m)?;
        }
        Ok(())
    }

    /// The work vector a reclamation pass starts from
    pub fn available_or_zero(&self) -> Vector {
        self.available
            .clone()
            .unwrap_or_else(|| vec![0; self.resources.len()])
    }
}

#[cfg(test)]
mod tests {
    include!("mod.test.rs");
}
