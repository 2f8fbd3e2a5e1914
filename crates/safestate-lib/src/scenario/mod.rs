//! # Scenario Module
//!
//! Loads allocation snapshots from TOML, JSON, or YAML files, inline text
//! matrices, or the built-in examples, and turns them into analyzer inputs.
//!
//! ## Modules
//!
//! - [`parsing`] - Whitespace-separated vector and matrix text
//! - [`builtin`] - Named example scenarios

pub mod builtin;
pub mod parsing;

pub use builtin::{BUILTIN_NAMES, builtin, builtins};
pub use parsing::{parse_matrix, parse_vector};

use crate::model::{DetectionInput, Matrix, SafetyInput, Vector};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, trace};

/// Errors raised while loading or assembling a scenario
#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("Failed to read scenario file: {path}: {source}")]
    FileReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse TOML: {path}: {source}")]
    TomlParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Failed to parse JSON: {path}: {source}")]
    JsonParseError {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Failed to parse YAML: {path}: {reason}")]
    YamlParseError { path: PathBuf, reason: String },

    #[error("Unsupported scenario format: {path} (expected .toml, .json, .yaml or .yml)")]
    UnsupportedFormat { path: PathBuf },

    #[error("Scenario is missing '{field}', required for {analysis}")]
    MissingField {
        field: &'static str,
        analysis: &'static str,
    },

    #[error("Invalid number '{token}': {reason}")]
    InvalidNumber { token: String, reason: String },

    #[error("Unknown example '{name}' (available: {available})")]
    UnknownExample { name: String, available: String },
}

/// On-disk scenario encodings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScenarioFormat {
    Toml,
    Json,
    Yaml,
}

impl ScenarioFormat {
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension().and_then(|s| s.to_str())? {
            "toml" => Some(Self::Toml),
            "json" => Some(Self::Json),
            "yaml" | "yml" => Some(Self::Yaml),
            _ => None,
        }
    }
}

/// A resource-allocation snapshot as written by a user.
///
/// Names are optional and default to `P0..` and `R0..`. Which optional
/// matrices are needed depends on the analysis requested.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub processes: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resources: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub available: Option<Vector>,
    #[serde(default)]
    pub allocation: Matrix,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_need: Option<Matrix>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request: Option<Matrix>,
}

impl Scenario {
    /// Load a scenario, picking the decoder from the file extension
    pub fn load(path: &Path) -> Result<Self, ScenarioError> {
        trace!("Loading scenario: {}", path.display());

        let format = ScenarioFormat::from_path(path).ok_or_else(|| {
            ScenarioError::UnsupportedFormat {
                path: path.to_path_buf(),
            }
        })?;

        let content = std::fs::read_to_string(path).map_err(|e| ScenarioError::FileReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let scenario = Self::from_str_as(&content, format, path)?;
        debug!(
            processes = scenario.process_names().len(),
            resources = scenario.resource_names().len(),
            "Loaded scenario from {}",
            path.display()
        );
        Ok(scenario)
    }

    /// Decode scenario text; `origin` only labels errors
    pub fn from_str_as(
        content: &str,
        format: ScenarioFormat,
        origin: &Path,
    ) -> Result<Self, ScenarioError> {
        match format {
            ScenarioFormat::Toml => {
                toml::from_str(content).map_err(|e| ScenarioError::TomlParseError {
                    path: origin.to_path_buf(),
                    source: e,
                })
            }
            ScenarioFormat::Json => {
                serde_json::from_str(content).map_err(|e| ScenarioError::JsonParseError {
                    path: origin.to_path_buf(),
                    source: e,
                })
            }
            ScenarioFormat::Yaml => {
                serde_saphyr::from_str(content).map_err(|e| ScenarioError::YamlParseError {
                    path: origin.to_path_buf(),
                    reason: e.to_string(),
                })
            }
        }
    }

    /// Process names, generated from the allocation row count when absent
    pub fn process_names(&self) -> Vec<String> {
        self.processes
            .clone()
            .unwrap_or_else(|| (0..self.allocation.len()).map(|i| format!("P{i}")).collect())
    }

    /// Resource names, generated from the first allocation row when absent
    pub fn resource_names(&self) -> Vec<String> {
        self.resources.clone().unwrap_or_else(|| {
            let m = self
                .allocation
                .first()
                .map(Vec::len)
                .or_else(|| self.available.as_ref().map(Vec::len))
                .unwrap_or(0);
            (0..m).map(|j| format!("R{j}")).collect()
        })
    }

    pub fn safety_input(&self) -> Result<SafetyInput, ScenarioError> {
        let available = self.available.clone().ok_or(ScenarioError::MissingField {
            field: "available",
            analysis: "the safety check",
        })?;
        let max_need = self.max_need.clone().ok_or(ScenarioError::MissingField {
            field: "max_need",
            analysis: "the safety check",
        })?;

        Ok(SafetyInput {
            processes: self.process_names(),
            resources: self.resource_names(),
            available,
            allocation: self.allocation.clone(),
            max_need,
        })
    }

    pub fn detection_input(&self) -> Result<DetectionInput, ScenarioError> {
        let request = self.request.clone().ok_or(ScenarioError::MissingField {
            field: "request",
            analysis: "deadlock detection",
        })?;

        Ok(DetectionInput {
            processes: self.process_names(),
            resources: self.resource_names(),
            allocation: self.allocation.clone(),
            request,
            available: self.available.clone(),
        })
    }

    /// Serialize back to TOML, e.g. to seed a scenario file from an example
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    include!("mod.test.rs");
}
