//! Temporary scenario files
//!
//! The directory and everything written into it are removed on drop.

use crate::scenario::{Scenario, ScenarioFormat};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Temporary directory for scenario files
pub struct ScenarioDir {
    /// The temporary directory (automatically cleaned up on drop)
    pub temp_dir: TempDir,
}

impl ScenarioDir {
    pub fn new() -> std::io::Result<Self> {
        Ok(Self {
            temp_dir: tempfile::tempdir()?,
        })
    }

    /// Get the path to the temporary directory
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Write raw content to `file_name` and return its full path
    pub fn write(&self, file_name: &str, content: &str) -> std::io::Result<PathBuf> {
        let full_path = self.path().join(file_name);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&full_path, content)?;
        Ok(full_path)
    }

    /// Serialize a scenario in the format implied by `file_name`'s extension
    pub fn write_scenario(
        &self,
        file_name: &str,
        scenario: &Scenario,
    ) -> Result<PathBuf, Box<dyn std::error::Error>> {
        let path = self.path().join(file_name);
        let content = match ScenarioFormat::from_path(&path) {
            Some(ScenarioFormat::Toml) => scenario.to_toml()?,
            Some(ScenarioFormat::Json) => serde_json::to_string_pretty(scenario)?,
            Some(ScenarioFormat::Yaml) | None => {
                return Err(format!("no writer for {}", path.display()).into());
            }
        };
        Ok(self.write(file_name, &content)?)
    }
}

#[cfg(test)]
mod tests {
    include!("filesystem.test.rs");
}
