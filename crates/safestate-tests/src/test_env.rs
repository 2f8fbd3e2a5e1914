//! In-process command runner for end-to-end tests
//!
//! Arguments go through the real clap parser and command handlers; only
//! stdout is swapped for a buffer and colors are forced off.

use anyhow::{Context, Result};
use safestate_lib::application::{CliConfig, execute_command_with_writer};
use safestate_lib::testing::plain_config;
use safestate_lib::{CommandOutcome, Scenario};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Result of one command invocation
#[derive(Debug)]
pub struct CommandRun {
    pub outcome: CommandOutcome,
    pub stdout: String,
}

impl CommandRun {
    pub fn flagged(&self) -> bool {
        self.outcome == CommandOutcome::Flagged
    }

    /// Parse stdout as JSON
    pub fn json(&self) -> Result<serde_json::Value> {
        serde_json::from_str(&self.stdout).context("stdout is not JSON")
    }
}

/// Scratch directory plus the command runner
pub struct TestEnvironment {
    /// Temporary directory (automatically cleaned up on drop)
    pub temp_dir: TempDir,
}

impl TestEnvironment {
    pub fn new() -> Result<Self> {
        Ok(Self {
            temp_dir: TempDir::new()?,
        })
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Write a file into the scratch directory and return its absolute path
    pub fn write(&self, name: &str, content: &str) -> Result<PathBuf> {
        let path = self.path().join(name);
        fs::write(&path, content).with_context(|| format!("Failed to write {name}"))?;
        Ok(path)
    }

    /// Serialize a scenario as TOML into the scratch directory
    pub fn write_scenario(&self, name: &str, scenario: &Scenario) -> Result<PathBuf> {
        self.write(name, &scenario.to_toml()?)
    }

    /// Run `safestate <args>` and capture stdout
    pub fn run<I, S>(&self, args: I) -> Result<CommandRun>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let argv: Vec<String> = std::iter::once("safestate".to_string())
            .chain(args.into_iter().map(|a| a.as_ref().to_string()))
            .collect();

        let cli = CliConfig::from_args(argv)?;
        let command = cli.command.context("no subcommand given")?;
        let config = plain_config(cli.app_config.output);

        let mut buffer = Vec::new();
        let outcome = execute_command_with_writer(command, &config, &mut buffer)?;

        Ok(CommandRun {
            outcome,
            stdout: String::from_utf8(buffer)?,
        })
    }
}
