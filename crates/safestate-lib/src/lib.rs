//! # safestate Library
//!
//! Resource-safety and deadlock analysis over allocation snapshots.
//!
//! ## Core Modules
//!
//! - [`model`] - Snapshot types and validation
//! - [`analysis`] - Safety check, targeted reachability, deadlock detection
//! - [`scenario`] - Scenario files, inline matrices, built-in examples
//! - [`display`] - Text and JSON reports
//! - [`primitives`] - Shared enums, logger config, and errors
//! - [`logger`] - Structured logging
//! - [`application`] - CLI interface, configuration, and command execution
//!
//! ## Quick Start
//!
//! ```
//! use safestate_lib::analysis::check_safety;
//! use safestate_lib::scenario::builtin;
//!
//! let input = builtin("classic-safe")?.safety_input()?;
//! let report = check_safety(&input)?;
//! assert!(report.is_safe);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod analysis;
pub mod application;
pub mod display;
pub mod logger;
pub mod model;
pub mod primitives;
pub mod scenario;

#[cfg(any(test, feature = "test-utils"))]
pub mod testing;

// Re-export commonly used types for convenience
pub use analysis::{
    DetectionReport, DetectionStrategy, SafetyReport, TargetReport, WaitForGraph,
    achievable_for, can_process_continue, check_safety, detect, detect_with,
};
pub use application::{AppConfig, Cli, CommandOutcome, Commands, execute_command};
pub use logger::Logger;
pub use model::{AnalysisError, DetectionInput, Matrix, SafetyInput, Vector};
pub use primitives::{
    ColorIntent, ConfigError, LogFormat, LogLevel, LogOutput, LoggerError, OutputFormat,
};
pub use scenario::{Scenario, ScenarioError};

// Private imports for the main function
use anyhow::Result;
use application::CliConfig;

/// Run the CLI: load config, initialize logging, execute the command
pub fn main() -> Result<CommandOutcome> {
    // .env files feed clap's env fallbacks, so they load first
    AppConfig::load_env_files()?;

    let cli = CliConfig::load()?;
    let app_config = AppConfig::load_from(cli.app_config)?;

    Logger::init(app_config.to_logger_config())?;

    execute_command(CliConfig {
        app_config,
        command: cli.command,
    })
}
