//! Application layer modules
//!
//! Organizes CLI interface, configuration management, and command execution.

pub mod cli;
pub mod commands;
pub mod config;
pub mod env;
pub mod loader;

// Re-export main types for convenience
pub use cli::{Cli, CliConfig, Commands, ScenarioArgs};
pub use commands::{CommandOutcome, execute_command, execute_command_with_writer};
pub use config::AppConfig;
pub use env::EnvironmentConfig;
