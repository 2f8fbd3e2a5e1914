//! Application configuration management
//!
//! Handles config loading, validation, and environment variable processing
//! following the precedence: defaults -> .env -> env vars -> CLI args.

use crate::primitives::*;
use clap::Parser;
use serde::Deserialize;

/// Default configuration values
pub mod defaults {
    pub const LOG_LEVEL: &str = "1"; // Errors and warnings by default
    pub const LOG_FORMAT: &str = "text";
    pub const LOG_OUTPUT: &str = "stderr";
    pub const COLOR: &str = "auto";
    pub const OUTPUT: &str = "text";
    pub const MAX_LOG_LEVEL: u8 = 4;
}

/// Default value functions for configuration fields
mod default_fns {
    use super::defaults;
    use crate::primitives::{ColorIntent, LogFormat, LogOutput, OutputFormat};

    pub fn log_level() -> u8 {
        defaults::LOG_LEVEL.parse().unwrap_or(1)
    }

    pub fn log_format() -> LogFormat {
        defaults::LOG_FORMAT.parse().unwrap_or(LogFormat::Text)
    }

    pub fn log_output() -> LogOutput {
        defaults::LOG_OUTPUT.parse().unwrap_or(LogOutput::Stderr)
    }

    pub fn color() -> ColorIntent {
        defaults::COLOR.parse().unwrap_or_default()
    }

    pub fn output() -> OutputFormat {
        defaults::OUTPUT.parse().unwrap_or_default()
    }
}

/// Application configuration structure
#[derive(Debug, Clone, Parser, Deserialize)]
pub struct AppConfig {
    /// Verbosity level (0=error, 1=warn, 2=info, 3=debug, 4=trace)
    #[arg(long, global = true, env = "SAFESTATE_LOG_LEVEL", default_value = defaults::LOG_LEVEL)]
    #[serde(default = "default_fns::log_level")]
    pub log_level: u8,

    /// Log format (text, json, pretty)
    #[arg(long, global = true, env = "SAFESTATE_LOG_FORMAT", default_value = defaults::LOG_FORMAT)]
    #[serde(default = "default_fns::log_format")]
    pub log_format: LogFormat,

    /// Log output stream (stderr, stdout)
    #[arg(long, global = true, env = "SAFESTATE_LOG_OUTPUT", default_value = defaults::LOG_OUTPUT)]
    #[serde(default = "default_fns::log_output")]
    pub log_output: LogOutput,

    /// Color output control (auto, always, never)
    #[arg(long, global = true, env = "SAFESTATE_COLOR", default_value = defaults::COLOR)]
    #[serde(default = "default_fns::color")]
    pub color: ColorIntent,

    /// Report format (text, json)
    #[arg(short, long, global = true, env = "SAFESTATE_OUTPUT", default_value = defaults::OUTPUT)]
    #[serde(default = "default_fns::output")]
    pub output: OutputFormat,

    /// Set when `--color`/`SAFESTATE_COLOR` was given, even as `auto`
    #[arg(skip)]
    #[serde(skip)]
    pub color_explicit: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: default_fns::log_level(),
            log_format: default_fns::log_format(),
            log_output: default_fns::log_output(),
            color: default_fns::color(),
            output: default_fns::output(),
            color_explicit: false,
        }
    }
}

impl AppConfig {
    /// Create LoggerConfig from AppConfig
    pub fn to_logger_config(&self) -> LoggerConfig {
        LoggerConfig {
            level: LogLevel::from_verbosity(self.log_level),
            format: self.log_format,
            output: self.log_output,
            ansi: match self.log_output {
                LogOutput::Stderr => self.color.resolve_stderr(),
                LogOutput::Stdout => self.color.resolve(),
            },
        }
    }

    /// Merge this config with another, taking non-default values from other
    pub fn merge_with(mut self, other: Self) -> Self {
        if other.log_level != default_fns::log_level() {
            self.log_level = other.log_level;
        }

        // For enums, detect if it's non-default
        if !matches!(other.log_format, LogFormat::Text) {
            self.log_format = other.log_format;
        }
        if !matches!(other.log_output, LogOutput::Stderr) {
            self.log_output = other.log_output;
        }
        if other.color_explicit || !matches!(other.color, ColorIntent::Auto) {
            self.color = other.color;
        }
        if !matches!(other.output, OutputFormat::Text) {
            self.output = other.output;
        }

        self
    }

    /// Validate the final configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.log_level > defaults::MAX_LOG_LEVEL {
            return Err(ConfigError::ValidationFailed {
                reason: format!(
                    "log level {} is out of range (0-{})",
                    self.log_level,
                    defaults::MAX_LOG_LEVEL
                ),
            });
        }

        Ok(())
    }
}
