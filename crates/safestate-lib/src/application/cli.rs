use crate::analysis::DetectionStrategy;
use crate::primitives::ConfigError;
use clap::parser::ValueSource;
use clap::{ArgMatches, Args, CommandFactory, FromArgMatches, Parser, Subcommand};
use std::ffi::OsString;
use std::path::PathBuf;

use super::config::AppConfig;

/// safestate CLI - resource safety and deadlock analysis
#[derive(Debug, Clone, Parser)]
#[command(name = "safestate")]
#[command(about = "Check allocation snapshots for safe states and deadlocks")]
#[command(version)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Global configuration options
    #[command(flatten)]
    pub config: AppConfig,

    /// safestate commands
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Configuration loaded from CLI
pub struct CliConfig {
    pub app_config: AppConfig,
    pub command: Option<Commands>,
}

impl CliConfig {
    /// Load configuration from command line arguments
    pub fn load() -> Result<Self, ConfigError> {
        let matches = Cli::command().get_matches();
        let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());
        Ok(Self::from_matches(cli, &matches))
    }

    /// Parse an explicit argument list, e.g. from tests
    pub fn from_args<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = Cli::command().try_get_matches_from(args)?;
        let cli = Cli::from_arg_matches(&matches)?;
        Ok(Self::from_matches(cli, &matches))
    }

    fn from_matches(mut cli: Cli, matches: &ArgMatches) -> Self {
        cli.config.color_explicit = explicitly_set(matches, "color");
        Self {
            app_config: cli.config,
            command: cli.command,
        }
    }
}

/// Whether `id` came from the command line or its env var, at any subcommand depth
fn explicitly_set(matches: &ArgMatches, id: &str) -> bool {
    let here = matches.ids().any(|present| present == id)
        && matches!(
            matches.value_source(id),
            Some(ValueSource::CommandLine | ValueSource::EnvVariable)
        );
    here || matches
        .subcommand()
        .is_some_and(|(_, sub)| explicitly_set(sub, id))
}

/// Where a snapshot comes from. Inline matrices override the matching
/// fields of a loaded file or example.
#[derive(Debug, Clone, Default, Args)]
pub struct ScenarioArgs {
    /// Scenario file (.toml, .json, .yaml or .yml)
    #[arg(short, long, conflicts_with = "example")]
    pub scenario: Option<PathBuf>,

    /// Built-in example (see `safestate examples`)
    #[arg(short, long)]
    pub example: Option<String>,

    /// Process names, comma separated
    #[arg(long, value_delimiter = ',')]
    pub processes: Option<Vec<String>>,

    /// Resource names, comma separated
    #[arg(long, value_delimiter = ',')]
    pub resources: Option<Vec<String>>,

    /// Free instances per resource, e.g. "3 3 2"
    #[arg(long, allow_hyphen_values = true)]
    pub available: Option<String>,

    /// Held instances, rows separated by ';', e.g. "0 1 0; 2 0 0"
    #[arg(long, allow_hyphen_values = true)]
    pub allocation: Option<String>,

    /// Maximum claims, same layout as --allocation
    #[arg(long, allow_hyphen_values = true)]
    pub max_need: Option<String>,

    /// Pending requests, same layout as --allocation
    #[arg(long, allow_hyphen_values = true)]
    pub request: Option<String>,
}

/// Available safestate commands
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Check whether a snapshot is in a safe state
    Safety {
        #[command(flatten)]
        input: ScenarioArgs,

        /// Replay a proposed completion order, comma separated
        #[arg(long, value_delimiter = ',')]
        verify: Option<Vec<String>>,

        /// Exit with status 2 when the state is unsafe or --verify fails
        #[arg(long)]
        fail_on_unsafe: bool,
    },

    /// Check whether one process can be driven to completion
    Target {
        /// Process name
        #[arg(help = "Process that should be able to finish")]
        process: String,

        #[command(flatten)]
        input: ScenarioArgs,

        /// Exit with status 2 when the process cannot finish
        #[arg(long)]
        fail_on_unsafe: bool,
    },

    /// Detect deadlocked processes
    Detect {
        #[command(flatten)]
        input: ScenarioArgs,

        /// How the deadlocked set is decided
        #[arg(long, value_enum, default_value_t = DetectionStrategy::Reclamation)]
        strategy: DetectionStrategy,

        /// Exit with status 2 when a deadlock is found
        #[arg(long)]
        fail_on_deadlock: bool,
    },

    /// Show the wait-for graph
    Graph {
        #[command(flatten)]
        input: ScenarioArgs,

        /// Emit Graphviz DOT with deadlocked processes highlighted
        #[arg(long)]
        dot: bool,
    },

    /// List built-in examples, or print one as a scenario file
    Examples {
        /// Example to print
        name: Option<String>,
    },
}

impl Commands {
    /// Short name used in logs
    pub fn name(&self) -> &'static str {
        match self {
            Commands::Safety { .. } => "safety",
            Commands::Target { .. } => "target",
            Commands::Detect { .. } => "detect",
            Commands::Graph { .. } => "graph",
            Commands::Examples { .. } => "examples",
        }
    }
}

impl Default for Cli {
    fn default() -> Self {
        Self {
            config: AppConfig::default(),
            command: None,
        }
    }
}

#[cfg(test)]
mod tests {
    include!("cli.test.rs");
}
