//! Test fixtures shared by unit tests and the end-to-end crate
//!
//! Enabled for this crate's own tests and, for other crates, through the
//! `test-utils` feature.

pub mod filesystem;

pub use filesystem::ScenarioDir;

use crate::application::AppConfig;
use crate::primitives::{ColorIntent, OutputFormat};

/// Config with colors off, so rendered text can be compared verbatim
pub fn plain_config(output: OutputFormat) -> AppConfig {
    AppConfig {
        color: ColorIntent::Never,
        output,
        ..AppConfig::default()
    }
}
