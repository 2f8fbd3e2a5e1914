//! Configuration loading
//!
//! `.env` files must be read before clap parses, because `SAFESTATE_*`
//! variables feed clap's `env` fallbacks.

use crate::primitives::ConfigError;
use std::path::Path;
use tracing::debug;

use super::{config::AppConfig, env::EnvironmentConfig};

/// Env files read from the working directory, first match wins per variable
pub const ENV_FILES: [&str; 2] = [".env.local", ".env"];

impl AppConfig {
    /// Load `.env.local` and `.env` into the process environment
    ///
    /// Missing files are fine. Existing variables are never overwritten.
    pub fn load_env_files() -> Result<(), ConfigError> {
        Self::load_env_files_from(Path::new("."))
    }

    pub fn load_env_files_from(dir: &Path) -> Result<(), ConfigError> {
        for env_file in ENV_FILES {
            match dotenvy::from_path(dir.join(env_file)) {
                Ok(()) => debug!("Loaded {}", env_file),
                Err(e) if e.not_found() => {}
                Err(e) => {
                    return Err(ConfigError::EnvFileError {
                        file: env_file.to_string(),
                        source: e,
                    });
                }
            }
        }
        Ok(())
    }

    /// Resolve config: defaults -> env vars -> CLI
    pub fn load_from(cli: AppConfig) -> Result<Self, ConfigError> {
        let env_config = EnvironmentConfig::load()?;
        Self::resolve(cli, &env_config)
    }

    /// Same as [`AppConfig::load_from`] with an explicit environment
    pub fn resolve(cli: AppConfig, env_config: &EnvironmentConfig) -> Result<Self, ConfigError> {
        // 1. Start with defaults
        let mut config = Self::default();

        // 2. Standard color variables
        config.color = env_config.apply_color_config(config.color);

        // 3. CLI arguments (highest precedence)
        config = config.merge_with(cli);

        // 4. Validate
        config.validate()?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    include!("loader.test.rs");
}
