use super::*;
use crate::primitives::{ColorIntent, LogFormat, LogLevel, LogOutput, OutputFormat};
use tempfile::TempDir;

#[test]
fn test_config_loading_defaults() {
    let config = AppConfig::default();
    assert_eq!(config.log_level, 1);
    assert_eq!(config.log_format, LogFormat::Text);
    assert_eq!(config.log_output, LogOutput::Stderr);
    assert_eq!(config.color, ColorIntent::Auto);
    assert_eq!(config.output, OutputFormat::Text);
}

#[test]
fn test_config_merging() {
    let base = AppConfig::default();
    let override_config = AppConfig {
        log_level: 4,
        color: ColorIntent::Always,
        output: OutputFormat::Json,
        ..AppConfig::default()
    };

    let merged = base.merge_with(override_config);
    assert_eq!(merged.log_level, 4);
    assert_eq!(merged.color, ColorIntent::Always);
    assert_eq!(merged.output, OutputFormat::Json);
    assert_eq!(merged.log_format, LogFormat::Text);
}

#[test]
fn test_env_color_yields_to_cli() {
    let env_config = EnvironmentConfig {
        no_color: Some("1".into()),
        ..EnvironmentConfig::default()
    };

    let from_env = AppConfig::resolve(AppConfig::default(), &env_config).unwrap();
    assert_eq!(from_env.color, ColorIntent::Never);

    let cli = AppConfig {
        color: ColorIntent::Always,
        ..AppConfig::default()
    };
    let from_cli = AppConfig::resolve(cli, &env_config).unwrap();
    assert_eq!(from_cli.color, ColorIntent::Always);
}

#[test]
fn test_out_of_range_log_level_rejected() {
    let cli = AppConfig {
        log_level: 9,
        ..AppConfig::default()
    };
    let err = AppConfig::resolve(cli, &EnvironmentConfig::default()).unwrap_err();
    assert!(matches!(err, ConfigError::ValidationFailed { .. }));
}

#[test]
fn test_logger_config_from_app_config() {
    let config = AppConfig {
        log_level: 3,
        log_format: LogFormat::Json,
        color: ColorIntent::Never,
        ..AppConfig::default()
    };
    let logger_config = config.to_logger_config();
    assert_eq!(logger_config.level, LogLevel::Debug);
    assert_eq!(logger_config.format, LogFormat::Json);
    assert!(!logger_config.ansi);
}

#[test]
fn test_missing_env_files_are_ignored() {
    let temp_dir = TempDir::new().unwrap();
    assert!(AppConfig::load_env_files_from(temp_dir.path()).is_ok());
}

#[test]
fn test_env_file_sets_unset_variables() {
    let temp_dir = TempDir::new().unwrap();
    std::fs::write(
        temp_dir.path().join(".env"),
        "SAFESTATE_LOADER_TEST_MARKER=from-dotenv\n",
    )
    .unwrap();

    AppConfig::load_env_files_from(temp_dir.path()).unwrap();
    assert_eq!(
        std::env::var("SAFESTATE_LOADER_TEST_MARKER").as_deref(),
        Ok("from-dotenv")
    );
}

#[test]
fn test_malformed_env_file_reported() {
    let temp_dir = TempDir::new().unwrap();
    std::fs::write(temp_dir.path().join(".env.local"), "NOT VALID LINE 'oops\n").unwrap();

    let err = AppConfig::load_env_files_from(temp_dir.path()).unwrap_err();
    assert!(matches!(err, ConfigError::EnvFileError { ref file, .. } if file == ".env.local"));
}
