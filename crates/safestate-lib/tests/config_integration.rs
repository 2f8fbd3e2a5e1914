use safestate_lib::application::{AppConfig, CliConfig, Commands, EnvironmentConfig};
use safestate_lib::primitives::{ColorIntent, ConfigError, LogFormat, LogLevel, OutputFormat};

#[test]
fn test_config_default_creation() {
    let config = AppConfig::default();

    assert_eq!(config.log_level, 1);
    assert_eq!(config.color, ColorIntent::Auto);
    assert_eq!(config.output, OutputFormat::Text);
    assert_eq!(config.to_logger_config().level, LogLevel::Warning);
}

#[test]
fn test_config_merging_integration() {
    let base_config = AppConfig::default();
    let override_config = AppConfig {
        log_level: 3,
        color: ColorIntent::Never,
        ..AppConfig::default()
    };

    let merged = base_config.merge_with(override_config);

    assert_eq!(merged.log_level, 3);
    assert_eq!(merged.color, ColorIntent::Never);
    // Non-overridden fields keep their defaults
    assert_eq!(merged.log_format, LogFormat::Text);
    assert_eq!(merged.output, OutputFormat::Text);
}

#[test]
fn test_global_flags_after_subcommand() {
    let cli = CliConfig::from_args([
        "safestate",
        "detect",
        "--example",
        "complex",
        "--output",
        "json",
        "--log-format",
        "pretty",
    ])
    .unwrap();

    assert_eq!(cli.app_config.output, OutputFormat::Json);
    assert_eq!(cli.app_config.log_format, LogFormat::Pretty);
    assert!(matches!(cli.command, Some(Commands::Detect { .. })));
}

#[test]
fn test_no_color_beats_default_but_not_cli() {
    let env = EnvironmentConfig {
        no_color: Some("1".to_string()),
        ..EnvironmentConfig::default()
    };

    let from_env = AppConfig::resolve(AppConfig::default(), &env).unwrap();
    assert_eq!(from_env.color, ColorIntent::Never);

    let cli = AppConfig {
        color: ColorIntent::Always,
        ..AppConfig::default()
    };
    let from_cli = AppConfig::resolve(cli, &env).unwrap();
    assert_eq!(from_cli.color, ColorIntent::Always);
}

#[test]
fn test_explicit_auto_color_beats_ci() {
    let env = EnvironmentConfig {
        ci: Some("1".to_string()),
        ..EnvironmentConfig::default()
    };

    let explicit = CliConfig::from_args(["safestate", "--color", "auto", "examples"]).unwrap();
    assert!(explicit.app_config.color_explicit);
    let resolved = AppConfig::resolve(explicit.app_config, &env).unwrap();
    assert_eq!(resolved.color, ColorIntent::Auto);

    let after_subcommand = CliConfig::from_args(["safestate", "examples", "--color", "auto"]).unwrap();
    assert!(after_subcommand.app_config.color_explicit);

    let implicit = CliConfig::from_args(["safestate", "examples"]).unwrap();
    assert!(!implicit.app_config.color_explicit);
    let resolved = AppConfig::resolve(implicit.app_config, &env).unwrap();
    assert_eq!(resolved.color, ColorIntent::Never);
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
fn test_invalid_output_format_is_a_parse_error() {
    let result = CliConfig::from_args(["safestate", "--output", "xml", "examples"]);
    assert!(result.is_err());
}
