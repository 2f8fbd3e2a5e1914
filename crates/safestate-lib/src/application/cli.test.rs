use super::*;
use crate::primitives::OutputFormat;
use clap::CommandFactory;

#[test]
fn test_cli_definition_is_consistent() {
    Cli::command().debug_assert();
}

#[test]
fn test_safety_with_inline_matrices() {
    let cli = CliConfig::from_args([
        "safestate",
        "safety",
        "--available",
        "3 3 2",
        "--allocation",
        "0 1 0; 2 0 0",
        "--max-need",
        "7 5 3; 3 2 2",
        "--verify",
        "P1,P0",
    ])
    .unwrap();

    match cli.command {
        Some(Commands::Safety {
            input,
            verify,
            fail_on_unsafe,
        }) => {
            assert_eq!(input.available.as_deref(), Some("3 3 2"));
            assert_eq!(input.allocation.as_deref(), Some("0 1 0; 2 0 0"));
            assert_eq!(verify, Some(vec!["P1".to_string(), "P0".to_string()]));
            assert!(!fail_on_unsafe);
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn test_detect_defaults_to_reclamation() {
    let cli = CliConfig::from_args(["safestate", "detect", "--example", "complex"]).unwrap();
    match cli.command {
        Some(Commands::Detect {
            strategy, input, ..
        }) => {
            assert_eq!(strategy, DetectionStrategy::Reclamation);
            assert_eq!(input.example.as_deref(), Some("complex"));
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn test_detect_cycle_search_strategy() {
    let cli = CliConfig::from_args([
        "safestate",
        "detect",
        "-e",
        "complex",
        "--strategy",
        "cycle-search",
        "--fail-on-deadlock",
    ])
    .unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Detect {
            strategy: DetectionStrategy::CycleSearch,
            fail_on_deadlock: true,
            ..
        })
    ));
}

#[test]
fn test_scenario_and_example_conflict() {
    let result = CliConfig::from_args([
        "safestate",
        "graph",
        "--scenario",
        "a.toml",
        "--example",
        "complex",
    ]);
    assert!(result.is_err());
}

#[test]
fn test_global_options_after_subcommand() {
    let cli =
        CliConfig::from_args(["safestate", "examples", "--output", "json", "--color", "never"])
            .unwrap();
    assert_eq!(cli.app_config.output, OutputFormat::Json);
    assert_eq!(cli.app_config.color, crate::primitives::ColorIntent::Never);
}

#[test]
fn test_command_names() {
    let cli = CliConfig::from_args(["safestate", "target", "P1", "-e", "classic-safe"]).unwrap();
    let command = cli.command.unwrap();
    assert_eq!(command.name(), "target");
    assert_eq!(Commands::Examples { name: None }.name(), "examples");
}
