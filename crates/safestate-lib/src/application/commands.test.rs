use super::*;
use crate::primitives::ColorIntent;
use std::path::PathBuf;
use tempfile::TempDir;

fn text_config() -> AppConfig {
    AppConfig {
        color: ColorIntent::Never,
        ..AppConfig::default()
    }
}

fn json_config() -> AppConfig {
    AppConfig {
        output: OutputFormat::Json,
        ..text_config()
    }
}

fn example(name: &str) -> ScenarioArgs {
    ScenarioArgs {
        example: Some(name.to_string()),
        ..ScenarioArgs::default()
    }
}

fn run(command: Commands, config: &AppConfig) -> (Result<CommandOutcome>, String) {
    let mut buffer = Vec::new();
    let result = execute_command_with_writer(command, config, &mut buffer);
    (result, String::from_utf8(buffer).unwrap())
}

// ===== SCENARIO ASSEMBLY TESTS =====

mod assemble_scenario_tests {
    use super::*;

    #[test]
    fn it_uses_inline_matrices() {
        let args = ScenarioArgs {
            available: Some("1 1".into()),
            allocation: Some("1 0; 0 1".into()),
            max_need: Some("2 1; 1 2".into()),
            ..ScenarioArgs::default()
        };
        let scenario = assemble_scenario(&args).unwrap();
        assert_eq!(scenario.available, Some(vec![1, 1]));
        assert_eq!(scenario.allocation, vec![vec![1, 0], vec![0, 1]]);
        assert_eq!(scenario.process_names(), vec!["P0", "P1"]);
    }

    #[test]
    fn it_overrides_example_fields() {
        let args = ScenarioArgs {
            available: Some("0 0 0".into()),
            processes: Some(vec!["a".into(), "b".into(), "c".into()]),
            ..example("classic-safe")
        };
        let scenario = assemble_scenario(&args).unwrap();
        assert_eq!(scenario.available, Some(vec![0, 0, 0]));
        assert_eq!(scenario.process_names(), vec!["a", "b", "c"]);
        assert_eq!(scenario.allocation[1], vec![2, 0, 0]);
    }

    #[test]
    fn it_rejects_negative_entries() {
        let args = ScenarioArgs {
            available: Some("1 -1".into()),
            ..ScenarioArgs::default()
        };
        let err = assemble_scenario(&args).unwrap_err();
        assert!(format!("{err:#}").contains("Invalid --available"));
        assert!(format!("{err:#}").contains("negative"));
    }

    #[test]
    fn it_loads_scenario_files() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("state.json");
        std::fs::write(
            &path,
            r#"{"allocation": [[1]], "request": [[0]], "available": [0]}"#,
        )
        .unwrap();

        let args = ScenarioArgs {
            scenario: Some(path),
            ..ScenarioArgs::default()
        };
        let scenario = assemble_scenario(&args).unwrap();
        assert_eq!(scenario.request, Some(vec![vec![0]]));
    }

    #[test]
    fn it_reports_missing_files_with_context() {
        let args = ScenarioArgs {
            scenario: Some(PathBuf::from("/nonexistent/state.toml")),
            ..ScenarioArgs::default()
        };
        let err = assemble_scenario(&args).unwrap_err();
        assert!(err.to_string().contains("Failed to load scenario"));
    }
}

// ===== HANDLE_SAFETY TESTS =====

mod handle_safety_tests {
    use super::*;

    fn safety(input: ScenarioArgs, verify: Option<Vec<String>>, fail_on_unsafe: bool) -> Commands {
        Commands::Safety {
            input,
            verify,
            fail_on_unsafe,
        }
    }

    #[test]
    fn it_reports_a_safe_state() {
        let (result, output) = run(safety(example("classic-safe"), None, true), &text_config());
        assert_eq!(result.unwrap(), CommandOutcome::Completed);
        assert!(output.contains("Safety Status: SAFE STATE"));
        assert!(output.contains("Safe Sequence: P0 -> P1 -> P2"));
    }

    #[test]
    fn it_completes_on_unsafe_without_flag() {
        let (result, output) = run(safety(example("unsafe"), None, false), &text_config());
        assert_eq!(result.unwrap(), CommandOutcome::Completed);
        assert!(output.contains("UNSAFE STATE"));
    }

    #[test]
    fn it_flags_unsafe_when_requested() {
        let (result, _) = run(safety(example("unsafe"), None, true), &text_config());
        let outcome = result.unwrap();
        assert_eq!(outcome, CommandOutcome::Flagged);
        assert_eq!(outcome.exit_code(), 2);
    }

    #[test]
    fn it_verifies_sequences() {
        let good = vec!["P1".to_string(), "P2".to_string(), "P0".to_string()];
        let (result, output) = run(
            safety(example("classic-safe"), Some(good), true),
            &text_config(),
        );
        assert_eq!(result.unwrap(), CommandOutcome::Completed);
        assert!(output.contains("Sequence P1 -> P2 -> P0: ✓ valid safe sequence"));

        let short = vec!["P0".to_string()];
        let (result, output) = run(
            safety(example("classic-safe"), Some(short), true),
            &text_config(),
        );
        assert_eq!(result.unwrap(), CommandOutcome::Flagged);
        assert!(output.contains("not a safe sequence"));
    }

    #[test]
    fn it_emits_json() {
        let (result, output) = run(safety(example("unsafe"), None, false), &json_config());
        assert!(result.is_ok());
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["is_safe"], false);
        assert_eq!(value["blocked"][0]["process"], "P0");
    }

    #[test]
    fn it_fails_without_max_need() {
        let (result, _) = run(safety(example("multi-instance"), None, false), &text_config());
        let err = result.unwrap_err();
        assert!(err.to_string().contains("max_need"));
    }

    #[test]
    fn it_surfaces_dimension_errors() {
        let args = ScenarioArgs {
            available: Some("1 1".into()),
            allocation: Some("1 0; 0 1".into()),
            max_need: Some("2 1".into()),
            ..ScenarioArgs::default()
        };
        let (result, _) = run(safety(args, None, false), &text_config());
        assert!(format!("{:#}", result.unwrap_err()).contains("max_need"));
    }
}

// ===== HANDLE_TARGET TESTS =====

mod handle_target_tests {
    use super::*;

    #[test]
    fn it_reports_the_prefix_to_the_target() {
        let command = Commands::Target {
            process: "P1".into(),
            input: example("classic-safe"),
            fail_on_unsafe: true,
        };
        let (result, output) = run(command, &text_config());
        assert_eq!(result.unwrap(), CommandOutcome::Completed);
        assert_eq!(output, "Target P1: ACHIEVABLE\nSequence: P0 -> P1\n");
    }

    #[test]
    fn it_flags_an_unreachable_target() {
        let command = Commands::Target {
            process: "P0".into(),
            input: example("unsafe"),
            fail_on_unsafe: true,
        };
        let (result, output) = run(command, &json_config());
        assert_eq!(result.unwrap(), CommandOutcome::Flagged);
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["achievable"], false);
        assert_eq!(value["sequence"], serde_json::json!([]));
    }
}

// ===== HANDLE_DETECT TESTS =====

mod handle_detect_tests {
    use super::*;

    #[test]
    fn it_detects_circular_wait() {
        let command = Commands::Detect {
            input: example("circular-wait"),
            strategy: DetectionStrategy::Reclamation,
            fail_on_deadlock: true,
        };
        let (result, output) = run(command, &text_config());
        assert_eq!(result.unwrap(), CommandOutcome::Flagged);
        assert!(output.contains("Deadlock Status: DETECTED"));
        assert!(output.contains("Cycle 1: P0 -> P1 -> P0"));
    }

    #[test]
    fn it_completes_on_a_chain() {
        let command = Commands::Detect {
            input: example("linear-chain"),
            strategy: DetectionStrategy::Reclamation,
            fail_on_deadlock: true,
        };
        let (result, output) = run(command, &text_config());
        assert_eq!(result.unwrap(), CommandOutcome::Completed);
        assert!(output.contains("Completion Order: P2 -> P1 -> P0"));
    }

    #[test]
    fn it_honours_the_strategy() {
        let command = Commands::Detect {
            input: example("complex"),
            strategy: DetectionStrategy::CycleSearch,
            fail_on_deadlock: false,
        };
        let (result, output) = run(command, &json_config());
        assert!(result.is_ok());
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["strategy"], "cycle-search");
        assert_eq!(value["deadlocked"], serde_json::json!(["P1", "P2"]));
    }
}

// ===== HANDLE_GRAPH TESTS =====

mod handle_graph_tests {
    use super::*;

    #[test]
    fn it_renders_the_wait_for_graph() {
        let command = Commands::Graph {
            input: example("circular-wait"),
            dot: false,
        };
        let (result, output) = run(command, &text_config());
        assert!(result.is_ok());
        assert!(output.contains("Wait-for edges:"));
        assert!(output.contains("  P2 -> P0"));
    }

    #[test]
    fn it_emits_dot() {
        let command = Commands::Graph {
            input: example("circular-wait"),
            dot: true,
        };
        let (result, output) = run(command, &text_config());
        assert!(result.is_ok());
        assert!(output.starts_with("digraph"));
        assert!(output.contains("#e74c3c"));
    }

    #[test]
    fn it_emits_json() {
        let command = Commands::Graph {
            input: example("linear-chain"),
            dot: false,
        };
        let (result, output) = run(command, &json_config());
        assert!(result.is_ok());
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["holders"][0]["holder"], "P0");
        assert_eq!(value["wait_for"][0]["waits_on"], serde_json::json!(["P1"]));
        assert_eq!(value["cycles"], serde_json::json!([]));
    }
}

// ===== HANDLE_EXAMPLES TESTS =====

mod handle_examples_tests {
    use super::*;

    #[test]
    fn it_lists_every_example() {
        let (result, output) = run(Commands::Examples { name: None }, &text_config());
        assert!(result.is_ok());
        for name in BUILTIN_NAMES {
            assert!(output.contains(name), "missing {name}");
        }
    }

    #[test]
    fn it_prints_an_example_as_toml() {
        let (result, output) = run(
            Commands::Examples {
                name: Some("circular-wait".into()),
            },
            &text_config(),
        );
        assert!(result.is_ok());
        let scenario: Scenario = toml::from_str(&output).unwrap();
        assert_eq!(scenario, builtin("circular-wait").unwrap());
    }

    #[test]
    fn it_rejects_unknown_examples() {
        let (result, _) = run(
            Commands::Examples {
                name: Some("nope".into()),
            },
            &json_config(),
        );
        assert!(result.unwrap_err().to_string().contains("Unknown example"));
    }
}
