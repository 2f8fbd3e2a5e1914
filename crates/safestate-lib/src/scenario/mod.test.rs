use super::*;
use std::fs;
use tempfile::TempDir;

// ============================================================================
// Test Utilities
// ============================================================================

fn write(dir: &Path, filename: &str, content: &str) -> PathBuf {
    let path = dir.join(filename);
    fs::write(&path, content).unwrap();
    path
}

const SAFETY_TOML: &str = r#"
processes = ["web", "db", "cache"]
resources = ["cpu", "mem", "disk"]
available = [10, 5, 7]
allocation = [[0, 1, 0], [2, 0, 0], [3, 0, 2]]
max_need = [[7, 5, 3], [3, 2, 2], [9, 0, 2]]
"#;

// ============================================================================
// Loading
// ============================================================================

#[test]
fn test_load_toml_with_names() {
    let temp_dir = TempDir::new().unwrap();
    let path = write(temp_dir.path(), "state.toml", SAFETY_TOML);

    let scenario = Scenario::load(&path).unwrap();
    let input = scenario.safety_input().unwrap();
    assert_eq!(input.processes, vec!["web", "db", "cache"]);
    assert_eq!(input.resources, vec!["cpu", "mem", "disk"]);
    assert_eq!(input.available, vec![10, 5, 7]);
}

#[test]
fn test_load_json_defaults_names() {
    let temp_dir = TempDir::new().unwrap();
    let path = write(
        temp_dir.path(),
        "state.json",
        r#"{"allocation": [[1, 0], [0, 1]], "request": [[0, 1], [1, 0]]}"#,
    );

    let input = Scenario::load(&path).unwrap().detection_input().unwrap();
    assert_eq!(input.processes, vec!["P0", "P1"]);
    assert_eq!(input.resources, vec!["R0", "R1"]);
    assert_eq!(input.available, None);
}

#[test]
fn test_load_yaml() {
    let temp_dir = TempDir::new().unwrap();
    let path = write(
        temp_dir.path(),
        "state.yml",
        "allocation:\n  - [1, 0]\n  - [0, 1]\nrequest:\n  - [0, 1]\n  - [0, 0]\navailable: [0, 0]\n",
    );

    let scenario = Scenario::load(&path).unwrap();
    assert_eq!(scenario.allocation, vec![vec![1, 0], vec![0, 1]]);
    assert_eq!(scenario.available, Some(vec![0, 0]));
}

#[test]
fn test_unknown_extension_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let path = write(temp_dir.path(), "state.txt", SAFETY_TOML);
    assert!(matches!(
        Scenario::load(&path),
        Err(ScenarioError::UnsupportedFormat { .. })
    ));
}

#[test]
fn test_missing_file_reported() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("absent.toml");
    assert!(matches!(
        Scenario::load(&path),
        Err(ScenarioError::FileReadError { .. })
    ));
}

#[test]
fn test_negative_entry_is_a_parse_error() {
    let temp_dir = TempDir::new().unwrap();
    let path = write(
        temp_dir.path(),
        "bad.toml",
        "available = [1, -1]\nallocation = [[0, 0]]\nmax_need = [[1, 1]]\n",
    );
    assert!(matches!(
        Scenario::load(&path),
        Err(ScenarioError::TomlParseError { .. })
    ));
}

// ============================================================================
// Conversion
// ============================================================================

#[test]
fn test_safety_input_requires_max_need() {
    let scenario = Scenario {
        available: Some(vec![1]),
        allocation: vec![vec![0]],
        ..Scenario::default()
    };
    let err = scenario.safety_input().unwrap_err();
    assert!(matches!(
        err,
        ScenarioError::MissingField {
            field: "max_need",
            ..
        }
    ));
}

#[test]
fn test_detection_input_requires_request() {
    let scenario = Scenario {
        allocation: vec![vec![0]],
        ..Scenario::default()
    };
    assert!(matches!(
        scenario.detection_input(),
        Err(ScenarioError::MissingField {
            field: "request",
            ..
        })
    ));
}

#[test]
fn test_resource_names_fall_back_to_available() {
    let scenario = Scenario {
        available: Some(vec![1, 2]),
        ..Scenario::default()
    };
    assert_eq!(scenario.resource_names(), vec!["R0", "R1"]);
    assert!(scenario.process_names().is_empty());
}

#[test]
fn test_toml_export_reloads() {
    let scenario = builtin("classic-safe").unwrap();
    let text = scenario.to_toml().unwrap();
    assert!(text.contains("max_need"));
    assert!(!text.contains("request"));

    let reloaded =
        Scenario::from_str_as(&text, ScenarioFormat::Toml, Path::new("export.toml")).unwrap();
    assert_eq!(reloaded, scenario);
}

#[test]
fn test_format_from_extension() {
    assert_eq!(
        ScenarioFormat::from_path(Path::new("a.yaml")),
        Some(ScenarioFormat::Yaml)
    );
    assert_eq!(
        ScenarioFormat::from_path(Path::new("a.json")),
        Some(ScenarioFormat::Json)
    );
    assert_eq!(ScenarioFormat::from_path(Path::new("a")), None);
}
