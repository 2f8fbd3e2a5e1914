use super::*;
use crate::scenario::builtin;

#[test]
fn test_write_creates_nested_files() {
    let dir = ScenarioDir::new().unwrap();
    let path = dir.write("nested/state.toml", "allocation = []\n").unwrap();
    assert!(path.exists());
    assert!(path.starts_with(dir.path()));
}

#[test]
fn test_written_scenarios_reload() {
    let dir = ScenarioDir::new().unwrap();
    let scenario = builtin("complex").unwrap();

    for file_name in ["complex.toml", "complex.json"] {
        let path = dir.write_scenario(file_name, &scenario).unwrap();
        assert_eq!(Scenario::load(&path).unwrap(), scenario);
    }
}

#[test]
fn test_yaml_writer_not_offered() {
    let dir = ScenarioDir::new().unwrap();
    let scenario = builtin("complex").unwrap();
    assert!(dir.write_scenario("complex.yaml", &scenario).is_err());
}

#[test]
fn test_cleanup_on_drop() {
    let dir = ScenarioDir::new().unwrap();
    let root = dir.path().to_path_buf();
    drop(dir);
    assert!(!root.exists());
}
