//! Scenario fixtures checked into `fixtures/scenarios`

use anyhow::{Context, Result};
use std::path::PathBuf;

/// Safe five-process snapshot, TOML
pub const TEXTBOOK: &str = "textbook.toml";
/// Two-process circular wait, YAML
pub const PRINTER_SCANNER: &str = "printer-scanner.yaml";
/// Multi-instance snapshot with no deadlock, JSON
pub const PIPELINE: &str = "pipeline.json";

/// Absolute path of a fixture file
pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("fixtures")
        .join("scenarios")
        .join(name)
}

/// Raw fixture text
pub fn load_fixture(name: &str) -> Result<String> {
    let path = fixture_path(name);
    std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to load fixture '{}'", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use safestate_lib::Scenario;

    #[test]
    fn test_every_fixture_loads() {
        for name in [TEXTBOOK, PRINTER_SCANNER, PIPELINE] {
            let scenario = Scenario::load(&fixture_path(name)).unwrap();
            assert!(scenario.description.is_some(), "{name} lacks a description");
        }
    }

    #[test]
    fn test_load_fixture_text() {
        let text = load_fixture(TEXTBOOK).unwrap();
        assert!(text.contains("max_need"));
        assert!(load_fixture("missing.toml").is_err());
    }
}
