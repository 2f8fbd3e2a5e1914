//! End-to-end tests for scenario files and `safestate examples`
//!
//! Covers:
//! - Exporting every built-in example and analyzing the exported file
//! - The same snapshot in TOML, JSON and YAML
//! - Load errors surfacing with the file path

use anyhow::Result;
use safestate_lib::Scenario;
use safestate_lib::scenario::{BUILTIN_NAMES, builtin};
use safestate_tests::{PRINTER_SCANNER, TestEnvironment, fixture_path, load_fixture};

#[test]
fn test_examples_listing() -> Result<()> {
    let env = TestEnvironment::new()?;

    let text = env.run(["examples"])?;
    for name in BUILTIN_NAMES {
        assert!(text.stdout.contains(name), "listing lacks {name}");
    }

    let json = env.run(["examples", "--output", "json"])?.json()?;
    assert_eq!(json.as_array().map(Vec::len), Some(BUILTIN_NAMES.len()));
    Ok(())
}

#[test]
fn test_exported_examples_reload() -> Result<()> {
    let env = TestEnvironment::new()?;

    for name in BUILTIN_NAMES {
        let exported = env.run(["examples", name])?;
        let parsed: Scenario = toml::from_str(&exported.stdout)?;
        assert_eq!(parsed, builtin(name)?, "{name} did not survive export");

        let path = env.write(&format!("{name}.toml"), &exported.stdout)?;
        let analysis = if parsed.max_need.is_some() { "safety" } else { "detect" };
        env.run([analysis, "--scenario", &path.display().to_string()])?;
    }
    Ok(())
}

#[test]
fn test_same_snapshot_in_every_format() -> Result<()> {
    let env = TestEnvironment::new()?;
    let yaml = load_fixture(PRINTER_SCANNER)?;
    let scenario = Scenario::load(&fixture_path(PRINTER_SCANNER))?;

    let json = env.write("state.json", &serde_json::to_string_pretty(&scenario)?)?;
    let toml = env.write_scenario("state.toml", &scenario)?;
    let yml = env.write("state.yml", &yaml)?;

    let outputs = [json, toml, yml]
        .iter()
        .map(|path| {
            env.run(["detect", "--scenario", &path.display().to_string()])
                .map(|run| run.stdout)
        })
        .collect::<Result<Vec<_>>>()?;

    assert!(outputs.windows(2).all(|pair| pair[0] == pair[1]));
    Ok(())
}

#[test]
fn test_inline_names_override_file() -> Result<()> {
    let env = TestEnvironment::new()?;
    let scenario = builtin("circular-wait")?;
    let path = env.write_scenario("cw.toml", &scenario)?;

    let run = env.run([
        "detect",
        "--scenario",
        &path.display().to_string(),
        "--processes",
        "alpha,beta,gamma",
    ])?;
    assert!(run.stdout.contains("Cycle 1: alpha -> beta -> alpha"));
    Ok(())
}

#[test]
fn test_load_errors_name_the_file() -> Result<()> {
    let env = TestEnvironment::new()?;

    let broken = env.write("broken.toml", "allocation = [[1, -2]]\n")?;
    let err = env
        .run(["detect", "--scenario", &broken.display().to_string()])
        .unwrap_err();
    assert!(format!("{err:#}").contains("broken.toml"));

    let other = env.write("state.csv", "1,2\n")?;
    let err = env
        .run(["detect", "--scenario", &other.display().to_string()])
        .unwrap_err();
    assert!(format!("{err:#}").contains("Unsupported scenario format"));
    Ok(())
}
