//! Command execution handlers
//!
//! Each handler assembles a scenario, runs one analysis, and writes the
//! rendered result to the supplied writer. Verdicts are results, not
//! errors: only `--fail-on-*` flags turn them into a non-zero exit.

use crate::analysis::{
    DetectionStrategy, achievable_for, check_safety, detect, detect_with, verify_sequence,
    wait_for_graph,
};
use crate::application::cli::ScenarioArgs;
use crate::application::{AppConfig, CliConfig, Commands};
use crate::display::{self, StyleManager};
use crate::primitives::{LogContext, OutputFormat};
use crate::scenario::{BUILTIN_NAMES, Scenario, builtin, builtins, parse_matrix, parse_vector};
use crate::{analysis_span, log_info};
use anyhow::{Context, Result};
use std::io::Write;
use tracing::debug;

/// How a completed command should exit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    /// Analysis completed
    Completed,
    /// Analysis completed and a `--fail-on-*` condition was met
    Flagged,
}

impl CommandOutcome {
    pub fn exit_code(self) -> u8 {
        match self {
            CommandOutcome::Completed => 0,
            CommandOutcome::Flagged => 2,
        }
    }

    fn flag_if(condition: bool) -> Self {
        if condition {
            CommandOutcome::Flagged
        } else {
            CommandOutcome::Completed
        }
    }
}

/// Execute CLI commands, writing reports to stdout
pub fn execute_command(config: CliConfig) -> Result<CommandOutcome> {
    let app_config = config.app_config;
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    let Some(command) = config.command else {
        let styles = StyleManager::new(app_config.color);
        writeln!(
            out,
            "{}",
            styles.style_emphasis("safestate - resource safety and deadlock analysis")
        )?;
        writeln!(
            out,
            "{}",
            styles.style_subtle("Run 'safestate --help' for usage information")
        )?;
        return Ok(CommandOutcome::Completed);
    };

    execute_command_with_writer(command, &app_config, &mut out)
}

/// Execute a specific command against any writer (for testing)
pub fn execute_command_with_writer(
    command: Commands,
    config: &AppConfig,
    out: &mut dyn Write,
) -> Result<CommandOutcome> {
    debug!(command = command.name(), output = ?config.output, "Executing command");
    let styles = StyleManager::new(config.color);

    match command {
        Commands::Safety {
            input,
            verify,
            fail_on_unsafe,
        } => handle_safety(config, &styles, out, &input, verify, fail_on_unsafe),
        Commands::Target {
            process,
            input,
            fail_on_unsafe,
        } => handle_target(config, &styles, out, &input, &process, fail_on_unsafe),
        Commands::Detect {
            input,
            strategy,
            fail_on_deadlock,
        } => handle_detect(config, &styles, out, &input, strategy, fail_on_deadlock),
        Commands::Graph { input, dot } => handle_graph(config, &styles, out, &input, dot),
        Commands::Examples { name } => handle_examples(config, &styles, out, name.as_deref()),
    }
}

/// Build the scenario named by `--scenario` / `--example`, then apply inline overrides
pub fn assemble_scenario(args: &ScenarioArgs) -> Result<Scenario> {
    let mut scenario = match (&args.scenario, &args.example) {
        (Some(path), _) => Scenario::load(path)
            .with_context(|| format!("Failed to load scenario {}", path.display()))?,
        (None, Some(name)) => builtin(name)?,
        (None, None) => Scenario::default(),
    };

    if let Some(names) = &args.processes {
        scenario.processes = Some(names.clone());
    }
    if let Some(names) = &args.resources {
        scenario.resources = Some(names.clone());
    }
    if let Some(text) = &args.available {
        scenario.available = Some(parse_vector(text).context("Invalid --available")?);
    }
    if let Some(text) = &args.allocation {
        scenario.allocation = parse_matrix(text).context("Invalid --allocation")?;
    }
    if let Some(text) = &args.max_need {
        scenario.max_need = Some(parse_matrix(text).context("Invalid --max-need")?);
    }
    if let Some(text) = &args.request {
        scenario.request = Some(parse_matrix(text).context("Invalid --request")?);
    }

    Ok(scenario)
}

fn write_json(out: &mut dyn Write, value: &serde_json::Value) -> Result<()> {
    writeln!(out, "{}", display::to_json(value)?)?;
    Ok(())
}

fn handle_safety(
    config: &AppConfig,
    styles: &StyleManager,
    out: &mut dyn Write,
    args: &ScenarioArgs,
    verify: Option<Vec<String>>,
    fail_on_unsafe: bool,
) -> Result<CommandOutcome> {
    let input = assemble_scenario(args)?.safety_input()?;
    let span = analysis_span!(
        "safety",
        processes = input.processes.len(),
        resources = input.resources.len()
    );
    let _guard = span.enter();

    let report = check_safety(&input).context("Safety check failed")?;
    let verification = match verify {
        Some(sequence) => {
            let valid = verify_sequence(&input, &sequence).context("Sequence replay failed")?;
            Some((sequence, valid))
        }
        None => None,
    };

    match config.output {
        OutputFormat::Text => {
            write!(out, "{}", display::render_safety(styles, &input, &report))?;
            if let Some((sequence, valid)) = &verification {
                write!(out, "\n{}", display::render_verification(styles, sequence, *valid))?;
            }
        }
        OutputFormat::Json => {
            let mut value = display::safety_json(&report)?;
            if let Some((sequence, valid)) = &verification {
                value["verification"] = serde_json::json!({
                    "sequence": sequence,
                    "valid": valid,
                });
            }
            write_json(out, &value)?;
        }
    }

    log_info!(
        &format!(
            "Safety check complete: {}",
            if report.is_safe { "safe" } else { "unsafe" }
        ),
        LogContext::with_dimensions("safety", input.processes.len(), input.resources.len())
    );

    let verification_failed = verification.is_some_and(|(_, valid)| !valid);
    Ok(CommandOutcome::flag_if(
        fail_on_unsafe && (!report.is_safe || verification_failed),
    ))
}

fn handle_target(
    config: &AppConfig,
    styles: &StyleManager,
    out: &mut dyn Write,
    args: &ScenarioArgs,
    process: &str,
    fail_on_unsafe: bool,
) -> Result<CommandOutcome> {
    let input = assemble_scenario(args)?.safety_input()?;
    let span = analysis_span!(
        "target",
        processes = input.processes.len(),
        resources = input.resources.len()
    );
    let _guard = span.enter();

    let report = achievable_for(&input, process).context("Target check failed")?;

    match config.output {
        OutputFormat::Text => write!(out, "{}", display::render_target(styles, &report))?,
        OutputFormat::Json => write_json(out, &serde_json::to_value(&report)?)?,
    }

    Ok(CommandOutcome::flag_if(fail_on_unsafe && !report.achievable))
}

fn handle_detect(
    config: &AppConfig,
    styles: &StyleManager,
    out: &mut dyn Write,
    args: &ScenarioArgs,
    strategy: DetectionStrategy,
    fail_on_deadlock: bool,
) -> Result<CommandOutcome> {
    let input = assemble_scenario(args)?.detection_input()?;
    let span = analysis_span!(
        "detect",
        processes = input.processes.len(),
        resources = input.resources.len()
    );
    let _guard = span.enter();

    let report = detect_with(&input, strategy).context("Deadlock detection failed")?;

    match config.output {
        OutputFormat::Text => write!(out, "{}", display::render_detection(styles, &input, &report))?,
        OutputFormat::Json => write_json(out, &serde_json::to_value(&report)?)?,
    }

    log_info!(
        &format!(
            "Deadlock detection complete: {} deadlocked",
            report.deadlocked.len()
        ),
        LogContext::with_dimensions("detect", input.processes.len(), input.resources.len())
    );

    Ok(CommandOutcome::flag_if(
        fail_on_deadlock && report.is_deadlocked,
    ))
}

fn handle_graph(
    config: &AppConfig,
    styles: &StyleManager,
    out: &mut dyn Write,
    args: &ScenarioArgs,
    dot: bool,
) -> Result<CommandOutcome> {
    let input = assemble_scenario(args)?.detection_input()?;
    let graph = wait_for_graph(&input).context("Failed to build wait-for graph")?;

    if dot {
        let deadlocked = detect(&input)?.deadlocked;
        write!(out, "{}", graph.to_dot(&deadlocked))?;
        return Ok(CommandOutcome::Completed);
    }

    match config.output {
        OutputFormat::Text => write!(out, "{}", display::render_wait_for(styles, &graph))?,
        OutputFormat::Json => {
            let holders = graph
                .holders()
                .iter()
                .map(|(resource, holder)| {
                    serde_json::json!({ "resource": resource, "holder": holder })
                })
                .collect::<Vec<_>>();
            let edges = graph
                .adjacency()
                .into_iter()
                .map(|(process, waits_on)| {
                    serde_json::json!({ "process": process, "waits_on": waits_on })
                })
                .collect::<Vec<_>>();
            write_json(
                out,
                &serde_json::json!({
                    "holders": holders,
                    "wait_for": edges,
                    "cycles": graph.find_cycles(),
                }),
            )?;
        }
    }

    Ok(CommandOutcome::Completed)
}

fn handle_examples(
    config: &AppConfig,
    styles: &StyleManager,
    out: &mut dyn Write,
    name: Option<&str>,
) -> Result<CommandOutcome> {
    match (name, config.output) {
        (None, OutputFormat::Text) => {
            write!(out, "{}", display::render_examples(styles, &builtins()))?;
        }
        (None, OutputFormat::Json) => {
            let listing = builtins()
                .into_iter()
                .map(|(name, scenario)| serde_json::json!({ "name": name, "scenario": scenario }))
                .collect::<Vec<_>>();
            write_json(out, &serde_json::Value::Array(listing))?;
        }
        (Some(name), OutputFormat::Text) => {
            let scenario = builtin(name)?;
            let text = scenario
                .to_toml()
                .with_context(|| format!("Failed to serialize example '{name}'"))?;
            write!(out, "{text}")?;
        }
        (Some(name), OutputFormat::Json) => {
            write_json(out, &serde_json::to_value(builtin(name)?)?)?;
        }
    }

    debug!(available = BUILTIN_NAMES.len(), "Listed examples");
    Ok(CommandOutcome::Completed)
}

#[cfg(test)]
mod tests {
    include!("commands.test.rs");
}
