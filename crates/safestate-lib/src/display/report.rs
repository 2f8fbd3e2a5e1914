//! Text and JSON renderings of analysis results
//!
//! Text reports are plain `String`s so commands can write them to any sink.

use super::styling::StyleManager;
use super::table::Table;
use crate::analysis::{
    Cycle, DetectionReport, DetectionStrategy, SafetyReport, TargetReport, WaitForGraph,
};
use crate::model::{DetectionInput, SafetyInput};
use crate::scenario::Scenario;
use serde::Serialize;
use std::fmt::Write;

fn vector(values: &[u64]) -> String {
    format!("{values:?}")
}

fn list_or_none(names: &[String]) -> String {
    if names.is_empty() {
        "None".to_string()
    } else {
        names.join(", ")
    }
}

fn strategy_name(strategy: DetectionStrategy) -> &'static str {
    match strategy {
        DetectionStrategy::Reclamation => "reclamation",
        DetectionStrategy::CycleSearch => "cycle-search",
    }
}

fn render_cycles(styles: &StyleManager, cycles: &[Cycle], out: &mut String) {
    for (idx, cycle) in cycles.iter().enumerate() {
        let mut closed = cycle.clone();
        closed.extend(cycle.first().cloned());
        let _ = writeln!(out, "Cycle {}: {}", idx + 1, styles.chain(&closed));
    }
}

/// Safety verdict, sequence, per-pass trace and, when unsafe, what blocks
pub fn render_safety(styles: &StyleManager, input: &SafetyInput, report: &SafetyReport) -> String {
    let mut out = String::new();

    let status = if report.is_safe {
        styles.style_success("SAFE STATE")
    } else {
        styles.style_error("UNSAFE STATE")
    };
    let _ = writeln!(out, "Safety Status: {status}");
    let _ = writeln!(out, "Processes: {}", input.processes.join(", "));
    let _ = writeln!(out, "Resources: {}", input.resources.join(", "));
    let _ = writeln!(out, "Available: {}", vector(&input.available));
    out.push('\n');

    if report.is_safe {
        let _ = writeln!(out, "Safe Sequence: {}", styles.chain(&report.sequence));
    } else {
        let _ = writeln!(out, "Incomplete sequence: {}", list_or_none(&report.sequence));
        out.push_str("Some processes cannot be satisfied in any order.\n");
    }

    out.push('\n');
    let _ = writeln!(out, "Analysis Iterations: {}", report.trace.len());
    for pass in &report.trace {
        let _ = writeln!(out, "\nIteration {}:", pass.pass);
        let mut table = Table::new(styles).indent(2).separator("  ");
        for eval in &pass.evaluations {
            let status = if eval.admitted {
                styles.format_success("ALLOCATED")
            } else {
                styles.format_error("WAITING")
            };
            table = table.row(&[
                format!("{}:", eval.process),
                status,
                format!("need {}", vector(&eval.need)),
                format!("work {}", vector(&eval.work)),
            ]);
        }
        out.push_str(&table.render());
    }

    let blocked = report.blocked();
    if !blocked.is_empty() {
        let _ = writeln!(out, "\n{}", styles.style_emphasis("Blocked processes:"));
        for (name, continuation) in blocked {
            let reasons = continuation
                .shortfalls
                .iter()
                .map(|s| format!("{} needs {}, {} free", s.resource, s.needed, s.available))
                .collect::<Vec<_>>()
                .join("; ");
            let _ = writeln!(out, "  {name}: {reasons}");
        }
    }

    let _ = writeln!(out, "\nFinal work: {}", vector(&report.final_work));
    out
}

/// Whether one process can be driven to completion, and the prefix that gets there
pub fn render_target(styles: &StyleManager, report: &TargetReport) -> String {
    if report.achievable {
        format!(
            "Target {}: {}\nSequence: {}\n",
            report.target,
            styles.style_success("ACHIEVABLE"),
            styles.chain(&report.sequence)
        )
    } else {
        format!(
            "Target {}: {}\n",
            report.target,
            styles.style_error("NOT ACHIEVABLE")
        )
    }
}

/// Outcome of replaying a proposed completion order
pub fn render_verification(styles: &StyleManager, sequence: &[String], valid: bool) -> String {
    let verdict = if valid {
        styles.format_success("valid safe sequence")
    } else {
        styles.format_error("not a safe sequence")
    };
    format!("Sequence {}: {verdict}\n", styles.chain(sequence))
}

/// Deadlock verdict, deadlocked set, cycles and completion order
pub fn render_detection(
    styles: &StyleManager,
    input: &DetectionInput,
    report: &DetectionReport,
) -> String {
    let mut out = String::new();

    let status = if report.is_deadlocked {
        styles.style_error("DETECTED")
    } else {
        styles.style_success("NOT DETECTED")
    };
    let _ = writeln!(out, "Deadlock Status: {status}");
    let _ = writeln!(out, "Strategy: {}", strategy_name(report.strategy));
    let _ = writeln!(out, "Processes: {}", input.processes.join(", "));
    let _ = writeln!(out, "Resources: {}", input.resources.join(", "));
    let _ = writeln!(out, "Available: {}", vector(&input.available_or_zero()));
    out.push('\n');

    if report.is_deadlocked {
        let _ = writeln!(out, "Deadlocked Processes: {}", report.deadlocked.join(", "));
    }
    if !report.completion_order.is_empty() {
        let _ = writeln!(
            out,
            "Completion Order: {}",
            styles.chain(&report.completion_order)
        );
    }

    let _ = writeln!(out, "Number of cycles: {}", report.cycles.len());
    if !report.cycles.is_empty() {
        out.push('\n');
        render_cycles(styles, &report.cycles, &mut out);
    }

    if !report.single_instance && report.strategy == DetectionStrategy::CycleSearch {
        let _ = writeln!(
            out,
            "\n{}",
            styles.format_warning(
                "Resources have multiple instances; cycle search may miss deadlocks"
            )
        );
    }
    out
}

/// Resource holders, wait-for edges and cycles of a wait-for graph
pub fn render_wait_for(styles: &StyleManager, graph: &WaitForGraph) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "{}", styles.style_emphasis("Holders:"));
    let mut holders = Table::new(styles).indent(2).separator(" ");
    for (resource, holder) in graph.holders() {
        let holder = holder
            .clone()
            .unwrap_or_else(|| styles.style_subtle("(free)"));
        holders = holders.row(&[format!("{resource}:"), holder]);
    }
    out.push_str(&holders.render());

    let _ = writeln!(out, "\n{}", styles.style_emphasis("Wait-for edges:"));
    let mut edges = Table::new(styles).indent(2).separator(" ");
    for (process, waits_on) in graph.adjacency() {
        let targets = if waits_on.is_empty() {
            styles.style_subtle("(none)")
        } else {
            waits_on.join(", ")
        };
        edges = edges.row(&[process, "->".to_string(), targets]);
    }
    out.push_str(&edges.render());

    let cycles = graph.find_cycles();
    out.push('\n');
    if cycles.is_empty() {
        out.push_str("No cycles\n");
    } else {
        render_cycles(styles, &cycles, &mut out);
    }
    out
}

/// Built-in example listing
pub fn render_examples(styles: &StyleManager, examples: &[(&str, Scenario)]) -> String {
    let mut table = Table::new(styles).header(&["Name", "Analysis", "Description"]);
    for (name, scenario) in examples {
        let analysis = match (scenario.max_need.is_some(), scenario.request.is_some()) {
            (true, true) => "safety, detect",
            (true, false) => "safety",
            (false, true) => "detect",
            (false, false) => "-",
        };
        table = table.row(&[
            name.to_string(),
            analysis.to_string(),
            scenario.description.clone().unwrap_or_default(),
        ]);
    }
    table.render()
}

/// Safety report as JSON, with blocked processes spelled out
pub fn safety_json(report: &SafetyReport) -> serde_json::Result<serde_json::Value> {
    let mut value = serde_json::to_value(report)?;
    let blocked = report
        .blocked()
        .into_iter()
        .map(|(name, continuation)| {
            serde_json::json!({
                "process": name,
                "shortfalls": continuation.shortfalls,
            })
        })
        .collect::<Vec<_>>();
    value["blocked"] = serde_json::Value::Array(blocked);
    Ok(value)
}

/// Pretty JSON for any serializable report
pub fn to_json<T: Serialize + ?Sized>(value: &T) -> serde_json::Result<String> {
    serde_json::to_string_pretty(value)
}

#[cfg(test)]
mod tests {
    include!("report.test.rs");
}
