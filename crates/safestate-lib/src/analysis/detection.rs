//! Deadlock detection over allocation/request snapshots
//!
//! Two strategies are offered:
//!
//! - [`DetectionStrategy::Reclamation`] repeatedly completes every process
//!   whose whole pending request fits in the free pool and reclaims its
//!   allocation. Whatever never completes is deadlocked. Correct for
//!   multi-instance resources.
//! - [`DetectionStrategy::CycleSearch`] reports the members of wait-for
//!   cycles. Exact only when every resource has a single instance.
//!
//! Both strategies report cycles for display. Under reclamation only cycles
//! made entirely of deadlocked processes are kept.

use super::wait_for::{Cycle, WaitForGraph};
use crate::model::{AnalysisError, DetectionInput};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// How the deadlocked set is decided
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum DetectionStrategy {
    /// Reclamation fixed point (multi-instance correct)
    #[default]
    Reclamation,
    /// Cycles in the single-holder wait-for graph
    CycleSearch,
}

/// Raw result of the reclamation fixed point
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reclamation {
    /// Processes in the order their requests were granted
    pub completion_order: Vec<String>,
    /// Processes whose request can never be granted, in process order
    pub unfinished: Vec<String>,
    pub passes: usize,
}

/// Outcome of [`detect`] / [`detect_with`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetectionReport {
    pub strategy: DetectionStrategy,
    pub is_deadlocked: bool,
    /// Deadlocked processes in process order
    pub deadlocked: Vec<String>,
    pub cycles: Vec<Cycle>,
    /// Completion order found by reclamation; empty under cycle search
    pub completion_order: Vec<String>,
    /// Every resource has at most one instance, so cycles are exact
    pub single_instance: bool,
}

/// Build the wait-for graph for a detection input
pub fn wait_for_graph(input: &DetectionInput) -> Result<WaitForGraph, AnalysisError> {
    WaitForGraph::build(
        &input.processes,
        &input.resources,
        &input.allocation,
        &input.request,
    )
}

/// Run the reclamation fixed point against pending requests
pub fn reclaim(input: &DetectionInput) -> Result<Reclamation, AnalysisError> {
    input.validate()?;
    let n = input.processes.len();

    let mut work = input.available_or_zero();
    let mut finished = vec![false; n];
    let mut completion_order = Vec::with_capacity(n);
    let mut passes = 0;

    loop {
        passes += 1;
        let mut progressed = false;

        for i in 0..n {
            if finished[i] {
                continue;
            }
            let grantable = input.request[i]
                .iter()
                .zip(&work)
                .all(|(wanted, free)| wanted <= free);
            if grantable {
                for (w, held) in work.iter_mut().zip(&input.allocation[i]) {
                    *w = w.saturating_add(*held);
                }
                finished[i] = true;
                completion_order.push(input.processes[i].clone());
                progressed = true;
            }
        }

        debug!(pass = passes, completed = completion_order.len(), "Reclamation pass complete");

        if !progressed || completion_order.len() == n {
            break;
        }
    }

    let unfinished = input
        .processes
        .iter()
        .zip(&finished)
        .filter(|(_, done)| !**done)
        .map(|(p, _)| p.clone())
        .collect();

    Ok(Reclamation {
        completion_order,
        unfinished,
        passes,
    })
}

/// Total instances of each resource never exceed one
fn is_single_instance(input: &DetectionInput) -> bool {
    let available = input.available_or_zero();
    (0..input.resources.len()).all(|j| {
        input
            .allocation
            .iter()
            .map(|row| row[j])
            .chain(std::iter::once(available[j]))
            .try_fold(0u64, |total, count| total.checked_add(count))
            .is_some_and(|total| total <= 1)
    })
}

/// Detect deadlock with the reclamation strategy
pub fn detect(input: &DetectionInput) -> Result<DetectionReport, AnalysisError> {
    detect_with(input, DetectionStrategy::default())
}

pub fn detect_with(
    input: &DetectionInput,
    strategy: DetectionStrategy,
) -> Result<DetectionReport, AnalysisError> {
    input.validate()?;
    debug!(?strategy, processes = input.processes.len(), "Running deadlock detection");

    let graph = wait_for_graph(input)?;
    let all_cycles = if graph.has_cycles() {
        graph.find_cycles()
    } else {
        Vec::new()
    };
    let single_instance = is_single_instance(input);

    let report = match strategy {
        DetectionStrategy::Reclamation => {
            let reclamation = reclaim(input)?;
            let deadlocked = reclamation.unfinished;

            if deadlocked.is_empty() == all_cycles.is_empty() {
                debug!("Cycle search agrees with reclamation");
            } else {
                warn!(
                    single_instance,
                    cycles = all_cycles.len(),
                    deadlocked = deadlocked.len(),
                    "Cycle search and reclamation disagree"
                );
            }

            let cycles = all_cycles
                .into_iter()
                .filter(|cycle| cycle.iter().all(|p| deadlocked.contains(p)))
                .collect();

            DetectionReport {
                strategy,
                is_deadlocked: !deadlocked.is_empty(),
                deadlocked,
                cycles,
                completion_order: reclamation.completion_order,
                single_instance,
            }
        }
        DetectionStrategy::CycleSearch => {
            if !single_instance {
                debug!("Multi-instance resources present; cycle search may miss deadlocks");
            }

            let deadlocked = input
                .processes
                .iter()
                .filter(|p| all_cycles.iter().any(|cycle| cycle.contains(*p)))
                .cloned()
                .collect();

            DetectionReport {
                strategy,
                is_deadlocked: !all_cycles.is_empty(),
                deadlocked,
                cycles: all_cycles,
                completion_order: Vec::new(),
                single_instance,
            }
        }
    };

    info!(
        is_deadlocked = report.is_deadlocked,
        cycles = report.cycles.len(),
        "Deadlock detection finished: [{}]",
        report.deadlocked.join(", ")
    );

    Ok(report)
}

#[cfg(test)]
mod tests {
    include!("detection.test.rs");
}
