//! Resource-safety analysis over a need/allocation/available snapshot
//!
//! Runs the classic fixed point: a work vector starts at `available`, and
//! every pass admits each unfinished process whose remaining need fits in
//! work, releasing its allocation back into work. The state is safe when
//! every process is eventually admitted.
//!
//! All processes admissible within a pass are admitted in that same pass,
//! scanned in index order. This fixes both the reported sequence and the
//! number of passes in the trace.

use crate::model::{AnalysisError, Matrix, SafetyInput, Vector, resolve_process};
use serde::Serialize;
use tracing::{debug, info, trace};

/// One resource dimension where a process needs more than is free
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Shortfall {
    pub resource: String,
    pub needed: u64,
    pub available: u64,
}

/// Whether one process can run to completion against one work vector
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Continuation {
    pub process: usize,
    pub shortfalls: Vec<Shortfall>,
}

impl Continuation {
    pub fn can_continue(&self) -> bool {
        self.shortfalls.is_empty()
    }
}

/// A single process evaluated during a pass
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProcessEvaluation {
    pub process: String,
    pub need: Vector,
    /// Work vector as it stood when this process was evaluated
    pub work: Vector,
    pub admitted: bool,
}

/// One pass over all still-unfinished processes
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SafetyPass {
    /// 1-based pass number
    pub pass: usize,
    pub evaluations: Vec<ProcessEvaluation>,
}

impl SafetyPass {
    pub fn admitted(&self) -> impl Iterator<Item = &str> {
        self.evaluations
            .iter()
            .filter(|e| e.admitted)
            .map(|e| e.process.as_str())
    }
}

/// Outcome of [`check_safety`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SafetyReport {
    pub is_safe: bool,
    /// Complete safe sequence, or the partial order reached before stalling
    pub sequence: Vec<String>,
    pub trace: Vec<SafetyPass>,
    /// Work vector after the last pass
    pub final_work: Vector,
    #[serde(skip)]
    need: Matrix,
    #[serde(skip)]
    processes: Vec<String>,
    #[serde(skip)]
    resources: Vec<String>,
}

impl SafetyReport {
    /// Processes never admitted, each with the resources it is short of
    pub fn blocked(&self) -> Vec<(String, Continuation)> {
        self.processes
            .iter()
            .enumerate()
            .filter(|(_, name)| !self.sequence.contains(*name))
            .map(|(i, name)| {
                (
                    name.clone(),
                    can_process_continue(i, &self.need, &self.final_work, &self.resources),
                )
            })
            .collect()
    }
}

/// Outcome of [`achievable_for`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TargetReport {
    pub target: String,
    pub achievable: bool,
    /// Sequence up to and including the target; empty when not achievable
    pub sequence: Vec<String>,
}

/// Report every resource where `need[process]` exceeds `work`
pub fn can_process_continue(
    process: usize,
    need: &Matrix,
    work: &[u64],
    resources: &[String],
) -> Continuation {
    let shortfalls = resources
        .iter()
        .zip(&need[process])
        .zip(work)
        .filter(|((_, needed), available)| needed > available)
        .map(|((resource, &needed), &available)| Shortfall {
            resource: resource.clone(),
            needed,
            available,
        })
        .collect();

    Continuation {
        process,
        shortfalls,
    }
}

fn fits(need: &[u64], work: &[u64]) -> bool {
    need.iter().zip(work).all(|(n, w)| n <= w)
}

fn release(work: &mut [u64], allocation: &[u64]) {
    for (w, held) in work.iter_mut().zip(allocation) {
        *w = w.saturating_add(*held);
    }
}

/// Decide whether the snapshot is safe and produce a completion order
pub fn check_safety(input: &SafetyInput) -> Result<SafetyReport, AnalysisError> {
    let need = input.need()?;
    let n = input.processes.len();

    debug!(
        processes = n,
        resources = input.resources.len(),
        "Running safety check"
    );

    let mut work = input.available.clone();
    let mut finished = vec![false; n];
    let mut sequence = Vec::with_capacity(n);
    let mut trace_log = Vec::new();

    while sequence.len() < n {
        let mut pass = SafetyPass {
            pass: trace_log.len() + 1,
            evaluations: Vec::new(),
        };
        let mut progressed = false;

        for i in 0..n {
            if finished[i] {
                continue;
            }

            let admitted = fits(&need[i], &work);
            trace!(
                pass = pass.pass,
                process = %input.processes[i],
                admitted,
                "Evaluated need {:?} against work {:?}",
                need[i],
                work
            );
            pass.evaluations.push(ProcessEvaluation {
                process: input.processes[i].clone(),
                need: need[i].clone(),
                work: work.clone(),
                admitted,
            });

            if admitted {
                release(&mut work, &input.allocation[i]);
                finished[i] = true;
                sequence.push(input.processes[i].clone());
                progressed = true;
            }
        }

        debug!(
            pass = pass.pass,
            admitted = pass.admitted().count(),
            "Safety pass complete"
        );
        trace_log.push(pass);

        if !progressed {
            break;
        }
    }

    let is_safe = sequence.len() == n;
    info!(
        is_safe,
        passes = trace_log.len(),
        "Safety check finished: {}",
        sequence.join(" -> ")
    );

    Ok(SafetyReport {
        is_safe,
        sequence,
        trace: trace_log,
        final_work: work,
        need,
        processes: input.processes.clone(),
        resources: input.resources.clone(),
    })
}

/// Check whether `target` is reached by the safety fixed point.
///
/// An unknown target or a stall before the target is a negative result,
/// not an error.
pub fn achievable_for(input: &SafetyInput, target: &str) -> Result<TargetReport, AnalysisError> {
    input.validate()?;

    if resolve_process(&input.processes, target).is_none() {
        debug!(process = %target, "Target process is not part of this snapshot");
        return Ok(TargetReport {
            target: target.to_string(),
            achievable: false,
            sequence: Vec::new(),
        });
    }

    let report = check_safety(input)?;
    let sequence = match report.sequence.iter().position(|p| p == target) {
        Some(pos) => report.sequence[..=pos].to_vec(),
        None => Vec::new(),
    };

    Ok(TargetReport {
        target: target.to_string(),
        achievable: !sequence.is_empty(),
        sequence,
    })
}

/// Replay a proposed completion order and check it is a valid safe sequence
pub fn verify_sequence(input: &SafetyInput, sequence: &[String]) -> Result<bool, AnalysisError> {
    let need = input.need()?;

    if sequence.len() != input.processes.len() {
        return Ok(false);
    }

    let mut work = input.available.clone();
    let mut finished = vec![false; input.processes.len()];

    for name in sequence {
        let Some(i) = resolve_process(&input.processes, name) else {
            return Ok(false);
        };
        if finished[i] || !fits(&need[i], &work) {
            trace!(process = %name, "Sequence step rejected");
            return Ok(false);
        }
        release(&mut work, &input.allocation[i]);
        finished[i] = true;
    }

    Ok(true)
}

#[cfg(test)]
mod tests {
    include!("safety.test.rs");
}
