//! # Analysis Module
//!
//! The two stateless analyzers. Each call validates its snapshot, builds
//! fresh working copies, and never touches the caller's data.
//!
//! ## Modules
//!
//! - [`safety`] - Safe-state check, targeted reachability, sequence replay
//! - [`detection`] - Deadlock detection by reclamation or cycle search
//! - [`wait_for`] - Wait-for graph construction and cycle enumeration

pub mod detection;
pub mod safety;
pub mod wait_for;

pub use detection::{
    DetectionReport, DetectionStrategy, Reclamation, detect, detect_with, reclaim, wait_for_graph,
};
pub use safety::{
    Continuation, ProcessEvaluation, SafetyPass, SafetyReport, Shortfall, TargetReport,
    achievable_for, can_process_continue, check_safety, verify_sequence,
};
pub use wait_for::{Cycle, WaitForGraph};
