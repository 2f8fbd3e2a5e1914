//! Report rendering
//!
//! Turns analysis results into text for a terminal or JSON for tooling.
//! Logging stays in `tracing`; everything here is the user-facing result.

pub mod report;
pub mod styling;
pub mod table;

pub use report::{
    render_detection, render_examples, render_safety, render_target, render_verification,
    render_wait_for, safety_json, to_json,
};
pub use styling::StyleManager;
pub use table::Table;
