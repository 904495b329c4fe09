//! Output generation: the simulator's text format and an optional JSON
//! run summary.

pub mod format;
pub mod summary;

pub use format::{format_routing_table, format_trace, format_traces, UnreachableStyle};
pub use summary::{generate_json_report, Algorithm, RoundSummary, RunSummary};
