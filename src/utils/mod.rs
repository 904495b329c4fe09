//! Shared utilities: topology inspection and engine cross-checks.

pub mod validation;

pub use validation::{cross_check, inspect_topology};
