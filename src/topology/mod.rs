//! Network topology: the weighted graph and the input records that build
//! and mutate it.

pub mod types;
pub mod graph;
pub mod parser;

// Re-export key types and functions for easier access
pub use types::{cost_add, is_finite, Cost, EdgeCost, EdgeUpdate, MessageRecord, NodeId, INFINITY, MAX_NODES, REMOVE_EDGE};
pub use graph::Graph;
pub use parser::{parse_changes, parse_messages, parse_topology, ParseError, TopologyInput};
