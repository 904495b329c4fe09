//! Routing table data structures and the engine error type.

use serde::Serialize;

use crate::topology::{is_finite, Cost, NodeId};

/// Errors raised by the graph, the engines and the forwarder.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RoutingError {
    #[error("Graph must contain at least one node")]
    EmptyGraph,
    #[error("Graph of {node_count} nodes exceeds the limit of {max}")]
    TooManyNodes { node_count: usize, max: usize },
    #[error("Node {node} out of range for a graph of {node_count} nodes")]
    NodeOutOfRange { node: NodeId, node_count: usize },
    #[error("Distance-vector relaxation did not converge within {passes} passes")]
    NotConverged { passes: usize },
    #[error("Forwarding loop from {from} to {to}: gave up after {hops} hops")]
    ForwardingLoop { from: NodeId, to: NodeId, hops: usize },
}

/// One destination's entry in a node's routing table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RoutingEntry {
    pub destination: NodeId,
    pub next_hop: NodeId,
    pub cost: Cost,
}

impl RoutingEntry {
    /// Entry that routes straight to the destination.
    pub fn direct(destination: NodeId, cost: Cost) -> Self {
        Self {
            destination,
            next_hop: destination,
            cost,
        }
    }

    pub fn is_reachable(&self) -> bool {
        is_finite(self.cost)
    }
}

/// Routing tables for every node: `row(src)[dst]` is the entry node `src`
/// uses to reach `dst`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutingTable {
    rows: Vec<Vec<RoutingEntry>>,
}

impl RoutingTable {
    /// Assemble a table from one full row per source node.
    ///
    /// Every row must have exactly one entry per node, indexed by destination.
    pub fn from_rows(rows: Vec<Vec<RoutingEntry>>) -> Self {
        debug_assert!(rows.iter().all(|row| row.len() == rows.len()));
        debug_assert!(rows
            .iter()
            .all(|row| row.iter().enumerate().all(|(dst, e)| e.destination == dst)));
        Self { rows }
    }

    /// Table where every node only knows itself.
    #[cfg(test)]
    pub(crate) fn unconnected(node_count: usize) -> Self {
        let rows = (0..node_count)
            .map(|src| {
                (0..node_count)
                    .map(|dst| RoutingEntry::direct(dst, if src == dst { 0 } else { crate::topology::INFINITY }))
                    .collect::<Vec<_>>()
            })
            .collect();
        Self { rows }
    }

    pub fn node_count(&self) -> usize {
        self.rows.len()
    }

    pub fn entry(&self, source: NodeId, destination: NodeId) -> &RoutingEntry {
        &self.rows[source][destination]
    }

    pub fn row(&self, source: NodeId) -> &[RoutingEntry] {
        &self.rows[source]
    }

    pub fn rows(&self) -> impl Iterator<Item = (NodeId, &[RoutingEntry])> {
        self.rows.iter().enumerate().map(|(src, row)| (src, row.as_slice()))
    }

    pub(crate) fn entry_mut(&mut self, source: NodeId, destination: NodeId) -> &mut RoutingEntry {
        &mut self.rows[source][destination]
    }

    /// Number of ordered `(src, dst)` pairs with `src != dst` that have a route.
    pub fn reachable_pairs(&self) -> usize {
        self.rows()
            .map(|(src, row)| {
                row.iter()
                    .filter(|e| e.destination != src && e.is_reachable())
                    .count()
            })
            .sum()
    }
}
