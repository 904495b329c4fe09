//! Undirected weighted graph over a fixed set of dense node ids.

use log::warn;

use super::types::{Cost, EdgeCost, EdgeUpdate, NodeId, INFINITY, MAX_NODES};
use crate::routing::RoutingError;

/// Symmetric cost matrix. `cost(i, i)` is always 0 and missing edges are
/// [`INFINITY`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Graph {
    node_count: usize,
    costs: Vec<Cost>,
}

impl Graph {
    /// Create a graph with `node_count` nodes and no edges.
    pub fn new(node_count: usize) -> Result<Self, RoutingError> {
        if node_count == 0 {
            return Err(RoutingError::EmptyGraph);
        }

        let cells = node_count
            .checked_mul(node_count)
            .filter(|_| node_count <= MAX_NODES)
            .ok_or(RoutingError::TooManyNodes { node_count, max: MAX_NODES })?;

        let mut costs = vec![INFINITY; cells];
        for i in 0..node_count {
            costs[i * node_count + i] = 0;
        }

        Ok(Self { node_count, costs })
    }

    /// Build a graph and apply every update in order.
    pub fn from_updates(node_count: usize, updates: &[EdgeUpdate]) -> Result<Self, RoutingError> {
        let mut graph = Self::new(node_count)?;
        for update in updates {
            graph.apply(update)?;
        }
        Ok(graph)
    }

    pub fn node_count(&self) -> usize {
        self.node_count
    }

    /// Cost of the direct edge between `u` and `v`.
    ///
    /// Both ids must be in range; this is checked by every mutating entry
    /// point, so engines index without re-validating.
    pub fn cost(&self, u: NodeId, v: NodeId) -> Cost {
        self.costs[u * self.node_count + v]
    }

    pub fn has_edge(&self, u: NodeId, v: NodeId) -> bool {
        u != v && self.cost(u, v) != INFINITY
    }

    /// Set or remove the undirected edge `u`-`v`.
    pub fn set_edge(&mut self, u: NodeId, v: NodeId, cost: EdgeCost) -> Result<(), RoutingError> {
        self.check_node(u)?;
        self.check_node(v)?;

        if u == v {
            warn!("Ignoring self-loop update on node {} (cost {})", u, cost);
            return Ok(());
        }

        let value = cost.as_matrix_cost();
        let n = self.node_count;
        self.costs[u * n + v] = value;
        self.costs[v * n + u] = value;
        Ok(())
    }

    pub fn apply(&mut self, update: &EdgeUpdate) -> Result<(), RoutingError> {
        self.set_edge(update.source, update.target, update.cost)
    }

    /// Direct neighbours of `u` with their edge costs, in ascending id order.
    pub fn neighbors(&self, u: NodeId) -> impl Iterator<Item = (NodeId, Cost)> + '_ {
        (0..self.node_count)
            .filter(move |&v| self.has_edge(u, v))
            .map(move |v| (v, self.cost(u, v)))
    }

    /// Number of undirected edges currently present.
    pub fn edge_count(&self) -> usize {
        (0..self.node_count)
            .map(|u| ((u + 1)..self.node_count).filter(|&v| self.has_edge(u, v)).count())
            .sum()
    }

    /// Nodes with no incident edge.
    pub fn isolated_nodes(&self) -> Vec<NodeId> {
        (0..self.node_count)
            .filter(|&u| self.neighbors(u).next().is_none())
            .collect()
    }

    fn check_node(&self, node: NodeId) -> Result<(), RoutingError> {
        if node >= self.node_count {
            return Err(RoutingError::NodeOutOfRange {
                node,
                node_count: self.node_count,
            });
        }
        Ok(())
    }
}
