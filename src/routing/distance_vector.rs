//! Distance-vector route computation.
//!
//! Every node starts out believing each destination is a direct neighbour at
//! the raw edge cost. The tables are then relaxed against each other until a
//! full pass over all `(i, j, k)` triples changes nothing. This is the
//! exchange-until-quiet behaviour of a distance-vector protocol collapsed into
//! one global fixed-point loop.

use log::debug;
use serde::Serialize;

use super::types::{RoutingEntry, RoutingError, RoutingTable};
use crate::topology::{cost_add, Graph};

/// Default multiplier for the relaxation pass cap.
pub const DEFAULT_MAX_PASS_FACTOR: usize = 16;

/// Statistics from one convergence run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Convergence {
    /// Full passes executed, including the final quiet one
    pub passes: usize,
    /// Individual entry improvements across all passes
    pub relaxations: usize,
}

#[derive(Debug, Clone)]
pub struct DistanceVectorEngine {
    max_pass_factor: usize,
}

impl Default for DistanceVectorEngine {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_PASS_FACTOR)
    }
}

impl DistanceVectorEngine {
    pub fn new(max_pass_factor: usize) -> Self {
        Self {
            max_pass_factor: max_pass_factor.max(1),
        }
    }

    /// Upper bound on passes for a graph of `node_count` nodes.
    ///
    /// Non-negative costs converge in at most `n` passes, so hitting this
    /// means an invariant was broken upstream.
    pub fn max_passes(&self, node_count: usize) -> usize {
        self.max_pass_factor * node_count + 1
    }

    /// Initial tables: every destination routed directly at its edge cost.
    pub fn seed(graph: &Graph) -> RoutingTable {
        let n = graph.node_count();
        let rows = (0..n)
            .map(|i| (0..n).map(|j| RoutingEntry::direct(j, graph.cost(i, j))).collect::<Vec<_>>())
            .collect();
        RoutingTable::from_rows(rows)
    }

    /// One scan over every `(i, j, k)` triple. Returns the number of entries
    /// improved; zero means the table has converged.
    pub fn relax_pass(table: &mut RoutingTable) -> usize {
        let n = table.node_count();
        let mut improved = 0;

        for i in 0..n {
            for j in 0..n {
                for k in 0..n {
                    let via = cost_add(table.entry(i, k).cost, table.entry(k, j).cost);
                    if table.entry(i, j).cost > via {
                        let next_hop = table.entry(i, k).next_hop;
                        let entry = table.entry_mut(i, j);
                        entry.cost = via;
                        entry.next_hop = next_hop;
                        improved += 1;
                    }
                }
            }
        }

        improved
    }

    /// Seed from the current graph and relax to the fixed point.
    pub fn compute(&self, graph: &Graph) -> Result<(RoutingTable, Convergence), RoutingError> {
        let mut table = Self::seed(graph);
        let max_passes = self.max_passes(graph.node_count());
        let mut stats = Convergence {
            passes: 0,
            relaxations: 0,
        };

        loop {
            if stats.passes >= max_passes {
                return Err(RoutingError::NotConverged { passes: stats.passes });
            }
            stats.passes += 1;

            let improved = Self::relax_pass(&mut table);
            stats.relaxations += improved;
            if improved == 0 {
                break;
            }
        }

        debug!(
            "Distance-vector converged after {} passes ({} relaxations) on {} nodes",
            stats.passes,
            stats.relaxations,
            graph.node_count()
        );
        Ok((table, stats))
    }
}
