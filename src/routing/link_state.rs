//! Link-state route computation.
//!
//! Each node knows the whole topology and runs its own single-source
//! shortest-path search. Ties on the minimum tentative distance go to the
//! lowest node id, so equal-cost paths resolve the same way on every run.

use log::debug;
use rayon::prelude::*;

use super::types::{RoutingEntry, RoutingError, RoutingTable};
use crate::topology::{cost_add, Cost, Graph, NodeId, INFINITY};

/// Result of one single-source search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortestPathTree {
    pub source: NodeId,
    pub distance: Vec<Cost>,
    pub parent: Vec<Option<NodeId>>,
    /// Nodes in the order their distance became final. A node's parent
    /// always appears before it.
    pub order: Vec<NodeId>,
}

impl ShortestPathTree {
    /// First hop out of `source` toward every destination.
    ///
    /// Resolved bottom-up in settle order, so each destination reuses its
    /// parent's answer instead of walking the chain back to the source.
    /// Destinations without a parent (the source itself, or unreachable
    /// nodes) and direct children of the source route to themselves.
    pub fn next_hops(&self) -> Vec<NodeId> {
        let mut next_hop: Vec<NodeId> = (0..self.distance.len()).collect();

        for &node in &self.order {
            if let Some(parent) = self.parent[node] {
                if parent != self.source {
                    next_hop[node] = next_hop[parent];
                }
            }
        }

        next_hop
    }

    /// Node sequence from the source to `destination`, or `None` if unreachable.
    #[cfg(test)]
    pub(crate) fn path_to(&self, destination: NodeId) -> Option<Vec<NodeId>> {
        if self.distance[destination] == INFINITY {
            return None;
        }

        let mut path = vec![destination];
        let mut current = destination;
        while let Some(parent) = self.parent[current] {
            path.push(parent);
            current = parent;
        }
        path.reverse();
        Some(path)
    }
}

/// Unvisited node with the smallest tentative distance, lowest id on ties.
pub fn select_min(distance: &[Cost], visited: &[bool]) -> Option<NodeId> {
    let mut best: Option<NodeId> = None;
    for (node, &dist) in distance.iter().enumerate() {
        if visited[node] {
            continue;
        }
        // Strictly smaller only: an equal distance never displaces a lower id
        match best {
            Some(current) if distance[current] <= dist => {}
            _ => best = Some(node),
        }
    }
    best
}

#[derive(Debug, Clone, Default)]
pub struct LinkStateEngine {
    parallel: bool,
}

impl LinkStateEngine {
    pub fn new(parallel: bool) -> Self {
        Self { parallel }
    }

    /// Single-source search from `source` over the current graph.
    pub fn shortest_paths(graph: &Graph, source: NodeId) -> Result<ShortestPathTree, RoutingError> {
        let n = graph.node_count();
        if source >= n {
            return Err(RoutingError::NodeOutOfRange { node: source, node_count: n });
        }

        let mut distance = vec![INFINITY; n];
        let mut visited = vec![false; n];
        let mut parent = vec![None; n];
        let mut order = Vec::with_capacity(n);
        distance[source] = 0;

        for _ in 0..n.saturating_sub(1) {
            let Some(idx) = select_min(&distance, &visited) else {
                break;
            };
            visited[idx] = true;
            order.push(idx);

            if distance[idx] == INFINITY {
                continue;
            }
            for (neighbor, cost) in graph.neighbors(idx) {
                if visited[neighbor] {
                    continue;
                }
                let candidate = cost_add(distance[idx], cost);
                if candidate < distance[neighbor] {
                    distance[neighbor] = candidate;
                    parent[neighbor] = Some(idx);
                }
            }
        }

        // The last node is final once every other node is settled
        order.extend((0..n).filter(|&node| !visited[node]));

        Ok(ShortestPathTree {
            source,
            distance,
            parent,
            order,
        })
    }

    /// Routing table row for one source node.
    pub fn route_from(graph: &Graph, source: NodeId) -> Result<Vec<RoutingEntry>, RoutingError> {
        let tree = Self::shortest_paths(graph, source)?;
        let next_hops = tree.next_hops();

        Ok((0..graph.node_count())
            .map(|destination| RoutingEntry {
                destination,
                next_hop: next_hops[destination],
                cost: tree.distance[destination],
            })
            .collect())
    }

    /// Tables for every node. Sources are independent, so they may run in
    /// parallel; the graph is only read.
    pub fn compute_all(&self, graph: &Graph) -> Result<RoutingTable, RoutingError> {
        let n = graph.node_count();
        let rows = if self.parallel {
            (0..n)
                .into_par_iter()
                .map(|source| Self::route_from(graph, source))
                .collect::<Result<Vec<_>, _>>()?
        } else {
            (0..n)
                .map(|source| Self::route_from(graph, source))
                .collect::<Result<Vec<_>, _>>()?
        };

        debug!(
            "Link-state tables computed for {} sources ({})",
            n,
            if self.parallel { "parallel" } else { "sequential" }
        );
        Ok(RoutingTable::from_rows(rows))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topology::{EdgeCost, EdgeUpdate};

    fn edge(source: usize, target: usize, cost: u32) -> EdgeUpdate {
        EdgeUpdate { source, target, cost: EdgeCost::Weight(cost) }
    }

    #[test]
    fn test_select_min_prefers_lower_index() {
        let distance = [5, 2, 2, 7];
        let visited = [false, false, false, false];
        assert_eq!(select_min(&distance, &visited), Some(1));

        let visited = [false, true, false, false];
        assert_eq!(select_min(&distance, &visited), Some(2));

        let all_infinite = [INFINITY, INFINITY, INFINITY];
        assert_eq!(select_min(&all_infinite, &[true, false, false]), Some(1));
        assert_eq!(select_min(&all_infinite, &[true, true, true]), None);
    }

    #[test]
    fn test_shortest_paths_on_square() {
        let graph = Graph::from_updates(4, &[edge(0, 1, 1), edge(1, 2, 1), edge(2, 3, 1), edge(3, 0, 1)]).unwrap();
        let tree = LinkStateEngine::shortest_paths(&graph, 0).unwrap();

        assert_eq!(tree.distance, vec![0, 1, 2, 1]);
        assert_eq!(tree.parent, vec![None, Some(0), Some(1), Some(0)]);
        assert_eq!(tree.order, vec![0, 1, 3, 2]);
        assert_eq!(tree.path_to(2), Some(vec![0, 1, 2]));
        assert_eq!(tree.next_hops(), vec![0, 1, 1, 3]);
    }

    #[test]
    fn test_next_hop_through_long_chain() {
        let updates: Vec<_> = (0..5).map(|i| edge(i, i + 1, 2)).collect();
        let graph = Graph::from_updates(6, &updates).unwrap();
        let row = LinkStateEngine::route_from(&graph, 0).unwrap();

        assert!(row[1..].iter().all(|e| e.next_hop == 1));
        assert_eq!(row[5].cost, 10);

        let row = LinkStateEngine::route_from(&graph, 5).unwrap();
        assert!(row[..5].iter().all(|e| e.next_hop == 4));
    }

    #[test]
    fn test_unreachable_placeholder() {
        let graph = Graph::from_updates(3, &[edge(0, 1, 3)]).unwrap();
        let row = LinkStateEngine::route_from(&graph, 0).unwrap();
        assert_eq!(row[2], RoutingEntry::direct(2, INFINITY));
        assert_eq!(row[0], RoutingEntry::direct(0, 0));
        assert_eq!(LinkStateEngine::shortest_paths(&graph, 0).unwrap().path_to(2), None);
    }

    #[test]
    fn test_zero_cost_edges_are_used() {
        let graph = Graph::from_updates(3, &[edge(0, 1, 0), edge(1, 2, 4), edge(0, 2, 9)]).unwrap();
        let row = LinkStateEngine::route_from(&graph, 0).unwrap();
        assert_eq!(row[2].cost, 4);
        assert_eq!(row[2].next_hop, 1);
    }

    #[test]
    fn test_single_node_graph() {
        let graph = Graph::new(1).unwrap();
        let table = LinkStateEngine::default().compute_all(&graph).unwrap();
        assert_eq!(*table.entry(0, 0), RoutingEntry::direct(0, 0));
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let graph = Graph::from_updates(
            5,
            &[edge(0, 1, 2), edge(1, 2, 2), edge(0, 2, 4), edge(2, 3, 1), edge(3, 4, 6), edge(1, 4, 9)],
        )
        .unwrap();
        let sequential = LinkStateEngine::new(false).compute_all(&graph).unwrap();
        let parallel = LinkStateEngine::new(true).compute_all(&graph).unwrap();
        assert_eq!(sequential, parallel);
    }

    #[test]
    fn test_source_out_of_range() {
        let graph = Graph::new(2).unwrap();
        assert!(matches!(
            LinkStateEngine::shortest_paths(&graph, 2),
            Err(RoutingError::NodeOutOfRange { node: 2, node_count: 2 })
        ));
    }
}
