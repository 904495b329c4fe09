//! Topology sanity checks and cross-engine consistency checks.

use crate::routing::RoutingTable;
use crate::topology::{Graph, MessageRecord};

/// Inspect a topology for conditions worth warning about.
///
/// Nothing here is fatal: isolated nodes and out-of-range messages are legal
/// inputs (the latter fail later, when forwarded). The findings are logged and
/// returned so callers can surface them.
///
/// # Examples
/// ```
/// use routesim::topology::{Graph, EdgeCost};
/// use routesim::utils::validation::inspect_topology;
///
/// let mut graph = Graph::new(3).unwrap();
/// graph.set_edge(0, 1, EdgeCost::Weight(1)).unwrap();
/// let findings = inspect_topology(&graph, &[]);
/// assert_eq!(findings.len(), 1); // node 2 is isolated
/// ```
pub fn inspect_topology(graph: &Graph, messages: &[MessageRecord]) -> Vec<String> {
    let mut findings = Vec::new();

    let isolated = graph.isolated_nodes();
    if !isolated.is_empty() && graph.node_count() > 1 {
        findings.push(format!(
            "{} node(s) have no links and are unreachable: {:?}",
            isolated.len(),
            isolated
        ));
    }

    let out_of_range = messages
        .iter()
        .filter(|m| m.source >= graph.node_count() || m.destination >= graph.node_count())
        .count();
    if out_of_range > 0 {
        findings.push(format!(
            "{} message(s) reference nodes outside 0..{}",
            out_of_range,
            graph.node_count()
        ));
    }

    for finding in &findings {
        log::warn!("{}", finding);
    }
    log::info!(
        "Topology: {} nodes, {} links, {} messages",
        graph.node_count(),
        graph.edge_count(),
        messages.len()
    );

    findings
}

/// Check that two tables agree on the cost of every `(src, dst)` pair.
///
/// Next hops may legitimately differ between engines on equal-cost paths, so
/// only costs (and reachability) are compared.
///
/// # Returns
/// * `Ok(())` if every pair agrees
/// * `Err(String)` describing the first few disagreements
pub fn cross_check(distance_vector: &RoutingTable, link_state: &RoutingTable) -> Result<(), String> {
    if distance_vector.node_count() != link_state.node_count() {
        return Err(format!(
            "Table sizes differ: {} vs {} nodes",
            distance_vector.node_count(),
            link_state.node_count()
        ));
    }

    let n = distance_vector.node_count();
    let mismatches: Vec<String> = (0..n)
        .flat_map(|src| (0..n).map(move |dst| (src, dst)))
        .filter(|&(src, dst)| distance_vector.entry(src, dst).cost != link_state.entry(src, dst).cost)
        .map(|(src, dst)| {
            format!(
                "{}->{}: distance-vector {} vs link-state {}",
                src,
                dst,
                distance_vector.entry(src, dst).cost,
                link_state.entry(src, dst).cost
            )
        })
        .collect();

    if mismatches.is_empty() {
        return Ok(());
    }

    Err(format!(
        "{} cost mismatch(es) between engines: {}",
        mismatches.len(),
        mismatches.iter().take(5).cloned().collect::<Vec<_>>().join("; ")
    ))
}
