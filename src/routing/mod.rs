//! Routing table computation.
//!
//! Two engines produce the same [`RoutingTable`] shape from a [`Graph`]:
//! a distance-vector fixed-point relaxation and a per-node link-state
//! shortest-path search.

pub mod types;
pub mod distance_vector;
pub mod link_state;

pub use types::{RoutingEntry, RoutingError, RoutingTable};
pub use distance_vector::{Convergence, DistanceVectorEngine, DEFAULT_MAX_PASS_FACTOR};
pub use link_state::{LinkStateEngine, ShortestPathTree};

use crate::topology::Graph;

/// Tables produced by one full recomputation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComputedRoutes {
    pub table: RoutingTable,
    /// Relaxation statistics; only the distance-vector engine iterates
    pub convergence: Option<Convergence>,
}

/// A route computation that rebuilds every table from the current graph.
pub trait RouteEngine {
    fn name(&self) -> &'static str;

    fn compute(&self, graph: &Graph) -> Result<ComputedRoutes, RoutingError>;
}

impl RouteEngine for DistanceVectorEngine {
    fn name(&self) -> &'static str {
        "distance-vector"
    }

    fn compute(&self, graph: &Graph) -> Result<ComputedRoutes, RoutingError> {
        let (table, convergence) = DistanceVectorEngine::compute(self, graph)?;
        Ok(ComputedRoutes {
            table,
            convergence: Some(convergence),
        })
    }
}

impl RouteEngine for LinkStateEngine {
    fn name(&self) -> &'static str {
        "link-state"
    }

    fn compute(&self, graph: &Graph) -> Result<ComputedRoutes, RoutingError> {
        Ok(ComputedRoutes {
            table: self.compute_all(graph)?,
            convergence: None,
        })
    }
}
