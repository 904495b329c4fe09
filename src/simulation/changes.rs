//! Topology change replay.
//!
//! Each change is applied to the graph, every table is rebuilt from scratch
//! and the full message set is forwarded again against the new tables.

use log::{debug, info};

use super::forwarder::{replay, MessageTrace, TraceResult};
use crate::routing::{ComputedRoutes, RouteEngine, RoutingError};
use crate::topology::{EdgeUpdate, Graph, MessageRecord};

/// Tables and traces for one graph state.
#[derive(Debug, Clone)]
pub struct ReplayRound {
    /// Change that produced this state; `None` for the initial topology
    pub change: Option<EdgeUpdate>,
    pub routes: ComputedRoutes,
    pub traces: Vec<MessageTrace>,
}

impl ReplayRound {
    pub fn delivered(&self) -> usize {
        self.traces.iter().filter(|t| t.result.is_delivered()).count()
    }

    pub fn unreachable(&self) -> usize {
        self.traces
            .iter()
            .filter(|t| matches!(t.result, TraceResult::Unreachable { .. }))
            .count()
    }

    /// Messages whose next-hop chain never reached the destination
    pub fn looped(&self) -> usize {
        self.traces
            .iter()
            .filter(|t| matches!(t.result, TraceResult::Looped { .. }))
            .count()
    }
}

/// Owns the graph for a run and drives recompute-and-replay cycles.
pub struct ChangeApplier<'a, E: RouteEngine> {
    engine: &'a E,
    graph: Graph,
    messages: &'a [MessageRecord],
}

impl<'a, E: RouteEngine> ChangeApplier<'a, E> {
    pub fn new(engine: &'a E, graph: Graph, messages: &'a [MessageRecord]) -> Self {
        Self {
            engine,
            graph,
            messages,
        }
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// Compute tables for the current graph and replay all messages.
    pub fn initial_round(&self) -> Result<ReplayRound, RoutingError> {
        self.round(None)
    }

    /// Apply one change, recompute and replay.
    pub fn apply(&mut self, change: EdgeUpdate) -> Result<ReplayRound, RoutingError> {
        self.graph.apply(&change)?;
        debug!(
            "Applied change {}-{} cost {} ({} edges now)",
            change.source,
            change.target,
            change.cost,
            self.graph.edge_count()
        );
        self.round(Some(change))
    }

    /// Apply every change in order, one round per change.
    pub fn apply_all(&mut self, changes: &[EdgeUpdate]) -> Result<Vec<ReplayRound>, RoutingError> {
        let rounds = changes
            .iter()
            .map(|change| self.apply(*change))
            .collect::<Result<Vec<_>, _>>()?;
        info!("Replayed {} topology changes with {}", rounds.len(), self.engine.name());
        Ok(rounds)
    }

    fn round(&self, change: Option<EdgeUpdate>) -> Result<ReplayRound, RoutingError> {
        let routes = self.engine.compute(&self.graph)?;
        let traces = replay(&routes.table, self.messages)?;
        Ok(ReplayRound {
            change,
            routes,
            traces,
        })
    }
}
