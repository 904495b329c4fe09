//! # RouteSim - Distance-vector and link-state routing simulation
//!
//! This library computes shortest-path routing tables for a small static
//! network and replays application messages along the computed paths.
//!
//! ## Overview
//!
//! Two classical intra-domain routing schemes are reproduced:
//!
//! - **Distance vector**: every node's table is relaxed against every other
//!   node's table until a full pass changes nothing. Topology changes are
//!   applied one at a time, each followed by a full recompute and a replay of
//!   every message.
//! - **Link state**: each node runs its own shortest-path search over the
//!   full topology, breaking ties toward the lowest node id.
//!
//! Both produce a [`routing::RoutingTable`] that the forwarder in
//! [`simulation`] walks hop by hop, reporting the full path and cost of each
//! message or that its destination is unreachable.
//!
//! ## Architecture
//!
//! - `topology`: graph model, cost arithmetic, input record parsing
//! - `routing`: the two table engines
//! - `simulation`: message forwarding and change replay
//! - `report`: text output and JSON run summaries
//! - `orchestrator`: end-to-end runs wiring the above together
//! - `config` / `config_loader`: YAML run configuration
//! - `utils`: topology inspection and engine cross-checks
//!
//! ## Example Usage
//!
//! ```rust
//! use routesim::routing::{DistanceVectorEngine, LinkStateEngine};
//! use routesim::simulation::{trace_route, TraceResult};
//! use routesim::topology::{EdgeCost, Graph};
//!
//! let mut graph = Graph::new(3)?;
//! graph.set_edge(0, 1, EdgeCost::Weight(1))?;
//! graph.set_edge(1, 2, EdgeCost::Weight(1))?;
//!
//! let (table, _) = DistanceVectorEngine::default().compute(&graph)?;
//! assert_eq!(
//!     trace_route(&table, 0, 2)?,
//!     TraceResult::Delivered { hops: vec![0, 1, 2], cost: 2 }
//! );
//!
//! let table = LinkStateEngine::default().compute_all(&graph)?;
//! assert_eq!(table.entry(2, 0).next_hop, 1);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Error Handling
//!
//! Core modules return typed errors ([`routing::RoutingError`],
//! [`topology::ParseError`], [`config::ValidationError`]). The orchestrator
//! and binary use `color_eyre` to attach file context.

pub mod config;
pub mod config_loader;
pub mod topology;
pub mod routing;
pub mod simulation;
pub mod report;
pub mod utils;
pub mod orchestrator;
