//! JSON run summary.

use std::fs;
use std::path::Path;

use chrono::Utc;
use color_eyre::eyre::{Context, Result};
use serde::Serialize;

use crate::simulation::ReplayRound;
use crate::topology::{EdgeUpdate, Graph};

/// Which routing algorithm a run used
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Algorithm {
    DistanceVector,
    LinkState,
}

impl std::fmt::Display for Algorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Algorithm::DistanceVector => write!(f, "distance-vector"),
            Algorithm::LinkState => write!(f, "link-state"),
        }
    }
}

/// Statistics for one graph state
#[derive(Debug, Clone, Serialize)]
pub struct RoundSummary {
    /// Change applied before this round; absent for the initial topology
    #[serde(skip_serializing_if = "Option::is_none")]
    pub change: Option<EdgeUpdate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relaxation_passes: Option<usize>,
    pub reachable_pairs: usize,
    pub delivered: usize,
    pub unreachable: usize,
    pub looped: usize,
}

impl From<&ReplayRound> for RoundSummary {
    fn from(round: &ReplayRound) -> Self {
        Self {
            change: round.change,
            relaxation_passes: round.routes.convergence.map(|c| c.passes),
            reachable_pairs: round.routes.table.reachable_pairs(),
            delivered: round.delivered(),
            unreachable: round.unreachable(),
            looped: round.looped(),
        }
    }
}

/// Whole-run summary written as JSON
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub algorithm: Algorithm,
    pub generated_at: String,
    pub node_count: usize,
    /// Edges in the initial topology
    pub edge_count: usize,
    pub message_count: usize,
    pub rounds: Vec<RoundSummary>,
}

impl RunSummary {
    pub fn new(algorithm: Algorithm, initial_graph: &Graph, message_count: usize, rounds: &[ReplayRound]) -> Self {
        Self {
            algorithm,
            generated_at: Utc::now().to_rfc3339(),
            node_count: initial_graph.node_count(),
            edge_count: initial_graph.edge_count(),
            message_count,
            rounds: rounds.iter().map(RoundSummary::from).collect(),
        }
    }
}

/// Generate JSON report
pub fn generate_json_report(summary: &RunSummary, output_path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(summary)
        .context("Failed to serialize run summary to JSON")?;

    fs::write(output_path, json)
        .with_context(|| format!("Failed to write JSON report to {}", output_path.display()))?;

    log::info!("JSON report written to {}", output_path.display());
    Ok(())
}
