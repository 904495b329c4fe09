//! End-to-end runs of the two routing simulators.
//!
//! A run reads the three inputs, builds the graph, computes tables, forwards
//! every message and writes the text output. The distance-vector run then
//! replays the change stream; the link-state run only does so when
//! `link_state.replay_changes` is enabled.

use std::fs;
use std::path::{Path, PathBuf};

use color_eyre::eyre::{eyre, Result, WrapErr};
use log::{debug, info};

use crate::config::RunConfig;
use crate::report::{format_routing_table, format_traces, generate_json_report, Algorithm, RunSummary, UnreachableStyle};
use crate::routing::{DistanceVectorEngine, LinkStateEngine, RouteEngine};
use crate::simulation::{ChangeApplier, ReplayRound};
use crate::topology::parser::{parse_changes_file, parse_messages_file, parse_topology_file};
use crate::topology::{EdgeUpdate, Graph, MessageRecord, TopologyInput};
use crate::utils::validation::{cross_check, inspect_topology};

/// Paths of the three input files
#[derive(Debug, Clone)]
pub struct RunInputs {
    pub topology: PathBuf,
    pub messages: PathBuf,
    pub changes: PathBuf,
}

/// Result of an in-memory simulation
#[derive(Debug, Clone)]
pub struct Simulation {
    pub rounds: Vec<ReplayRound>,
    /// Full text output, exactly as written to the output file
    pub output: String,
    pub summary: RunSummary,
}

/// Result of a run that wrote its output to disk
#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub output_path: PathBuf,
    pub simulation: Simulation,
}

impl Algorithm {
    fn unreachable_style(&self, config: &RunConfig) -> UnreachableStyle {
        match self {
            Algorithm::DistanceVector => UnreachableStyle::Omit,
            Algorithm::LinkState => UnreachableStyle::Label(config.output.infinity_label.clone()),
        }
    }

    fn output_path<'a>(&self, config: &'a RunConfig) -> &'a Path {
        match self {
            Algorithm::DistanceVector => config.output.distance_vector_path.as_path(),
            Algorithm::LinkState => config.output.link_state_path.as_path(),
        }
    }

    /// Distance-vector always replays changes; link-state only on request.
    fn replays_changes(&self, config: &RunConfig) -> bool {
        match self {
            Algorithm::DistanceVector => true,
            Algorithm::LinkState => config.link_state.replay_changes,
        }
    }

    /// Distance-vector separates message batches with an empty line.
    fn separates_batches(&self) -> bool {
        matches!(self, Algorithm::DistanceVector)
    }
}

/// Run a simulation on already-parsed inputs.
pub fn simulate(
    algorithm: Algorithm,
    topology: &TopologyInput,
    messages: &[MessageRecord],
    changes: &[EdgeUpdate],
    config: &RunConfig,
) -> Result<Simulation> {
    let graph = Graph::from_updates(topology.node_count, &topology.edges)?;
    inspect_topology(&graph, messages);

    let rounds = match algorithm {
        Algorithm::DistanceVector => {
            let engine = DistanceVectorEngine::new(config.engine.max_pass_factor);
            run_rounds(algorithm, &engine, graph.clone(), messages, changes, config)?
        }
        Algorithm::LinkState => {
            let engine = LinkStateEngine::new(config.engine.parallel);
            run_rounds(algorithm, &engine, graph.clone(), messages, changes, config)?
        }
    };

    let style = algorithm.unreachable_style(config);
    let mut output = String::new();
    for round in &rounds {
        output.push_str(&format_routing_table(&round.routes.table, &style));
        output.push_str(&format_traces(&round.traces, algorithm.separates_batches()));
    }

    let summary = RunSummary::new(algorithm, &graph, messages.len(), &rounds);
    Ok(Simulation {
        rounds,
        output,
        summary,
    })
}

fn run_rounds<E: RouteEngine>(
    algorithm: Algorithm,
    engine: &E,
    graph: Graph,
    messages: &[MessageRecord],
    changes: &[EdgeUpdate],
    config: &RunConfig,
) -> Result<Vec<ReplayRound>> {
    let mut applier = ChangeApplier::new(engine, graph, messages);

    let initial = applier.initial_round()?;
    verify_round(&initial, applier.graph(), config)?;
    let mut rounds = vec![initial];

    if algorithm.replays_changes(config) {
        for change in changes {
            let round = applier
                .apply(*change)
                .wrap_err_with(|| format!("Failed to apply change {}-{} cost {}", change.source, change.target, change.cost))?;
            verify_round(&round, applier.graph(), config)?;
            rounds.push(round);
        }
    } else if !changes.is_empty() {
        info!("Ignoring {} change record(s): {} computes once", changes.len(), engine.name());
    }

    Ok(rounds)
}

/// Optional cross-check of a round's costs against the other engine.
fn verify_round(round: &ReplayRound, graph: &Graph, config: &RunConfig) -> Result<()> {
    if !config.engine.cross_check {
        return Ok(());
    }

    // Costs from both engines are compared, so recompute with whichever
    // engine did not produce this round.
    let other = if round.routes.convergence.is_some() {
        LinkStateEngine::new(config.engine.parallel).compute_all(graph)?
    } else {
        DistanceVectorEngine::new(config.engine.max_pass_factor).compute(graph)?.0
    };
    cross_check(&round.routes.table, &other).map_err(|e| eyre!("Engine cross-check failed: {}", e))?;
    debug!("Cross-check passed for {} nodes", graph.node_count());
    Ok(())
}

/// Read inputs, simulate, and write the output file (and JSON summary if
/// configured).
pub fn run(algorithm: Algorithm, inputs: &RunInputs, config: &RunConfig) -> Result<RunOutcome> {
    info!("Running {} simulation", algorithm);
    info!("Topology file: {:?}", inputs.topology);
    info!("Messages file: {:?}", inputs.messages);
    info!("Changes file: {:?}", inputs.changes);

    // All three inputs must be readable even when changes are not replayed
    let topology = parse_topology_file(&inputs.topology)?;
    let messages = parse_messages_file(&inputs.messages)?;
    let changes = parse_changes_file(&inputs.changes)?;

    let simulation = simulate(algorithm, &topology, &messages, &changes, config)?;

    let output_path = algorithm.output_path(config).to_path_buf();
    fs::write(&output_path, &simulation.output)
        .wrap_err_with(|| format!("Failed to write output file '{}'", output_path.display()))?;
    info!(
        "Wrote {} round(s) of routing tables and traces to {:?}",
        simulation.rounds.len(),
        output_path
    );

    if let Some(report_path) = &config.output.report_path {
        generate_json_report(&simulation.summary, report_path)?;
    }

    Ok(RunOutcome {
        output_path,
        simulation,
    })
}
