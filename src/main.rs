use clap::{Args, Parser, Subcommand};
use color_eyre::Result;
use env_logger::Env;
use log::info;
use std::path::PathBuf;

use routesim::config_loader::{self, CliOverrides};
use routesim::orchestrator::{self, RunInputs};
use routesim::report::Algorithm;

/// Distance-vector and link-state routing simulator
#[derive(Parser, Debug)]
#[command(name = "routesim", author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to an optional YAML run configuration
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, global = true)]
    log_level: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Distance-vector routing with change replay
    Distvec {
        #[command(flatten)]
        run: RunArgs,
    },
    /// Link-state routing
    Linkstate {
        #[command(flatten)]
        run: RunArgs,

        /// Apply the changes file, recomputing and replaying after each change
        #[arg(long)]
        replay_changes: bool,

        /// Compute per-source tables in parallel
        #[arg(long)]
        parallel: bool,
    },
}

#[derive(Args, Debug)]
struct RunArgs {
    /// Topology file: node count, then `src dst cost` lines
    topology: PathBuf,

    /// Messages file: `src dst message` lines
    messages: PathBuf,

    /// Changes file: `src dst cost` lines (-999 removes an edge)
    changes: PathBuf,

    /// Output file (default output_dv.txt / output_ls.txt)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Write a JSON run summary to this path
    #[arg(long)]
    report: Option<PathBuf>,
}

impl RunArgs {
    fn inputs(&self) -> RunInputs {
        RunInputs {
            topology: self.topology.clone(),
            messages: self.messages.clone(),
            changes: self.changes.clone(),
        }
    }
}

/// Parse arguments; usage errors exit with status 1, help and version with 0.
fn parse_cli() -> Cli {
    match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if err.use_stderr() => {
            let _ = err.print();
            std::process::exit(1);
        }
        Err(err) => err.exit(),
    }
}

fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    let cli = parse_cli();

    let mut config = config_loader::load_or_default(cli.config.as_deref())?;

    let (algorithm, run_args, overrides) = match &cli.command {
        Commands::Distvec { run } => (
            Algorithm::DistanceVector,
            run,
            CliOverrides {
                log_level: cli.log_level.clone(),
                distance_vector_output: run.output.clone(),
                report_path: run.report.clone(),
                ..Default::default()
            },
        ),
        Commands::Linkstate { run, replay_changes, parallel } => (
            Algorithm::LinkState,
            run,
            CliOverrides {
                log_level: cli.log_level.clone(),
                link_state_output: run.output.clone(),
                report_path: run.report.clone(),
                parallel: *parallel,
                replay_changes: *replay_changes,
                ..Default::default()
            },
        ),
    };
    config_loader::apply_overrides(&mut config, &overrides)?;

    // RUST_LOG still takes precedence over the configured level
    env_logger::Builder::from_env(Env::default().default_filter_or(config.general.log_level.as_str())).init();

    if let Some(path) = &cli.config {
        info!("Configuration file: {:?}", path);
    }

    let outcome = orchestrator::run(algorithm, &run_args.inputs(), &config)?;

    println!("Complete. Output file written to {}.", outcome.output_path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distvec_parsing() {
        let cli = Cli::parse_from(["routesim", "distvec", "topology.txt", "messages.txt", "changes.txt"]);

        match cli.command {
            Commands::Distvec { run } => {
                assert_eq!(run.topology, PathBuf::from("topology.txt"));
                assert_eq!(run.messages, PathBuf::from("messages.txt"));
                assert_eq!(run.changes, PathBuf::from("changes.txt"));
                assert_eq!(run.output, None);
            }
            other => panic!("unexpected command {:?}", other),
        }
        assert!(cli.config.is_none());
    }

    #[test]
    fn test_linkstate_flags() {
        let cli = Cli::parse_from([
            "routesim",
            "--log-level", "debug",
            "linkstate", "t.txt", "m.txt", "c.txt",
            "--output", "ls.txt",
            "--replay-changes",
            "--parallel",
        ]);

        assert_eq!(cli.log_level.as_deref(), Some("debug"));
        match cli.command {
            Commands::Linkstate { run, replay_changes, parallel } => {
                assert_eq!(run.output, Some(PathBuf::from("ls.txt")));
                assert!(replay_changes);
                assert!(parallel);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_missing_positional_is_an_error() {
        let err = Cli::try_parse_from(["routesim", "distvec", "topology.txt"]).unwrap_err();
        assert!(err.use_stderr());
    }
}
