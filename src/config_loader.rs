use crate::config::RunConfig;
use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use log::debug;
use std::fs::File;
use std::path::{Path, PathBuf};

/// Load and parse configuration from a YAML file
pub fn load_config(config_path: &Path) -> Result<RunConfig> {
    debug!("Loading configuration from: {:?}", config_path);

    let file = File::open(config_path)
        .wrap_err_with(|| format!("Failed to open configuration file '{}'", config_path.display()))?;

    let config: RunConfig = serde_yaml::from_reader(file)
        .wrap_err_with(|| format!("Failed to parse configuration file '{}'", config_path.display()))?;

    config.validate()?;

    Ok(config)
}

/// Load the configuration file if one was given, otherwise use defaults
pub fn load_or_default(config_path: Option<&Path>) -> Result<RunConfig> {
    match config_path {
        Some(path) => load_config(path),
        None => Ok(RunConfig::default()),
    }
}

/// CLI arguments that override YAML settings
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub log_level: Option<String>,
    pub distance_vector_output: Option<PathBuf>,
    pub link_state_output: Option<PathBuf>,
    pub report_path: Option<PathBuf>,
    pub parallel: bool,
    pub replay_changes: bool,
}

/// Apply CLI overrides to a configuration
pub fn apply_overrides(config: &mut RunConfig, overrides: &CliOverrides) -> Result<()> {
    if let Some(level) = &overrides.log_level {
        config.general.log_level = level.clone();
    }
    if let Some(path) = &overrides.distance_vector_output {
        config.output.distance_vector_path = path.clone();
    }
    if let Some(path) = &overrides.link_state_output {
        config.output.link_state_path = path.clone();
    }
    if let Some(path) = &overrides.report_path {
        config.output.report_path = Some(path.clone());
    }
    // Flags can only switch features on
    config.engine.parallel |= overrides.parallel;
    config.link_state.replay_changes |= overrides.replay_changes;

    // Re-validate after applying overrides
    config.validate()?;

    Ok(())
}
