use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::routing::DEFAULT_MAX_PASS_FACTOR;

/// Log levels accepted by `general.log_level`
const LOG_LEVELS: [&str; 6] = ["off", "error", "warn", "info", "debug", "trace"];

/// Run configuration. Every section is optional in the YAML file.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct RunConfig {
    pub general: GeneralConfig,
    pub output: OutputConfig,
    pub engine: EngineConfig,
    pub link_state: LinkStateConfig,
}

impl RunConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !LOG_LEVELS.contains(&self.general.log_level.to_lowercase().as_str()) {
            return Err(ValidationError::InvalidGeneral(format!(
                "unknown log_level '{}' (expected one of {})",
                self.general.log_level,
                LOG_LEVELS.join(", ")
            )));
        }

        for (name, path) in [
            ("distance_vector_path", &self.output.distance_vector_path),
            ("link_state_path", &self.output.link_state_path),
        ] {
            if path.as_os_str().is_empty() {
                return Err(ValidationError::InvalidOutput(format!("{} cannot be empty", name)));
            }
        }

        if let Some(report) = &self.output.report_path {
            if report.as_os_str().is_empty() {
                return Err(ValidationError::InvalidOutput(
                    "report_path cannot be empty when set".to_string(),
                ));
            }
        }

        if self.output.infinity_label.trim().is_empty() {
            return Err(ValidationError::InvalidOutput(
                "infinity_label cannot be empty".to_string(),
            ));
        }

        if self.engine.max_pass_factor == 0 {
            return Err(ValidationError::InvalidEngine(
                "max_pass_factor must be at least 1".to_string(),
            ));
        }

        Ok(())
    }
}

/// Shared general configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct GeneralConfig {
    pub log_level: String,
}

/// Where and how results are written
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct OutputConfig {
    pub distance_vector_path: PathBuf,
    pub link_state_path: PathBuf,
    /// Printed as the cost of unreachable link-state table entries
    pub infinity_label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report_path: Option<PathBuf>,
}

/// Route computation settings
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct EngineConfig {
    /// Run per-source link-state searches on the rayon pool
    pub parallel: bool,
    /// Relaxation pass cap is `max_pass_factor * n + 1`
    pub max_pass_factor: usize,
    /// Compare distance-vector and link-state costs after every recompute
    pub cross_check: bool,
}

/// Link-state driver settings
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct LinkStateConfig {
    /// Apply the changes file and replay messages after each change
    pub replay_changes: bool,
}

/// Configuration validation errors
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("Invalid general configuration: {0}")]
    InvalidGeneral(String),
    #[error("Invalid output configuration: {0}")]
    InvalidOutput(String),
    #[error("Invalid engine configuration: {0}")]
    InvalidEngine(String),
}

/// Default implementations
impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            distance_vector_path: PathBuf::from("output_dv.txt"),
            link_state_path: PathBuf::from("output_ls.txt"),
            infinity_label: "999".to_string(),
            report_path: None,
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            parallel: false,
            max_pass_factor: DEFAULT_MAX_PASS_FACTOR,
            cross_check: false,
        }
    }
}
