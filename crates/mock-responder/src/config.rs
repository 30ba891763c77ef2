//! Responder Configuration

use crate::error::ConfigError;
use crate::scenario::ENGINE_OFF;
use config::{Config, Environment, File};
use data_validator::ValidationConfig;
use obd_protocol::ECM_RESPONSE_HEADER;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Environment variable prefix, e.g. `ELM_MOCK_RESPONSES_DIR`
pub const ENV_PREFIX: &str = "ELM_MOCK";

/// Mock responder configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MockConfig {
    /// Directory holding override files and the DTC flag
    pub responses_dir: PathBuf,
    /// Override file prefix, the ECM request address (default: `7e0`)
    pub override_prefix: String,
    /// DTC flag file name inside `responses_dir`
    pub dtc_flag_file: String,
    /// Response address written into synthesized frames
    pub response_header: String,
    /// Scenario that answers every request with `NO DATA`
    pub engine_off_scenario: String,
    /// Range overrides
    pub validation: ValidationConfig,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            responses_dir: PathBuf::from("mock_responses"),
            override_prefix: "7e0".to_string(),
            dtc_flag_file: "dtc.txt".to_string(),
            response_header: ECM_RESPONSE_HEADER.to_string(),
            engine_off_scenario: ENGINE_OFF.to_string(),
            validation: ValidationConfig::default(),
        }
    }
}

impl MockConfig {
    /// Layer defaults, an optional TOML file and `ELM_MOCK_*` variables
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder().add_source(Config::try_from(&Self::default())?);

        if let Some(path) = path {
            info!("Loading config from: {}", path.display());
            builder = builder.add_source(File::from(path));
        }

        let config = builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;
        Ok(config)
    }

    /// Read the responses directory from a plain `path.config` file
    ///
    /// The first line, trimmed, names the directory; everything else keeps
    /// its default.
    pub fn from_path_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::PathFile {
            path: path.display().to_string(),
            source,
        })?;

        let dir = contents.lines().next().map(str::trim).unwrap_or_default();
        if dir.is_empty() {
            return Err(ConfigError::EmptyPathFile(path.display().to_string()));
        }

        Ok(Self {
            responses_dir: PathBuf::from(dir),
            ..Self::default()
        })
    }
}
