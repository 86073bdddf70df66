//! Configuration module

use crate::error::{CliError, CliResult};
use glossa_core::EngineConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// CLI configuration structure
#[derive(Debug, Deserialize, Serialize, Default)]
pub struct CliConfig {
    /// Analysis engine settings
    #[serde(default)]
    pub engine: EngineConfig,

    /// Output configuration
    #[serde(default)]
    pub output: OutputConfig,
}

/// Output-related configuration
#[derive(Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Pretty print JSON output
    pub pretty_json: bool,

    /// List every token in text and markdown output
    pub include_tokens: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            pretty_json: true,
            include_tokens: false,
        }
    }
}

impl CliConfig {
    /// Load and validate a configuration file
    pub fn from_file(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            CliError::ConfigError(format!("failed to read {}: {e}", path.display()))
        })?;
        let config: CliConfig = toml::from_str(&content)
            .map_err(|e| CliError::ConfigError(format!("{}: {e}", path.display())))?;
        config
            .engine
            .validate()
            .map_err(|e| CliError::ConfigError(e.to_string()))?;
        Ok(config)
    }
}
