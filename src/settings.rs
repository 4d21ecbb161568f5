//! Runtime settings: where the configuration file lives and how to log.
//!
//! Built with the `config` crate from defaults and `MULTITOOL_*` environment
//! variables. Command-line flags are applied on top by the binary.

use crate::config::DEFAULT_CONFIG_FILE;
use crate::error::CliError;
use ::config::{Config, Environment};
use serde::Deserialize;
use std::path::PathBuf;

/// Prefix for environment overrides, e.g. `MULTITOOL_CONFIG_PATH`
pub const ENV_PREFIX: &str = "MULTITOOL";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RuntimeSettings {
    /// Configuration file path, `~` not yet expanded
    pub config_path: PathBuf,

    /// Log line format: text or json
    pub log_format: String,
}

impl RuntimeSettings {
    /// Defaults overlaid with `MULTITOOL_CONFIG_PATH` / `MULTITOOL_LOG_FORMAT`.
    pub fn load() -> Result<Self, CliError> {
        let settings = Config::builder()
            .set_default("config_path", DEFAULT_CONFIG_FILE)?
            .set_default("log_format", "text")?
            .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(false))
            .build()?;
        Ok(settings.try_deserialize()?)
    }

    /// Apply command-line overrides. Flags win over the environment.
    pub fn with_overrides(mut self, config_path: Option<PathBuf>, log_format: Option<String>) -> Self {
        if let Some(path) = config_path {
            self.config_path = path;
        }
        if let Some(format) = log_format {
            self.log_format = format;
        }
        self
    }
}
