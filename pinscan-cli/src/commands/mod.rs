//! Command handlers -- one module per subcommand

pub mod config;
pub mod scan;

use std::path::Path;

use tracing::warn;

use pinscan_core::config::PinscanConfig;
use pinscan_core::error::{ConfigError, PinscanError};

use crate::error::CliError;

/// Load the effective configuration for a command.
///
/// A missing file falls back to defaults (plus env overrides) with a warning.
/// A file that exists but fails to parse or validate is an error.
pub async fn load_config(path: &Path) -> Result<PinscanConfig, CliError> {
    match PinscanConfig::load(path).await {
        Ok(config) => Ok(config),
        Err(PinscanError::Config(ConfigError::FileNotFound { path })) => {
            warn!(path = %path, "configuration file not found, using defaults");
            let mut config = PinscanConfig::default();
            config.apply_env_overrides();
            config.validate()?;
            Ok(config)
        }
        Err(e) => Err(e.into()),
    }
}
