//! CLI subcommands.

pub mod config;
pub mod convert;

use std::path::Path;

use ponto_core::PontoConfig;
use tracing::debug;

/// Load the configuration from an explicit path, the default location, or
/// fall back to built-in defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<PontoConfig> {
    if let Some(path) = config_path {
        debug!("Loading config from {}", path);
        return Ok(PontoConfig::from_file(Path::new(path))?);
    }

    let default_path = config::default_config_path();
    if default_path.exists() {
        debug!("Loading config from {}", default_path.display());
        Ok(PontoConfig::from_file(&default_path)?)
    } else {
        Ok(PontoConfig::default())
    }
}
