//! CLI command implementations

pub mod config;
pub mod phases;
pub mod run;

use anyhow::{Context, Result};
use std::path::Path;
use tempo_runtime::TempoConfig;

/// Load the config at `path`, or defaults when no path is given
pub fn load_config(path: Option<&str>) -> Result<TempoConfig> {
    match path {
        Some(path) => TempoConfig::load_from_file(Path::new(path))
            .with_context(|| format!("Failed to load config: {}", path)),
        None => Ok(TempoConfig::default()),
    }
}
