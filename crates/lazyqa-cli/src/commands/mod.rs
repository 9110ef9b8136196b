//! Command implementations for the lazyqa CLI.

pub mod batch;
pub mod ortho;
pub mod pipeline;
pub mod scan;

use std::path::{Path, PathBuf};

use anyhow::{bail, Result};

/// Applies the `./config.ini` default and fails early with a readable
/// message when the config is missing, before any output folder exists.
pub(crate) fn resolve_config_path(config: Option<&Path>) -> Result<PathBuf> {
    let config_path = config
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("./config.ini"));
    if !config_path.exists() {
        bail!(
            "Config expected at {} but not found",
            config_path
                .canonicalize()
                .unwrap_or_else(|_| config_path.clone())
                .display()
        );
    }
    Ok(config_path)
}
